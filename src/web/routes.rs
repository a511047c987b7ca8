//! Request routing for the HTTP API.
//!
//! [`route`] is a pure function from method and URL to a [`Reply`], so the
//! whole API can be exercised without binding a socket.

use super::query::{parse_bool_query, split_url_and_query};
use crate::config::Config;
use crate::error::TailError;
use crate::tail::{self, CancelToken, Cursor, TailLine, TailRequest};
use serde::Serialize;
use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};
use tiny_http::Method;

const JSON: &str = "application/json; charset=utf-8";
const PLAIN: &str = "text/plain; charset=utf-8";

const LOGS_PATH: &str = "/api/v1/logs";
const PAGE_PATH: &str = "/api/v1/page";
const PEEK_PATH: &str = "/api/v1/peek";

/// Everything a request handler needs, shared for the life of the server.
pub struct ServerContext {
    /// Canonical log root
    root: PathBuf,
    config: Config,
    cancel: CancelToken,
}

impl ServerContext {
    /// Fails when the configured log root cannot be resolved.
    pub fn new(config: Config, cancel: CancelToken) -> io::Result<Self> {
        let root = config.log_root.canonicalize()?;
        Ok(Self {
            root,
            config,
            cancel,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a client supplied name to a file under the log root.
    fn resolve_filename(&self, name: &str) -> Result<PathBuf, ApiError> {
        if name.is_empty() {
            return Err(ApiError::BadRequest("'filename' must not be empty".into()));
        }
        let relative = Path::new(name);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(ApiError::BadRequest(format!(
                "'filename' must be a relative path inside the log root: {}",
                name
            )));
        }

        let joined = self.root.join(relative);
        // Resolve symlinks and re-check so a link cannot point outside the root
        let canonical = joined.canonicalize().map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => ApiError::NotFound(format!("no such log file: {}", name)),
            _ => ApiError::Internal(format!("cannot resolve {}: {}", name, err)),
        })?;
        if !canonical.starts_with(&self.root) {
            return Err(ApiError::BadRequest(format!(
                "'filename' resolves outside the log root: {}",
                name
            )));
        }
        if !canonical.is_file() {
            return Err(ApiError::NotFound(format!("not a regular file: {}", name)));
        }
        Ok(canonical)
    }
}

/// A fully formed HTTP response, independent of the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
    pub headers: Vec<(&'static str, String)>,
}

impl Reply {
    fn new(status: u16, content_type: &'static str, body: String) -> Self {
        Self {
            status,
            content_type,
            body,
            headers: vec![("Access-Control-Allow-Origin", "*".to_string())],
        }
    }

    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        Self::new(status, JSON, to_json_string(value))
    }

    fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("server is shutting down")]
    Unavailable,
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::MethodNotAllowed => 405,
            ApiError::Unavailable => 503,
            ApiError::Internal(_) => 500,
        }
    }

    fn into_reply(self) -> Reply {
        let reply = Reply::json(
            self.status(),
            &BasicResponse {
                ok: false,
                message: Some(self.to_string()),
            },
        );
        match self {
            ApiError::MethodNotAllowed => reply.with_header("Allow", "GET, OPTIONS"),
            _ => reply,
        }
    }
}

impl From<TailError> for ApiError {
    fn from(err: TailError) -> Self {
        match err {
            TailError::FileNotFound { .. } => ApiError::NotFound(err.to_string()),
            TailError::Cancelled => ApiError::Unavailable,
            err if err.is_bad_input() => ApiError::BadRequest(err.to_string()),
            err => ApiError::Internal(err.to_string()),
        }
    }
}

#[derive(Serialize)]
struct BasicResponse {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Serialize)]
struct PageResponse {
    lines: Vec<String>,
    cursor: Cursor,
    exhausted: bool,
}

/// Parameters shared by the read endpoints.
struct ReadParams {
    path: PathBuf,
    request: TailRequest,
    raw: bool,
}

pub fn route(method: &Method, url: &str, ctx: &ServerContext) -> Reply {
    let (path, query) = split_url_and_query(url);

    let known = matches!(path, LOGS_PATH | PAGE_PATH | PEEK_PATH);
    if *method == Method::Options {
        return Reply::new(204, PLAIN, String::new())
            .with_header("Access-Control-Allow-Methods", "GET, OPTIONS")
            .with_header("Access-Control-Allow-Headers", "Content-Type")
            .with_header("Access-Control-Expose-Headers", "X-Next-Cursor, X-Exhausted");
    }
    if !known {
        return ApiError::NotFound(format!("no route for {}", path)).into_reply();
    }
    if *method != Method::Get {
        return ApiError::MethodNotAllowed.into_reply();
    }

    let result = match path {
        LOGS_PATH => logs(&query, ctx),
        PAGE_PATH => page(&query, ctx),
        _ => peek(&query, ctx),
    };
    result.unwrap_or_else(|err| {
        tracing::debug!(path, error = %err, "request failed");
        err.into_reply()
    })
}

/// `GET /api/v1/logs`: JSON array of lines, pagination state in headers.
fn logs(query: &HashMap<String, String>, ctx: &ServerContext) -> Result<Reply, ApiError> {
    let params = read_params(query, ctx)?;
    let page = tail::tail_with_cancel(&params.path, &params.request, &ctx.cancel)?;
    let lines = render(&page.lines, params.raw);

    Ok(Reply::json(200, &lines)
        .with_header("X-Next-Cursor", page.cursor.to_string())
        .with_header("X-Exhausted", page.exhausted.to_string()))
}

/// `GET /api/v1/page`: lines plus pagination state in one object.
fn page(query: &HashMap<String, String>, ctx: &ServerContext) -> Result<Reply, ApiError> {
    let params = read_params(query, ctx)?;
    let page = tail::tail_with_cancel(&params.path, &params.request, &ctx.cancel)?;

    Ok(Reply::json(
        200,
        &PageResponse {
            lines: render(&page.lines, params.raw),
            cursor: page.cursor,
            exhausted: page.exhausted,
        },
    ))
}

/// `GET /api/v1/peek`: best effort, single window, never paginated.
fn peek(query: &HashMap<String, String>, ctx: &ServerContext) -> Result<Reply, ApiError> {
    let params = read_params(query, ctx)?;
    let lines = tail::peek(&params.path, &params.request)?;
    Ok(Reply::json(200, &render(&lines, params.raw)))
}

fn read_params(
    query: &HashMap<String, String>,
    ctx: &ServerContext,
) -> Result<ReadParams, ApiError> {
    let config = &ctx.config;

    let count = match query.get("size") {
        None => config.default_lines,
        Some(raw) => match raw.trim().parse::<usize>() {
            Ok(0) | Err(_) => {
                return Err(ApiError::BadRequest(format!(
                    "'size' must be a positive integer, got '{}'",
                    raw
                )))
            }
            Ok(n) if n > config.max_lines => {
                return Err(ApiError::BadRequest(format!(
                    "'size' {} exceeds the maximum of {}",
                    n, config.max_lines
                )))
            }
            Ok(n) => n,
        },
    };

    let cursor = match query.get("cursor") {
        None => Cursor::START,
        Some(raw) => raw.parse::<Cursor>().map_err(|_| {
            ApiError::BadRequest(format!(
                "'cursor' must be a non-negative integer, got '{}'",
                raw
            ))
        })?,
    };

    let filename = query
        .get("filename")
        .or(config.default_file.as_ref())
        .ok_or_else(|| ApiError::BadRequest("missing 'filename' query parameter".into()))?;
    let path = ctx.resolve_filename(filename)?;

    let mut request = TailRequest::new(count)
        .cursor(cursor)
        .window_size(config.window_size);
    if let Some(keyword) = query.get("keyword").filter(|k| !k.is_empty()) {
        request = request.keyword(keyword.clone());
    }

    Ok(ReadParams {
        path,
        request,
        raw: parse_bool_query(query, "raw"),
    })
}

fn render(lines: &[TailLine], raw: bool) -> Vec<String> {
    lines
        .iter()
        .map(|line| {
            if raw {
                line.raw_text().into_owned()
            } else {
                line.text().into_owned()
            }
        })
        .collect()
}

fn to_json_string<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}
