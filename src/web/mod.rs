//! HTTP front end: a single-threaded `tiny_http` loop serving the tail API.

pub mod query;
pub mod routes;

pub use routes::{route, Reply, ServerContext};

use crate::config::Config;
use crate::signal::setup_shutdown_handlers;
use crate::tail::CancelToken;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};
use tiny_http::{Header, Response, Server, StatusCode};

const TICK_INTERVAL_MS: u64 = 150;

/// Serve until SIGINT/SIGTERM. Returns an exit code on failure.
pub fn run(config: Config) -> Result<(), i32> {
    let shutdown_flag = match setup_shutdown_handlers() {
        Ok(flag) => flag,
        Err(err) => {
            eprintln!("error: Failed to set signal handlers: {}", err);
            return Err(1);
        }
    };

    let bind_addr = config.bind_addr();
    let log_root = config.log_root.clone();
    let window_size = config.window_size;
    let ctx = match ServerContext::new(config, CancelToken::from_flag(shutdown_flag.clone())) {
        Ok(ctx) => ctx,
        Err(err) => {
            eprintln!(
                "error: Cannot use log root {}: {}",
                log_root.display(),
                err
            );
            return Err(1);
        }
    };

    let server = match Server::http(&bind_addr) {
        Ok(server) => server,
        Err(err) => {
            eprintln!("error: Failed to bind web server on {}: {}", bind_addr, err);
            return Err(1);
        }
    };

    tracing::info!(
        addr = %bind_addr,
        root = %ctx.root().display(),
        window_size,
        "backtail listening"
    );
    println!("backtail serving {} at http://{}/", ctx.root().display(), bind_addr);
    println!("Press Ctrl+C to stop.");

    while !shutdown_flag.load(Ordering::SeqCst) {
        match server.recv_timeout(Duration::from_millis(TICK_INTERVAL_MS)) {
            Ok(Some(request)) => handle_request(request, &ctx),
            Ok(None) => {}
            Err(err) => {
                tracing::error!(error = %err, "web server receive error");
                return Err(1);
            }
        }
    }

    tracing::info!("shutting down");
    Ok(())
}

fn handle_request(request: tiny_http::Request, ctx: &ServerContext) {
    let started = Instant::now();
    let method = request.method().clone();
    let url = request.url().to_string();

    let reply = route(&method, &url, ctx);
    tracing::info!(
        method = ?method,
        url = %url,
        status = reply.status,
        elapsed_us = started.elapsed().as_micros() as u64,
        "request"
    );

    if let Err(err) = request.respond(make_response(reply)) {
        tracing::warn!(error = %err, "failed to send response");
    }
}

fn make_response(reply: Reply) -> Response<std::io::Cursor<Vec<u8>>> {
    let mut response = Response::from_string(reply.body).with_status_code(StatusCode(reply.status));
    if let Ok(header) = Header::from_bytes("Content-Type", reply.content_type) {
        response = response.with_header(header);
    }
    for (name, value) in &reply.headers {
        if let Ok(header) = Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            response = response.with_header(header);
        }
    }
    response
}
