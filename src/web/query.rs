//! Query string parsing for the HTTP API.

use std::collections::HashMap;

pub fn split_url_and_query(url: &str) -> (&str, HashMap<String, String>) {
    if let Some(idx) = url.find('?') {
        (&url[..idx], parse_query_params(&url[idx + 1..]))
    } else {
        (url, HashMap::new())
    }
}

/// Parse `a=1&b=two` into a map. Keys and values are percent-decoded; a later
/// duplicate key wins.
pub fn parse_query_params(query: &str) -> HashMap<String, String> {
    let mut out = HashMap::new();
    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        if let Some((k, v)) = pair.split_once('=') {
            out.insert(percent_decode(k), percent_decode(v));
        } else {
            out.insert(percent_decode(pair), String::new());
        }
    }
    out
}

/// Decode `%XX` escapes and `+` as space. Malformed escapes are kept as-is;
/// invalid UTF-8 is replaced.
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => {
                let hex = bytes.get(i + 1..i + 3).and_then(|pair| {
                    let hi = (pair[0] as char).to_digit(16)?;
                    let lo = (pair[1] as char).to_digit(16)?;
                    Some((hi * 16 + lo) as u8)
                });
                match hex {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                        continue;
                    }
                    None => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// `true`, `1` and `yes` are truthy; anything else, or a missing key, is not.
pub fn parse_bool_query(query: &HashMap<String, String>, key: &str) -> bool {
    query
        .get(key)
        .is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_without_query() {
        let (path, query) = split_url_and_query("/api/v1/logs");
        assert_eq!(path, "/api/v1/logs");
        assert!(query.is_empty());
    }

    #[test]
    fn test_split_with_query() {
        let (path, query) = split_url_and_query("/api/v1/logs?size=5&filename=app.log&raw");
        assert_eq!(path, "/api/v1/logs");
        assert_eq!(query.get("size").map(String::as_str), Some("5"));
        assert_eq!(query.get("filename").map(String::as_str), Some("app.log"));
        assert_eq!(query.get("raw").map(String::as_str), Some(""));
    }

    #[test]
    fn test_decodes_keyword() {
        let query = parse_query_params("keyword=connection+reset%20by%3Dpeer");
        assert_eq!(
            query.get("keyword").map(String::as_str),
            Some("connection reset by=peer")
        );
    }

    #[test]
    fn test_decodes_utf8_sequences() {
        assert_eq!(percent_decode("caf%C3%A9"), "café");
    }

    #[test]
    fn test_malformed_escapes_are_kept() {
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz1"), "%zz1");
        assert_eq!(percent_decode("%4"), "%4");
    }

    #[test]
    fn test_bool_query() {
        let query = parse_query_params("raw=true&other=0&loud=YES");
        assert!(parse_bool_query(&query, "raw"));
        assert!(!parse_bool_query(&query, "other"));
        assert!(parse_bool_query(&query, "loud"));
        assert!(!parse_bool_query(&query, "missing"));
    }
}
