//! # Contact-String Parser
//!
//! A catalog contact string names the catalog file and a preferred
//! protocol: `trivialcatalog_file:<path>?protocol=<name>`.
//!
//! Both extractors are purely lexical. Environment-variable expansion of
//! the path is the caller's responsibility.

use std::sync::OnceLock;

use regex::Regex;

/// Scheme prefix for file-backed catalogs
pub const CATALOG_SCHEME: &str = "trivialcatalog_file:";

fn arg_split() -> &'static Regex {
    static ARG_SPLIT: OnceLock<Regex> = OnceLock::new();
    ARG_SPLIT.get_or_init(|| Regex::new(r"\?protocol=").expect("static regex"))
}

/// Extracts the catalog file path from a contact string.
///
/// Strips the `trivialcatalog_file:` scheme and the `?protocol=...` suffix,
/// then normalizes the remaining path lexically.
pub fn tfc_filename(contact: &str) -> String {
    let value = contact.strip_prefix(CATALOG_SCHEME).unwrap_or(contact);
    let value = arg_split().split(value).next().unwrap_or("");
    normalize_path(value)
}

/// Extracts the preferred protocol from a contact string.
///
/// Returns the value of the `protocol` query parameter, or an empty string
/// when the contact string carries none.
pub fn tfc_protocol(contact: &str) -> String {
    let query = match contact.split_once('?') {
        Some((_, rest)) => rest,
        None => return String::new(),
    };
    let query = query.split('#').next().unwrap_or("");
    for pair in query.split('&') {
        if let Some(value) = pair.strip_prefix("protocol=") {
            return value.to_string();
        }
    }
    String::new()
}

/// Lexical path normalization: collapses redundant separators and resolves
/// `.` and `..` segments without touching the filesystem.
pub fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let absolute = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for comp in path.split('/') {
        match comp {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&"..") => parts.push(".."),
                Some(_) => {
                    parts.pop();
                }
                // ".." above the root collapses away; a relative one is kept
                None => {
                    if !absolute {
                        parts.push("..");
                    }
                }
            },
            comp => parts.push(comp),
        }
    }
    let body = parts.join("/");
    if absolute {
        format!("/{}", body)
    } else if body.is_empty() {
        ".".to_string()
    } else {
        body
    }
}
