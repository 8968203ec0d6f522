//! Line-oriented pattern dataset loader
//!
//! Each record is `<two-letter code><delimiter><regex body>`. Blank lines and
//! lines starting with `#` are ignored. Bodies are stored unanchored and
//! compiled as `^(?:body)$`, so every match is a full-string match.
//!
//! Loading is all-or-nothing: the first malformed line, duplicate code or
//! invalid pattern aborts with a [`ConfigError`].

use std::path::Path;

use regex::Regex;

use crate::engine::Registry;
use crate::foundation::ConfigError;
use crate::validators::postal_code::MatchesPattern;

/// The postal-code dataset compiled into the crate.
pub const EMBEDDED_POSTAL_CODES: &str = include_str!("../../data/postal_codes.txt");

/// Default field delimiter.
pub const DEFAULT_DELIMITER: char = ';';

/// One parsed dataset record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
    /// 1-based line number in the source text.
    pub line: usize,
    /// Lowercased country code.
    pub code: String,
    /// Unanchored regex body.
    pub body: &'a str,
}

/// Parses dataset text into records without compiling the patterns.
pub fn parse(text: &str, delimiter: char) -> Result<Vec<Record<'_>>, ConfigError> {
    let mut records: Vec<Record<'_>> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((code, body)) = trimmed.split_once(delimiter) else {
            return Err(ConfigError::MalformedDataset {
                line,
                reason: format!("missing `{delimiter}` delimiter"),
            });
        };

        let code = code.trim();
        if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(ConfigError::MalformedDataset {
                line,
                reason: format!("`{code}` is not a two-letter country code"),
            });
        }

        let body = body.trim();
        if body.is_empty() {
            return Err(ConfigError::MalformedDataset {
                line,
                reason: "empty pattern".to_string(),
            });
        }
        if body.starts_with('^') || ends_with_anchor(body) {
            return Err(ConfigError::MalformedDataset {
                line,
                reason: "pattern must not carry its own anchors".to_string(),
            });
        }

        let code = code.to_ascii_lowercase();
        if records.iter().any(|r| r.code == code) {
            return Err(ConfigError::DuplicateEntry { key: code, line });
        }

        records.push(Record { line, code, body });
    }

    Ok(records)
}

/// Whether `body` ends in an unescaped `$`.
fn ends_with_anchor(body: &str) -> bool {
    let Some(rest) = body.strip_suffix('$') else {
        return false;
    };
    let escapes = rest.bytes().rev().take_while(|&b| b == b'\\').count();
    escapes % 2 == 0
}

/// Compiles an unanchored body into a full-string matcher.
pub fn compile_anchored(key: &str, body: &str) -> Result<Regex, ConfigError> {
    Regex::new(&format!("^(?:{body})$")).map_err(|source| ConfigError::InvalidPattern {
        key: key.to_string(),
        source,
    })
}

/// Parses and compiles dataset text into a postal-code registry.
pub fn load_postal_codes(
    text: &str,
    delimiter: char,
) -> Result<Registry<MatchesPattern>, ConfigError> {
    let mut registry = Registry::new("postal_code");
    for record in parse(text, delimiter)? {
        let pattern = compile_anchored(&record.code, record.body)?;
        registry.insert(&record.code, MatchesPattern::new(pattern));
    }

    tracing::debug!(countries = registry.len(), "postal code dataset loaded");
    Ok(registry)
}

/// Reads and loads a dataset file.
pub fn load_postal_codes_file(
    path: &Path,
    delimiter: char,
) -> Result<Registry<MatchesPattern>, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_postal_codes(&text, delimiter)
}
