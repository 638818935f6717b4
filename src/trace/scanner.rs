//! Trace line scanning
//!
//! Splits a line into an optional ftrace header and a list of `key=value`
//! tokens. Knows nothing about commands.

use std::sync::OnceLock;

use regex::Regex;

use super::decoded::{EventKind, TraceEvent};

/// `<process>-<pid> [<cpu>] <flags> <timestamp>: nvme_<event>_cmd: <device>:`
fn header_regex() -> &'static Regex {
    static HEADER_REGEX: OnceLock<Regex> = OnceLock::new();
    HEADER_REGEX.get_or_init(|| {
        Regex::new(
            r"^\s*(.+?)-(\d+)\s+\[(\d+)\]\s+(?:(\S+)\s+)?(\d+(?:\.\d+)?):\s+nvme_(setup|complete)_cmd:\s+([^\s:]+):",
        )
        .expect("ftrace header pattern is valid")
    })
}

fn token_regex() -> &'static Regex {
    static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
    TOKEN_REGEX.get_or_init(|| {
        Regex::new(r"([A-Za-z_][A-Za-z0-9_]*)=([^\s,;()]*)").expect("token pattern is valid")
    })
}

/// One `key=value` pair, borrowed from the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

/// Result of scanning one line
#[derive(Debug, Clone)]
pub(crate) struct ScannedLine<'a> {
    pub event: Option<TraceEvent>,
    tokens: Vec<Token<'a>>,
}

impl<'a> ScannedLine<'a> {
    /// First value for `key` (case-insensitive)
    pub fn find(&self, key: &str) -> Option<&'a str> {
        self.tokens
            .iter()
            .find(|t| t.key.eq_ignore_ascii_case(key))
            .map(|t| t.value)
    }

    #[cfg(test)]
    pub fn tokens(&self) -> &[Token<'a>] {
        &self.tokens
    }
}

/// Scan a whole line; never fails
pub(crate) fn scan(line: &str) -> ScannedLine<'_> {
    let tokens = token_regex()
        .captures_iter(line)
        .filter_map(|caps| {
            let key = caps.get(1)?.as_str();
            let value = caps.get(2)?.as_str();
            Some(Token { key, value })
        })
        .collect();

    ScannedLine {
        event: scan_header(line),
        tokens,
    }
}

fn scan_header(line: &str) -> Option<TraceEvent> {
    let caps = header_regex().captures(line)?;

    let event = match caps.get(6)?.as_str() {
        "setup" => EventKind::Setup,
        _ => EventKind::Complete,
    };

    Some(TraceEvent {
        process: caps.get(1)?.as_str().trim().to_string(),
        pid: caps.get(2)?.as_str().parse().ok()?,
        cpu: caps.get(3)?.as_str().parse().ok()?,
        flags: caps.get(4).map(|m| m.as_str().to_string()).unwrap_or_default(),
        timestamp: caps.get(5)?.as_str().to_string(),
        event,
        device: caps.get(7)?.as_str().to_string(),
    })
}

/// Decimal, or hex with a `0x` prefix
///
/// Digits only; a sign is malformed.
pub(crate) fn parse_number(text: &str) -> Option<u64> {
    match strip_hex_prefix(text) {
        Some(digits) => parse_hex_digits(digits),
        None if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) => text.parse().ok(),
        None => None,
    }
}

/// Hex, `0x` prefix optional
pub(crate) fn parse_hex(text: &str) -> Option<u64> {
    parse_hex_digits(strip_hex_prefix(text).unwrap_or(text))
}

fn parse_hex_digits(digits: &str) -> Option<u64> {
    // from_str_radix accepts a leading '+'
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u64::from_str_radix(digits, 16).ok()
}

fn strip_hex_prefix(text: &str) -> Option<&str> {
    text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))
}
