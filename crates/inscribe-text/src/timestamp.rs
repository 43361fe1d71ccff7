//! Timestamp substitution for text overlays.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};
use inscribe_core::TimestampZone;

use crate::{TextError, TextResult};

/// Formats frame timestamps with strftime patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampFormatter {
    pub zone: TimestampZone,
    /// Formatted stamps are cut to this many bytes, on a char boundary.
    pub max_len: usize,
}

impl Default for TimestampFormatter {
    fn default() -> Self {
        Self {
            zone: TimestampZone::Utc,
            max_len: 63,
        }
    }
}

impl TimestampFormatter {
    pub fn new(zone: TimestampZone, max_len: usize) -> Self {
        Self { zone, max_len }
    }

    /// Format `timestamp` with `pattern`, e.g. `"%Y-%m-%d %H:%M:%S%.3f"`.
    ///
    /// `%<n>f` with `n` in 1..=9 prints the first `n` digits of the
    /// nanosecond field.
    pub fn format(&self, pattern: &str, timestamp: DateTime<Utc>) -> TextResult<String> {
        let expanded = expand_fraction_widths(pattern, timestamp.timestamp_subsec_nanos());
        let items: Vec<Item<'_>> = StrftimeItems::new(&expanded).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            return Err(TextError::InvalidTimestampFormat(pattern.to_string()));
        }

        let mut out = String::new();
        let written = match self.zone {
            TimestampZone::Utc => write!(out, "{}", timestamp.format_with_items(items.into_iter())),
            TimestampZone::Local => write!(
                out,
                "{}",
                timestamp.with_timezone(&Local).format_with_items(items.into_iter())
            ),
        };
        if written.is_err() {
            return Err(TextError::InvalidTimestampFormat(pattern.to_string()));
        }

        truncate_bytes(&mut out, self.max_len);
        Ok(out)
    }
}

/// Replace every `%<n>f` (n in 1..=9) with the leading `n` digits of `nanos`.
/// chrono only knows the 3, 6 and 9 digit forms.
fn expand_fraction_widths(pattern: &str, nanos: u32) -> String {
    let digits = format!("{:09}", nanos % 1_000_000_000);
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('%') => {
                chars.next();
                out.push_str("%%");
            }
            Some(d @ '1'..='9') => {
                let mut lookahead = chars.clone();
                lookahead.next();
                if lookahead.next() == Some('f') {
                    chars.next();
                    chars.next();
                    let n = d as usize - '0' as usize;
                    out.push_str(&digits[..n]);
                } else {
                    out.push('%');
                }
            }
            _ => out.push('%'),
        }
    }
    out
}

/// The string a text overlay displays: the configured text, followed by the
/// formatted timestamp when `pattern` is non-empty, cut to `max_len`
/// bytes. The rasterizer gives every byte its own glyph slot.
///
/// An unusable pattern contributes nothing; the configured text is still
/// shown.
pub fn compose_text(
    text: &str,
    pattern: &str,
    timestamp: DateTime<Utc>,
    formatter: &TimestampFormatter,
    max_len: usize,
) -> String {
    let mut out = text.to_string();
    if !pattern.is_empty() {
        match formatter.format(pattern, timestamp) {
            Ok(stamp) => out.push_str(&stamp),
            Err(err) => tracing::debug!(%err, "skipping timestamp"),
        }
    }
    truncate_bytes(&mut out, max_len);
    out
}

/// Cut `s` to at most `max_bytes`, backing off to the previous char boundary.
fn truncate_bytes(s: &mut String, max_bytes: usize) {
    if s.len() <= max_bytes {
        return;
    }
    let mut idx = max_bytes;
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    s.truncate(idx);
}
