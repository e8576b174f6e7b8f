// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Time limits written as `500ms`, `30s`, `1.5s` or `2m`.

use std::time::Duration;

/// Parse a time limit.
///
/// Milliseconds are whole numbers; seconds and minutes may be fractional.
/// Values beyond what [`Duration`] can hold are rejected.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let text = input.trim();
    if text.is_empty() {
        return Err("empty duration string".to_string());
    }
    let invalid = || format!("invalid duration: {text}");

    if let Some(millis) = text.strip_suffix("ms") {
        return millis
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| invalid());
    }

    let (number, unit_secs) = match (text.strip_suffix('s'), text.strip_suffix('m')) {
        (Some(secs), _) => (secs, 1.0),
        (None, Some(mins)) => (mins, 60.0),
        (None, None) => {
            return Err(format!(
                "invalid duration format: {text} (use 30s, 500ms, or 1m)"
            ));
        }
    };

    let value: f64 = number.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    if value < 0.0 {
        return Err(format!("negative duration: {text}"));
    }

    Duration::try_from_secs_f64(value * unit_secs)
        .map_err(|_| format!("duration out of range: {text}"))
}

#[cfg(test)]
#[path = "duration_tests.rs"]
mod tests;
