// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use serde_json::Value;

/// Fixed-point with `,` thousands separators. Non-finite input renders as zero.
pub fn format_grouped(value: f64, decimals: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    // No "-0.00" for values that round to zero.
    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !is_zero {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// US dollars, two decimals, sign ahead of the symbol: `-$1,234.50`.
pub fn format_usd(value: f64) -> String {
    let body = format_grouped(value, 2);
    match body.strip_prefix('-') {
        Some(abs) => format!("-${abs}"),
        None => format!("${body}"),
    }
}

/// Display text for a loosely typed backend value.
pub fn format_loose(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
