//! Number formatting for table cells and cards.

/// Thousands-separated number with up to `max_fraction` digits, trailing
/// zeros dropped: `1234567.5` → `1,234,567.5`.
pub fn group_thousands(value: f64, max_fraction: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let formatted = format!("{:.*}", max_fraction, value.abs());
    let (int_part, frac_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    let is_zero = int_part.chars().all(|c| c == '0') && frac.is_empty();
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Dollar amount as shown in the table.
pub fn usd(value: f64) -> String {
    format!("${}", group_thousands(value, 3))
}

/// 24h change with two decimals, dash when unknown.
pub fn percent_change(change: Option<f64>) -> String {
    match change {
        Some(pct) => format!("{:.2}%", pct),
        None => "—".to_string(),
    }
}
