//! Display formatting shared by the text report and the web page.

/// Format with thousands separators, e.g. `1234567.891` with 2 decimals
/// becomes `1,234,567.89`.
pub fn with_separators(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// `$1,234.56`
pub fn usd(value: f64, decimals: usize) -> String {
    let s = with_separators(value, decimals);
    match s.strip_prefix('-') {
        Some(rest) => format!("-${rest}"),
        None => format!("${s}"),
    }
}

/// `1.23%`
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value)
}

pub fn ratio(value: f64) -> String {
    format!("{:.2}", value)
}
