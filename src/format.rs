// Display formatting for dollar amounts and percentages.

/// Condensed form for tight spots in the diagram: $0, $842, $12.3K, $1.25M.
pub fn format_dollar(amount: i64) -> String {
    let abs = amount.abs();
    if abs >= 1_000_000 {
        format!("${:.2}M", amount as f64 / 1_000_000.0)
    } else if abs >= 1_000 {
        format!("${:.1}K", amount as f64 / 1_000.0)
    } else {
        format!("${amount}")
    }
}

/// Full comma-grouped form for the CLI summary: $1,234,567.
pub fn format_dollar_full(amount: i64) -> String {
    let digits = amount.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Fraction to display percent: 0.255 -> "25.5%".
pub fn format_percentage(fraction: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, fraction * 100.0)
}
