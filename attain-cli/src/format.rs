//! Display-time formatting. The engine never rounds; everything here does.

/// `1234.5` -> `"$1,234.50"`, `-3.0` -> `"-$3.00"`.
pub fn currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // -0.004 rounds to 0.00 and must not print a sign
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

pub fn percent(value: f64) -> String {
    format!("{:.1}%", value)
}
