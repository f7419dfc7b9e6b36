use chrono::NaiveDate;

/// Currency display, e.g. `₱1,234.56`. Amounts are day-to-day bill figures;
/// two decimals with thousands grouping is all the view needs.
pub fn format_amount(value: f64, symbol: &str) -> String {
    let negative = value < 0.0;
    let cents = format!("{:.2}", value.abs());
    let (int_part, frac_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));
    let grouped = group_thousands(int_part);
    if negative {
        format!("-{symbol}{grouped}.{frac_part}")
    } else {
        format!("{symbol}{grouped}.{frac_part}")
    }
}

pub fn format_optional_amount(value: Option<f64>, symbol: &str) -> String {
    match value {
        Some(amount) => format_amount(amount, symbol),
        None => "-".to_string(),
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (position, ch) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
