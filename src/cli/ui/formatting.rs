use chrono::NaiveDate;

/// Formats an amount with two decimals and thousands separators, e.g. `$1,234.50`.
pub fn format_money(symbol: &str, amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{sign}{symbol}{}.{cents}", group_thousands(whole))
}

/// Formats a plain number with two decimals.
pub fn format_decimal(value: f64) -> String {
    format!("{:.2}", value)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_uses_separators_and_sign() {
        assert_eq!(format_money("$", 0.0), "$0.00");
        assert_eq!(format_money("$", 1234.5), "$1,234.50");
        assert_eq!(format_money("$", 1_000_000.0), "$1,000,000.00");
        assert_eq!(format_money("S/", -15.0), "-S/15.00");
        assert_eq!(format_money("$", 999.999), "$1,000.00");
    }
}
