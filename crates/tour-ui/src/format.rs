/// `USD 1,200` for whole amounts, `USD 1,200.50` otherwise.
pub fn format_price(amount: f64, currency: &str) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, c) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if fraction == 0 {
        format!("{currency} {sign}{grouped}")
    } else {
        format!("{currency} {sign}{grouped}.{fraction:02}")
    }
}

pub fn format_duration(days: u32) -> String {
    match days {
        0 => "Day trip".into(),
        1 => "1 day".into(),
        n => {
            let nights = n - 1;
            format!("{n} days / {nights} night{}", if nights == 1 { "" } else { "s" })
        }
    }
}

/// Keeps the date part of an RFC 3339 timestamp.
pub fn format_date(timestamp: &str) -> String {
    timestamp
        .split_once('T')
        .map(|(date, _)| date)
        .unwrap_or(timestamp)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_groups_thousands() {
        assert_eq!(format_price(1200.0, "USD"), "USD 1,200");
        assert_eq!(format_price(1234567.5, "EUR"), "EUR 1,234,567.50");
        assert_eq!(format_price(999.0, "USD"), "USD 999");
        assert_eq!(format_price(0.0, "USD"), "USD 0");
        assert_eq!(format_price(-15.25, "USD"), "USD -15.25");
    }

    #[test]
    fn duration_counts_nights() {
        assert_eq!(format_duration(0), "Day trip");
        assert_eq!(format_duration(1), "1 day");
        assert_eq!(format_duration(2), "2 days / 1 night");
        assert_eq!(format_duration(7), "7 days / 6 nights");
    }

    #[test]
    fn date_drops_time() {
        assert_eq!(format_date("2024-05-01T08:30:00Z"), "2024-05-01");
        assert_eq!(format_date("2024-05-01"), "2024-05-01");
    }
}
