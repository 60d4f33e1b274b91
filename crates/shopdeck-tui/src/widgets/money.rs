//! Money and age formatting helpers.

/// Format an amount as dollars with two decimals (e.g., "$129.50").
pub fn fmt_money(amount: f64) -> String {
    if amount.is_finite() {
        format!("${amount:.2}")
    } else {
        "$0.00".into()
    }
}

/// Format seconds into a compact age string (e.g., "just now", "42s ago").
pub fn fmt_age(secs: u64) -> String {
    if secs < 5 {
        "just now".into()
    } else if secs < 60 {
        format!("{secs}s ago")
    } else {
        format!("{}m ago", secs / 60)
    }
}

/// Format a duration in milliseconds for the status line.
pub fn fmt_millis(millis: u128) -> String {
    if millis < 1_000 {
        format!("{millis} ms")
    } else {
        #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
        let secs = millis as f64 / 1_000.0;
        format!("{secs:.1} s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_is_always_two_decimals() {
        assert_eq!(fmt_money(0.0), "$0.00");
        assert_eq!(fmt_money(129.5), "$129.50");
        assert_eq!(fmt_money(25.555), "$25.56");
        assert_eq!(fmt_money(f64::NAN), "$0.00");
    }

    #[test]
    fn ages_are_compact() {
        assert_eq!(fmt_age(2), "just now");
        assert_eq!(fmt_age(42), "42s ago");
        assert_eq!(fmt_age(150), "2m ago");
    }

    #[test]
    fn millis_switch_to_seconds() {
        assert_eq!(fmt_millis(23), "23 ms");
        assert_eq!(fmt_millis(1_500), "1.5 s");
    }
}
