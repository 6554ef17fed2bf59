//! Display arithmetic shared by the templates.

/// Share of the goal reached, rounded and clamped to `0..=100`.
///
/// A zero, negative or non-finite target yields `0`.
pub fn progress_percentage(total_raised: f64, target_amount: f64) -> u8 {
    if !(target_amount.is_finite() && target_amount > 0.0) || !total_raised.is_finite() {
        return 0;
    }

    let percentage = (total_raised / target_amount * 100.0).round();
    percentage.clamp(0.0, 100.0) as u8
}

/// Mean donation, with the donor count floored at one.
pub fn average_donation(total_raised: f64, donor_count: u64) -> f64 {
    total_raised / donor_count.max(1) as f64
}

/// Two decimals, halves rounded away from zero.
pub fn money(amount: f64) -> String {
    format!("{:.2}", (amount * 100.0).round() / 100.0)
}

const MILLIS_PER_DAY: u64 = 1000 * 60 * 60 * 24;

pub fn duration_text(campaign_duration_ms: Option<u64>) -> String {
    match campaign_duration_ms {
        Some(ms) if ms > 0 => format!("{} days", ms / MILLIS_PER_DAY),
        _ => "your campaign period".to_string(),
    }
}

pub fn plural(count: u64) -> &'static str {
    if count == 1 { "" } else { "s" }
}

/// Optional text is only shown when it carries something.
pub fn present(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_clamped_at_one_hundred() {
        assert_eq!(progress_percentage(150.0, 100.0), 100);
        assert_eq!(progress_percentage(100.0, 100.0), 100);
    }

    #[test]
    fn progress_rounds_to_nearest_integer() {
        assert_eq!(progress_percentage(333.0, 1000.0), 33);
        assert_eq!(progress_percentage(337.0, 1000.0), 34);
        assert_eq!(progress_percentage(1.0, 3.0), 33);
    }

    #[test]
    fn progress_with_zero_target_is_zero() {
        assert_eq!(progress_percentage(50.0, 0.0), 0);
        assert_eq!(progress_percentage(50.0, -10.0), 0);
        assert_eq!(progress_percentage(50.0, f64::NAN), 0);
    }

    #[test]
    fn progress_never_goes_negative() {
        assert_eq!(progress_percentage(-20.0, 100.0), 0);
    }

    #[test]
    fn average_treats_zero_donors_as_one() {
        assert_eq!(average_donation(120.0, 0), 120.0);
        assert_eq!(average_donation(120.0, 4), 30.0);
    }

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(money(25.0), "25.00");
        assert_eq!(money(1234.5), "1234.50");
        assert_eq!(money(19.999), "20.00");
    }

    #[test]
    fn money_rounds_exact_halves_up() {
        assert_eq!(money(10.125), "10.13");
        assert_eq!(money(0.125), "0.13");
        assert_eq!(money(2.5), "2.50");
    }

    #[test]
    fn duration_is_whole_days() {
        assert_eq!(duration_text(Some(MILLIS_PER_DAY * 30 + 5_000)), "30 days");
        assert_eq!(duration_text(Some(0)), "your campaign period");
        assert_eq!(duration_text(None), "your campaign period");
    }

    #[test]
    fn plural_suffix() {
        assert_eq!(plural(1), "");
        assert_eq!(plural(0), "s");
        assert_eq!(plural(7), "s");
    }

    #[test]
    fn blank_text_is_not_present() {
        assert_eq!(present(Some("  ")), None);
        assert_eq!(present(Some("")), None);
        assert_eq!(present(Some("hi")), Some("hi"));
        assert_eq!(present(None), None);
    }
}
