//! Formatting helpers for presenting roundup metrics.

/// `12.3 km`, or `12 km` when the first decimal is zero.
pub fn format_distance_km(value: f64) -> String {
    let rounded = (finite_or_zero(value) * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0} km")
    } else {
        format!("{rounded:.1} km")
    }
}

/// Whole hours and minutes: `3h 7m`.
pub fn format_duration_hm(seconds: f64) -> String {
    let total = finite_or_zero(seconds).max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    format!("{hours}h {minutes}m")
}

pub fn format_elevation_m(value: f64) -> String {
    format!("{:.0} m", finite_or_zero(value).round())
}

/// 24-hour clock label for an hour of the day.
pub fn format_hour(hour: u8) -> String {
    format!("{:02}:00", hour.min(23))
}

/// Split-list percentages are shown exactly as the server computed them.
pub fn format_percentage(value: f64) -> String {
    let value = finite_or_zero(value);
    if value.fract() == 0.0 {
        format!("{value:.0}%")
    } else {
        format!("{value:.1}%")
    }
}

pub fn first_name(full_name: &str) -> &str {
    full_name.split_whitespace().next().unwrap_or("")
}

/// Uppercase first letter of `name`, `A` when there is none.
pub fn initial(name: &str) -> char {
    name.trim()
        .chars()
        .next()
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or('A')
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_month_values() {
        assert_eq!(format_distance_km(0.0), "0 km");
        assert_eq!(format_duration_hm(0.0), "0h 0m");
        assert_eq!(format_elevation_m(0.0), "0 m");
    }

    #[test]
    fn distance_keeps_one_decimal_when_needed() {
        assert_eq!(format_distance_km(21.54), "21.5 km");
        assert_eq!(format_distance_km(42.0), "42 km");
        assert_eq!(format_distance_km(f64::NAN), "0 km");
    }

    #[test]
    fn duration_drops_seconds() {
        assert_eq!(format_duration_hm(7260.0), "2h 1m");
        assert_eq!(format_duration_hm(59.0), "0h 0m");
    }

    #[test]
    fn names() {
        assert_eq!(first_name("  Ana  María López "), "Ana");
        assert_eq!(first_name(""), "");
        assert_eq!(initial("émile"), 'É');
        assert_eq!(initial("   "), 'A');
    }

    #[test]
    fn percentages_are_not_renormalised() {
        assert_eq!(format_percentage(33.3), "33.3%");
        assert_eq!(format_percentage(100.0), "100%");
    }
}
