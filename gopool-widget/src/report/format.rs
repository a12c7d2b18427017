//! Display formatting for widget values.

const UNITS: [(f64, &str); 5] = [
    (1e15, "P"),
    (1e12, "T"),
    (1e9, "G"),
    (1e6, "M"),
    (1e3, "k"),
];

/// Format `n` with the largest metric suffix it reaches.
///
/// Scaled values get two decimals ("1.50k"); values below 1000 are printed
/// as-is with no suffix ("500", "0.5").
pub fn format_units(n: f64) -> String {
    match UNITS.iter().find(|(threshold, _)| n >= *threshold) {
        Some((threshold, suffix)) => format!("{:.2}{}", n / threshold, suffix),
        None => format!("{n}"),
    }
}

/// Format whole seconds as "{d}d {h}h {m}m {s}s".
pub fn format_uptime(total_seconds: u64) -> String {
    let (days, rem) = (total_seconds / 86_400, total_seconds % 86_400);
    let (hours, rem) = (rem / 3_600, rem % 3_600);
    let (minutes, seconds) = (rem / 60, rem % 60);
    format!("{days}d {hours}h {minutes}m {seconds}s")
}

/// Shares per second from shares per minute, to 5 decimals.
///
/// Zero input yields exactly 0.0.
pub fn shares_per_second(shares_per_minute: f64) -> f64 {
    if shares_per_minute == 0.0 {
        return 0.0;
    }
    round_to(shares_per_minute / 60.0, 5)
}

/// Round to `places` decimals.
///
/// Rounds the exact binary value, with ties going to even, so 2.675 (stored
/// as 2.67499...) becomes 2.67 and 0.125 becomes 0.12.
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0.0, "0")]
    #[test_case(30.0, "30")]
    #[test_case(500.0, "500")]
    #[test_case(999.5, "999.5")]
    #[test_case(1_000.0, "1.00k")]
    #[test_case(1_500.0, "1.50k")]
    #[test_case(2_500_000.0, "2.50M")]
    #[test_case(1e9, "1.00G")]
    #[test_case(3.25e12, "3.25T")]
    #[test_case(1.2e15, "1.20P")]
    #[test_case(2.5e18, "2500.00P" ; "beyond peta stays in P")]
    fn units(n: f64, expected: &str) {
        assert_eq!(format_units(n), expected);
    }

    #[test_case(0, "0d 0h 0m 0s")]
    #[test_case(59, "0d 0h 0m 59s")]
    #[test_case(61, "0d 0h 1m 1s")]
    #[test_case(90_061, "1d 1h 1m 1s")]
    #[test_case(86_400 * 400 + 3_599, "400d 0h 59m 59s")]
    fn uptime(seconds: u64, expected: &str) {
        assert_eq!(format_uptime(seconds), expected);
    }

    #[test]
    fn zero_shares_per_minute_is_exactly_zero() {
        let sps = shares_per_second(0.0);
        assert_eq!(sps, 0.0);
        assert!(sps.is_sign_positive());
    }

    #[test_case(2.675, 2, 2.67 ; "binary value below the written tie")]
    #[test_case(0.125, 2, 0.12 ; "exact tie goes to even")]
    #[test_case(0.375, 2, 0.38 ; "exact tie goes to even upward")]
    #[test_case(12.3456, 2, 12.35)]
    #[test_case(-1.005, 2, -1.0 ; "negative below the written tie")]
    #[test_case(30.0, 2, 30.0)]
    fn rounding(value: f64, places: usize, expected: f64) {
        assert_eq!(round_to(value, places), expected);
    }

    #[test_case(30.0, 0.5)]
    #[test_case(1.0, 0.01667)]
    #[test_case(7.0, 0.11667)]
    fn derived_shares_per_second(spm: f64, expected: f64) {
        assert_eq!(shares_per_second(spm), expected);
    }
}
