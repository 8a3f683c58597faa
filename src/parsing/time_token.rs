//! Compact 12-hour time token parsing.
//!
//! The report prints clock times as `H:MM` or `HH:MM` followed by a single
//! meridiem letter, e.g. `7:55a` or `11:08P`.

use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::Regex;
use tracing::warn;

/// `H:MM[a|p]` / `HH:MM[a|p]`, matched against the lowercased token.
static TIME_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{1,2}):([0-9]{2})([ap])$").expect("valid regex"));

/// Parses a 12-hour time token into a time of day.
///
/// The token is trimmed and case-normalized first. Hours must be 1-12 and
/// minutes 00-59. Anything else yields `None` and a warning; the caller's
/// batch is never aborted.
///
/// # Examples
///
/// ```
/// use shift_report_parser::parsing::parse_time_token;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_time_token("11:08a"), NaiveTime::from_hms_opt(11, 8, 0));
/// assert_eq!(parse_time_token("1:02P"), NaiveTime::from_hms_opt(13, 2, 0));
/// assert_eq!(parse_time_token("12:00a"), NaiveTime::from_hms_opt(0, 0, 0));
/// assert_eq!(parse_time_token("13:00p"), None);
/// ```
pub fn parse_time_token(token: &str) -> Option<NaiveTime> {
    let normalized = token.trim().to_lowercase();

    let Some(caps) = TIME_TOKEN_RE.captures(&normalized) else {
        warn!(token, "time token does not match H:MM[a|p]");
        return None;
    };

    let (Ok(hour), Ok(minute)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) else {
        warn!(token, "time token has non-numeric hour or minute");
        return None;
    };

    if !(1..=12).contains(&hour) {
        warn!(token, hour, "time token hour outside 1-12");
        return None;
    }

    let pm = &caps[3] == "p";
    let hour_24 = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };

    let time = NaiveTime::from_hms_opt(hour_24, minute, 0);
    if time.is_none() {
        warn!(token, minute, "time token minute outside 00-59");
    }
    time
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn time(h: u32, m: u32) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(h, m, 0)
    }

    // ==========================================================================
    // TT-001: morning and afternoon tokens
    // ==========================================================================
    #[test]
    fn test_tt_001_am_and_pm() {
        assert_eq!(parse_time_token("7:55a"), time(7, 55));
        assert_eq!(parse_time_token("4:05p"), time(16, 5));
        assert_eq!(parse_time_token("10:58p"), time(22, 58));
    }

    // ==========================================================================
    // TT-002: noon and midnight
    // ==========================================================================
    #[test]
    fn test_tt_002_twelve_oclock() {
        assert_eq!(parse_time_token("12:00p"), time(12, 0));
        assert_eq!(parse_time_token("12:30a"), time(0, 30));
        assert_eq!(parse_time_token("12:10a"), time(0, 10));
    }

    // ==========================================================================
    // TT-003: case and surrounding whitespace
    // ==========================================================================
    #[test]
    fn test_tt_003_case_insensitive_and_trimmed() {
        assert_eq!(parse_time_token("11:08A"), time(11, 8));
        assert_eq!(parse_time_token(" 1:02P "), time(13, 2));
        assert_eq!(parse_time_token("09:15a"), time(9, 15));
    }

    // ==========================================================================
    // TT-004: malformed tokens
    // ==========================================================================
    #[test]
    fn test_tt_004_rejects_malformed() {
        for token in [
            "", "7:55", "7:5a", "755a", "7:55am", "7:55x", "0:30a", "13:00p", "7:60a", "123:00a",
            "a7:55", "7:55 a", "-1:00p",
        ] {
            assert_eq!(parse_time_token(token), None, "token {:?} should not parse", token);
        }
    }

    proptest! {
        #[test]
        fn prop_valid_tokens_map_to_24_hour(hour in 1u32..=12, minute in 0u32..60, pm in any::<bool>()) {
            let token = format!("{}:{:02}{}", hour, minute, if pm { "p" } else { "a" });
            let expected_hour = (hour % 12) + if pm { 12 } else { 0 };
            prop_assert_eq!(parse_time_token(&token), time(expected_hour, minute));
        }

        #[test]
        fn prop_zero_padded_hours_accepted(hour in 1u32..=9, minute in 0u32..60) {
            let token = format!("{:02}:{:02}A", hour, minute);
            prop_assert_eq!(parse_time_token(&token), time(hour, minute));
        }

        #[test]
        fn prop_arbitrary_input_never_panics(input in "\\PC{0,12}") {
            let _ = parse_time_token(&input);
        }

        #[test]
        fn prop_out_of_range_hours_rejected(hour in 13u32..100, minute in 0u32..60) {
            let token = format!("{}:{:02}p", hour, minute);
            prop_assert_eq!(parse_time_token(&token), None);
        }
    }
}
