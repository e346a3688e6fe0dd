//! Unit tests for timeframe selection

use chrono::{DateTime, TimeZone, Utc};
use contract_lens::analysis::timeframe::{select_timeframe, TimeframeChoice};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap()
}

fn pick(expiration: &str) -> (&'static str, &'static str) {
    let choice = select_timeframe(Some(expiration), now());
    (choice.interval, choice.period)
}

#[test]
fn anchor_cases() {
    assert_eq!(pick("2025-10-01"), ("5m", "5d")); // 0 days
    assert_eq!(pick("2025-10-06"), ("15m", "7d")); // 5 days
    assert_eq!(pick("2025-10-11"), ("1h", "1mo")); // 10 days
    assert_eq!(pick("2025-10-31"), ("4h", "3mo")); // 30 days
}

#[test]
fn unparseable_expiration_matches_ten_days() {
    let ten_days = TimeframeChoice::for_days(10);
    assert_eq!(select_timeframe(Some("soon"), now()), ten_days);
    assert_eq!(select_timeframe(None, now()), ten_days);
    assert_eq!(ten_days, TimeframeChoice::new("1h", "1mo"));
}

#[test]
fn bucket_boundaries() {
    assert_eq!(TimeframeChoice::for_days(-3).interval, "5m");
    assert_eq!(TimeframeChoice::for_days(2).interval, "5m");
    assert_eq!(TimeframeChoice::for_days(3).interval, "15m");
    assert_eq!(TimeframeChoice::for_days(7).interval, "15m");
    assert_eq!(TimeframeChoice::for_days(8).interval, "1h");
    assert_eq!(TimeframeChoice::for_days(14).interval, "1h");
    assert_eq!(TimeframeChoice::for_days(15).interval, "4h");
}

#[test]
fn total_over_arbitrary_strings() {
    let inputs = [
        "",
        "   ",
        "2025-13-45",
        "10/10/2025",
        "٢٠٢٥-١٠-١٠",
        "2025-10-10T25:61:00",
        "999999-01-01",
        "-0001-01-01",
        "\u{0}",
        "2025-10-10Tgarbage",
    ];
    for input in inputs {
        let choice = select_timeframe(Some(input), now());
        assert!(
            ["5m", "15m", "1h", "4h"].contains(&choice.interval),
            "unexpected interval for {input:?}"
        );
    }
}

#[test]
fn past_expiration_uses_shortest_frame() {
    assert_eq!(pick("2024-01-19"), ("5m", "5d"));
}
