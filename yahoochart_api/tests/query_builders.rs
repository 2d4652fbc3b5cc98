use yahoochart_api::{ChartQuery, Interval, Query, Range};
use url::Url;

fn base_url() -> Url {
    Url::parse("https://example.com").unwrap()
}

#[test]
fn chart_query_defaults() {
    let url = ChartQuery::default().add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("range=1y"));
    assert!(query.contains("interval=1d"));
    assert!(query.contains("includeAdjustedClose=true"));
}

#[test]
fn chart_query_with_overrides() {
    let url = ChartQuery::default()
        .with_range(Range::TwoYears)
        .with_interval(Interval::OneWeek)
        .with_adjusted_close(false)
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("range=2y"));
    assert!(query.contains("interval=1wk"));
    assert!(query.contains("includeAdjustedClose=false"));
}

#[test]
fn range_parses_from_provider_strings() {
    assert_eq!("1y".parse::<Range>().unwrap(), Range::OneYear);
    assert_eq!("6mo".parse::<Range>().unwrap(), Range::SixMonths);
    assert_eq!("max".parse::<Range>().unwrap(), Range::Max);
    assert!("1 year".parse::<Range>().is_err());
}

#[test]
fn range_display_round_trips() {
    for range in [Range::OneMonth, Range::OneYear, Range::FiveYears] {
        assert_eq!(range.to_string().parse::<Range>().unwrap(), range);
    }
}

#[test]
fn range_covering_days_rounds_up() {
    assert_eq!(Range::covering_days(0), Range::OneMonth);
    assert_eq!(Range::covering_days(90), Range::ThreeMonths);
    assert_eq!(Range::covering_days(365), Range::OneYear);
    assert_eq!(Range::covering_days(366), Range::OneYear);
    assert_eq!(Range::covering_days(400), Range::TwoYears);
    assert_eq!(Range::covering_days(1500), Range::FiveYears);
    assert_eq!(Range::covering_days(4000), Range::Max);
}
