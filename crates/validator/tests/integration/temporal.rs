use changeset_validator::prelude::*;
use chrono::{DateTime, Days, NaiveDateTime, NaiveTime, Utc};
use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::date;

fn thirty_days_after_start() -> TemporalOptions<chrono::NaiveDate> {
    TemporalOptions::new().is(Boundary::derived(|ctx| {
        ctx.date("start")?.checked_add_days(Days::new(30))
    }))
}

#[test]
fn cross_field_boundary_resolves_from_siblings() {
    let mut fields = IndexMap::new();
    fields.insert("start".to_string(), Value::Date(date(2000, 1, 1)));
    let ctx = ValidationContext::from_fields(&fields);
    let engine = crate::engine();
    let options = thirty_days_after_start();

    assert!(engine.validate_temporal(&date(2000, 1, 31), &options, &ctx).is_ok());

    let error = engine
        .validate_temporal(&date(2000, 1, 2), &options, &ctx)
        .unwrap_err();
    assert_eq!(error.code, "is");
    assert_eq!(error.param("is"), Some("2000-01-31"));
    assert_eq!(error.render(), "should be 2000-01-31.");
}

#[rstest]
#[case(date(1999, 12, 31), true)]
#[case(date(2000, 1, 1), false)]
#[case(date(2000, 1, 2), false)]
fn before_is_strict(#[case] value: chrono::NaiveDate, #[case] passes: bool) {
    let options = TemporalOptions::new().before(date(2000, 1, 1));
    let outcome = crate::engine().validate_temporal(&value, &options, &ValidationContext::new());
    assert_eq!(outcome.is_ok(), passes);
}

#[rstest]
#[case(0, false)]
#[case(59, false)]
#[case(60, true)]
#[case(120, true)]
fn is_tolerance_is_inclusive_seconds(#[case] delta: u64, #[case] passes: bool) {
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
    let minute_past = NaiveTime::from_hms_opt(12, 1, 0).unwrap();
    let options = TemporalOptions::new().is(noon).delta(delta);

    let outcome = crate::engine().validate_temporal(&minute_past, &options, &ValidationContext::new());
    assert_eq!(outcome.is_ok(), passes);
}

#[test]
fn now_sentinel_for_every_temporal_type() {
    let now = DateTime::<Utc>::from_timestamp(946_728_000, 0).unwrap();
    let ctx = ValidationContext::new().with_now(now);
    let engine = crate::engine();

    let before_now = TemporalOptions::<DateTime<Utc>>::new().before(Boundary::Now);
    assert!(engine.validate_temporal(&(now - chrono::TimeDelta::seconds(1)), &before_now, &ctx).is_ok());
    assert!(engine.validate_temporal(&now, &before_now, &ctx).is_err());

    let naive = now.naive_utc();
    let after_now = TemporalOptions::<NaiveDateTime>::new().after(Boundary::Now);
    assert!(engine.validate_temporal(&naive, &after_now, &ctx).is_err());

    let is_today = TemporalOptions::<chrono::NaiveDate>::new().is(Boundary::Now);
    assert!(engine.validate_temporal(&date(2000, 1, 1), &is_today, &ctx).is_ok());
}

#[test]
fn options_load_from_json() {
    let options: TemporalOptions<chrono::NaiveDate> =
        serde_json::from_str(r#"{"is": "utc_today", "delta": 1, "message": "close to today"}"#).unwrap();
    let now = DateTime::<Utc>::from_timestamp(946_728_000, 0).unwrap();
    let ctx = ValidationContext::new().with_now(now);

    let engine = crate::engine();
    assert!(engine.validate_temporal(&date(2000, 1, 2), &options, &ctx).is_ok());

    let error = engine.validate_temporal(&date(2000, 1, 3), &options, &ctx).unwrap_err();
    assert_eq!(error.code, "is");
    assert_eq!(error.render(), "close to today");
    assert_eq!(error.param("is"), Some("2000-01-01"));
}
