//! Property-based tests for the engine's documented invariants.

use changeset_validator::prelude::*;
use chrono::{Days, NaiveDate};
use proptest::prelude::*;

fn day(offset: u32) -> NaiveDate {
    crate::date(2000, 1, 1)
        .checked_add_days(Days::new(u64::from(offset)))
        .unwrap()
}

// ============================================================================
// TEMPORAL: strict ordering and inclusive tolerance
// ============================================================================

proptest! {
    #[test]
    fn before_passes_iff_strictly_less(v in 0u32..2000, b in 0u32..2000) {
        let options = TemporalOptions::new().before(day(b));
        let outcome = temporal_outcome(&day(v), &options);
        prop_assert_eq!(outcome, v < b);
    }

    #[test]
    fn after_passes_iff_strictly_greater(v in 0u32..2000, b in 0u32..2000) {
        let options = TemporalOptions::new().after(day(b));
        let outcome = temporal_outcome(&day(v), &options);
        prop_assert_eq!(outcome, v > b);
    }

    #[test]
    fn is_with_zero_delta_is_reflexive(v in 0u32..20_000) {
        let options = TemporalOptions::new().is(day(v));
        prop_assert!(temporal_outcome(&day(v), &options));
    }

    #[test]
    fn is_passes_iff_within_delta(v in 0u32..2000, w in 0u32..2000, delta in 0u64..100) {
        let options = TemporalOptions::new().is(day(w)).delta(delta);
        let distance = u64::from(v.abs_diff(w));
        prop_assert_eq!(temporal_outcome(&day(v), &options), distance <= delta);
    }
}

fn temporal_outcome(value: &NaiveDate, options: &TemporalOptions<NaiveDate>) -> bool {
    changeset_validator::validators::temporal::validate(value, options, &ValidationContext::new()).is_ok()
}

// ============================================================================
// PIPELINE: aggregation modes
// ============================================================================

proptest! {
    #[test]
    fn first_failure_equals_first_failing_check_alone(
        s in "[a-c]{0,4}",
        prefixes in proptest::collection::vec("[a-c]{1,2}", 0..5),
    ) {
        let mut pipeline = Pipeline::first_failure();
        for (i, prefix) in prefixes.iter().enumerate() {
            pipeline.push(format!("c{i}"), HasPrefix::new(prefix.clone()));
        }

        let expected = prefixes
            .iter()
            .enumerate()
            .find_map(|(i, p)| HasPrefix::new(p.clone()).validate(&s).err().map(|e| (i, e)));

        let actual = pipeline.run(&s, &ValidationContext::new());
        match expected {
            None => prop_assert!(actual.is_ok()),
            Some((i, error)) => {
                let errors = actual.unwrap_err();
                prop_assert_eq!(errors.len(), 1);
                let got = &errors.errors()[0];
                let name = format!("c{i}");
                prop_assert_eq!(got.param("check"), Some(name.as_str()));
                prop_assert_eq!(got.param("prefix"), error.param("prefix"));
            }
        }
    }

    #[test]
    fn accumulate_all_reports_every_failure_in_order(
        s in "[a-c]{0,4}",
        prefixes in proptest::collection::vec("[a-c]{1,2}", 0..5),
    ) {
        let mut pipeline = Pipeline::accumulate_all();
        for (i, prefix) in prefixes.iter().enumerate() {
            pipeline.push(format!("c{i}"), HasPrefix::new(prefix.clone()));
        }

        let expected: Vec<String> = prefixes
            .iter()
            .enumerate()
            .filter(|(_, p)| !s.starts_with(p.as_str()))
            .map(|(i, _)| format!("c{i}"))
            .collect();

        let actual: Vec<String> = match pipeline.run(&s, &ValidationContext::new()) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .errors()
                .iter()
                .filter_map(|e| e.param("check").map(str::to_owned))
                .collect(),
        };
        prop_assert_eq!(actual, expected);
    }
}

// ============================================================================
// REGISTRY: unknown-key policies hold for every value
// ============================================================================

proptest! {
    #[test]
    fn unknown_country_policies(value in ".{0,12}") {
        let engine = crate::engine();
        let accept = PostalCodeOptions::new("zz");
        let reject = PostalCodeOptions::new("zz").reject_if_unknown();
        let raise = PostalCodeOptions::new("zz").raise_if_unknown();

        prop_assert!(engine.validate_postal_code(&value, &accept).unwrap().is_ok());
        prop_assert!(engine.validate_postal_code(&value, &reject).unwrap().is_err());
        prop_assert!(engine.validate_postal_code(&value, &raise).is_err());
    }
}

// ============================================================================
// DOMAINS
// ============================================================================

proptest! {
    #[test]
    fn exactly_one_luhn_check_digit(payload in "[0-9]{1,18}") {
        let options = LuhnOptions::new();
        let engine = crate::engine();
        let passing = (0..10)
            .filter(|d| engine.validate_luhn(&format!("{payload}{d}"), &options).is_ok())
            .count();
        prop_assert_eq!(passing, 1);
    }

    #[test]
    fn prefix_separator_decides(prefix in "[a-z]{1,8}", id in "[a-z0-9-]{0,12}") {
        let engine = crate::engine();
        let ctx = ValidationContext::new();
        let value = format!("{prefix}|{id}");

        let pipe = PrefixOptions::new(prefix.as_str()).separator("|");
        let underscore = PrefixOptions::new(prefix.as_str()).separator("_");
        prop_assert!(engine.validate_prefix(&value, &pipe, &ctx).is_ok());
        prop_assert!(engine.validate_prefix(&value, &underscore, &ctx).is_err());
    }

    #[test]
    fn email_and_url_are_total(value in "\\PC{0,40}") {
        let engine = crate::engine();
        let email = EmailOptions::new().checks([EmailCheck::HtmlInput, EmailCheck::Pow, EmailCheck::Burner]);
        let url = UrlOptions::new().checks([
            UrlCheck::Parsable,
            UrlCheck::Empty,
            UrlCheck::Scheme,
            UrlCheck::Host,
            UrlCheck::Path,
            UrlCheck::HttpRegexp,
        ]);

        let _ = engine.validate_email(&value, &email);
        prop_assert!(engine.validate_url(&value, &url).is_ok());
    }
}
