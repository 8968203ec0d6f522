use changeset_validator::prelude::*;
use changeset_validator::validators::postal_code::MatchesPattern;
use pretty_assertions::assert_eq;
use regex::Regex;
use rstest::rstest;

use crate::init_tracing;

fn fr_registry() -> Registry<MatchesPattern> {
    changeset_validator::engine::dataset::load_postal_codes("fr;\\d{5}", ';').unwrap()
}

#[rstest]
#[case(UnknownKeyPolicy::Accept, Some(true))]
#[case(UnknownKeyPolicy::Reject, Some(false))]
#[case(UnknownKeyPolicy::Raise, None)]
fn unknown_key_policies(#[case] policy: UnknownKeyPolicy, #[case] expected: Option<bool>) {
    init_tracing();
    let registry = fr_registry();
    let verdict = registry
        .lookup("ZZ", policy)
        .ok()
        .map(|rule| rule.validate("69001").is_ok());
    assert_eq!(verdict, expected);
}

#[test]
fn lookup_is_case_insensitive() {
    let registry = fr_registry();
    let rule = registry.lookup("Fr", UnknownKeyPolicy::Raise).unwrap();
    assert!(rule.is_found());
    assert!(rule.validate("69001").is_ok());
    assert!(rule.validate("1").is_err());
}

#[test]
fn raise_policy_names_the_domain() {
    let err = fr_registry().lookup("zz", UnknownKeyPolicy::Raise).unwrap_err();
    assert_eq!(err.to_string(), "unknown postal_code discriminator `zz`");
    assert_eq!(err.code(), "CONFIG_UNKNOWN_DISCRIMINATOR");
}

fn starts_with(prefix: &'static str) -> HasPrefix {
    HasPrefix::new(prefix)
}

#[test]
fn first_failure_reports_only_the_first() {
    init_tracing();
    let pipeline = Pipeline::first_failure()
        .check("c1", starts_with("x"))
        .check("c2", starts_with("y"));

    let errors = pipeline.run("abc", &ValidationContext::new()).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.errors()[0].param("check"), Some("c1"));
    assert_eq!(errors.errors()[0].param("prefix"), Some("x"));
}

#[test]
fn accumulate_all_keeps_order() {
    init_tracing();
    let pipeline = Pipeline::accumulate_all()
        .check("c1", starts_with("x"))
        .check("c2", starts_with("a"))
        .check("c3", starts_with("z"));

    let errors = pipeline.run("abc", &ValidationContext::new()).unwrap_err();
    let checks: Vec<_> = errors.errors().iter().filter_map(|e| e.param("check")).collect();
    assert_eq!(checks, vec!["c1", "c3"]);
}

#[test]
fn empty_pipeline_passes() {
    let pipeline: Pipeline<'_, str> = Pipeline::accumulate_all();
    assert!(pipeline.is_empty());
    assert!(pipeline.run("anything", &ValidationContext::new()).is_ok());
    assert!(Pipeline::<str>::first_failure().run_first("", &ValidationContext::new()).is_ok());
}

#[test]
fn registry_of_boxed_rules() {
    let mut registry: Registry<Box<dyn Validate<Input = str> + Send + Sync>> = Registry::new("id");
    registry.insert("digits", Box::new(MatchesPattern::new(Regex::new("^\\d+$").unwrap())));
    registry.insert("private", Box::new(has_prefix("private|")));

    let rule = registry.lookup("PRIVATE", UnknownKeyPolicy::Reject).unwrap();
    assert!(rule.validate("private|x").is_ok());

    let fallback = registry.lookup("other", UnknownKeyPolicy::Reject).unwrap();
    assert_eq!(fallback.validate("x").unwrap_err().code, "unknown_discriminator");
}
