use changeset_validator::prelude::*;
use chrono::{Days, NaiveDate};
use pretty_assertions::assert_eq;

use crate::{date, engine};

fn booking<'e>(engine: &'e Engine, finish: NaiveDate) -> Changeset<'e> {
    Changeset::new(engine)
        .put("start", date(2000, 1, 1))
        .put("finish", finish)
        .put("kind", "private")
        .put("reference", "private|some-id")
        .put("email", "valid.email@example.com")
        .put("zip", "69001")
        .put("card", "740123450")
}

fn validate_all(changeset: &mut Changeset<'_>) -> Result<(), ConfigError> {
    let finish = TemporalOptions::<NaiveDate>::new().is(Boundary::derived(|ctx| {
        ctx.date("start")?.checked_add_days(Days::new(30))
    }));

    changeset
        .validate_temporal("finish", &finish)?
        .validate_prefix("reference", &PrefixOptions::new(Prefix::from_field("kind")).separator("|"))?
        .validate_email("email", &EmailOptions::new())?
        .validate_postal_code("zip", &PostalCodeOptions::new("fr"))?
        .validate_luhn("card", &LuhnOptions::new())?;
    Ok(())
}

#[test]
fn valid_changeset_yields_its_changes() {
    let engine = engine();
    let mut changeset = booking(&engine, date(2000, 1, 31));
    validate_all(&mut changeset).unwrap();

    assert!(changeset.is_valid());
    let changes = changeset.into_result().unwrap();
    assert_eq!(changes.keys().next().map(String::as_str), Some("start"));
}

#[test]
fn failures_are_reported_per_field() {
    let engine = engine();
    let mut changeset = booking(&engine, date(2000, 1, 2))
        .put("email", "@invalid_email")
        .put("card", "74012345123456");
    validate_all(&mut changeset).unwrap();

    assert_eq!(changeset.error_fields(), vec!["finish", "email", "card"]);

    let finish = changeset.errors().for_field("finish").next().unwrap();
    assert_eq!(finish.param("is"), Some("2000-01-31"));

    let errors = changeset.into_result().unwrap_err();
    assert_eq!(errors.len(), 3);
}

#[test]
fn sibling_driven_prefix_follows_the_changeset() {
    let engine = engine();
    let mut changeset = booking(&engine, date(2000, 1, 31)).put("kind", "public");
    validate_all(&mut changeset).unwrap();

    let (field, error) = changeset.field_errors().next().unwrap();
    assert_eq!(field, "reference");
    assert_eq!(error.render(), "is not prefixed by public.");
}

#[test]
fn mistyped_field_is_a_configuration_error() {
    let engine = engine();
    let mut changeset = booking(&engine, date(2000, 1, 31)).put("zip", 69001_i64);

    let err = validate_all(&mut changeset).unwrap_err();
    assert_eq!(
        err.to_string(),
        "field `zip` holds integer, validator expects string"
    );
}

#[test]
fn manual_errors_join_the_list() {
    let engine = engine();
    let mut changeset = Changeset::new(&engine);
    changeset.add_error("terms", ValidationError::new("acceptance", "must be accepted"));

    assert!(!changeset.is_valid());
    assert_eq!(changeset.error_fields(), vec!["terms"]);
}
