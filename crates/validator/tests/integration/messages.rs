//! Rendered failure messages, pinned with inline snapshots.

use changeset_validator::prelude::*;
use insta::assert_snapshot;

use crate::{date, engine};

#[test]
fn temporal_messages() {
    let engine = engine();
    let ctx = ValidationContext::new();

    let before = TemporalOptions::new().before(date(2020, 1, 1));
    let error = engine.validate_temporal(&date(2020, 1, 1), &before, &ctx).unwrap_err();
    assert_snapshot!(error.render(), @"should be before 2020-01-01.");

    let after = TemporalOptions::new().after(date(2020, 1, 1));
    let error = engine.validate_temporal(&date(2019, 1, 1), &after, &ctx).unwrap_err();
    assert_snapshot!(error.render(), @"should be after 2020-01-01.");

    let is = TemporalOptions::new().is(date(2020, 1, 1)).delta(1);
    let error = engine.validate_temporal(&date(2020, 1, 3), &is, &ctx).unwrap_err();
    assert_snapshot!(error.render(), @"should be 2020-01-01.");
}

#[test]
fn domain_messages() {
    let engine = engine();
    let ctx = ValidationContext::new();

    let error = engine
        .validate_prefix("public|x", &PrefixOptions::new("private").separator("|"), &ctx)
        .unwrap_err();
    assert_snapshot!(error.render(), @"is not prefixed by private.");

    let error = engine.validate_luhn("1", &LuhnOptions::new()).unwrap_err();
    assert_snapshot!(error.render(), @"is not a valid luhn number");

    let error = engine.validate_phone("123", &PhoneOptions::new()).unwrap_err();
    assert_snapshot!(error.render(), @"is not a valid phone number");

    let error = engine
        .validate_social_security("1", &SocialSecurityOptions::new("us"))
        .unwrap()
        .unwrap_err();
    assert_snapshot!(error.render(), @"is not a valid social security number");
}

#[test]
fn display_lists_nested_evidence() {
    let engine = engine();

    let error = engine.validate_email("@invalid_email", &EmailOptions::new()).unwrap_err();
    assert_snapshot!(error.to_string(), @"email: is not a valid email (pow: is not a well-formed address)");

    let options = UrlOptions::new().checks([UrlCheck::Scheme, UrlCheck::Host]);
    let error = engine.validate_url("relative", &options).unwrap().unwrap_err();
    assert_snapshot!(error.to_string(), @"url: is not a valid url (scheme: has no scheme; host: has no host)");

    let error = engine
        .validate_postal_code("1", &PostalCodeOptions::new("de"))
        .unwrap()
        .unwrap_err();
    assert_snapshot!(error.to_string(), @r"postal_code: is not a valid postal code (format: does not match ^(?:\d{5})$)");
}

#[test]
fn field_tagged_display() {
    let engine = engine();
    let mut changeset = Changeset::new(&engine).put("zip", "1");
    changeset
        .validate_postal_code("zip", &PostalCodeOptions::new("fr").message("wrong %{country} code"))
        .unwrap();

    let (_, error) = changeset.field_errors().next().unwrap();
    assert_snapshot!(error.to_string(), @r"[zip] postal_code: wrong fr code (format: does not match ^(?:(0[1-9]|[1-8]\d|9[0-8])\d{3})$)");
}

#[test]
fn json_shape() {
    let engine = engine();
    let error = engine
        .validate_prefix("x", &PrefixOptions::new("private").separator("|"), &ValidationContext::new())
        .unwrap_err()
        .with_field("reference");

    let json = error.to_json_value();
    assert_eq!(json["code"], "has_prefix");
    assert_eq!(json["field"], "reference");
    assert_eq!(json["params"]["prefix"], "private");
    assert_eq!(json["params"]["separator"], "|");
    assert_snapshot!(json["message"].as_str().unwrap(), @"is not prefixed by %{prefix}.");
}
