use std::io::Write as _;

use changeset_validator::prelude::*;
use changeset_validator::validators::phone::PhoneNumber;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::{engine, init_tracing};

// ============================================================================
// POSTAL CODES
// ============================================================================

#[rstest]
#[case("fr", "69001", true)]
#[case("FR", "1", false)]
#[case("us", "94105-1234", true)]
#[case("gb", "sw1a 1aa", true)]
#[case("nl", "1234AB", true)]
#[case("de", "1011", false)]
fn postal_codes(#[case] country: &str, #[case] value: &str, #[case] passes: bool) {
    let outcome = engine()
        .validate_postal_code(value, &PostalCodeOptions::new(country))
        .unwrap();
    assert_eq!(outcome.is_ok(), passes, "{country} {value}");
}

#[test]
fn postal_dataset_from_config_file() {
    init_tracing();
    let path = std::env::temp_dir().join(format!("postal-codes-{}.txt", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "# custom table").unwrap();
    writeln!(file, "fr|\\d{{5}}").unwrap();
    drop(file);

    let config: EngineConfig = serde_json::from_value(serde_json::json!({
        "postal_codes": path,
        "delimiter": "|",
    }))
    .unwrap();
    let engine = Engine::from_config(config).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(engine.postal_codes().keys(), vec!["fr"]);
    let fr = PostalCodeOptions::new("fr");
    assert!(engine.validate_postal_code("69001", &fr).unwrap().is_ok());
    assert!(engine.validate_postal_code("1", &fr).unwrap().is_err());
    assert!(engine.validate_postal_code("anything", &PostalCodeOptions::new("us")).unwrap().is_ok());
}

#[test]
fn malformed_dataset_aborts_engine_build() {
    let path = std::env::temp_dir().join(format!("postal-codes-bad-{}.txt", std::process::id()));
    std::fs::write(&path, "fr;\\d{5}\nfr;\\d{4}\n").unwrap();

    let config = EngineConfig {
        postal_codes: Some(path.clone()),
        ..EngineConfig::default()
    };
    let err = Engine::from_config(config).unwrap_err();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(err.code(), "CONFIG_DUPLICATE_ENTRY");
}

// ============================================================================
// SOCIAL SECURITY
// ============================================================================

#[rstest]
#[case("fr", "1 85 05 78 006 084 91", true)]
#[case("fr", "2 69 02 99 341 732 85", true)]
#[case("fr", "1 85 05 2A 006 084 35", true)]
#[case("fr", "1 85 05 78 006 084 90", false)]
#[case("us", "123-45-6789", true)]
#[case("us", "666-45-6789", false)]
fn social_security_numbers(#[case] country: &str, #[case] value: &str, #[case] passes: bool) {
    let outcome = engine()
        .validate_social_security(value, &SocialSecurityOptions::new(country))
        .unwrap();
    assert_eq!(outcome.is_ok(), passes, "{country} {value}");
}

#[test]
fn social_security_options_from_json() {
    let options: SocialSecurityOptions =
        serde_json::from_str(r#"{"country": "it", "raise_if_unknown_country": true}"#).unwrap();
    let err = engine().validate_social_security("x", &options).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownDiscriminator { domain: "social_security", .. }));
}

// ============================================================================
// LUHN
// ============================================================================

#[test]
fn luhn_numbers() {
    let engine = engine();
    let plain = LuhnOptions::new();
    assert!(engine.validate_luhn("740123450", &plain).is_ok());
    assert!(engine.validate_luhn("74012345123456", &plain).is_err());

    let transformed = LuhnOptions::new().transformer(|value| value.replace("7A", "74"));
    assert!(engine.validate_luhn("7A0123450", &transformed).is_ok());
}

#[rstest]
#[case("")]
#[case("7A0123450")]
#[case("4111 1111 1111 1111")]
fn luhn_fault_becomes_failure(#[case] value: &str) {
    let error = engine().validate_luhn(value, &LuhnOptions::new()).unwrap_err();
    assert_eq!(error.code, "luhn");
    assert!(error.param("reason").is_some());
}

// ============================================================================
// PREFIX
// ============================================================================

#[rstest]
#[case("|", true)]
#[case("_", false)]
fn prefix_separator(#[case] separator: &str, #[case] passes: bool) {
    let options = PrefixOptions::new("private").separator(separator);
    let outcome = engine().validate_prefix("private|some-id", &options, &ValidationContext::new());
    assert_eq!(outcome.is_ok(), passes);
}

#[test]
fn prefix_from_sibling_field() {
    let mut fields = indexmap::IndexMap::new();
    fields.insert("kind".to_string(), Value::from("public"));
    let ctx = ValidationContext::from_fields(&fields);

    let options = PrefixOptions::new(Prefix::from_field("kind")).separator("|");
    let error = engine().validate_prefix("private|some-id", &options, &ctx).unwrap_err();
    assert_eq!(error.code, "has_prefix");
    assert_eq!(error.param("prefix"), Some("public"));
    assert_eq!(error.param("separator"), Some("|"));

    let absent = ValidationContext::new();
    assert!(engine().validate_prefix("anything", &options, &absent).is_ok());
}

// ============================================================================
// PHONE
// ============================================================================

struct RegionAware;

impl PhoneNumberCapability for RegionAware {
    fn is_valid(&self, number: &str, region: Option<&str>) -> Result<bool, CapabilityError> {
        match region {
            Some("xx") => Err(CapabilityError::UnsupportedRegion("xx".to_string())),
            _ => Ok(number.starts_with('+')),
        }
    }
}

#[rstest]
#[case("+33 6 12 34 56 78", None, true)]
#[case("06 12 34 56 78", Some("FR"), true)]
#[case("06 12 34 56", Some("fr"), false)]
#[case("(415) 555-1234", Some("us"), true)]
#[case("not a number", None, false)]
fn builtin_numbering_plan(#[case] value: &str, #[case] country: Option<&str>, #[case] passes: bool) {
    let mut options = PhoneOptions::new();
    if let Some(country) = country {
        options = options.country(country);
    }
    assert_eq!(engine().validate_phone(value, &options).is_ok(), passes);
}

#[test]
fn custom_phone_capability_faults_become_failures() {
    let engine = Engine::builder()
        .phone_numbers(RegionAware)
        .without_host_resolver()
        .build()
        .unwrap();

    assert!(engine.validate_phone("+1", &PhoneOptions::new()).is_ok());

    let error = engine
        .validate_phone("+1", &PhoneOptions::new().country("XX"))
        .unwrap_err();
    assert_eq!(error.code, "phone_number");
    assert_eq!(error.param("reason"), Some("unsupported_region"));

    let rule = PhoneNumber::new(&RegionAware, Some("fr"));
    assert!(rule.validate("0612345678").is_err());
}
