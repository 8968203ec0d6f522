use changeset_validator::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::engine;

// ============================================================================
// EMAIL
// ============================================================================

#[test]
fn email_default_checks() {
    let engine = engine();
    let options = EmailOptions::new();
    assert!(engine.validate_email("valid.email@example.com", &options).is_ok());

    let error = engine.validate_email("@invalid_email", &options).unwrap_err();
    assert_eq!(error.code, "email");
    assert_eq!(error.render(), "is not a valid email");
    assert_eq!(error.nested_codes(), vec!["pow"]);
}

#[rstest]
#[case(&[EmailCheck::HtmlInput], "user@example.com", true)]
#[case(&[EmailCheck::HtmlInput], "user@@example.com", false)]
#[case(&[EmailCheck::Burner], "user@mailinator.com", false)]
#[case(&[EmailCheck::Burner], "user@inbox.yopmail.com", false)]
#[case(&[EmailCheck::Pow, EmailCheck::Burner], "user@example.com", true)]
fn email_check_sets(#[case] checks: &[EmailCheck], #[case] value: &str, #[case] passes: bool) {
    let options = EmailOptions::new().checks(checks.iter().copied());
    assert_eq!(engine().validate_email(value, &options).is_ok(), passes, "{value}");
}

#[test]
fn email_options_from_json() {
    let options: EmailOptions =
        serde_json::from_str(r#"{"checks": ["html_input", "burner"], "message": "bad address"}"#).unwrap();
    let error = engine().validate_email("x@@mailinator.com", &options).unwrap_err();
    assert_eq!(error.render(), "bad address");
    assert_eq!(error.nested_codes(), vec!["html_input", "burner"]);
}

// ============================================================================
// URL
// ============================================================================

struct OnlyExample;

impl HostResolver for OnlyExample {
    fn resolves(&self, host: &str) -> Result<bool, CapabilityError> {
        Ok(host == "example.com")
    }
}

#[rstest]
#[case("https://example.com/a?b=c#d", true)]
#[case("mailto:someone@example.com", true)]
#[case("http://exa mple.com", false)]
#[case("http://example.com:port/", false)]
fn url_default_checks(#[case] value: &str, #[case] passes: bool) {
    let outcome = engine().validate_url(value, &UrlOptions::new()).unwrap();
    assert_eq!(outcome.is_ok(), passes, "{value}");
}

#[test]
fn url_failures_accumulate_in_check_order() {
    let options = UrlOptions::new().checks([
        UrlCheck::Parsable,
        UrlCheck::Scheme,
        UrlCheck::Host,
        UrlCheck::Path,
        UrlCheck::HttpRegexp,
    ]);
    let error = engine().validate_url("1nvalid", &options).unwrap().unwrap_err();
    assert_eq!(error.code, "url");
    assert_eq!(error.nested_codes(), vec!["scheme", "host", "http_regexp"]);
}

#[test]
fn url_valid_host_with_injected_resolver() {
    let engine = Engine::builder().host_resolver(OnlyExample).build().unwrap();
    let options = UrlOptions::new().checks([UrlCheck::Parsable, UrlCheck::ValidHost]);

    assert!(engine.validate_url("https://example.com/", &options).unwrap().is_ok());

    let error = engine
        .validate_url("https://unknown.invalid/", &options)
        .unwrap()
        .unwrap_err();
    assert_eq!(error.nested_codes(), vec!["valid_host"]);
    assert_eq!(error.nested[0].param("host"), Some("unknown.invalid"));
}

#[test]
fn url_valid_host_without_resolver_aborts() {
    let options: UrlOptions = serde_json::from_str(r#"{"checks": ["valid_host"]}"#).unwrap();
    let err = engine().validate_url("https://example.com", &options).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidOption { option: "checks", .. }));
}
