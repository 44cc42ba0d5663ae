use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn from_lookup_defaults_to_localhost() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[]));
    assert_eq!(cfg.api_url, DEFAULT_API_URL);
    assert_eq!(cfg.session_cookie, None);
}

#[test]
fn from_lookup_reads_overrides_and_trims_slash() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[
        (API_URL_ENV, "https://books.example.test/api/v1/"),
        (SESSION_COOKIE_ENV, " session=abc123 "),
    ]));
    assert_eq!(cfg.api_url, "https://books.example.test/api/v1");
    assert_eq!(cfg.session_cookie.as_deref(), Some("session=abc123"));
}

#[test]
fn from_lookup_treats_empty_values_as_unset() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[(API_URL_ENV, "  "), (SESSION_COOKIE_ENV, "")]));
    assert_eq!(cfg.api_url, DEFAULT_API_URL);
    assert_eq!(cfg.session_cookie, None);
}

#[test]
fn new_trims_trailing_slashes() {
    assert_eq!(ClientConfig::new("http://127.0.0.1:9000//").api_url, "http://127.0.0.1:9000");
}

#[test]
fn default_matches_default_api_url() {
    assert_eq!(ClientConfig::default(), ClientConfig::new(DEFAULT_API_URL));
}

#[test]
fn with_session_cookie_sets_cookie() {
    let cfg = ClientConfig::default().with_session_cookie("sid=1");
    assert_eq!(cfg.session_cookie.as_deref(), Some("sid=1"));
    assert_eq!(cfg.api_url, DEFAULT_API_URL);
}
