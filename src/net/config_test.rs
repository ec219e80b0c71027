use super::*;

#[test]
fn url_joins_absolute_path() {
    assert_eq!(url("/api/v1/itineraires"), format!("{}/api/v1/itineraires", api_base()));
}

#[test]
fn url_inserts_missing_slash() {
    assert_eq!(url("api/v1/verify/X"), format!("{}/api/v1/verify/X", api_base()));
}

#[test]
fn api_base_has_no_trailing_slash() {
    assert!(!api_base().ends_with('/'));
}
