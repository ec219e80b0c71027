use super::*;

// =============================================================
// TokenStatus::from_probe — invalid vs unreachable
// =============================================================

#[test]
fn success_is_valid() {
    assert_eq!(TokenStatus::from_probe(&Ok(())), TokenStatus::Valid);
}

#[test]
fn auth_rejection_is_invalid() {
    let outcome: Result<(), _> = Err(ApiError::Auth { status: 401 });
    assert_eq!(TokenStatus::from_probe(&outcome), TokenStatus::Invalid);

    let outcome: Result<(), _> = Err(ApiError::Auth { status: 403 });
    assert_eq!(TokenStatus::from_probe(&outcome), TokenStatus::Invalid);
}

#[test]
fn transport_and_server_failures_are_unreachable() {
    let outcome: Result<(), _> = Err(ApiError::Network);
    assert_eq!(TokenStatus::from_probe(&outcome), TokenStatus::Unreachable);

    let outcome: Result<(), _> = Err(ApiError::Server { status: 502 });
    assert_eq!(TokenStatus::from_probe(&outcome), TokenStatus::Unreachable);

    let outcome: Result<(), _> = Err(ApiError::Aborted);
    assert_eq!(TokenStatus::from_probe(&outcome), TokenStatus::Unreachable);
}

#[test]
fn non_auth_answers_prove_the_token_was_accepted() {
    // e.g. the probe endpoint moved (404): the server answered without
    // rejecting the token, so the session is kept.
    let outcome: Result<(), _> = Err(ApiError::NotFound);
    assert_eq!(TokenStatus::from_probe(&outcome), TokenStatus::Valid);
}
