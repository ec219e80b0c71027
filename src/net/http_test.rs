use super::*;
use serde_json::json;

// =============================================================
// classify — status taxonomy
// =============================================================

#[test]
fn classify_401_and_403_are_auth() {
    assert_eq!(classify(401, &json!({})), ApiError::Auth { status: 401 });
    assert_eq!(classify(403, &json!({})), ApiError::Auth { status: 403 });
}

#[test]
fn classify_404_is_not_found() {
    assert_eq!(classify(404, &json!({"message":"ignored"})), ApiError::NotFound);
}

#[test]
fn classify_other_4xx_is_validation_with_message() {
    let err = classify(422, &json!({"message":"code unique déjà utilisé"}));
    match err {
        ApiError::Validation { message, fields } => {
            assert_eq!(message, "code unique déjà utilisé");
            assert!(fields.is_empty());
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn classify_4xx_without_message_uses_default() {
    match classify(400, &json!({})) {
        ApiError::Validation { message, .. } => assert_eq!(message, "données invalides"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn classify_5xx_is_server() {
    assert_eq!(classify(500, &json!({})), ApiError::Server { status: 500 });
    assert_eq!(classify(503, &json!({})), ApiError::Server { status: 503 });
}

// =============================================================
// error_message — body field precedence
// =============================================================

#[test]
fn error_message_prefers_message_then_error() {
    let body = json!({"message":"m1","error":"m2"});
    assert_eq!(error_message(&body), Some("m1"));

    let body = json!({"error":"m2"});
    assert_eq!(error_message(&body), Some("m2"));
}

#[test]
fn error_message_none_when_absent() {
    assert_eq!(error_message(&json!({})), None);
    assert_eq!(error_message(&json!({"message": 42})), None);
}

// =============================================================
// validation_fields — both backend shapes
// =============================================================

#[test]
fn validation_fields_from_object_keys() {
    let body = json!({"errors": {"codeUnique": "format invalide", "depart": "requis"}});
    let mut fields = validation_fields(&body);
    fields.sort();
    assert_eq!(fields, vec!["codeUnique", "depart"]);
}

#[test]
fn validation_fields_from_array() {
    let body = json!({"errors": ["destination"]});
    assert_eq!(validation_fields(&body), vec!["destination"]);
}

#[test]
fn validation_fields_empty_when_missing() {
    assert!(validation_fields(&json!({})).is_empty());
}

// =============================================================
// retry classification
// =============================================================

#[test]
fn only_network_and_server_errors_are_retryable() {
    assert!(ApiError::Network.is_retryable());
    assert!(ApiError::Server { status: 502 }.is_retryable());
    assert!(!ApiError::Auth { status: 401 }.is_retryable());
    assert!(!ApiError::NotFound.is_retryable());
    assert!(!ApiError::Aborted.is_retryable());
    assert!(
        !ApiError::Validation { message: "x".to_owned(), fields: Vec::new() }.is_retryable()
    );
}

// =============================================================
// display — user-facing French messages
// =============================================================

#[test]
fn display_is_french_and_hides_raw_detail() {
    assert_eq!(ApiError::Network.to_string(), "impossible de joindre le serveur");
    assert_eq!(ApiError::NotFound.to_string(), "ressource introuvable");
    assert_eq!(
        ApiError::Server { status: 500 }.to_string(),
        "erreur interne du serveur"
    );
    // Validation is the one variant whose detail may surface.
    let err = ApiError::Validation { message: "champ requis".to_owned(), fields: Vec::new() };
    assert_eq!(err.to_string(), "champ requis");
}
