use super::*;

// =============================================================
// Session invalidation policy
// =============================================================

#[test]
fn only_auth_failures_invalidate_the_session() {
    assert!(invalidates_session(&ApiError::Auth { status: 401 }));
    assert!(invalidates_session(&ApiError::Auth { status: 403 }));

    assert!(!invalidates_session(&ApiError::Network));
    assert!(!invalidates_session(&ApiError::NotFound));
    assert!(!invalidates_session(&ApiError::Server { status: 500 }));
    assert!(!invalidates_session(&ApiError::Aborted));
    assert!(!invalidates_session(&ApiError::Validation {
        message: "champ requis".to_owned(),
        fields: Vec::new(),
    }));
}

// =============================================================
// Toast messages
// =============================================================

#[test]
fn aborted_failures_stay_silent() {
    assert_eq!(failure_message(&ApiError::Aborted, "Recherche des itinéraires"), None);
}

#[test]
fn messages_prefix_the_action() {
    assert_eq!(
        failure_message(&ApiError::Network, "Chargement des itinéraires"),
        Some("Chargement des itinéraires : impossible de joindre le serveur".to_owned()),
    );
}

#[test]
fn validation_detail_surfaces_to_the_user() {
    let err = ApiError::Validation {
        message: "code unique déjà utilisé".to_owned(),
        fields: vec!["codeUnique".to_owned()],
    };
    assert_eq!(
        failure_message(&err, "Création de l'itinéraire"),
        Some("Création de l'itinéraire : code unique déjà utilisé".to_owned()),
    );
}
