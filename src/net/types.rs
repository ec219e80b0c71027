//! Wire types mirrored from the registration backend.
//!
//! All records are server-authoritative: ids and timestamps come from the
//! backend, the frontend only caches transient copies. Field names follow
//! the backend's camelCase JSON convention.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated user as returned by the login endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
}

/// Bearer token plus its user, stored and cleared as one unit.
///
/// Keeping both halves in a single struct is what makes the "token and user
/// are set/cleared together" invariant hold by construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Lifecycle status of a registered route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Statut {
    #[default]
    Actif,
    Expire,
    Suspendu,
}

impl Statut {
    /// French display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Statut::Actif => "Actif",
            Statut::Expire => "Expiré",
            Statut::Suspendu => "Suspendu",
        }
    }
}

/// A registered route (itinéraire) tying a vehicle to a journey.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itineraire {
    pub id: Uuid,
    /// Unique vehicle code in the `AAA-99-AA999999` format.
    pub code_unique: String,
    pub depart: String,
    pub destination: String,
    pub vehicule_immatriculation: String,
    pub proprietaire_nom: String,
    #[serde(default)]
    pub statut: Statut,
    #[serde(default)]
    pub date_depart: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Create/update payload for a route. Ids and timestamps are never sent:
/// the backend assigns them.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraireInput {
    pub code_unique: String,
    pub depart: String,
    pub destination: String,
    pub vehicule_immatriculation: String,
    pub proprietaire_nom: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_depart: Option<String>,
}

/// Dashboard counters from `/api/v1/itineraires/stats`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraireStats {
    pub total: u64,
    pub actifs: u64,
    pub expires: u64,
    pub ce_mois: u64,
}

/// Outcome of a public vehicle-code check.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub valide: bool,
    #[serde(default)]
    pub itineraire: Option<Itineraire>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Aggregate counters from `/verify/stats/overview`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyStats {
    pub total_verifications: u64,
    pub codes_valides: u64,
    pub codes_invalides: u64,
}
