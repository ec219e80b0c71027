//! Durable session persistence in `localStorage`.
//!
//! Two keys — token and user — are always written and cleared together so a
//! half-written session can never be observed across reloads. `load_session`
//! enforces the pair on the read side: if either key is missing or fails to
//! parse, the session is treated as absent (and the stale remainder is
//! wiped). Requires a browser environment.

use crate::net::types::Session;

#[cfg(feature = "hydrate")]
const TOKEN_KEY: &str = "immat_token";
#[cfg(feature = "hydrate")]
const USER_KEY: &str = "immat_user";

/// Read the persisted session, if both halves are present and valid.
#[must_use]
pub fn load_session() -> Option<Session> {
    #[cfg(feature = "hydrate")]
    {
        let storage = web_sys::window()?.local_storage().ok()??;

        let token = storage.get_item(TOKEN_KEY).ok()?;
        let user_json = storage.get_item(USER_KEY).ok()?;

        match (token, user_json) {
            (Some(token), Some(user_json)) => match serde_json::from_str(&user_json) {
                Ok(user) => Some(Session { token, user }),
                Err(_) => {
                    // Unparseable user half: drop the whole pair.
                    clear_session();
                    None
                }
            },
            (None, None) => None,
            // One half without the other is a broken pair; wipe it.
            _ => {
                clear_session();
                None
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Persist both halves of the session.
pub fn store_session(session: &Session) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten())
        else {
            return;
        };
        let Ok(user_json) = serde_json::to_string(&session.user) else {
            return;
        };
        let _ = storage.set_item(TOKEN_KEY, &session.token);
        let _ = storage.set_item(USER_KEY, &user_json);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = session;
    }
}

/// Remove both halves of the session.
pub fn clear_session() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.remove_item(TOKEN_KEY);
            let _ = storage.remove_item(USER_KEY);
        }
    }
}
