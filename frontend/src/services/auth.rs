//! Access-token handoff between the sign-in popup and the calendar page.
//!
//! The popup lands back on this app with the token in the URL fragment. It
//! stores the token in local storage, which every tab of the origin shares,
//! and closes itself. The calendar page polls the same key.

use gloo::storage::{LocalStorage, Storage};
use gloo::utils::window;
use shared::calendar::{parse_token_fragment, AccessToken};

const TOKEN_KEY: &str = "calendar.access_token";

pub struct TokenStore;

impl TokenStore {
    pub fn load() -> Option<AccessToken> {
        LocalStorage::get(TOKEN_KEY).ok()
    }

    pub fn save(token: &AccessToken) {
        if let Err(e) = LocalStorage::set(TOKEN_KEY, token) {
            tracing::error!("Failed to store calendar token: {:?}", e);
        }
    }

    pub fn clear() {
        LocalStorage::delete(TOKEN_KEY);
    }
}

/// Picks up a token from an OAuth redirect, if this page load is one.
pub fn capture_redirect() {
    let window = window();
    let location = window.location();
    let Ok(hash) = location.hash() else {
        return;
    };
    let Some(token) = parse_token_fragment(&hash) else {
        return;
    };

    TokenStore::save(&token);
    let _ = location.set_hash("");
    tracing::info!("Calendar access token captured");

    let opened_as_popup = window
        .opener()
        .map(|opener| !opener.is_null() && !opener.is_undefined())
        .unwrap_or(false);
    if opened_as_popup {
        let _ = window.close();
    }
}
