//! Browser Session Storage
//!
//! Keeps the auth session in `localStorage` so a reload can restore it.

use boltflow_core::{Session, SessionStorage};
use log::warn;

const SESSION_KEY: &str = "boltflow.session";

/// `localStorage`-backed session slot. Falls back to no-op when storage is
/// unavailable (private mode, sandboxed frames).
#[derive(Debug, Default)]
pub struct BrowserSessionStorage;

impl BrowserSessionStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl SessionStorage for BrowserSessionStorage {
    fn load(&self) -> Option<Session> {
        let raw = self.storage()?.get_item(SESSION_KEY).ok().flatten()?;
        match decode(&raw) {
            Some(session) => Some(session),
            None => {
                warn!("discarding unreadable stored session");
                self.clear();
                None
            }
        }
    }

    fn save(&self, session: &Session) {
        let Some(storage) = self.storage() else { return };
        match serde_json::to_string(session) {
            Ok(raw) => {
                if storage.set_item(SESSION_KEY, &raw).is_err() {
                    warn!("could not persist session");
                }
            }
            Err(e) => warn!("could not encode session: {}", e),
        }
    }

    fn clear(&self) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(SESSION_KEY);
        }
    }
}

fn decode(raw: &str) -> Option<Session> {
    serde_json::from_str(raw).ok()
}
