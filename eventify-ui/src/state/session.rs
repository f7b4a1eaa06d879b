//! Browser session
//!
//! The logged-in user lives in local storage under [`USER_KEY`], so a
//! reload keeps the login.

/// Local-storage key holding the user payload
pub const USER_KEY: &str = "user";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Read the stored user, if any
pub fn load_user() -> Option<serde_json::Value> {
    let raw = local_storage()?.get_item(USER_KEY).ok().flatten()?;
    match serde_json::from_str(&raw) {
        Ok(user) => Some(user),
        Err(e) => {
            web_sys::console::warn_1(&format!("Ignoring unreadable session: {}", e).into());
            None
        }
    }
}

pub fn save_user(user: &serde_json::Value) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(USER_KEY, &user.to_string());
    }
}

pub fn clear_user() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(USER_KEY);
    }
}
