#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use switchyard::{Key, Param, Router, Table, Value};

// ============================================================================
// Test Routes
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserTable {
    Login,
    Logout,
    Profile,
}

impl Table for UserTable {
    fn url(&self) -> Option<Key> {
        Some(Key::from(match self {
            UserTable::Login => "user/login",
            UserTable::Logout => "user/logout",
            UserTable::Profile => "user/profile",
        }))
    }
}

/// A route that never resolves.
pub struct Unresolvable;

impl Table for Unresolvable {
    fn url(&self) -> Option<Key> {
        None
    }
}

#[derive(Clone, Debug)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user: &str, password: &str) -> Self {
        Self {
            user: user.to_string(),
            password: password.to_string(),
        }
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// A router with `user/login` (action) and `user/profile` (value `42`).
///
/// The returned log records the user of every login that carried credentials.
pub fn user_router() -> (Router, Arc<Mutex<Vec<String>>>) {
    let logins = Arc::new(Mutex::new(Vec::new()));
    let log = logins.clone();

    let router = Router::new();
    router
        .register_action(&UserTable::Login, move |_key, param| {
            if let Some(creds) = param.and_then(|p| p.downcast::<Credentials>().ok()) {
                log.lock().unwrap().push(creds.user);
            }
            Ok(())
        })
        .unwrap();
    router
        .register_value(&UserTable::Profile, |_key, _param| Ok(Value::new(42_i32)))
        .unwrap();
    (router, logins)
}

pub fn creds() -> Option<Param> {
    Some(Param::new(Credentials::new("ada", "hunter2")))
}
