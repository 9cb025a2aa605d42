use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use tower_cookies::{Cookies, Key};

pub const JWT_TOKEN_KEY: &str = "jwt_token";

pub trait CredentialStore {
    fn get(&self, key: &str) -> Option<String>;
}

impl<T: CredentialStore + ?Sized> CredentialStore for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

impl<T: CredentialStore + ?Sized> CredentialStore for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FromFn<F>(F);

/// Store backed by a lookup function.
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: Fn(&str) -> Option<String>,
{
    FromFn(f)
}

impl<F> CredentialStore for FromFn<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.set(JWT_TOKEN_KEY, token);
        store
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        // a poisoned lock still holds a usable map
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.remove(key)
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.get(key).cloned()
    }
}

#[derive(Clone)]
pub struct CookieStore {
    cookies: Cookies,
    key: Arc<Key>,
}

impl CookieStore {
    #[must_use]
    pub fn new(cookies: Cookies, key: Arc<Key>) -> Self {
        Self { cookies, key }
    }
}

impl CredentialStore for CookieStore {
    fn get(&self, key: &str) -> Option<String> {
        self.cookies
            .private(&self.key)
            .get(key)
            .map(|cookie| cookie.value().to_string())
    }
}
