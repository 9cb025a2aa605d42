use std::{collections::BTreeMap, time::Duration};

use reqwest::{header::AUTHORIZATION, Client, Method, RequestBuilder, Response, Url};
use tracing::debug;

use crate::credentials::{CredentialStore, JWT_TOKEN_KEY};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub headers: Option<BTreeMap<String, String>>,
    pub body: Option<Vec<u8>>,
    pub query: Vec<(String, String)>,
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn query_pair(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

pub struct Gateway<S> {
    client: Client,
    base_url: String,
    credentials: S,
}

impl<S: CredentialStore> Gateway<S> {
    pub fn new(client: Client, base_url: impl Into<String>, credentials: S) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn credentials(&self) -> &S {
        &self.credentials
    }

    pub fn resolve_url(&self, path: &str) -> String {
        if is_absolute(path) {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    pub fn effective_headers(&self, options: &RequestOptions) -> BTreeMap<String, String> {
        with_bearer(
            options.headers.clone().unwrap_or_default(),
            self.credentials.get(JWT_TOKEN_KEY),
        )
    }

    pub fn prepare(&self, path: &str, options: &RequestOptions) -> RequestBuilder {
        let url = self.resolve_url(path);
        let headers = self.effective_headers(options);
        let method = options.method.clone().unwrap_or(Method::GET);
        debug!(
            %method,
            %url,
            authenticated = headers
                .keys()
                .any(|name| name.eq_ignore_ascii_case(AUTHORIZATION.as_str())),
            "preparing upstream request"
        );

        let mut request = self.client.request(method, url);
        for (name, value) in &headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(body) = &options.body {
            request = request.body(body.clone());
        }
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }
        request
    }

    pub async fn fetch(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Response, reqwest::Error> {
        self.prepare(path, &options).send().await
    }
}

#[must_use]
pub fn is_absolute(path: &str) -> bool {
    Url::parse(path).map_or(false, |url| matches!(url.scheme(), "http" | "https"))
}

fn with_bearer(
    mut headers: BTreeMap<String, String>,
    token: Option<String>,
) -> BTreeMap<String, String> {
    if let Some(token) = token {
        // header names are case-insensitive on the wire
        headers.retain(|name, _| !name.eq_ignore_ascii_case(AUTHORIZATION.as_str()));
        headers.insert("Authorization".to_string(), format!("Bearer {token}"));
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::MemoryStore;

    const BASE: &str = "http://localhost:5261/v1";

    fn gateway(store: MemoryStore) -> Gateway<MemoryStore> {
        Gateway::new(Client::new(), BASE, store)
    }

    #[test]
    fn absolute_detection() {
        assert!(is_absolute("http://other.host/data"));
        assert!(is_absolute("HTTPS://other.host"));
        assert!(!is_absolute("/alunos"));
        assert!(!is_absolute("alunos"));
        assert!(!is_absolute("localhost:5261/v1"));
        assert!(!is_absolute("ftp://files.host/x"));
    }

    #[test]
    fn scheme_prefix_alone_is_not_absolute() {
        assert!(!is_absolute("http://"));
        assert!(!is_absolute("httpbin/x"));
        assert!(is_absolute("HTTP://x.y/z"));

        let gateway = gateway(MemoryStore::new());
        assert_eq!(gateway.resolve_url("http://"), "http://localhost:5261/v1http://");
    }

    #[test]
    fn borrowed_store_works() {
        let store = MemoryStore::with_token("abc123");
        let gateway = Gateway::new(Client::new(), BASE, &store);
        let headers = gateway.effective_headers(&RequestOptions::new());
        assert_eq!(headers["Authorization"], "Bearer abc123");

        store.remove(JWT_TOKEN_KEY);
        assert!(gateway.effective_headers(&RequestOptions::new()).is_empty());
    }

    #[test]
    fn relative_paths_are_appended_to_base() {
        let gateway = gateway(MemoryStore::new());
        assert_eq!(gateway.resolve_url("/alunos"), "http://localhost:5261/v1/alunos");
        assert_eq!(
            gateway.resolve_url("/turmas?paginaAtual=2"),
            "http://localhost:5261/v1/turmas?paginaAtual=2"
        );
    }

    #[test]
    fn absolute_paths_are_unchanged() {
        let gateway = gateway(MemoryStore::new());
        assert_eq!(
            gateway.resolve_url("http://other.host/data"),
            "http://other.host/data"
        );
    }

    #[test]
    fn token_overrides_caller_authorization() {
        let gateway = gateway(MemoryStore::with_token("abc123"));
        let options = RequestOptions::new()
            .header("Authorization", "Basic Zm9v")
            .header("X", "1");

        let headers = gateway.effective_headers(&options);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["Authorization"], "Bearer abc123");
        assert_eq!(headers["X"], "1");
        // caller's map is left alone
        assert_eq!(
            options.headers.as_ref().unwrap()["Authorization"],
            "Basic Zm9v"
        );
    }

    #[test]
    fn token_replaces_any_spelling_of_authorization() {
        let gateway = gateway(MemoryStore::with_token("abc123"));
        let options = RequestOptions::new().header("AUTHORIZATION", "stale");
        let headers = gateway.effective_headers(&options);
        assert_eq!(headers.len(), 1);
        assert_eq!(headers["Authorization"], "Bearer abc123");
    }

    #[test]
    fn without_token_caller_headers_are_kept() {
        let gateway = gateway(MemoryStore::new());
        let options = RequestOptions::new().header("Authorization", "Basic Zm9v");
        let headers = gateway.effective_headers(&options);
        assert_eq!(headers.len(), 1);
        assert_eq!(headers["Authorization"], "Basic Zm9v");

        assert!(gateway.effective_headers(&RequestOptions::new()).is_empty());
    }

    #[test]
    fn prepared_request_targets_base_with_bearer() {
        let gateway = gateway(MemoryStore::with_token("abc123"));
        let request = gateway
            .prepare("/alunos", &RequestOptions::new())
            .build()
            .unwrap();

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.url().as_str(), "http://localhost:5261/v1/alunos");
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer abc123");
    }

    #[test]
    fn prepared_request_passes_options_through() {
        let gateway = gateway(MemoryStore::new());
        let options = RequestOptions::new()
            .method(Method::POST)
            .header("X", "1")
            .query_pair("paginaAtual", "2")
            .body(r#"{"nome":"Ana"}"#)
            .timeout(Duration::from_secs(5));
        let request = gateway
            .prepare("http://other.host/data", &options)
            .build()
            .unwrap();

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.url().as_str(), "http://other.host/data?paginaAtual=2");
        assert_eq!(request.headers().len(), 1);
        assert_eq!(request.headers()["x"], "1");
        assert!(request.headers().get(AUTHORIZATION).is_none());
        assert_eq!(
            request.body().and_then(reqwest::Body::as_bytes),
            Some(br#"{"nome":"Ana"}"#.as_slice())
        );
        assert_eq!(request.timeout(), Some(&Duration::from_secs(5)));
    }
}
