use axum::{extract::FromRequestParts, http::request::Parts};
use tower_cookies::Cookies;

use crate::{credentials::CookieStore, gateway::Gateway, AppState, Error};

/// Gateway bound to the credentials in the caller's cookies.
pub struct ApiClient(pub Gateway<CookieStore>);

#[axum::async_trait]
impl FromRequestParts<AppState> for ApiClient {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookies = match Cookies::from_request_parts(parts, state).await {
            Ok(v) => v,
            Err(e) => return Err(Error::Extractor(e.1)),
        };
        let store = CookieStore::new(cookies, state.key.clone());
        let gateway = Gateway::new(state.client.clone(), state.api_base_url.as_ref(), store);
        Ok(Self(gateway))
    }
}
