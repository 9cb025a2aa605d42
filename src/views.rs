use axum::{
    extract::Query,
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    auth::ApiClient,
    credentials::{CredentialStore, JWT_TOKEN_KEY},
    gateway::RequestOptions,
    pagination::{Pagination, PaginationParams},
    routes::View,
    Error,
};

#[derive(Debug, serde::Serialize)]
pub struct ViewInfo {
    pub view: View,
    pub authenticated: bool,
}

#[allow(clippy::unused_async)]
pub async fn login(ApiClient(api): ApiClient) -> Json<ViewInfo> {
    Json(ViewInfo {
        view: View::Login,
        authenticated: api.credentials().get(JWT_TOKEN_KEY).is_some(),
    })
}

/// Forwards a page request for `resource` upstream and relays the answer as-is.
pub async fn list(
    ApiClient(api): ApiClient,
    resource: &'static str,
    Query(params): Query<PaginationParams>,
) -> Result<Response, Error> {
    let pagination = Pagination::new(params);
    let options = pagination
        .query_pairs()
        .into_iter()
        .fold(RequestOptions::new(), |options, (name, value)| {
            options.query_pair(name, value)
        });
    let upstream = api.fetch(resource, options).await?;
    relay(upstream).await
}

async fn relay(upstream: reqwest::Response) -> Result<Response, Error> {
    let status =
        StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| HeaderValue::from_bytes(value.as_bytes()).ok());
    let body = upstream.bytes().await?;

    let mut response = (status, body).into_response();
    if let Some(content_type) = content_type {
        response.headers_mut().insert(CONTENT_TYPE, content_type);
    }
    Ok(response)
}
