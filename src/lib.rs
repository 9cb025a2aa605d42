#![warn(clippy::all, clippy::nursery, clippy::pedantic)]
pub mod auth;
pub mod config;
pub mod credentials;
pub mod error;
pub mod gateway;
pub mod pagination;
pub mod routes;
pub mod state;
pub mod views;

pub use config::Config;
pub use error::Error;
pub use gateway::{Gateway, RequestOptions};
pub use pagination::{Pagination, PaginationParams};
pub use routes::router;
pub use state::AppState;
