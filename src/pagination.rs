use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Position and size of a page of results, as exchanged with the upstream API.
///
/// Fields are stored exactly as given. Nothing ties `total_pages` to
/// `total_records` and `page_size`; keeping them consistent is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    #[serde(rename = "paginaAtual")]
    pub current_page: i64,
    #[serde(rename = "tamanhoPagina")]
    pub page_size: i64,
    #[serde(rename = "totalRegistro")]
    pub total_records: i64,
    #[serde(rename = "totalPaginas")]
    pub total_pages: i64,
}

/// Any subset of the [`Pagination`] fields. Missing ones fall back to the defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PaginationParams {
    #[serde(rename = "paginaAtual")]
    pub current_page: Option<i64>,
    #[serde(rename = "tamanhoPagina")]
    pub page_size: Option<i64>,
    #[serde(rename = "totalRegistro")]
    pub total_records: Option<i64>,
    #[serde(rename = "totalPaginas")]
    pub total_pages: Option<i64>,
}

impl Pagination {
    #[must_use]
    pub fn new(params: PaginationParams) -> Self {
        Self {
            current_page: params.current_page.unwrap_or(DEFAULT_CURRENT_PAGE),
            page_size: params.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            total_records: params.total_records.unwrap_or(0),
            total_pages: params.total_pages.unwrap_or(0),
        }
    }

    /// The request side of the descriptor, as query parameters for the upstream API.
    #[must_use]
    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [
            ("paginaAtual", self.current_page.to_string()),
            ("tamanhoPagina", self.page_size.to_string()),
        ]
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(PaginationParams::default())
    }
}

impl From<PaginationParams> for Pagination {
    fn from(params: PaginationParams) -> Self {
        Self::new(params)
    }
}
