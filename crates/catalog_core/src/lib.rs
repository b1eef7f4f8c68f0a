use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::{EntitySummary, TypeTag},
    error::{CatalogError, CatalogResult},
    protocol::{PageQuery, PageResponse, PokemonDetail, TypeListResponse, TypeMembershipResponse},
};
use tracing::debug;
use url::Url;

pub mod detail;
pub mod list_controller;
pub mod view_state;

pub use detail::{DetailController, DetailState, EntityDetailView};
pub use list_controller::{InitializeOutcome, ListController, ListEvent};
pub use view_state::{FetchOutcome, FilterSpec, ListSnapshot, ListState, Projection};

pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Read side of the remote catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn fetch_page(&self, query: PageQuery) -> CatalogResult<PageResponse>;
    async fn fetch_types(&self) -> CatalogResult<Vec<TypeTag>>;
    async fn fetch_type_members(&self, type_name: &str) -> CatalogResult<Vec<EntitySummary>>;
    async fn fetch_detail(&self, name: &str) -> CatalogResult<PokemonDetail>;
}

pub struct HttpCatalogClient {
    http: Client,
    base_url: Url,
}

impl HttpCatalogClient {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> CatalogResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                CatalogError::network_or_parse(format!(
                    "catalog base url cannot carry a path: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: Option<&PageQuery>,
    ) -> CatalogResult<T> {
        debug!(%url, "catalog request");
        let mut request = self.http.get(url.clone());
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = request.send().await.map_err(transport_error)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(CatalogError::not_found(format!("{url} returned 404")));
        }

        response
            .error_for_status()
            .map_err(transport_error)?
            .json::<T>()
            .await
            .map_err(transport_error)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn fetch_page(&self, query: PageQuery) -> CatalogResult<PageResponse> {
        let url = self.endpoint(&["pokemon"])?;
        self.get_json(url, Some(&query)).await
    }

    async fn fetch_types(&self) -> CatalogResult<Vec<TypeTag>> {
        let url = self.endpoint(&["type"])?;
        let body: TypeListResponse = self.get_json(url, None).await?;
        Ok(body.results)
    }

    async fn fetch_type_members(&self, type_name: &str) -> CatalogResult<Vec<EntitySummary>> {
        let url = self.endpoint(&["type", type_name])?;
        let body: TypeMembershipResponse = self.get_json(url, None).await?;
        Ok(body.into_members())
    }

    async fn fetch_detail(&self, name: &str) -> CatalogResult<PokemonDetail> {
        let url = self.endpoint(&["pokemon", name])?;
        self.get_json(url, None).await
    }
}

fn transport_error(err: reqwest::Error) -> CatalogError {
    if err.status() == Some(StatusCode::NOT_FOUND) {
        return CatalogError::not_found(err.to_string());
    }
    if err.is_decode() {
        return CatalogError::network_or_parse(format!("malformed catalog payload: {err}"));
    }
    CatalogError::network_or_parse(err.to_string())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
