//! Single-entity detail view: one fetch, three states.

use std::sync::Arc;

use shared::{error::NOT_FOUND_MESSAGE, protocol::PokemonDetail, route::Route};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::CatalogApi;

#[derive(Debug, Clone, PartialEq)]
pub struct EntityDetailView {
    pub name: String,
    pub height_m: f64,
    pub weight_kg: f64,
    pub base_experience: Option<u32>,
    pub abilities: Vec<String>,
    pub types: Vec<String>,
    pub artwork_url: Option<String>,
}

impl EntityDetailView {
    pub fn abilities_line(&self) -> String {
        self.abilities.join(", ")
    }

    pub fn types_line(&self) -> String {
        self.types.join(", ")
    }
}

impl From<PokemonDetail> for EntityDetailView {
    fn from(detail: PokemonDetail) -> Self {
        Self {
            height_m: f64::from(detail.height) / 10.0,
            weight_kg: f64::from(detail.weight) / 10.0,
            base_experience: detail.base_experience,
            abilities: detail.ability_names(),
            types: detail.type_names(),
            artwork_url: detail.artwork_url().map(str::to_string),
            name: detail.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    /// Carries the user-facing message; every lookup failure ends up here.
    NotFound(String),
    Loaded(EntityDetailView),
}

pub struct DetailController {
    api: Arc<dyn CatalogApi>,
    name: String,
    state: Mutex<DetailState>,
}

impl DetailController {
    pub fn new(api: Arc<dyn CatalogApi>, name: impl Into<String>) -> Self {
        Self {
            api,
            name: name.into(),
            state: Mutex::new(DetailState::Loading),
        }
    }

    pub fn for_route(api: Arc<dyn CatalogApi>, route: &Route) -> Option<Self> {
        match route {
            Route::Pokemon { name } => Some(Self::new(api, name.clone())),
            Route::Home => None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn state(&self) -> DetailState {
        self.state.lock().await.clone()
    }

    pub async fn load(&self) -> DetailState {
        *self.state.lock().await = DetailState::Loading;

        let next = match self.api.fetch_detail(&self.name).await {
            Ok(detail) => {
                info!(name = %self.name, "detail loaded");
                DetailState::Loaded(detail.into())
            }
            Err(err) => {
                warn!(name = %self.name, "error fetching detail: {err}");
                DetailState::NotFound(NOT_FOUND_MESSAGE.to_string())
            }
        };

        let mut state = self.state.lock().await;
        *state = next;
        state.clone()
    }
}
