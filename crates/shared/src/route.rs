//! Navigation between the catalog list and the detail view.

use crate::domain::EntitySummary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Pokemon { name: String },
}

impl Route {
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Some(Self::Home);
        }

        let name = trimmed.strip_prefix("/pokemon/")?;
        if name.is_empty() || name.contains('/') {
            return None;
        }

        Some(Self::Pokemon {
            name: name.to_string(),
        })
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Pokemon { name } => format!("/pokemon/{name}"),
        }
    }

    pub fn detail_for(entry: &EntitySummary) -> Self {
        Self::Pokemon {
            name: entry.name.clone(),
        }
    }
}
