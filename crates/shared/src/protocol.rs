use serde::{Deserialize, Serialize};

use crate::domain::{EntitySummary, TypeTag};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageQuery {
    pub offset: u32,
    pub limit: u32,
}

/// `GET /pokemon?offset=..&limit=..`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse {
    pub count: u32,
    pub results: Vec<EntitySummary>,
}

/// `GET /type`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeListResponse {
    pub results: Vec<TypeTag>,
}

/// `GET /type/{name}`; members are wrapped one level deeper than page entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeMembershipResponse {
    pub pokemon: Vec<TypeMemberSlot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeMemberSlot {
    pub pokemon: EntitySummary,
}

impl TypeMembershipResponse {
    pub fn into_members(self) -> Vec<EntitySummary> {
        self.pokemon.into_iter().map(|slot| slot.pokemon).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedRef,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtworkSprite {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<ArtworkSprite>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

/// `GET /pokemon/{name}`. Height is in decimetres, weight in hectograms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub name: String,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub sprites: Sprites,
}

impl PokemonDetail {
    pub fn artwork_url(&self) -> Option<&str> {
        self.sprites
            .other
            .as_ref()
            .and_then(|other| other.official_artwork.as_ref())
            .and_then(|artwork| artwork.front_default.as_deref())
    }

    pub fn ability_names(&self) -> Vec<String> {
        self.abilities
            .iter()
            .map(|slot| slot.ability.name.clone())
            .collect()
    }

    pub fn type_names(&self) -> Vec<String> {
        self.types.iter().map(|slot| slot.kind.name.clone()).collect()
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
