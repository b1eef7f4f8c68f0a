use serde::{Deserialize, Serialize};

/// Number of entries requested per catalog page.
pub const PAGE_LIMIT: u32 = 50;

/// Artwork host used when no template is configured. `{id}` is replaced with
/// the numeric entity id.
pub const DEFAULT_ARTWORK_URL_TEMPLATE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/{id}.png";

/// Index of the numeric id in `url.split('/')` for catalog resource urls
/// (`https://host/api/v2/pokemon/25/`).
const ENTITY_ID_SEGMENT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub i64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySummary {
    pub name: String,
    pub url: String,
}

impl EntitySummary {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    pub fn entity_id(&self) -> Option<EntityId> {
        self.url
            .split('/')
            .nth(ENTITY_ID_SEGMENT)
            .and_then(|segment| segment.parse::<i64>().ok())
            .map(EntityId)
    }

    pub fn artwork_url(&self, template: &str) -> Option<String> {
        self.entity_id()
            .map(|id| template.replace("{id}", &id.to_string()))
    }

    pub fn matches_search(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeTag {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl TypeTag {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageDirection {
    Next,
    Prev,
}

/// Server-side pagination bounds.
///
/// `offset` never exceeds [`PageWindow::max_offset`]. Every page but the last
/// starts on a multiple of `limit`; the last one is pinned to `total - limit`
/// so the tail of the catalog stays reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    offset: u32,
    limit: u32,
    total: u32,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::with_limit(PAGE_LIMIT)
    }
}

impl PageWindow {
    /// `limit` is raised to at least 1.
    pub fn new(offset: u32, limit: u32, total: u32) -> Self {
        Self {
            offset,
            limit: limit.max(1),
            total,
        }
    }

    pub fn with_limit(limit: u32) -> Self {
        Self::new(0, limit, 0)
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Records a page that arrived at `offset` reporting `total` entries.
    pub fn commit(&mut self, offset: u32, total: u32) {
        self.offset = offset;
        self.total = total;
    }

    /// Same bounds, positioned at `offset`.
    pub fn at_offset(self, offset: u32) -> Self {
        Self { offset, ..self }
    }

    pub fn max_offset(&self) -> u32 {
        self.total.saturating_sub(self.limit)
    }

    pub fn can_go_prev(&self) -> bool {
        self.target(PageDirection::Prev).is_some()
    }

    pub fn can_go_next(&self) -> bool {
        self.target(PageDirection::Next).is_some()
    }

    /// Offset a page change in `direction` would land on, or `None` when the
    /// move is a no-op.
    pub fn target(&self, direction: PageDirection) -> Option<u32> {
        match direction {
            PageDirection::Prev => {
                if self.offset == 0 {
                    return None;
                }
                // Back onto the aligned grid, also from a pinned last page.
                Some((self.offset - 1) / self.limit * self.limit)
            }
            PageDirection::Next => {
                let candidate = self.offset.saturating_add(self.limit);
                if candidate >= self.total {
                    return None;
                }
                let target = candidate.min(self.max_offset());
                (target != self.offset).then_some(target)
            }
        }
    }

    /// 1-based page number of `offset`.
    pub fn page_number(&self) -> u32 {
        if self.total > 0 && self.offset >= self.max_offset() {
            return self.page_count();
        }
        self.offset / self.limit + 1
    }

    pub fn page_count(&self) -> u32 {
        self.total.div_ceil(self.limit).max(1)
    }

    /// Offset of the 1-based `page`, clamped into range.
    pub fn offset_for_page(&self, page: u32) -> u32 {
        page.saturating_sub(1)
            .saturating_mul(self.limit)
            .min(self.max_offset())
    }
}
