//! Plain-text rendering of list and detail snapshots.

use std::fmt;

use catalog_core::{DetailState, ListSnapshot};
use shared::{domain::TypeTag, route::Route};

const ALL_TYPES: &str = "All Types";

pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn render_list(snapshot: &ListSnapshot, artwork_url_template: &str) -> String {
    ListView {
        snapshot,
        artwork_url_template,
    }
    .to_string()
}

pub fn render_type_selector(vocabulary: &[TypeTag], selected: Option<&TypeTag>) -> String {
    TypeSelector {
        vocabulary,
        selected,
    }
    .to_string()
}

pub fn render_detail(name: &str, state: &DetailState) -> String {
    DetailView { name, state }.to_string()
}

struct ListView<'a> {
    snapshot: &'a ListSnapshot,
    artwork_url_template: &'a str,
}

impl fmt::Display for ListView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot;
        writeln!(f, "Pokémon List")?;

        let search = match snapshot.filter.search_text.as_str() {
            "" => "-",
            text => text,
        };
        let type_label = snapshot
            .filter
            .type_filter
            .as_ref()
            .map_or(ALL_TYPES, |tag| tag.name.as_str());
        writeln!(f, "Search: {search:<20} Type: {type_label}")?;

        if snapshot.is_loading {
            return writeln!(f, "Loading...");
        }

        if snapshot.displayed_list.is_empty() {
            writeln!(f, "(no matches)")?;
        }
        for (idx, entry) in snapshot.displayed_list.iter().enumerate() {
            let artwork = entry
                .artwork_url(self.artwork_url_template)
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                f,
                "{:>4}. {:<24} {:<32} {}",
                idx + 1,
                capitalize(&entry.name),
                Route::detail_for(entry).path(),
                artwork
            )?;
        }

        let window = snapshot.window;
        writeln!(
            f,
            "{} Page {} of {} ({} total) {}",
            if snapshot.can_go_prev { "[prev]" } else { "[----]" },
            window.page_number(),
            window.page_count(),
            window.total(),
            if snapshot.can_go_next { "[next]" } else { "[----]" },
        )
    }
}

struct TypeSelector<'a> {
    vocabulary: &'a [TypeTag],
    selected: Option<&'a TypeTag>,
}

impl fmt::Display for TypeSelector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = |active: bool| if active { "*" } else { " " };
        writeln!(f, "{} {ALL_TYPES}", marker(self.selected.is_none()))?;
        for tag in self.vocabulary {
            let active = self
                .selected
                .is_some_and(|selected| selected.name == tag.name);
            writeln!(f, "{} {}", marker(active), tag.name)?;
        }
        Ok(())
    }
}

struct DetailView<'a> {
    name: &'a str,
    state: &'a DetailState,
}

impl fmt::Display for DetailView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", capitalize(self.name))?;

        let view = match self.state {
            DetailState::Loading => return writeln!(f, "Loading..."),
            DetailState::NotFound(message) => return writeln!(f, "{message}"),
            DetailState::Loaded(view) => view,
        };

        if let Some(artwork) = &view.artwork_url {
            writeln!(f, "Artwork: {artwork}")?;
        }
        writeln!(f, "Height: {} m", view.height_m)?;
        writeln!(f, "Weight: {} kg", view.weight_kg)?;
        match view.base_experience {
            Some(exp) => writeln!(f, "Base Experience: {exp}")?,
            None => writeln!(f, "Base Experience: -")?,
        }
        writeln!(f, "Abilities: {}", view.abilities_line())?;
        writeln!(f, "Types: {}", view.types_line())
    }
}
