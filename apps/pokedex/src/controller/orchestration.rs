//! Intent dispatch from the browse prompt to the list and detail controllers.

use std::sync::Arc;

use catalog_core::{CatalogApi, DetailController, FetchOutcome, ListController};
use shared::domain::{PageDirection, TypeTag};

use crate::{
    controller::events::{Intent, OpenTarget, HELP_TEXT},
    render::{render_detail, render_list},
};

pub enum Flow {
    Render(String),
    Quit,
}

pub struct Session {
    pub api: Arc<dyn CatalogApi>,
    pub list: Arc<ListController>,
    pub artwork_url_template: String,
}

impl Session {
    pub async fn render_list(&self) -> String {
        render_list(&self.list.snapshot().await, &self.artwork_url_template)
    }

    pub async fn dispatch(&self, intent: Intent) -> Flow {
        let intent_name = intent_name(&intent);
        tracing::debug!(intent = intent_name, "dispatching browse intent");

        match intent {
            Intent::Quit => return Flow::Quit,
            Intent::Help => return Flow::Render(format!("{HELP_TEXT}\n")),
            Intent::Show => {}
            Intent::Next => {
                note_skipped(self.list.go_to_page(PageDirection::Next).await, intent_name)
            }
            Intent::Prev => {
                note_skipped(self.list.go_to_page(PageDirection::Prev).await, intent_name)
            }
            Intent::Page(page) => {
                note_skipped(self.list.go_to_page_number(page).await, intent_name)
            }
            Intent::Search(text) => self.list.set_search_text(&text).await,
            Intent::Type(name) => {
                self.list.set_type_filter(name.map(TypeTag::named)).await;
            }
            Intent::Reset => self.list.reset().await,
            Intent::Open(target) => return Flow::Render(self.open(target).await),
        }

        Flow::Render(self.render_list().await)
    }

    async fn open(&self, target: OpenTarget) -> String {
        let name = match target {
            OpenTarget::Name(name) => name,
            OpenTarget::Position(position) => {
                let snapshot = self.list.snapshot().await;
                match position
                    .checked_sub(1)
                    .and_then(|idx| snapshot.displayed_list.get(idx))
                {
                    Some(entry) => entry.name.clone(),
                    None => return format!("no entry at position {position}\n"),
                }
            }
        };

        let detail = DetailController::new(Arc::clone(&self.api), name);
        let state = detail.load().await;
        render_detail(detail.name(), &state)
    }
}

fn note_skipped(outcome: FetchOutcome, intent_name: &str) {
    if outcome == FetchOutcome::Skipped {
        tracing::debug!(intent = intent_name, "no page in that direction");
    }
}

fn intent_name(intent: &Intent) -> &'static str {
    match intent {
        Intent::Next => "next",
        Intent::Prev => "prev",
        Intent::Page(_) => "page",
        Intent::Search(_) => "search",
        Intent::Type(_) => "type",
        Intent::Reset => "reset",
        Intent::Open(_) => "open",
        Intent::Show => "show",
        Intent::Help => "help",
        Intent::Quit => "quit",
    }
}
