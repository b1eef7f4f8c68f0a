//! Controller layer: prompt intents and their dispatch onto the catalog controllers.

pub mod events;
pub mod orchestration;
