//! Moodboard core: a fixed-size board of color swatches, text notes and
//! images that can be added, selected, raised, dragged, nudged and exported.
//!
//! All changes flow through [`intent::BoardIntent`] values applied by the
//! pure [`engine::apply`] function. Input adapters (pointer drag, keyboard)
//! only ever emit intents, and [`session::BoardSession`] wires them to a
//! store for headless hosts.

pub mod board;
pub mod constants;
pub mod engine;
pub mod export;
pub mod input;
pub mod intent;
pub mod notifications;
pub mod perf;
pub mod scale;
pub mod script;
pub mod session;
pub mod settings;
pub mod spatial_index;
pub mod store;
pub mod types;
pub mod view;

pub use board::{BoardConfig, BoardState};
pub use engine::apply;
pub use intent::BoardIntent;
pub use session::BoardSession;
pub use store::{BoardStore, Dispatcher};
pub use types::{BoardItem, ItemContent, ItemId};
