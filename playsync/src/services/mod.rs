pub mod document;
pub mod leaderboard;
pub mod views;

pub use document::{sync, write_document, DocumentAssembler};
pub use leaderboard::{build_people_scores, Leaderboard, PersonAggregate};
