pub mod phone;
pub mod score;

pub use phone::{is_unknown_key, normalize_phone};
pub use score::{ExtractedScore, ScoreExtractor};
