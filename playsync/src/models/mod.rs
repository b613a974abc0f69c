mod board;
mod score;
mod source;

pub use board::*;
pub use score::*;
pub use source::*;
