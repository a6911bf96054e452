pub mod evaluator;
pub mod game_events;
pub mod game_state;
pub mod scoring;
pub mod series;
pub mod tiers;
pub mod words;

// Re-export main components
pub use evaluator::*;
pub use game_events::*;
pub use game_state::*;
pub use scoring::*;
pub use series::*;
pub use tiers::*;
pub use words::*;
