pub mod game_repository;
pub mod ranking_repository;
pub mod series_repository;
pub mod user_repository;

pub use game_repository::{GameRepository, StoredGame};
pub use ranking_repository::RankingRepository;
pub use series_repository::SeriesRepository;
pub use user_repository::UserRepository;
