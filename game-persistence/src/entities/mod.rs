pub mod games;
pub mod prelude;
pub mod rankings;
pub mod series;
pub mod users;
