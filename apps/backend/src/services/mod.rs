pub mod games;

pub use games::{CreateMatchOptions, GameService, PlayerSpec};
