pub mod error;
pub mod http;

use futures::future::BoxFuture;

use crate::{dto::game_state::GameState, source::error::SourceResult};

pub use self::http::HttpGameStateSource;

/// Abstraction over where the authoritative game state comes from.
pub trait GameStateSource: Send + Sync {
    /// Fetch the current game state once.
    fn fetch(&self) -> BoxFuture<'static, SourceResult<GameState>>;
}
