// Game catalog: where play sessions get their question sets from

// Public API
pub use demo::{demo_game, seed_demo_answers, DEMO_GAME_ID};
pub use http::HttpGameCatalog;
pub use repository::{GameCatalog, InMemoryGameCatalog, PlayMode};

// Internal modules
mod demo;
mod http;
mod repository;
