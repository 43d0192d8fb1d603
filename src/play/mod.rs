// Live play sessions: one driver task per play, and the HTTP surface over them

// Public API
pub use cleanup_task::{cleanup_inactive_plays, start_cleanup_task};
pub use driver::{spawn_play, DriverConfig, PlayError, PlayHandle, SessionIntent};
pub use manager::PlayManager;
pub use types::{CreatePlayRequest, CreatePlayResponse, SelectOptionRequest};

// Internal modules
mod cleanup_task;
mod driver;
pub mod handlers;
mod manager;
mod types;
