// Session events and their per-play distribution

// Public API
pub use bus::EventBus;
pub use events::SessionEvent;

// Internal modules
mod bus;
mod events;
