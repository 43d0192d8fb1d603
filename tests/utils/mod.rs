pub mod actions;
pub mod assertions;
pub mod game_builders;
pub mod mocks;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use assertions::{OutcomeExpectation, SnapshotAssertion};
#[allow(unused_imports)]
pub use game_builders::{GameBuilder, GAME_ID};
#[allow(unused_imports)]
pub use mocks::{mock_socket_pair, MockClient, MockEvaluator, MockSocket};
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder};
