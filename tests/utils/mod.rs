pub mod match_builders;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use match_builders::{MatchBuilder, PlayerBuilder};
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder, PLAYER_A, PLAYER_B};
