//! Testing infrastructure for finsight integration tests.
//!
//! - `fixtures`: recorded provider responses and stream transcripts
//! - `world`: isolated temp directory for driving the CLI
//! - `assertions`: checks over the CLI's JSON output

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use fixtures::SampleFiles;
pub use world::TestWorld;
