pub mod config;
pub mod error;
pub mod interview;
pub mod matching;
pub mod roster;
pub mod telemetry;
pub mod text;
