//! Credit approval decision engine.
//!
//! The [`engine`] module holds the four-stage decision pipeline: a persona
//! rule tree, a breadth-first credit limit search, a fuzzy risk model, and a
//! feed-forward approval network, sequenced by [`engine::CreditAnalysisPipeline`].
//! The surrounding modules carry process concerns (env config, telemetry,
//! top-level errors) for the CLI binary.

pub mod config;
pub mod engine;
pub mod error;
pub mod telemetry;
