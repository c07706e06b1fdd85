//! freightflow - transportation network flow optimization.
//!
//! Formulates a single-commodity bipartite transportation LP (per-source
//! capacity limits, per-customer demand minimums, optional per-lane fixed
//! quantities), solves it through an external LP engine, and turns the
//! post-optimal duals and reduced costs into directional cost conclusions.

pub mod error;
pub mod formulation;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod sensitivity;
pub mod solver;
pub mod telemetry;

pub use error::FlowError;
