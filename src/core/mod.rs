//! Deterministic primitives.
//!
//! Pure math shared by the validator and the combat resolver. Nothing in
//! this module touches the clock, the network, or shared state.

pub mod stats;
pub mod vec2;
