//! Event types and observers used by the physics pipeline.
//!
//! Events provide a decoupled way for the collision pipeline to tell
//! gameplay code that something happened without knowing who listens.
//!
//! Submodules:
//! - [`collision`] – collision notifications emitted after each physics pass
pub mod collision;
