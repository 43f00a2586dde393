//! # engine_app
//!
//! Owns object lifetimes for the runtime: the [`ObjectManager`] registry
//! that names, looks up, and reclaims objects, and the [`FrameLoop`] that
//! drives their update phases at a fixed rate.

pub mod config;
pub mod error;
pub mod frame;
pub mod manager;

pub use config::{EngineConfig, FrameConfig, ManagerConfig};
pub use error::EngineError;
pub use frame::FrameLoop;
pub use manager::{ObjectKey, ObjectManager};
