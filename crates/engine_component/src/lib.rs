//! # engine_component
//!
//! The object/component core of the runtime: what a component is, how an
//! object stores and looks up its components, and how lifecycle hooks are
//! fanned out.
//!
//! This crate provides:
//!
//! - [`Component`] trait — the lifecycle hooks every component may override.
//! - [`ComponentTypeId`] — FNV-1a kind identifiers used as storage keys.
//! - [`GameObject`] — a named container that owns its components.
//! - [`ComponentHandle`] / [`AnyComponentHandle`] — non-owning lookups.
//! - [`Owner`] — the weak component-to-object back-reference.

pub mod component;
pub mod handle;
pub mod object;

pub use component::{AsAny, Component, ComponentTypeId, Phase};
pub use handle::{AnyComponentHandle, ComponentHandle, Owner};
pub use object::{GameObject, ReplacePolicy};
