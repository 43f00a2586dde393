//! Core [`Component`] trait and component kind identity.
//!
//! A component is a unit of behaviour attached to exactly one
//! [`GameObject`](crate::GameObject). The object drives it through a fixed
//! set of lifecycle hooks; every hook has a no-op default so concrete
//! components override only what they need.
//!
//! ## Kind Identity
//!
//! [`ComponentTypeId`] is derived from a **string name** using the FNV-1a
//! 64-bit hash algorithm. Typed attachment hashes [`Component::type_name`];
//! name-keyed attachment hashes the caller's explicit name. Both land in the
//! same key space of an object.

use std::any::{Any, TypeId};

use crate::handle::Owner;

/// A component kind identifier, derived from its string name using the
/// FNV-1a 64-bit hash algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentTypeId(pub u64);

impl ComponentTypeId {
    /// FNV-1a 64-bit offset basis.
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

    /// FNV-1a 64-bit prime.
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    /// Compute the [`ComponentTypeId`] for a kind name.
    ///
    /// # Algorithm (FNV-1a 64-bit)
    ///
    /// ```text
    /// hash = 0xcbf29ce484222325          (offset basis)
    /// for each byte in name.as_bytes():
    ///     hash = hash XOR byte
    ///     hash = hash * 0x00000100000001b3  (prime)
    /// return hash
    /// ```
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = Self::FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }

    /// Compute the [`ComponentTypeId`] for a Rust component type `C`.
    #[must_use]
    pub fn of<C: Component>() -> Self {
        Self::from_name(C::type_name())
    }
}

impl std::fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// The core component trait.
///
/// Every hook receives the [`Owner`] back-reference. The owner is a weak
/// link: it never keeps the object alive, and it is already gone when
/// [`Component::on_release`] runs as part of the object's own destruction.
///
/// Hook order over an object's life:
///
/// 1. `on_start`, once, immediately before the first `on_pre_update`.
/// 2. `on_pre_update`, `on_update`, `on_post_update`, once per active frame.
/// 3. `on_release`, once, on removal or when the owning object is destroyed.
///
/// # Examples
///
/// ```rust
/// use engine_component::{Component, GameObject, Owner};
///
/// #[derive(Default)]
/// struct Counter {
///     ticks: u32,
/// }
///
/// impl Component for Counter {
///     fn on_update(&mut self, _owner: &Owner) {
///         self.ticks += 1;
///     }
/// }
///
/// let object = GameObject::new("Counter");
/// object.set_active(true);
/// let counter = object.add_component(Counter::default());
/// object.update();
/// assert_eq!(counter.with(|c| c.ticks), Some(1));
/// ```
pub trait Component: AsAny {
    /// A human-readable name for this component kind.
    ///
    /// Defaults to the fully qualified Rust type path.
    fn type_name() -> &'static str
    where
        Self: Sized,
    {
        std::any::type_name::<Self>()
    }

    /// Called once, before the first [`Component::on_pre_update`].
    fn on_start(&mut self, _owner: &Owner) {}

    /// Called at the start of every active frame.
    fn on_pre_update(&mut self, _owner: &Owner) {}

    /// Called once per active frame, after the pre-update phase.
    fn on_update(&mut self, _owner: &Owner) {}

    /// Called at the end of every active frame.
    fn on_post_update(&mut self, _owner: &Owner) {}

    /// Called exactly once when the component is detached or its owner is
    /// destroyed. Must not panic.
    fn on_release(&mut self, _owner: &Owner) {}
}

impl Component for Box<dyn Component> {
    fn on_start(&mut self, owner: &Owner) {
        (**self).on_start(owner);
    }

    fn on_pre_update(&mut self, owner: &Owner) {
        (**self).on_pre_update(owner);
    }

    fn on_update(&mut self, owner: &Owner) {
        (**self).on_update(owner);
    }

    fn on_post_update(&mut self, owner: &Owner) {
        (**self).on_post_update(owner);
    }

    fn on_release(&mut self, owner: &Owner) {
        (**self).on_release(owner);
    }
}

/// Views a component as [`Any`] so trait objects can be downcast.
///
/// Implemented for every `'static` type; components never implement it by
/// hand.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Borrow `component` as a `C`, looking through any `Box<dyn Component>`
/// wrapping.
pub(crate) fn downcast_ref<C: Component>(component: &dyn Component) -> Option<&C> {
    let any = component.as_any();
    if let Some(found) = any.downcast_ref::<C>() {
        return Some(found);
    }
    any.downcast_ref::<Box<dyn Component>>()
        .and_then(|inner| downcast_ref::<C>(&**inner))
}

/// Mutable counterpart of [`downcast_ref`].
pub(crate) fn downcast_mut<C: Component>(component: &mut dyn Component) -> Option<&mut C> {
    if (*component).as_any().is::<C>() {
        return component.as_any_mut().downcast_mut::<C>();
    }
    component
        .as_any_mut()
        .downcast_mut::<Box<dyn Component>>()
        .and_then(|inner| downcast_mut::<C>(&mut **inner))
}

/// The [`TypeId`] of the innermost value behind any `Box<dyn Component>`
/// wrapping.
pub(crate) fn concrete_type_id(component: &dyn Component) -> TypeId {
    match component.as_any().downcast_ref::<Box<dyn Component>>() {
        Some(inner) => concrete_type_id(&**inner),
        None => (*component.as_any()).type_id(),
    }
}

/// The lifecycle hook being fanned out to an object's components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    PreUpdate,
    Update,
    PostUpdate,
    Release,
}

impl Phase {
    /// Invoke the hook for this phase on `component`.
    pub fn dispatch<C: Component + ?Sized>(self, component: &mut C, owner: &Owner) {
        match self {
            Self::Start => component.on_start(owner),
            Self::PreUpdate => component.on_pre_update(owner),
            Self::Update => component.on_update(owner),
            Self::PostUpdate => component.on_post_update(owner),
            Self::Release => component.on_release(owner),
        }
    }
}
