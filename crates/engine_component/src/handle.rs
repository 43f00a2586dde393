//! Non-owning references between objects and components.
//!
//! An object owns each attached component through a shared [`Slot`]. Every
//! reference handed out to callers is weak: [`ComponentHandle`] and
//! [`AnyComponentHandle`] point down at a slot, [`Owner`] points up at the
//! object. None of them extends a lifetime, so owner and component can never
//! keep each other alive.
//!
//! A release requested while the component is borrowed, whether by one of
//! its own hooks or through a handle, is completed as soon as that borrow
//! ends.

use std::any::TypeId;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

use tracing::warn;

use crate::component::{Component, Phase, concrete_type_id, downcast_mut, downcast_ref};
use crate::object::GameObject;

/// Weak upward reference from a component to its owning object.
#[derive(Debug, Clone, Default)]
pub struct Owner {
    object: Weak<GameObject>,
}

impl Owner {
    pub(crate) fn new(object: Weak<GameObject>) -> Self {
        Self { object }
    }

    /// Returns the owning object, or `None` once it has been dropped.
    #[must_use]
    pub fn get(&self) -> Option<Rc<GameObject>> {
        self.object.upgrade()
    }

    /// Returns `true` if the owning object no longer exists.
    #[must_use]
    pub fn is_gone(&self) -> bool {
        self.object.strong_count() == 0
    }
}

/// Storage cell for one attached component.
///
/// The owner is fixed when the slot is created. `component` is the last
/// field so `Rc<Slot<C>>` coerces to `Rc<Slot<dyn Component>>`.
pub(crate) struct Slot<C: ?Sized> {
    pub(crate) owner: Owner,
    /// Type as attached, which is `Box<dyn Component>` for boxed values.
    stored: TypeId,
    /// Type behind any boxing.
    concrete: TypeId,
    started: Cell<bool>,
    released: Cell<bool>,
    release_pending: Cell<bool>,
    component: RefCell<C>,
}

impl<C: Component> Slot<C> {
    pub(crate) fn new(owner: Owner, component: C) -> Self {
        Self {
            owner,
            stored: TypeId::of::<C>(),
            concrete: concrete_type_id(&component),
            started: Cell::new(false),
            released: Cell::new(false),
            release_pending: Cell::new(false),
            component: RefCell::new(component),
        }
    }
}

impl<C: Component + ?Sized> Slot<C> {
    pub(crate) fn is_started(&self) -> bool {
        self.started.get()
    }

    pub(crate) fn is_released(&self) -> bool {
        self.released.get()
    }

    /// Returns `true` if the component can be viewed as a `K`.
    pub(crate) fn holds<K: Component>(&self) -> bool {
        let kind = TypeId::of::<K>();
        kind == self.stored || kind == self.concrete
    }

    /// Fire `on_start` if this slot has not started yet.
    pub(crate) fn start(&self) {
        if self.started.get() || self.released.get() {
            return;
        }
        if self.invoke(Phase::Start) {
            self.started.set(true);
        }
    }

    /// Run one hook. Returns `false` if the hook was skipped.
    ///
    /// A component that is already borrowed is in the middle of one of its
    /// own hooks; re-entering it is skipped.
    pub(crate) fn invoke(&self, phase: Phase) -> bool {
        if self.released.get() {
            return false;
        }
        let Ok(mut component) = self.component.try_borrow_mut() else {
            warn!(?phase, "component is busy, skipping re-entrant hook");
            return false;
        };
        phase.dispatch(&mut *component, &self.owner);
        drop(component);
        self.finish_release();
        true
    }

    /// Fire `on_release` exactly once.
    ///
    /// If the component is borrowed, the release is recorded and fired by
    /// [`Slot::finish_release`] once the borrow ends.
    pub(crate) fn release(&self) {
        if self.released.get() {
            return;
        }
        match self.component.try_borrow_mut() {
            Ok(mut component) => {
                self.release_pending.set(false);
                self.released.set(true);
                component.on_release(&self.owner);
            }
            Err(_) => self.release_pending.set(true),
        }
    }

    /// Complete a release requested while the component was borrowed.
    pub(crate) fn finish_release(&self) {
        if self.release_pending.get() {
            self.release();
        }
    }
}

/// Non-owning, typed handle to an attached component.
///
/// The handle is empty when the lookup that produced it missed, and expires
/// once the component is removed or its object destroyed. Callers must treat
/// both the same way: [`ComponentHandle::with`] returns `None`.
pub struct ComponentHandle<C> {
    slot: Option<Weak<Slot<dyn Component>>>,
    kind: PhantomData<fn() -> C>,
}

impl<C: Component> ComponentHandle<C> {
    pub(crate) fn new(slot: &Rc<Slot<dyn Component>>) -> Self {
        Self {
            slot: Some(Rc::downgrade(slot)),
            kind: PhantomData,
        }
    }

    /// An empty handle that never resolves.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            slot: None,
            kind: PhantomData,
        }
    }

    /// Returns `true` if the component is gone or was never found.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.live_slot().is_none()
    }

    /// Run `f` against a shared borrow of the component.
    ///
    /// Returns `None` if the handle is expired or the component is currently
    /// mutably borrowed.
    pub fn with<R>(&self, f: impl FnOnce(&C) -> R) -> Option<R> {
        let slot = self.live_slot()?;
        let component = slot.component.try_borrow().ok()?;
        let result = downcast_ref::<C>(&*component).map(f);
        drop(component);
        slot.finish_release();
        result
    }

    /// Run `f` against a mutable borrow of the component.
    ///
    /// Returns `None` if the handle is expired or the component is currently
    /// borrowed.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut C) -> R) -> Option<R> {
        let slot = self.live_slot()?;
        let mut component = slot.component.try_borrow_mut().ok()?;
        let result = downcast_mut::<C>(&mut *component).map(f);
        drop(component);
        slot.finish_release();
        result
    }

    /// The owner back-reference of the component, or an empty [`Owner`] if
    /// the handle is expired.
    #[must_use]
    pub fn owner(&self) -> Owner {
        self.live_slot()
            .map(|slot| slot.owner.clone())
            .unwrap_or_default()
    }

    fn live_slot(&self) -> Option<Rc<Slot<dyn Component>>> {
        self.slot
            .as_ref()?
            .upgrade()
            .filter(|slot| !slot.is_released())
    }
}

impl<C: Component> Default for ComponentHandle<C> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<C> Clone for ComponentHandle<C> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
            kind: PhantomData,
        }
    }
}

impl<C> fmt::Debug for ComponentHandle<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alive = self.slot.as_ref().is_some_and(|slot| slot.strong_count() > 0);
        f.debug_struct("ComponentHandle")
            .field("alive", &alive)
            .finish()
    }
}

/// Non-owning handle to a component whose concrete kind is not known at the
/// call site, as returned by name-keyed lookup.
#[derive(Clone, Default)]
pub struct AnyComponentHandle {
    slot: Option<Weak<Slot<dyn Component>>>,
}

impl AnyComponentHandle {
    pub(crate) fn new(slot: &Rc<Slot<dyn Component>>) -> Self {
        Self {
            slot: Some(Rc::downgrade(slot)),
        }
    }

    /// Returns `true` if the component is gone or was never found.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.live_slot().is_none()
    }

    /// Run `f` against a mutable borrow of the type-erased component.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut dyn Component) -> R) -> Option<R> {
        let slot = self.live_slot()?;
        let mut component = slot.component.try_borrow_mut().ok()?;
        let result = f(&mut *component);
        drop(component);
        slot.finish_release();
        Some(result)
    }

    /// Convert to a typed handle if the stored component is a `C`, either
    /// directly or behind a `Box<dyn Component>`.
    ///
    /// Returns an empty handle on a kind mismatch.
    #[must_use]
    pub fn downcast<C: Component>(&self) -> ComponentHandle<C> {
        self.live_slot()
            .filter(|slot| slot.holds::<C>())
            .map(|slot| ComponentHandle::new(&slot))
            .unwrap_or_default()
    }

    fn live_slot(&self) -> Option<Rc<Slot<dyn Component>>> {
        self.slot
            .as_ref()?
            .upgrade()
            .filter(|slot| !slot.is_released())
    }
}

impl fmt::Debug for AnyComponentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyComponentHandle")
            .field("alive", &!self.is_expired())
            .finish()
    }
}
