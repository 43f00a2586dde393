//! [`GameObject`] — a named container that owns its components and drives
//! their lifecycle hooks.
//!
//! Components are stored type-erased, keyed by [`ComponentTypeId`]. Typed
//! lookup checks the stored value's concrete type, looking through a
//! `Box<dyn Component>` if the component was attached boxed.
//!
//! Objects are always handled through `Rc<GameObject>` so that components
//! can hold a weak [`Owner`] back-reference. All mutation goes through
//! `&self`; the component map is never borrowed while a hook runs.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::component::{Component, ComponentTypeId, Phase};
use crate::handle::{AnyComponentHandle, ComponentHandle, Owner, Slot};

/// What happens to a component displaced by attaching another one under the
/// same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacePolicy {
    /// Drop the previous instance without calling `on_release`.
    #[default]
    Orphan,
    /// Call `on_release` on the previous instance before dropping it.
    Release,
}

struct Entry {
    name: String,
    slot: Rc<Slot<dyn Component>>,
}

/// A named, independently activatable container of components.
pub struct GameObject {
    this: Weak<GameObject>,
    instance_id: Uuid,
    name: String,
    active: Cell<bool>,
    destroyed: Cell<bool>,
    replace_policy: ReplacePolicy,
    components: RefCell<BTreeMap<ComponentTypeId, Entry>>,
}

impl GameObject {
    /// Create an inactive object with the default [`ReplacePolicy`].
    #[must_use]
    pub fn new(name: impl Into<String>) -> Rc<Self> {
        Self::with_replace_policy(name, ReplacePolicy::default())
    }

    /// Create an inactive object with an explicit [`ReplacePolicy`].
    #[must_use]
    pub fn with_replace_policy(name: impl Into<String>, replace_policy: ReplacePolicy) -> Rc<Self> {
        let name = name.into();
        Rc::new_cyclic(|this| Self {
            this: Weak::clone(this),
            instance_id: Uuid::new_v4(),
            name,
            active: Cell::new(false),
            destroyed: Cell::new(false),
            replace_policy,
            components: RefCell::new(BTreeMap::new()),
        })
    }

    // ---------------------------------------------------------------------
    // Components
    // ---------------------------------------------------------------------

    /// Attach `component`, keyed by its kind, and return a handle to it.
    ///
    /// A component already attached under the same kind is displaced
    /// according to the object's [`ReplacePolicy`].
    pub fn add_component<C: Component>(&self, component: C) -> ComponentHandle<C> {
        self.attach(ComponentTypeId::of::<C>(), C::type_name(), component)
    }

    /// Attach `component` under an explicit name instead of its kind.
    ///
    /// Accepts `Box<dyn Component>` for callers that only hold a trait
    /// object; typed lookups still find the boxed value's concrete type.
    pub fn add_component_named<C: Component>(
        &self,
        name: &str,
        component: C,
    ) -> ComponentHandle<C> {
        self.attach(ComponentTypeId::from_name(name), name, component)
    }

    /// Look up the component of kind `C`.
    ///
    /// Returns an empty handle if none is attached.
    #[must_use]
    pub fn get_component<C: Component>(&self) -> ComponentHandle<C> {
        self.lookup(ComponentTypeId::of::<C>())
    }

    /// Look up a component attached under `name` and check that it is a `C`.
    #[must_use]
    pub fn get_component_named<C: Component>(&self, name: &str) -> ComponentHandle<C> {
        self.lookup(ComponentTypeId::from_name(name))
    }

    /// Look up a component attached under `name` without knowing its kind.
    #[must_use]
    pub fn get_component_by_name(&self, name: &str) -> AnyComponentHandle {
        self.components
            .borrow()
            .get(&ComponentTypeId::from_name(name))
            .map(|entry| AnyComponentHandle::new(&entry.slot))
            .unwrap_or_default()
    }

    /// Returns `true` if a component of kind `C` is attached.
    #[must_use]
    pub fn has_component<C: Component>(&self) -> bool {
        self.components
            .borrow()
            .contains_key(&ComponentTypeId::of::<C>())
    }

    /// Number of attached components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.borrow().len()
    }

    /// Release and detach the component of kind `C`.
    ///
    /// Returns `false` if none was attached.
    pub fn remove_component<C: Component>(&self) -> bool {
        self.detach(ComponentTypeId::of::<C>())
    }

    /// Release and detach the component attached under `name`.
    ///
    /// Returns `false` if none was attached.
    pub fn remove_component_named(&self, name: &str) -> bool {
        self.detach(ComponentTypeId::from_name(name))
    }

    fn attach<C: Component>(
        &self,
        key: ComponentTypeId,
        name: &str,
        component: C,
    ) -> ComponentHandle<C> {
        let slot: Rc<Slot<dyn Component>> =
            Rc::new(Slot::new(Owner::new(Weak::clone(&self.this)), component));
        let handle = ComponentHandle::new(&slot);
        let entry = Entry {
            name: name.to_owned(),
            slot,
        };

        let displaced = self.components.borrow_mut().insert(key, entry);
        debug!(object = %self.name, component = name, "component attached");

        if let Some(previous) = displaced {
            match self.replace_policy {
                ReplacePolicy::Orphan => warn!(
                    object = %self.name,
                    component = %previous.name,
                    "component replaced without release"
                ),
                ReplacePolicy::Release => {
                    previous.slot.release();
                    debug!(
                        object = %self.name,
                        component = %previous.name,
                        "replaced component released"
                    );
                }
            }
        }
        handle
    }

    fn lookup<C: Component>(&self, key: ComponentTypeId) -> ComponentHandle<C> {
        self.components
            .borrow()
            .get(&key)
            .filter(|entry| entry.slot.holds::<C>())
            .map(|entry| ComponentHandle::new(&entry.slot))
            .unwrap_or_default()
    }

    fn detach(&self, key: ComponentTypeId) -> bool {
        let Some(slot) = self
            .components
            .borrow()
            .get(&key)
            .map(|entry| Rc::clone(&entry.slot))
        else {
            return false;
        };

        slot.release();

        let removed = {
            let mut components = self.components.borrow_mut();
            // `on_release` may have re-attached under the same key.
            let unchanged = components
                .get(&key)
                .is_some_and(|entry| Rc::ptr_eq(&entry.slot, &slot));
            if unchanged { components.remove(&key) } else { None }
        };
        if let Some(entry) = removed {
            debug!(object = %self.name, component = %entry.name, "component removed");
        }
        true
    }

    // ---------------------------------------------------------------------
    // Status
    // ---------------------------------------------------------------------

    /// Set whether this object takes part in update fan-out.
    ///
    /// Fires no hooks: deactivation does not release components.
    pub fn set_active(&self, active: bool) {
        self.active.set(active);
    }

    /// Returns `true` if this object is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// The object's name. Fixed for its whole lifetime.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifies this particular object even if a later object reuses its
    /// name.
    #[must_use]
    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    /// Returns `true` if every attached component has had `on_start`.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.components
            .borrow()
            .values()
            .all(|entry| entry.slot.is_started())
    }

    /// Returns `true` once [`GameObject::destroy`] has run.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    /// Release every attached component and deactivate the object.
    ///
    /// The object stays reachable through any outstanding `Rc` but is
    /// reclaimed by the next manager sweep. Calling this again is a no-op.
    pub fn destroy(&self) {
        self.active.set(false);
        if self.destroyed.replace(true) {
            return;
        }
        self.release_components();
        debug!(object = %self.name, instance = %self.instance_id, "object destroyed");
    }

    fn release_components(&self) {
        let entries = std::mem::take(&mut *self.components.borrow_mut());
        for entry in entries.values() {
            entry.slot.release();
        }
    }

    // ---------------------------------------------------------------------
    // Update phases
    // ---------------------------------------------------------------------

    /// Start any components that have not started yet, then run
    /// `on_pre_update` on every component. No-op while inactive.
    pub fn pre_update(&self) {
        if !self.is_active() {
            return;
        }
        let slots = self.snapshot();
        for slot in &slots {
            slot.start();
        }
        Self::fan_out(&slots, Phase::PreUpdate);
    }

    /// Run `on_update` on every component. No-op while inactive.
    pub fn update(&self) {
        if self.is_active() {
            Self::fan_out(&self.snapshot(), Phase::Update);
        }
    }

    /// Run `on_post_update` on every component. No-op while inactive.
    pub fn post_update(&self) {
        if self.is_active() {
            Self::fan_out(&self.snapshot(), Phase::PostUpdate);
        }
    }

    /// Components attached at this instant. Hooks may attach or remove
    /// components while the snapshot is being walked.
    fn snapshot(&self) -> Vec<Rc<Slot<dyn Component>>> {
        self.components
            .borrow()
            .values()
            .map(|entry| Rc::clone(&entry.slot))
            .collect()
    }

    fn fan_out(slots: &[Rc<Slot<dyn Component>>], phase: Phase) {
        for slot in slots {
            slot.invoke(phase);
        }
    }
}

impl Drop for GameObject {
    fn drop(&mut self) {
        // Slots released by `destroy` are skipped; anything attached since
        // is released here.
        self.release_components();
    }
}

impl fmt::Debug for GameObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameObject")
            .field("name", &self.name)
            .field("instance_id", &self.instance_id)
            .field("active", &self.active.get())
            .field("destroyed", &self.destroyed.get())
            .field("components", &self.component_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Records every hook it receives into a shared log.
    struct Recorder {
        label: &'static str,
        log: Log,
    }

    impl Recorder {
        fn new(label: &'static str, log: &Log) -> Self {
            Self {
                label,
                log: Rc::clone(log),
            }
        }

        fn record(&self, hook: &str) {
            self.log.borrow_mut().push(format!("{}.{hook}", self.label));
        }
    }

    impl Component for Recorder {
        fn type_name() -> &'static str {
            "Recorder"
        }
        fn on_start(&mut self, _owner: &Owner) {
            self.record("start");
        }
        fn on_pre_update(&mut self, _owner: &Owner) {
            self.record("pre");
        }
        fn on_update(&mut self, _owner: &Owner) {
            self.record("update");
        }
        fn on_post_update(&mut self, _owner: &Owner) {
            self.record("post");
        }
        fn on_release(&mut self, _owner: &Owner) {
            self.record("release");
        }
    }

    /// A second kind sharing the recorder's behaviour.
    struct OtherRecorder(Recorder);

    impl Component for OtherRecorder {
        fn on_start(&mut self, owner: &Owner) {
            self.0.on_start(owner);
        }
        fn on_pre_update(&mut self, owner: &Owner) {
            self.0.on_pre_update(owner);
        }
        fn on_release(&mut self, owner: &Owner) {
            self.0.on_release(owner);
        }
    }

    fn new_log() -> Log {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn count(log: &Log, entry: &str) -> usize {
        log.borrow().iter().filter(|e| *e == entry).count()
    }

    fn active_object(name: &str) -> Rc<GameObject> {
        let object = GameObject::new(name);
        object.set_active(true);
        object
    }

    #[test]
    fn test_new_object_is_inactive() {
        let object = GameObject::new("Player");
        assert!(!object.is_active());
        assert_eq!(object.name(), "Player");
        assert_eq!(object.component_count(), 0);
    }

    #[test]
    fn test_get_component_returns_attached_instance() {
        let log = new_log();
        let object = active_object("Player");
        object.add_component(Recorder::new("a", &log));

        let handle = object.get_component::<Recorder>();
        assert!(!handle.is_expired());
        assert_eq!(handle.with(|p| p.label), Some("a"));
        assert!(object.has_component::<Recorder>());
    }

    #[test]
    fn test_get_missing_component_is_empty() {
        let object = active_object("Player");
        let handle = object.get_component::<Recorder>();
        assert!(handle.is_expired());
        assert_eq!(handle.with(|p| p.label), None);
    }

    #[test]
    fn test_owner_points_back_to_object() {
        let log = new_log();
        let object = active_object("Player");
        let handle = object.add_component(Recorder::new("a", &log));

        let owner = handle.owner().get().expect("owner should be alive");
        assert!(Rc::ptr_eq(&owner, &object));
    }

    #[test]
    fn test_owner_does_not_keep_object_alive() {
        let log = new_log();
        let object = active_object("Player");
        let handle = object.add_component(Recorder::new("a", &log));
        let owner = handle.owner();

        drop(object);
        assert!(owner.is_gone());
        assert!(handle.is_expired());
    }

    #[test]
    fn test_start_fires_once_before_first_pre_update() {
        let log = new_log();
        let object = active_object("Player");
        object.add_component(Recorder::new("a", &log));
        object.add_component(OtherRecorder(Recorder::new("b", &log)));

        object.pre_update();
        {
            let entries = log.borrow();
            let last_start = entries.iter().rposition(|e| e.ends_with(".start"));
            let first_pre = entries.iter().position(|e| e.ends_with(".pre"));
            assert!(last_start.unwrap() < first_pre.unwrap());
        }
        assert!(object.is_started());

        object.pre_update();
        assert_eq!(count(&log, "a.start"), 1);
        assert_eq!(count(&log, "b.start"), 1);
        assert_eq!(count(&log, "a.pre"), 2);
    }

    #[test]
    fn test_component_added_later_gets_its_own_start() {
        let log = new_log();
        let object = active_object("Player");
        object.add_component(Recorder::new("a", &log));
        object.pre_update();

        object.add_component(OtherRecorder(Recorder::new("b", &log)));
        assert!(!object.is_started());
        object.pre_update();

        assert_eq!(count(&log, "a.start"), 1);
        assert_eq!(count(&log, "b.start"), 1);
    }

    #[test]
    fn test_readded_kind_starts_again() {
        let log = new_log();
        let object = active_object("Player");
        object.add_component(Recorder::new("a", &log));
        object.pre_update();
        object.remove_component::<Recorder>();

        object.add_component(Recorder::new("a2", &log));
        object.pre_update();
        assert_eq!(count(&log, "a2.start"), 1);
    }

    #[test]
    fn test_inactive_object_fires_no_hooks() {
        let log = new_log();
        let object = active_object("Player");
        object.add_component(Recorder::new("a", &log));
        object.set_active(false);

        object.pre_update();
        object.update();
        object.post_update();
        assert!(log.borrow().is_empty());

        object.set_active(true);
        object.pre_update();
        object.update();
        object.post_update();
        assert_eq!(
            *log.borrow(),
            vec!["a.start", "a.pre", "a.update", "a.post"]
        );
    }

    #[test]
    fn test_deactivation_does_not_release() {
        let log = new_log();
        let object = active_object("Player");
        object.add_component(Recorder::new("a", &log));
        object.set_active(false);
        assert_eq!(count(&log, "a.release"), 0);
        assert!(object.has_component::<Recorder>());
    }

    #[test]
    fn test_remove_component_releases_and_detaches() {
        let log = new_log();
        let object = active_object("Player");
        let handle = object.add_component(Recorder::new("a", &log));

        assert!(object.remove_component::<Recorder>());
        assert_eq!(count(&log, "a.release"), 1);
        assert!(handle.is_expired());
        assert!(object.get_component::<Recorder>().is_expired());

        object.pre_update();
        object.update();
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_remove_absent_component_is_noop() {
        let object = active_object("Player");
        assert!(!object.remove_component::<Recorder>());
        assert!(!object.remove_component_named("Missing"));
    }

    #[test]
    fn test_drop_releases_each_component_once() {
        let log = new_log();
        let object = active_object("Player");
        object.add_component(Recorder::new("a", &log));
        object.add_component(OtherRecorder(Recorder::new("b", &log)));
        object.remove_component::<Recorder>();

        drop(object);
        assert_eq!(count(&log, "a.release"), 1);
        assert_eq!(count(&log, "b.release"), 1);
    }

    #[test]
    fn test_destroy_releases_once_and_deactivates() {
        let log = new_log();
        let object = active_object("Player");
        object.add_component(Recorder::new("a", &log));

        object.destroy();
        object.destroy();
        assert!(object.is_destroyed());
        assert!(!object.is_active());
        assert_eq!(object.component_count(), 0);

        drop(object);
        assert_eq!(count(&log, "a.release"), 1);
    }

    #[test]
    fn test_replace_orphans_previous_by_default() {
        let log = new_log();
        let object = active_object("Player");
        let first = object.add_component(Recorder::new("a", &log));
        object.add_component(Recorder::new("b", &log));

        assert!(first.is_expired());
        assert_eq!(count(&log, "a.release"), 0);
        assert_eq!(object.component_count(), 1);
        assert_eq!(object.get_component::<Recorder>().with(|p| p.label), Some("b"));
    }

    #[test]
    fn test_replace_policy_release_fires_release() {
        let log = new_log();
        let object = GameObject::with_replace_policy("Player", ReplacePolicy::Release);
        object.add_component(Recorder::new("a", &log));
        object.add_component(Recorder::new("b", &log));

        assert_eq!(count(&log, "a.release"), 1);
        assert_eq!(count(&log, "b.release"), 0);
    }

    #[test]
    fn test_named_component_lookup_and_downcast() {
        let log = new_log();
        let object = active_object("Player");
        object.add_component_named("recorder", Recorder::new("a", &log));

        assert!(!object.get_component_by_name("recorder").is_expired());
        assert!(object.get_component_by_name("other").is_expired());
        assert_eq!(
            object.get_component_named::<Recorder>("recorder").with(|p| p.label),
            Some("a")
        );
        // Kind mismatch yields an empty handle.
        assert!(object.get_component_named::<OtherRecorder>("recorder").is_expired());
        assert!(object.get_component_by_name("recorder").downcast::<OtherRecorder>().is_expired());

        assert!(object.remove_component_named("recorder"));
        assert_eq!(count(&log, "a.release"), 1);
    }

    #[test]
    fn test_boxed_component_attached_by_name() {
        let log = new_log();
        let object = active_object("Player");
        let boxed: Box<dyn Component> = Box::new(Recorder::new("boxed", &log));
        object.add_component_named("dynamic", boxed);

        object.pre_update();
        assert_eq!(*log.borrow(), vec!["boxed.start", "boxed.pre"]);

        let erased = object.get_component_by_name("dynamic");
        assert_eq!(erased.with_mut(|c| c.on_update(&Owner::default())), Some(()));
        assert_eq!(count(&log, "boxed.update"), 1);
    }

    #[test]
    fn test_boxed_component_resolves_to_concrete_kind() {
        let log = new_log();
        let object = active_object("Player");
        let boxed: Box<dyn Component> = Box::new(Recorder::new("boxed", &log));
        let attached = object.add_component_named("dynamic", boxed);

        assert!(!attached.is_expired());
        assert_eq!(
            object.get_component_named::<Recorder>("dynamic").with(|p| p.label),
            Some("boxed")
        );
        let typed = object.get_component_by_name("dynamic").downcast::<Recorder>();
        assert_eq!(typed.with_mut(|p| p.label), Some("boxed"));
        assert!(object.get_component_named::<OtherRecorder>("dynamic").is_expired());
        assert!(object.get_component_by_name("dynamic").downcast::<OtherRecorder>().is_expired());

        object.remove_component_named("dynamic");
        assert!(typed.is_expired());
        assert_eq!(count(&log, "boxed.release"), 1);
    }

    #[test]
    fn test_remove_inside_with_releases_after_borrow_ends() {
        let log = new_log();
        let object = active_object("Player");
        let handle = object.add_component(Recorder::new("a", &log));

        handle.with(|_| {
            object.remove_component::<Recorder>();
            assert_eq!(count(&log, "a.release"), 0);
        });
        assert_eq!(count(&log, "a.release"), 1);
        assert!(handle.is_expired());

        drop(object);
        assert_eq!(count(&log, "a.release"), 1);
    }

    #[test]
    fn test_destroy_inside_with_mut_releases_after_borrow_ends() {
        let log = new_log();
        let object = active_object("Player");
        let handle = object.add_component(Recorder::new("a", &log));

        handle.with_mut(|_| object.destroy());
        assert_eq!(count(&log, "a.release"), 1);
        assert!(handle.is_expired());

        drop(object);
        assert_eq!(count(&log, "a.release"), 1);
    }

    #[test]
    fn test_remove_inside_erased_with_mut_releases_after_borrow_ends() {
        let log = new_log();
        let object = active_object("Player");
        object.add_component_named("recorder", Recorder::new("a", &log));

        let erased = object.get_component_by_name("recorder");
        erased.with_mut(|_| object.remove_component_named("recorder"));
        assert_eq!(count(&log, "a.release"), 1);
        assert!(erased.is_expired());
    }

    /// Attaches a [`Recorder`] during its first update.
    struct Spawner {
        log: Log,
        spawned: bool,
    }

    impl Component for Spawner {
        fn on_update(&mut self, owner: &Owner) {
            if self.spawned {
                return;
            }
            self.spawned = true;
            if let Some(object) = owner.get() {
                object.add_component(Recorder::new("late", &self.log));
            }
        }
    }

    #[test]
    fn test_component_attached_during_fan_out_waits_for_next_frame() {
        let log = new_log();
        let object = active_object("Player");
        object.add_component(Spawner {
            log: Rc::clone(&log),
            spawned: false,
        });

        object.pre_update();
        object.update();
        assert!(object.has_component::<Recorder>());
        assert_eq!(count(&log, "late.update"), 0);
        assert!(!object.is_started());

        log.borrow_mut().clear();
        object.pre_update();
        assert_eq!(*log.borrow(), vec!["late.start", "late.pre"]);

        object.update();
        assert_eq!(count(&log, "late.update"), 1);
    }

    /// Removes a sibling kind during its own update.
    struct Remover;

    impl Component for Remover {
        fn on_update(&mut self, owner: &Owner) {
            if let Some(object) = owner.get() {
                object.remove_component::<Recorder>();
            }
        }
    }

    #[test]
    fn test_removal_during_fan_out_skips_released_component() {
        let log = new_log();
        let object = active_object("Player");
        object.add_component(Recorder::new("a", &log));
        object.add_component(Remover);

        object.pre_update();
        object.update();
        object.post_update();

        assert_eq!(count(&log, "a.release"), 1);
        assert_eq!(count(&log, "a.post"), 0);
        assert!(!object.has_component::<Recorder>());
    }

    /// Detaches itself from inside its own hook.
    struct SelfRemover {
        log: Log,
    }

    impl Component for SelfRemover {
        fn on_update(&mut self, owner: &Owner) {
            if let Some(object) = owner.get() {
                object.remove_component::<SelfRemover>();
            }
        }
        fn on_release(&mut self, _owner: &Owner) {
            self.log.borrow_mut().push("self.release".to_owned());
        }
    }

    #[test]
    fn test_self_removal_releases_after_hook_returns() {
        let log = new_log();
        let object = active_object("Player");
        object.add_component(SelfRemover {
            log: Rc::clone(&log),
        });

        object.update();
        assert_eq!(count(&log, "self.release"), 1);
        assert!(!object.has_component::<SelfRemover>());

        drop(object);
        assert_eq!(count(&log, "self.release"), 1);
    }

    /// Deactivates its owner from inside a hook.
    struct Deactivator;

    impl Component for Deactivator {
        fn on_update(&mut self, owner: &Owner) {
            if let Some(object) = owner.get() {
                object.set_active(false);
            }
        }
    }

    #[test]
    fn test_deactivation_mid_frame_gates_later_phases() {
        let log = new_log();
        let object = active_object("Player");
        object.add_component(Recorder::new("a", &log));
        object.add_component(Deactivator);

        object.pre_update();
        object.update();
        object.post_update();

        assert!(!object.is_active());
        assert_eq!(count(&log, "a.post"), 0);
    }

    #[test]
    fn test_instance_ids_are_distinct() {
        let a = GameObject::new("Enemy");
        let b = GameObject::new("Enemy");
        assert_ne!(a.instance_id(), b.instance_id());
    }
}
