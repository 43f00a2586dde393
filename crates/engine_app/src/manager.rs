//! Object manager — the registry of every live [`GameObject`].
//!
//! Objects live in a slot map and are walked in insertion order through a
//! parallel key list. A name index maps each object's name to its slot key.
//! All three are updated together on every insert and removal, so a name is
//! indexed exactly when its object is live.
//!
//! Reclamation is mark-then-sweep: deactivating an object only flips its
//! flag, and the next [`ObjectManager::update`] removes it.

use std::collections::HashMap;
use std::rc::{Rc, Weak};

use engine_component::GameObject;
use slotmap::{SlotMap, new_key_type};
use tracing::{debug, info};

use crate::config::ManagerConfig;

new_key_type! {
    /// Stable locator of an object inside the manager.
    pub struct ObjectKey;
}

/// Registry of all live objects.
#[derive(Debug, Default)]
pub struct ObjectManager {
    /// Settings applied to generated objects.
    config: ManagerConfig,
    /// Owning storage, keyed by stable locator.
    objects: SlotMap<ObjectKey, Rc<GameObject>>,
    /// Keys in insertion order.
    order: Vec<ObjectKey>,
    /// Name index into `objects`.
    names: HashMap<String, ObjectKey>,
}

impl ObjectManager {
    /// Create an empty manager with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty manager with the given settings.
    #[must_use]
    pub fn with_config(config: ManagerConfig) -> Self {
        Self {
            config,
            objects: SlotMap::with_key(),
            order: Vec::new(),
            names: HashMap::new(),
        }
    }

    /// Create, name, activate, and register a new object.
    ///
    /// The object is named `base_name` if that name is free, otherwise
    /// `base_name` followed by the smallest positive integer that is.
    pub fn generate_object(&mut self, base_name: &str) -> Rc<GameObject> {
        let name = self.unique_name(base_name);
        let object = GameObject::with_replace_policy(name.clone(), self.config.replace_policy);
        object.set_active(true);

        let key = self.objects.insert(Rc::clone(&object));
        self.order.push(key);
        self.names.insert(name, key);

        info!(
            object = object.name(),
            instance = %object.instance_id(),
            live = self.objects.len(),
            "object generated"
        );
        object
    }

    /// Look up a live object by name.
    ///
    /// Returns an empty handle if no live object has that name.
    #[must_use]
    pub fn get_object(&self, name: &str) -> Weak<GameObject> {
        self.names
            .get(name)
            .and_then(|&key| self.objects.get(key))
            .map(Rc::downgrade)
            .unwrap_or_default()
    }

    /// Returns `true` if a live object has this name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Live objects in insertion order.
    pub fn objects(&self) -> impl Iterator<Item = &Rc<GameObject>> {
        self.order.iter().filter_map(|&key| self.objects.get(key))
    }

    /// Number of live objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if no objects are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Reclaim every object that is inactive or destroyed.
    ///
    /// Walks the objects once, front to back. Each reclaimed object is
    /// destroyed, releasing its components, even if a caller still holds an
    /// `Rc` to it. Returns the number of objects reclaimed.
    pub fn update(&mut self) -> usize {
        let objects = &mut self.objects;
        let names = &mut self.names;
        let mut reclaimed = 0;

        self.order.retain(|&key| {
            let keep = objects
                .get(key)
                .is_some_and(|object| object.is_active() && !object.is_destroyed());
            if keep {
                return true;
            }
            if let Some(object) = objects.remove(key) {
                names.remove(object.name());
                object.destroy();
                debug!(
                    object = object.name(),
                    instance = %object.instance_id(),
                    "object reclaimed"
                );
                reclaimed += 1;
            }
            false
        });

        if reclaimed > 0 {
            info!(reclaimed, live = self.objects.len(), "reclaimed inactive objects");
        }
        reclaimed
    }

    /// Destroy and unregister every object.
    pub fn release_all_objects(&mut self) {
        info!(count = self.objects.len(), "releasing all objects");
        for key in self.order.drain(..) {
            if let Some(object) = self.objects.remove(key) {
                debug!(object = object.name(), "releasing object");
                object.destroy();
            }
        }
        self.objects.clear();
        self.names.clear();
    }

    /// First free name derived from `base_name`.
    fn unique_name(&self, base_name: &str) -> String {
        if !self.names.contains_key(base_name) {
            return base_name.to_owned();
        }
        let mut suffix = 1u64;
        loop {
            let candidate = format!("{base_name}{suffix}");
            if !self.names.contains_key(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }
}

impl Drop for ObjectManager {
    fn drop(&mut self) {
        if !self.objects.is_empty() {
            self.release_all_objects();
        }
    }
}
