//! Sample components for the object runtime.
//!
//! These show the three ways a component typically uses the lifecycle:
//! [`Transform`] owns state and advances it every frame, [`Renderer`]
//! reaches a sibling component through its owner, and [`InputSimulator`]
//! changes the owner's own status.

use engine_component::{Component, Owner};
use tracing::info;

pub use glam::Vec2;

/// Seconds per frame assumed by [`Transform`] motion (about 60 FPS).
pub const FRAME_TIME: f32 = 0.016;

/// Moves its owner along a circle around its starting position.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Current position.
    pub position: Vec2,
    /// Angular speed in degrees per second.
    pub speed: f32,
    /// Radius of the circle.
    pub radius: f32,
    /// Current angle in degrees, in `[0, 360)`.
    pub angle_deg: f32,
    /// Centre of the circle; the position the transform was created at.
    center: Vec2,
}

impl Transform {
    /// Create a transform centred on `start` with the default speed and
    /// radius.
    #[must_use]
    pub fn new(start: Vec2) -> Self {
        Self::with_motion(start, 50.0, 5.0)
    }

    /// Create a transform centred on `start` with explicit motion.
    #[must_use]
    pub fn with_motion(start: Vec2, speed: f32, radius: f32) -> Self {
        Self {
            position: start,
            speed,
            radius,
            angle_deg: 0.0,
            center: start,
        }
    }

    /// Centre of the circular motion.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Advance one frame of motion.
    pub fn step(&mut self) {
        self.angle_deg += self.speed * FRAME_TIME;
        if self.angle_deg >= 360.0 {
            self.angle_deg -= 360.0;
        }
        let (sin, cos) = self.angle_deg.to_radians().sin_cos();
        self.position = self.center + self.radius * Vec2::new(cos, sin);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

impl Component for Transform {
    fn type_name() -> &'static str {
        "Transform"
    }

    fn on_start(&mut self, owner: &Owner) {
        if let Some(object) = owner.get() {
            info!(
                object = object.name(),
                position = %self.position,
                speed = self.speed,
                radius = self.radius,
                "transform started"
            );
        }
    }

    fn on_update(&mut self, _owner: &Owner) {
        self.step();
    }

    fn on_release(&mut self, owner: &Owner) {
        if let Some(object) = owner.get() {
            info!(object = object.name(), "transform released");
        }
    }
}

/// Reports its owner's position after each frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Renderer {
    /// Position drawn on the most recent frame, if the owner had a
    /// [`Transform`].
    pub last_drawn: Option<Vec2>,
    /// Frames rendered so far.
    pub frames: u32,
}

impl Component for Renderer {
    fn type_name() -> &'static str {
        "Renderer"
    }

    fn on_post_update(&mut self, owner: &Owner) {
        let Some(object) = owner.get() else {
            return;
        };
        self.frames += 1;
        self.last_drawn = object.get_component::<Transform>().with(|t| t.position);

        match self.last_drawn {
            Some(position) => info!(object = object.name(), %position, "rendering"),
            None => info!(object = object.name(), "rendering without a transform"),
        }
    }

    fn on_release(&mut self, owner: &Owner) {
        if let Some(object) = owner.get() {
            info!(object = object.name(), frames = self.frames, "renderer released");
        }
    }
}

/// Deactivates its owner after a fixed number of updates, standing in for a
/// player input that ends the object's life.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSimulator {
    /// Update count at which the owner is deactivated.
    pub deactivate_at_frame: u32,
    /// Updates seen so far.
    pub current_frame: u32,
}

impl InputSimulator {
    /// Create a simulator that deactivates its owner on update number
    /// `deactivate_at_frame`.
    #[must_use]
    pub fn new(deactivate_at_frame: u32) -> Self {
        Self {
            deactivate_at_frame,
            current_frame: 0,
        }
    }
}

impl Component for InputSimulator {
    fn type_name() -> &'static str {
        "InputSimulator"
    }

    fn on_start(&mut self, owner: &Owner) {
        if let Some(object) = owner.get() {
            info!(
                object = object.name(),
                at_frame = self.deactivate_at_frame,
                "input simulator started"
            );
        }
    }

    fn on_update(&mut self, owner: &Owner) {
        self.current_frame += 1;
        let Some(object) = owner.get() else {
            return;
        };
        if self.current_frame >= self.deactivate_at_frame && object.is_active() {
            info!(
                object = object.name(),
                frame = self.current_frame,
                "deactivating owner"
            );
            object.set_active(false);
        }
    }

    fn on_release(&mut self, owner: &Owner) {
        if let Some(object) = owner.get() {
            info!(object = object.name(), "input simulator released");
        }
    }
}
