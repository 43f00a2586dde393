//! Fixed-rate frame loop.
//!
//! Each frame:
//!
//! 1. Advance the frame counter.
//! 2. Sweep the [`ObjectManager`], reclaiming inactive objects.
//! 3. For every live object, in insertion order: `pre_update`, `update`,
//!    `post_update`. Each phase is a no-op on an object that is inactive at
//!    that moment.

use std::rc::Rc;
use std::time::{Duration, Instant};

use engine_component::GameObject;
use tracing::{debug, info, warn};

use crate::config::{EngineConfig, FrameConfig};
use crate::error::EngineError;
use crate::manager::ObjectManager;

/// Drives an [`ObjectManager`] and its objects frame by frame.
#[derive(Debug)]
pub struct FrameLoop {
    /// Number of frames run so far.
    frame: u64,
    /// Frame pacing.
    config: FrameConfig,
    /// The objects being driven.
    manager: ObjectManager,
}

impl FrameLoop {
    /// Create a frame loop over an empty manager.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidFrameRate`] if `config` fails
    /// [`EngineConfig::validate`].
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            frame: 0,
            config: config.frame,
            manager: ObjectManager::with_config(config.manager),
        })
    }

    /// Returns the number of frames run so far.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Returns the frame pacing in use.
    #[must_use]
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Returns a reference to the object manager.
    #[must_use]
    pub fn manager(&self) -> &ObjectManager {
        &self.manager
    }

    /// Returns a mutable reference to the object manager.
    pub fn manager_mut(&mut self) -> &mut ObjectManager {
        &mut self.manager
    }

    /// Run one frame.
    pub fn tick(&mut self) {
        self.frame += 1;
        let reclaimed = self.manager.update();

        let live: Vec<Rc<GameObject>> = self.manager.objects().cloned().collect();

        debug!(frame = self.frame, live = live.len(), reclaimed, "frame start");

        for object in &live {
            object.pre_update();
            object.update();
            object.post_update();
        }
    }

    /// Run frames until `max_frames` is reached, or forever if it is 0.
    ///
    /// Sleeps off any time left in each frame's budget and warns when a frame
    /// overruns it.
    pub fn run(&mut self) {
        let frame_duration = Duration::from_secs_f64(1.0 / self.config.frame_rate);
        let mut frame_count = 0u64;

        info!(
            frame_rate = self.config.frame_rate,
            max_frames = self.config.max_frames,
            "starting frame loop"
        );

        loop {
            let start = Instant::now();

            self.tick();

            frame_count += 1;
            if self.config.max_frames > 0 && frame_count >= self.config.max_frames {
                info!(frames = frame_count, "frame loop complete");
                break;
            }

            let elapsed = start.elapsed();
            if elapsed < frame_duration {
                std::thread::sleep(frame_duration - elapsed);
            } else {
                warn!(
                    frame = self.frame,
                    elapsed_ms = elapsed.as_millis() as u64,
                    budget_ms = frame_duration.as_millis() as u64,
                    "frame exceeded time budget"
                );
            }
        }
    }
}
