//! Viewport host: owns the surface, the particle field and the pending
//! frame, and moves between `Unmounted` and `Running`.

use rand::Rng;

use crate::config::BackgroundConfig;
use crate::error::HostError;
use crate::field::ParticleField;
use crate::particle::Particle;
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::surface::{Bounds, Surface};

enum HostState<S> {
    Unmounted,
    Running {
        surface: S,
        field: ParticleField,
        pending: Option<FrameHandle>,
    },
}

pub struct ViewportHost<S, F> {
    config: BackgroundConfig,
    scheduler: F,
    state: HostState<S>,
}

impl<S: Surface, F: FrameScheduler> ViewportHost<S, F> {
    pub fn new(config: BackgroundConfig, scheduler: F) -> ViewportHost<S, F> {
        ViewportHost {
            config,
            scheduler,
            state: HostState::Unmounted,
        }
    }

    /// Starts the animation on `surface`.
    ///
    /// Without a surface nothing happens and `Ok(false)` is returned. With
    /// one, the surface is sized to `viewport`, the field is seeded from
    /// that size, the first frame is drawn right away and the next one is
    /// scheduled.
    pub fn mount<R: Rng + ?Sized>(&mut self, surface: Option<S>, viewport: Bounds, rng: &mut R) -> Result<bool, HostError> {
        if self.is_running() {
            return Err(HostError::AlreadyMounted);
        }
        let mut surface = match surface {
            Some(surface) => surface,
            None => {
                log::debug!("no drawing surface available, particle layer stays empty");
                return Ok(false);
            }
        };

        surface.resize(viewport);
        let field = ParticleField::seed(rng, surface.size(), &self.config);
        log::debug!(
            "seeded {} particles on a {}x{} surface",
            field.len(),
            viewport.width,
            viewport.height
        );
        self.state = HostState::Running {
            surface,
            field,
            pending: None,
        };
        if let Err(err) = self.tick() {
            self.state = HostState::Unmounted;
            return Err(err);
        }
        Ok(true)
    }

    /// Resizes the surface to the new viewport. Particles keep their state.
    pub fn resize(&mut self, viewport: Bounds) {
        if let HostState::Running { surface, .. } = &mut self.state {
            surface.resize(viewport);
        }
    }

    /// Runs one frame and schedules the next. Returns `Ok(false)` when not
    /// mounted.
    pub fn tick(&mut self) -> Result<bool, HostError> {
        let scheduler = &mut self.scheduler;
        match &mut self.state {
            HostState::Unmounted => Ok(false),
            HostState::Running {
                surface,
                field,
                pending,
            } => {
                *pending = None;
                field.tick(surface);
                *pending = Some(scheduler.request_frame()?);
                Ok(true)
            }
        }
    }

    /// Cancels the pending frame and drops the particle field.
    pub fn unmount(&mut self) {
        let state = std::mem::replace(&mut self.state, HostState::Unmounted);
        if let HostState::Running { pending, .. } = state {
            if let Some(handle) = pending {
                self.scheduler.cancel_frame(handle);
            }
            log::debug!("viewport host unmounted");
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, HostState::Running { .. })
    }

    pub fn particles(&self) -> &[Particle] {
        match &self.state {
            HostState::Running { field, .. } => field.particles(),
            HostState::Unmounted => &[],
        }
    }

    pub fn surface(&self) -> Option<&S> {
        match &self.state {
            HostState::Running { surface, .. } => Some(surface),
            HostState::Unmounted => None,
        }
    }

    pub fn config(&self) -> &BackgroundConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }
}
