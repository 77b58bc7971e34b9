//! Exclusive effect lifecycle.

use rand::{Rng, SeedableRng, rngs::StdRng};
use retrofx_core::{AnimationSpeed, EffectKind, Size, Surface};
use tracing::{debug, info, trace, warn};

use crate::animations::{fire, fluid, rain, starfield};
use crate::effect::{Effect, EffectConstructor, EffectSettings};

/// Lifecycle state of the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerState {
    Idle,
    Running(EffectKind),
}

/// The live effect and the surface size it was built for.
#[derive(Debug)]
struct ActiveEffect {
    effect: Box<dyn Effect>,
    size: Size,
}

/// Owns at most one running effect and drives it frame by frame.
///
/// Selecting an effect always drops the previous instance before the next is
/// constructed, so two effects never draw to the surface in the same frame.
#[derive(Debug)]
pub struct EffectManager {
    /// Registered effects in cycling order. Fixed after construction.
    registry: Vec<(EffectKind, EffectConstructor)>,
    /// The currently running effect.
    active: Option<ActiveEffect>,
    /// Size of the surface the last effect was bound to.
    bound: Option<Size>,
    settings: EffectSettings,
    rng: StdRng,
}

impl Default for EffectManager {
    fn default() -> Self {
        Self::new(EffectSettings::default())
    }
}

fn build_rain(size: Size, settings: &EffectSettings, seed: u64) -> Box<dyn Effect> {
    Box::new(rain::RainEffect::new(size, settings, seed))
}

fn build_fluid(size: Size, settings: &EffectSettings, seed: u64) -> Box<dyn Effect> {
    Box::new(fluid::FluidFieldEffect::new(size, settings, seed))
}

fn build_fire(size: Size, settings: &EffectSettings, seed: u64) -> Box<dyn Effect> {
    Box::new(fire::FireEffect::new(size, settings, seed))
}

fn build_starfield(size: Size, settings: &EffectSettings, seed: u64) -> Box<dyn Effect> {
    Box::new(starfield::StarfieldEffect::new(size, settings, seed))
}

impl EffectManager {
    /// Create an idle manager seeded from the operating system.
    pub fn new(settings: EffectSettings) -> Self {
        Self::with_rng(settings, StdRng::from_os_rng())
    }

    /// Create an idle manager with reproducible randomness.
    pub fn with_seed(settings: EffectSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: EffectSettings, rng: StdRng) -> Self {
        Self {
            registry: vec![
                (EffectKind::Matrix, build_rain as EffectConstructor),
                (EffectKind::Plasma, build_fluid),
                (EffectKind::Fire, build_fire),
                (EffectKind::Starfield, build_starfield),
            ],
            active: None,
            bound: None,
            settings,
            rng,
        }
    }

    pub fn state(&self) -> ManagerState {
        match &self.active {
            Some(active) => ManagerState::Running(active.effect.kind()),
            None => ManagerState::Idle,
        }
    }

    /// The running effect, if any.
    pub fn current(&self) -> Option<EffectKind> {
        self.active.as_ref().map(|a| a.effect.kind())
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Registered effects in cycling order.
    pub fn registered(&self) -> impl Iterator<Item = EffectKind> + '_ {
        self.registry.iter().map(|(kind, _)| *kind)
    }

    pub fn settings(&self) -> &EffectSettings {
        &self.settings
    }

    /// Start the effect registered as `name` on `surface`.
    ///
    /// Unknown names and a missing surface are ignored and leave the current
    /// effect running. Returns the effect that is now running.
    pub fn select(&mut self, surface: Option<&dyn Surface>, name: &str) -> Option<EffectKind> {
        let Some(surface) = surface else {
            debug!(effect = name, "no surface to bind, ignoring selection");
            return self.current();
        };
        let Some(&(_, build)) = self.registry.iter().find(|(kind, _)| kind.name() == name)
        else {
            warn!(effect = name, "unknown effect, ignoring selection");
            return self.current();
        };
        Some(self.start(build, surface.size()))
    }

    /// Start `kind` on `surface`.
    pub fn select_kind(
        &mut self,
        surface: Option<&dyn Surface>,
        kind: EffectKind,
    ) -> Option<EffectKind> {
        self.select(surface, kind.name())
    }

    fn start(&mut self, build: EffectConstructor, size: Size) -> EffectKind {
        self.stop();
        let seed: u64 = self.rng.random();
        let effect = build(size, &self.settings, seed);
        let kind = effect.kind();
        info!(effect = %kind, width = size.width, height = size.height, "effect started");
        self.active = Some(ActiveEffect { effect, size });
        self.bound = Some(size);
        kind
    }

    /// Halt and release the running effect. Does nothing when idle.
    pub fn stop(&mut self) {
        if let Some(active) = self.active.take() {
            info!(effect = %active.effect.kind(), "effect stopped");
        }
    }

    /// Switch to the next registered effect on the same surface.
    ///
    /// When idle there is no surface to switch on; nothing starts and the
    /// first registered name is returned.
    pub fn cycle(&mut self) -> EffectKind {
        let first = self.registry[0].0;
        let (Some(current), Some(size)) = (self.current(), self.bound) else {
            debug!("cycle requested while idle");
            return first;
        };
        let idx = self
            .registry
            .iter()
            .position(|(kind, _)| *kind == current)
            .map_or(0, |i| (i + 1) % self.registry.len());
        let (kind, build) = self.registry[idx];
        debug!(from = %current, to = %kind, "cycling effect");
        self.start(build, size)
    }

    /// Surface resize notification; reinitializes the running effect now.
    pub fn resize(&mut self, size: Size) {
        if self.bound.is_some() {
            self.bound = Some(size);
        }
        if let Some(active) = &mut self.active
            && active.size != size
        {
            debug!(
                effect = %active.effect.kind(),
                width = size.width,
                height = size.height,
                "resizing effect"
            );
            active.effect.resize(size);
            active.size = size;
        }
    }

    /// Change the animation speed of the running and future effects.
    pub fn set_speed(&mut self, speed: AnimationSpeed) {
        self.settings.speed = speed;
        if let Some(active) = &mut self.active {
            active.effect.set_speed(speed);
        }
    }

    /// Advance and render one frame.
    ///
    /// Returns whether an effect is running, i.e. whether the driver should
    /// schedule another frame. A stale call after `stop` is harmless.
    pub fn frame(&mut self, surface: &mut dyn Surface) -> bool {
        let size = surface.size();
        if self.active.as_ref().is_some_and(|a| a.size != size) {
            self.resize(size);
        }
        let Some(active) = &mut self.active else {
            return false;
        };
        trace!(effect = %active.effect.kind(), "frame");
        active.effect.advance(surface);
        true
    }
}
