//! Animated scenes rendered through the simulated lens.
//!
//! Each scene owns its own actors and clock. Only the active scene is ticked;
//! switching pauses the outgoing scene and plays the incoming one, so a scene
//! resumes exactly where it was left.

mod runner;
mod waterfall;

pub use runner::{RunnerScene, RUNNER_FPS, RUNNER_SCALE, RUNNER_SPEED};
pub use waterfall::{WaterLayer, WaterfallScene, WATER_LAYER_HEIGHT, WATER_LAYER_LAYOUT};

use crate::atlas::AtlasProvider;
use crate::error::{CameraError, Result};
use crate::exposure::ExposureState;
use crate::paint::{Painter, Viewport};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneKind {
    Runner,
    Waterfall,
}

impl SceneKind {
    pub const ALL: [SceneKind; 2] = [SceneKind::Runner, SceneKind::Waterfall];

    /// Lower-case identifier, used for tab ids and CLI values.
    pub fn id(self) -> &'static str {
        match self {
            SceneKind::Runner => "runner",
            SceneKind::Waterfall => "waterfall",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SceneKind::Runner => "Runner",
            SceneKind::Waterfall => "Waterfall",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.id().eq_ignore_ascii_case(id.trim()))
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

pub trait Scene {
    fn kind(&self) -> SceneKind;
    fn resize(&mut self, viewport: Viewport);
    /// Advance the scene clock; a paused scene ignores this.
    fn update(&mut self, dt: f64);
    /// Draw one frame. Every painter state change made here is undone before
    /// returning, whether or not drawing succeeded.
    fn render(&self, painter: &mut dyn Painter, exposure: &ExposureState) -> Result<()>;
    fn play(&mut self);
    fn pause(&mut self);
    fn is_playing(&self) -> bool;
    fn elapsed(&self) -> f64;
}

/// The registered scenes and which one is active.
#[derive(Default)]
pub struct SceneSet {
    runner: Option<RunnerScene>,
    waterfall: Option<WaterfallScene>,
    active: Option<SceneKind>,
}

impl SceneSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every scene whose assets the provider can supply. A scene whose
    /// assets fail to load is left out with a warning.
    pub fn build(provider: &mut dyn AtlasProvider, viewport: Viewport) -> Self {
        let mut set = Self::new();
        match provider
            .runner_sheet()
            .and_then(|sheet| RunnerScene::new(sheet, viewport))
        {
            Ok(scene) => set.insert_runner(scene),
            Err(e) => log::warn!("runner scene unavailable: {}", e),
        }
        match provider
            .waterfall_layers()
            .and_then(|layers| WaterfallScene::new(layers, viewport))
        {
            Ok(scene) => set.insert_waterfall(scene),
            Err(e) => log::warn!("waterfall scene unavailable: {}", e),
        }
        set
    }

    pub fn insert_runner(&mut self, scene: RunnerScene) {
        self.runner = Some(scene);
        self.registered(SceneKind::Runner);
    }

    pub fn insert_waterfall(&mut self, scene: WaterfallScene) {
        self.waterfall = Some(scene);
        self.registered(SceneKind::Waterfall);
    }

    // First registered scene becomes active; later ones wait paused.
    fn registered(&mut self, kind: SceneKind) {
        log::info!("scene registered: {}", kind);
        let is_active = match self.active {
            None => {
                self.active = Some(kind);
                true
            }
            Some(active) => active == kind,
        };
        if let Some(scene) = self.get_mut(kind) {
            if is_active {
                scene.play();
            } else {
                scene.pause();
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.runner.is_none() && self.waterfall.is_none()
    }

    pub fn contains(&self, kind: SceneKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn active(&self) -> Option<SceneKind> {
        self.active
    }

    /// Make `kind` the active scene. Selecting the active scene does nothing.
    pub fn select(&mut self, kind: SceneKind) -> Result<()> {
        if !self.contains(kind) {
            return Err(CameraError::SceneUnavailable(kind));
        }
        if self.active == Some(kind) {
            return Ok(());
        }
        if let Some(current) = self.active_scene_mut() {
            current.pause();
        }
        self.active = Some(kind);
        if let Some(next) = self.get_mut(kind) {
            next.play();
        }
        log::info!("scene switched to {}", kind);
        Ok(())
    }

    pub fn get(&self, kind: SceneKind) -> Option<&dyn Scene> {
        match kind {
            SceneKind::Runner => self.runner.as_ref().map(|s| s as &dyn Scene),
            SceneKind::Waterfall => self.waterfall.as_ref().map(|s| s as &dyn Scene),
        }
    }

    pub fn get_mut(&mut self, kind: SceneKind) -> Option<&mut dyn Scene> {
        match kind {
            SceneKind::Runner => self.runner.as_mut().map(|s| s as &mut dyn Scene),
            SceneKind::Waterfall => self.waterfall.as_mut().map(|s| s as &mut dyn Scene),
        }
    }

    pub fn active_scene(&self) -> Option<&dyn Scene> {
        self.active.and_then(|k| self.get(k))
    }

    pub fn active_scene_mut(&mut self) -> Option<&mut dyn Scene> {
        let kind = self.active?;
        self.get_mut(kind)
    }

    pub fn runner(&self) -> Option<&RunnerScene> {
        self.runner.as_ref()
    }

    pub fn waterfall(&self) -> Option<&WaterfallScene> {
        self.waterfall.as_ref()
    }

    /// Push a new viewport into every scene, active or not.
    pub fn resize(&mut self, viewport: Viewport) {
        for kind in SceneKind::ALL {
            if let Some(scene) = self.get_mut(kind) {
                scene.resize(viewport);
            }
        }
    }
}
