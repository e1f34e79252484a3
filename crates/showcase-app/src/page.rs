//! Library pages.
//!
//! A [`Page`] mounts one [`SceneController`] per example shown for a library.
//! Each controller draws on its own canvas element taken from a
//! [`SurfaceHost`].

use crate::config::{ConfigError, ShowcaseConfig};
use crate::controller::{ControllerSettings, SceneController};
use crate::download::{Download, ExportKind};
use crate::library::{ExampleKind, LibraryProfile};
use showcase_core::viewport::Viewport;
use showcase_render::{AdapterError, CanvasAdapter, SkiaAdapter, Surface};
use std::collections::BTreeMap;
use std::time::Duration;

/// Canvas elements of a page, keyed `canvas-<n>`.
#[derive(Debug, Clone, Default)]
pub struct SurfaceHost {
    surfaces: BTreeMap<String, Surface>,
}

impl SurfaceHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host with one attached surface per example on `profile`'s page.
    pub fn for_profile(profile: LibraryProfile) -> Self {
        let mut host = Self::new();
        for example in profile.examples() {
            host.insert(example.canvas_key());
        }
        host
    }

    /// Add (or replace) a canvas element and return it.
    pub fn insert(&mut self, key: impl Into<String>) -> Surface {
        let surface = Surface::new();
        self.surfaces.insert(key.into(), surface.clone());
        surface
    }

    pub fn get(&self, key: &str) -> Option<&Surface> {
        self.surfaces.get(key)
    }

    pub fn surface_for(&self, example: ExampleKind) -> Option<&Surface> {
        self.get(&example.canvas_key())
    }
}

/// One library page.
pub struct Page<A: CanvasAdapter = SkiaAdapter> {
    profile: LibraryProfile,
    settings: ControllerSettings,
    controllers: BTreeMap<ExampleKind, SceneController<A>>,
    pending: Vec<ExampleKind>,
}

impl<A: CanvasAdapter> Page<A> {
    /// Mount every example of `profile`. Examples whose surface is not ready
    /// stay pending until [`Page::retry_pending`].
    pub fn mount(profile: LibraryProfile, host: &SurfaceHost, config: &ShowcaseConfig) -> Result<Self, ConfigError> {
        let mut settings = ControllerSettings::from_config(config)?;
        settings.display_scale = Viewport::fit_scale(config.container_width, ExampleKind::BasicShapes.base_size().width);

        let mut page = Self {
            profile,
            settings,
            controllers: BTreeMap::new(),
            pending: profile.examples().to_vec(),
        };
        log::info!("Mounting {} page ({} examples)", profile.title(), page.pending.len());
        page.retry_pending(host);
        Ok(page)
    }

    /// Try to mount the pending examples again. Returns how many mounted.
    pub fn retry_pending(&mut self, host: &SurfaceHost) -> usize {
        let pending = std::mem::take(&mut self.pending);
        let mut mounted = 0;
        for example in pending {
            match SceneController::mount(example, self.profile, host.surface_for(example), &self.settings) {
                Ok(controller) => {
                    self.controllers.insert(example, controller);
                    mounted += 1;
                }
                Err(AdapterError::SurfaceUnavailable(reason)) => {
                    log::warn!("{example}: {reason}, will retry");
                    self.pending.push(example);
                }
                Err(err) => {
                    log::error!("{example}: mount failed: {err}");
                    self.pending.push(example);
                }
            }
        }
        mounted
    }

    pub fn profile(&self) -> LibraryProfile {
        self.profile
    }

    pub fn pending(&self) -> &[ExampleKind] {
        &self.pending
    }

    /// Mounted examples in page order.
    pub fn mounted(&self) -> Vec<ExampleKind> {
        self.controllers.keys().copied().collect()
    }

    pub fn controller(&self, example: ExampleKind) -> Option<&SceneController<A>> {
        self.controllers.get(&example)
    }

    pub fn controller_mut(&mut self, example: ExampleKind) -> Option<&mut SceneController<A>> {
        self.controllers.get_mut(&example)
    }

    pub fn controllers_mut(&mut self) -> impl Iterator<Item = &mut SceneController<A>> {
        self.controllers.values_mut()
    }

    pub fn display_scale(&self) -> f64 {
        self.settings.display_scale
    }

    /// Fit every canvas to a container of the given width.
    pub fn resize(&mut self, container_width: f64) -> f64 {
        let scale = Viewport::fit_scale(container_width, ExampleKind::BasicShapes.base_size().width);
        self.settings.display_scale = scale;
        for controller in self.controllers.values_mut() {
            controller.rescale(scale);
        }
        log::debug!("{} page rescaled to {scale:.3}", self.profile);
        scale
    }

    /// Advance animations on every canvas.
    pub fn tick(&mut self, dt: Duration) {
        for controller in self.controllers.values_mut() {
            controller.tick(dt);
        }
    }

    /// Run an export button of the export example.
    pub fn export(&mut self, kind: ExportKind) -> Option<Download> {
        self.controllers.get_mut(&ExampleKind::Export)?.export(kind)
    }

    /// Close every canvas. The page can be mounted again afterwards.
    pub fn unmount(&mut self) {
        for (_, mut controller) in std::mem::take(&mut self.controllers) {
            controller.close();
        }
        self.pending.clear();
        log::info!("Unmounted {} page", self.profile.title());
    }
}

impl<A: CanvasAdapter> Drop for Page<A> {
    fn drop(&mut self) {
        if !self.controllers.is_empty() {
            self.unmount();
        }
    }
}
