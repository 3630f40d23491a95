//! The mountable sky: owns the population, the surface and the schedule.

use nocturne_core::{MAX_PIXEL_RATIO, PixelRatio, SkyOptions};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use tracing::{debug, info, warn};

use crate::clock::SimulationClock;
use crate::compositor::{Compositor, DEFAULT_WASH_BLUR};
use crate::error::Result;
use crate::meteor::{MeteorLayer, MeteorOverlay};
use crate::present::{ColorDepth, SkyWidget};
use crate::raster::Raster;
use crate::resize::{RenderedSize, ResizeAdapter, ResizeMode};
use crate::sky::Sky;
use crate::surface::Surface;

/// Everything needed to mount a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererSettings {
    pub options: SkyOptions,
    pub ratio: PixelRatio,
    pub resize_mode: ResizeMode,
    /// Blur of the ambient wash, in cells.
    pub wash_blur: f32,
    /// Fixed seed for reproducible populations.
    pub seed: Option<u64>,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            options: SkyOptions::default(),
            ratio: PixelRatio::default(),
            resize_mode: ResizeMode::Observe,
            wash_blur: DEFAULT_WASH_BLUR,
            seed: None,
        }
    }
}

#[derive(Debug)]
struct Mounted<S> {
    sky: Sky,
    surface: S,
    clock: SimulationClock,
    adapter: ResizeAdapter,
    compositor: Compositor,
    meteors: MeteorOverlay,
    depth: ColorDepth,
    running: bool,
}

/// A sky bound to one surface.
///
/// A renderer mounted on an unsupported terminal is disabled: every call is
/// a no-op and nothing is drawn.
#[derive(Debug)]
pub struct SkyRenderer<S = Raster> {
    mounted: Option<Mounted<S>>,
}

impl SkyRenderer<Raster> {
    pub fn new(settings: RendererSettings, depth: ColorDepth) -> Self {
        Self::with_surface(settings, depth, Raster::new())
    }

    /// Mount against the detected terminal, disabling on failure.
    pub fn detect(settings: RendererSettings) -> Self {
        Self::from_depth(settings, ColorDepth::detect())
    }

    pub fn from_depth(settings: RendererSettings, depth: Result<ColorDepth>) -> Self {
        match depth {
            Ok(depth) => Self::new(settings, depth),
            Err(err) => {
                warn!(%err, "sky disabled");
                Self::disabled()
            }
        }
    }
}

impl<S> SkyRenderer<S> {
    pub fn disabled() -> Self {
        Self { mounted: None }
    }

    pub fn is_disabled(&self) -> bool {
        self.mounted.is_none()
    }

    pub fn is_running(&self) -> bool {
        self.mounted.as_ref().is_some_and(|m| m.running)
    }

    pub fn sky(&self) -> Option<&Sky> {
        self.mounted.as_ref().map(|m| &m.sky)
    }

    pub fn surface(&self) -> Option<&S> {
        self.mounted.as_ref().map(|m| &m.surface)
    }

    /// Begin ticking and observing resizes.
    pub fn start(&mut self) {
        let Some(m) = self.mounted.as_mut() else {
            return;
        };
        if m.running {
            return;
        }
        m.adapter.connect();
        m.clock.reset();
        m.meteors.reset();
        m.running = true;
        info!(
            stars = m.sky.options().star_count,
            nebulas = m.sky.options().nebula_count,
            depth = ?m.depth,
            "sky started"
        );
    }

    /// Stop ticking and disconnect resize observation.
    pub fn stop(&mut self) {
        let Some(m) = self.mounted.as_mut() else {
            return;
        };
        if m.running {
            debug!("sky stopped");
        }
        m.running = false;
        m.adapter.disconnect();
    }

    /// Report the rendered size of the sky area, in cells.
    pub fn observe_resize(&mut self, cols: u16, rows: u16) {
        if let Some(m) = self.mounted.as_mut() {
            m.adapter.notify(RenderedSize::new(cols, rows));
        }
    }
}

impl<S: Surface> SkyRenderer<S> {
    pub fn with_surface(settings: RendererSettings, depth: ColorDepth, surface: S) -> Self {
        let mut rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let meteors = MeteorOverlay::new(&mut rng, settings.options.meteor_count);
        let sky = match settings.seed {
            Some(seed) => Sky::with_seed(settings.options, seed),
            None => Sky::new(settings.options),
        };

        Self {
            mounted: Some(Mounted {
                sky,
                surface,
                clock: SimulationClock::new(),
                adapter: ResizeAdapter::new(clamp_ratio(settings.ratio), settings.resize_mode),
                compositor: Compositor::new(settings.wash_blur),
                meteors,
                depth,
                running: false,
            }),
        }
    }

    /// Run one tick at host timestamp `now_ms`.
    pub fn frame(&mut self, now_ms: f64) {
        let Some(m) = self.mounted.as_mut() else {
            return;
        };
        if !m.running {
            return;
        }

        m.adapter.apply(&mut m.surface);
        let size = m.surface.size();
        m.sky.populate(size);
        m.meteors.advance(now_ms);
        if size.is_empty() {
            return;
        }

        let dt = m.clock.tick(now_ms);
        m.sky.update(dt, size);
        m.compositor.paint(&m.sky, &mut m.surface);
    }
}

fn clamp_ratio(ratio: PixelRatio) -> PixelRatio {
    PixelRatio::new(
        ratio.x.clamp(1, MAX_PIXEL_RATIO),
        ratio.y.clamp(1, MAX_PIXEL_RATIO),
    )
}

impl<S> Drop for SkyRenderer<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl Widget for &SkyRenderer<Raster> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(m) = self.mounted.as_ref() else {
            return;
        };
        if m.surface.size().is_empty() {
            return;
        }
        SkyWidget::new(&m.surface, m.depth).render(area, buf);
        MeteorLayer::new(&m.meteors, m.depth).render(area, buf);
    }
}
