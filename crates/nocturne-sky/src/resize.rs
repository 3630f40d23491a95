//! Keeps the backing buffer sized to the rendered area.

use nocturne_core::PixelRatio;
use tracing::{debug, warn};

use crate::surface::{PixelSize, Surface};

/// Rendered size of the host area, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderedSize {
    pub width: u16,
    pub height: u16,
}

impl RenderedSize {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Backing-buffer size for this rendered size.
    pub fn scaled(&self, ratio: PixelRatio) -> PixelSize {
        PixelSize::new(
            u32::from(self.width) * u32::from(ratio.x),
            u32::from(self.height) * u32::from(ratio.y),
        )
    }
}

/// Whether the host can report size changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeMode {
    #[default]
    Observe,
    /// Only the first positive size is ever applied.
    Fixed,
}

/// Tracks observed sizes and applies them to a surface.
///
/// Observations are queued by [`notify`](Self::notify) and applied at the
/// start of the next frame. The star population is never touched here.
#[derive(Debug)]
pub struct ResizeAdapter {
    ratio: PixelRatio,
    mode: ResizeMode,
    connected: bool,
    pending: Option<RenderedSize>,
    applied: Option<RenderedSize>,
    warned: bool,
}

impl ResizeAdapter {
    pub fn new(ratio: PixelRatio, mode: ResizeMode) -> Self {
        Self {
            ratio,
            mode,
            connected: false,
            pending: None,
            applied: None,
            warned: false,
        }
    }

    pub fn connect(&mut self) {
        if !self.connected {
            debug!(mode = ?self.mode, "resize observation connected");
        }
        self.connected = true;
        if self.mode == ResizeMode::Fixed && !self.warned {
            warn!("resize observation unavailable, the sky keeps its first size");
            self.warned = true;
        }
    }

    pub fn disconnect(&mut self) {
        if self.connected {
            debug!("resize observation disconnected");
        }
        self.connected = false;
        self.pending = None;
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Last size applied to the surface.
    pub fn applied(&self) -> Option<RenderedSize> {
        self.applied
    }

    /// Queue an observed size. Ignored while disconnected, for zero sizes,
    /// and in fixed mode once a size has been accepted.
    pub fn notify(&mut self, size: RenderedSize) {
        if !self.connected || size.is_empty() {
            return;
        }
        if self.mode == ResizeMode::Fixed && (self.applied.is_some() || self.pending.is_some()) {
            return;
        }
        self.pending = Some(size);
    }

    /// Apply the queued size, if it differs from the current one.
    ///
    /// Returns the new backing size when the surface was resized.
    pub fn apply<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Option<PixelSize> {
        let size = self.pending.take()?;
        if self.applied == Some(size) {
            return None;
        }

        let backing = size.scaled(self.ratio);
        surface.resize(backing);
        surface.set_pixel_ratio(self.ratio);
        self.applied = Some(size);

        debug!(
            cols = size.width,
            rows = size.height,
            width = backing.width,
            height = backing.height,
            "backing buffer resized"
        );
        Some(backing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::{DrawCall, RecordingSurface};

    fn adapter(mode: ResizeMode) -> ResizeAdapter {
        let mut adapter = ResizeAdapter::new(PixelRatio::new(1, 2), mode);
        adapter.connect();
        adapter
    }

    #[test]
    fn test_apply_scales_by_pixel_ratio() {
        let mut adapter = adapter(ResizeMode::Observe);
        let mut surface = RecordingSurface::default();

        adapter.notify(RenderedSize::new(80, 24));
        assert_eq!(adapter.apply(&mut surface), Some(PixelSize::new(80, 48)));
        assert_eq!(
            surface.calls(),
            &[
                DrawCall::Resize(PixelSize::new(80, 48)),
                DrawCall::PixelRatio(PixelRatio::new(1, 2)),
            ]
        );
    }

    #[test]
    fn test_unchanged_size_is_a_noop() {
        let mut adapter = adapter(ResizeMode::Observe);
        let mut surface = RecordingSurface::default();

        adapter.notify(RenderedSize::new(80, 24));
        adapter.apply(&mut surface);
        surface.clear();

        adapter.notify(RenderedSize::new(80, 24));
        assert_eq!(adapter.apply(&mut surface), None);
        assert!(surface.calls().is_empty());
    }

    #[test]
    fn test_zero_size_is_ignored() {
        let mut adapter = adapter(ResizeMode::Observe);
        let mut surface = RecordingSurface::default();

        adapter.notify(RenderedSize::new(0, 24));
        assert_eq!(adapter.apply(&mut surface), None);
        assert_eq!(adapter.applied(), None);
    }

    #[test]
    fn test_latest_notification_wins() {
        let mut adapter = adapter(ResizeMode::Observe);
        let mut surface = RecordingSurface::default();

        adapter.notify(RenderedSize::new(80, 24));
        adapter.notify(RenderedSize::new(120, 40));
        assert_eq!(adapter.apply(&mut surface), Some(PixelSize::new(120, 80)));
        assert_eq!(surface.calls().len(), 2);
    }

    #[test]
    fn test_fixed_mode_accepts_first_size_only() {
        let mut adapter = adapter(ResizeMode::Fixed);
        let mut surface = RecordingSurface::default();

        adapter.notify(RenderedSize::new(80, 24));
        adapter.notify(RenderedSize::new(100, 30));
        assert_eq!(adapter.apply(&mut surface), Some(PixelSize::new(80, 48)));

        adapter.notify(RenderedSize::new(120, 40));
        assert_eq!(adapter.apply(&mut surface), None);
        assert_eq!(adapter.applied(), Some(RenderedSize::new(80, 24)));
    }

    #[test]
    fn test_disconnected_adapter_ignores_notifications() {
        let mut adapter = adapter(ResizeMode::Observe);
        adapter.notify(RenderedSize::new(80, 24));
        adapter.disconnect();
        assert!(!adapter.is_connected());

        let mut surface = RecordingSurface::default();
        adapter.notify(RenderedSize::new(90, 30));
        assert_eq!(adapter.apply(&mut surface), None);
    }
}
