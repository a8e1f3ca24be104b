//! Window size bookkeeping between winit events, the GPU surface and the
//! particle field.
//!
//! The GPU surface can never be zero-sized, but a minimized window can. The
//! wrapper keeps both views: [`SurfaceWrapper::surface_size`] is clamped for
//! surface configuration, and [`SurfaceWrapper::requested_size`] is the real
//! size the field is regenerated for.

/// Minimum GPU surface dimension.
pub const MIN_SURFACE_DIMENSION: u32 = 1;

/// Dimensions in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero.
    pub fn is_zero(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Each side raised to [`MIN_SURFACE_DIMENSION`].
    pub fn clamped(&self) -> Self {
        Self {
            width: self.width.max(MIN_SURFACE_DIMENSION),
            height: self.height.max(MIN_SURFACE_DIMENSION),
        }
    }
}

/// Emitted when the window size or scale factor changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceResizeEvent {
    /// Size to configure the GPU surface with (never zero).
    pub surface: SurfaceSize,
    /// Size reported by the window (zero when minimized).
    pub requested: SurfaceSize,
    pub scale_factor: f64,
}

/// Tracks the window's physical size and scale factor.
#[derive(Debug, Clone)]
pub struct SurfaceWrapper {
    requested: SurfaceSize,
    scale_factor: f64,
}

impl SurfaceWrapper {
    pub fn new(physical_width: u32, physical_height: u32, scale_factor: f64) -> Self {
        Self {
            requested: SurfaceSize::new(physical_width, physical_height),
            scale_factor,
        }
    }

    /// Record a new physical size. Returns an event only if the size changed.
    pub fn handle_resize(
        &mut self,
        physical_width: u32,
        physical_height: u32,
    ) -> Option<SurfaceResizeEvent> {
        let requested = SurfaceSize::new(physical_width, physical_height);
        if requested == self.requested {
            return None;
        }
        self.requested = requested;
        Some(self.event())
    }

    /// Record a scale factor change together with the resulting physical size.
    pub fn handle_scale_factor_changed(
        &mut self,
        scale_factor: f64,
        physical_width: u32,
        physical_height: u32,
    ) -> Option<SurfaceResizeEvent> {
        let scale_changed = scale_factor != self.scale_factor;
        self.scale_factor = scale_factor;
        match self.handle_resize(physical_width, physical_height) {
            Some(event) => Some(event),
            None if scale_changed => Some(self.event()),
            None => None,
        }
    }

    /// Clamped size for configuring the GPU surface.
    pub fn surface_size(&self) -> SurfaceSize {
        self.requested.clamped()
    }

    /// Size as reported by the window, possibly zero.
    pub fn requested_size(&self) -> SurfaceSize {
        self.requested
    }

    /// True while the window reports a zero-area size.
    pub fn is_minimized(&self) -> bool {
        self.requested.is_zero()
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Size in logical pixels.
    pub fn logical_size(&self) -> (f64, f64) {
        (
            self.requested.width as f64 / self.scale_factor,
            self.requested.height as f64 / self.scale_factor,
        )
    }

    fn event(&self) -> SurfaceResizeEvent {
        SurfaceResizeEvent {
            surface: self.surface_size(),
            requested: self.requested,
            scale_factor: self.scale_factor,
        }
    }
}
