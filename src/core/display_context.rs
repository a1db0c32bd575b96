/// Drawable size of the display target in physical (device) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayContext {
    pub width: u32,
    pub height: u32,
}

impl DisplayContext {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A minimized window reports a zero extent.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect(&self) -> f32 {
        if self.is_empty() {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for DisplayContext {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

/// Something with a pixel size that can be changed, e.g. a swapchain.
pub trait RenderSurface {
    fn surface_size(&self) -> (u32, u32);

    fn set_surface_size(&mut self, width: u32, height: u32);
}

/// Brings `surface` to the display's size. Returns true if it changed.
pub fn resize_to_display<S>(surface: &mut S, display: DisplayContext) -> bool
where
    S: RenderSurface + ?Sized,
{
    if display.is_empty() {
        return false;
    }
    if surface.surface_size() == (display.width, display.height) {
        return false;
    }

    log::debug!("resizing render surface to {}x{}", display.width, display.height);
    surface.set_surface_size(display.width, display.height);
    true
}
