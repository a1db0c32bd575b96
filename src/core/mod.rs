pub mod display_context;
pub mod fps;
pub mod gpu_context;

pub use display_context::{resize_to_display, DisplayContext, RenderSurface};
pub use fps::FpsCounter;
pub use gpu_context::GpuContext;
