//! Scene graph the demos draw into.
//!
//! Responsibilities:
//! - own drawable leaf nodes (box meshes and line segments)
//! - hand out opaque handles on attach so owners can detach by identity
//! - expose the light and background the renderer needs
//!
//! The renderer only reads from a `Scene`; demos and the spirograph line
//! buffer are the only writers.

mod drawable;
mod graph;
mod handle;
mod light;

pub use drawable::{BoxGeometry, Drawable, LineSegment, Material, Mesh, SegmentId};
pub use graph::{Scene, SceneGraph};
pub use handle::NodeHandle;
pub use light::DirectionalLight;
