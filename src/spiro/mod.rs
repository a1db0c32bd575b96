//! Spirograph core: a fixed ring of nodes, a modular index walk over it,
//! and a bounded FIFO of line segments kept in lock-step with the scene.

mod buffer;
mod driver;
mod nodes;
mod walk;

pub use buffer::LineBuffer;
pub use driver::{simulate, SimulationReport, SpiroDriver, TickOutcome};
pub use nodes::PerimeterNodes;
pub use walk::{times_table, IndexWalk, WalkStep};
