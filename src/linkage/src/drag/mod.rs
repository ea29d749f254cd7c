pub mod control_law;
pub mod controller;
pub mod draggable;

pub use controller::{DragController, DragSession};
pub use draggable::{Draggable, DraggableRegistry, EventDraggable};
