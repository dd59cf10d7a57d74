pub mod gate;
pub mod gate_kind;
pub mod geometry;
pub mod graph;
pub mod socket;

pub use gate::Gate;
pub use gate_kind::GateKind;
pub use geometry::{GateLayout, Vec2};
pub use graph::{GateId, Graph};
pub use socket::{InputRef, InputSocket, LinkView, OutputRef, OutputSocket, SocketDirection, SocketRef};
