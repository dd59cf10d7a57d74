//! Logic canvas core: a gate graph, its tick engine, and the editor state
//! machine that builds and runs it.
//!
//! The host owns the window and the event loop. Each frame it forwards input
//! to an [`Editor`] and then reads the graph back to draw it.

pub mod config;
pub mod editor;
pub mod error;
pub mod evaluation;
pub mod model;

pub use config::EditorConfig;
pub use editor::{Editor, EditorMode, EditorOutcome, PointerButton, StateTag};
pub use error::{ConfigError, GraphError};
pub use evaluation::Simulator;
pub use model::{GateId, GateKind, Graph, InputRef, OutputRef, Vec2};
