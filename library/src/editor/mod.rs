pub mod canvas_editor;
pub mod hit_test;
pub mod state;
pub mod view;

pub use canvas_editor::Editor;
pub use hit_test::{Hit, hit_test};
pub use state::{EditorMode, EditorOutcome, EditorState, PointerButton, StateTag};
pub use view::GateView;
