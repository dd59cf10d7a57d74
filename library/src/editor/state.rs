//! Editor modes, gesture states and command outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::model::gate::Gate;
use crate::model::geometry::Vec2;
use crate::model::graph::GateId;
use crate::model::socket::OutputRef;

/// Which of the two editors is active.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EditorMode {
    /// Gates and links can be added, moved and removed.
    #[default]
    Builder,
    /// Switches can be toggled and the circuit stepped.
    Runner,
}

impl EditorMode {
    pub fn toggled(self) -> Self {
        match self {
            EditorMode::Builder => EditorMode::Runner,
            EditorMode::Runner => EditorMode::Builder,
        }
    }
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorMode::Builder => f.write_str("builder"),
            EditorMode::Runner => f.write_str("runner"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Gesture currently in progress.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum EditorState {
    #[default]
    Idle,
    /// Canvas pan; `last` is the previous pointer position.
    Dragging { last: Vec2 },
    /// A gate picked from the palette follows the pointer. It is not part of
    /// the graph until the pointer is released.
    Attached { gate: Gate },
    /// An existing gate follows the pointer, keeping the offset between the
    /// pointer and the gate centre at the time it was grabbed.
    MovingGate { gate: GateId, grab_offset: Vec2 },
    /// A link from `from` is being dragged towards an input socket.
    CreatingLink { from: OutputRef, cursor: Vec2 },
}

impl EditorState {
    pub fn tag(&self) -> StateTag {
        match self {
            EditorState::Idle => StateTag::Idle,
            EditorState::Dragging { .. } => StateTag::Dragging,
            EditorState::Attached { .. } => StateTag::Attached,
            EditorState::MovingGate { .. } => StateTag::MovingGate,
            EditorState::CreatingLink { .. } => StateTag::CreatingLink,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EditorState::Idle)
    }

    /// Whether the gesture holds on to `id`.
    pub(crate) fn references(&self, id: GateId) -> bool {
        match self {
            EditorState::MovingGate { gate, .. } => *gate == id,
            EditorState::CreatingLink { from, .. } => from.gate == id,
            EditorState::Idle | EditorState::Dragging { .. } | EditorState::Attached { .. } => {
                false
            }
        }
    }
}

/// Data-free name of an [`EditorState`].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateTag {
    Idle,
    Dragging,
    Attached,
    MovingGate,
    CreatingLink,
}

impl fmt::Display for StateTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StateTag::Idle => "idle",
            StateTag::Dragging => "dragging",
            StateTag::Attached => "attached",
            StateTag::MovingGate => "moving gate",
            StateTag::CreatingLink => "creating link",
        };
        f.write_str(name)
    }
}

/// Result of an editor command.
#[derive(Clone, Debug, PartialEq)]
pub enum EditorOutcome {
    /// The command changed the editor or the graph.
    Applied,
    /// The command does not apply in the current mode or state.
    Ignored,
    /// A graph operation failed; the gesture was abandoned.
    Aborted(GraphError),
}

impl EditorOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, EditorOutcome::Applied)
    }
}
