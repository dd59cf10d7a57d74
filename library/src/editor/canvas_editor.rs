//! The canvas editor: interprets pointer and keyboard commands against the
//! gate graph.
//!
//! The host calls one command per input event from its frame loop, then
//! reads the graph back to draw it. Every command is synchronous and reports
//! an [`EditorOutcome`]; a failed graph operation abandons the gesture and
//! returns the editor to [`EditorState::Idle`].

use std::mem;

use log::{debug, info, warn};

use crate::config::EditorConfig;
use crate::editor::hit_test::{Hit, body_at, hit_test};
use crate::editor::state::{EditorMode, EditorOutcome, EditorState, PointerButton, StateTag};
use crate::editor::view::GateView;
use crate::error::GraphError;
use crate::evaluation::engine::Simulator;
use crate::model::gate::Gate;
use crate::model::gate_kind::GateKind;
use crate::model::geometry::{GateLayout, Vec2};
use crate::model::graph::{GateId, Graph};
use crate::model::socket::{LinkView, OutputRef, SocketRef};

pub struct Editor {
    graph: Graph,
    layout: GateLayout,
    mode: EditorMode,
    state: EditorState,
    simulator: Simulator,
    cursor: Vec2,
    pan: Vec2,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            graph: Graph::new().with_self_loops(config.allow_self_loops),
            layout: config.layout(),
            mode: EditorMode::default(),
            state: EditorState::default(),
            simulator: Simulator::new(),
            cursor: Vec2::ZERO,
            pan: Vec2::ZERO,
        }
    }

    // --- Queries ---

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Direct graph access for hosts that build circuits programmatically.
    ///
    /// Gestures in flight notice stale gate ids on release and abort.
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn layout(&self) -> &GateLayout {
        &self.layout
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn state_tag(&self) -> StateTag {
        self.state.tag()
    }

    pub fn gates(&self) -> Vec<GateView> {
        self.graph
            .gates()
            .map(|(id, gate)| GateView::new(id, gate))
            .collect()
    }

    pub fn links(&self) -> Vec<LinkView> {
        self.graph.links()
    }

    /// Source of the link being dragged, for drawing a preview wire.
    pub fn pending_link_source(&self) -> Option<OutputRef> {
        match &self.state {
            EditorState::CreatingLink { from, .. } => Some(*from),
            _ => None,
        }
    }

    /// Gate following the pointer before placement.
    pub fn attached_gate(&self) -> Option<&Gate> {
        match &self.state {
            EditorState::Attached { gate } => Some(gate),
            _ => None,
        }
    }

    /// Last pointer position seen by any pointer command.
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Accumulated pointer travel while panning the canvas.
    pub fn pan_offset(&self) -> Vec2 {
        self.pan
    }

    /// Number of steps run since the editor was created.
    pub fn tick(&self) -> u64 {
        self.simulator.tick()
    }

    // --- Commands ---

    /// Picks a gate kind from the palette; the new gate follows the pointer.
    pub fn select_palette_gate(&mut self, kind: GateKind) -> EditorOutcome {
        if self.mode != EditorMode::Builder || !self.state.is_idle() {
            return EditorOutcome::Ignored;
        }
        debug!("Attached new {} gate", kind);
        self.state = EditorState::Attached {
            gate: Gate::new(kind, self.cursor),
        };
        EditorOutcome::Applied
    }

    pub fn pointer_down(&mut self, pos: Vec2, button: PointerButton) -> EditorOutcome {
        self.cursor = pos;
        if !self.state.is_idle() {
            return EditorOutcome::Ignored;
        }
        match self.mode {
            EditorMode::Builder => self.builder_pointer_down(pos, button),
            EditorMode::Runner => self.runner_pointer_down(pos, button),
        }
    }

    /// Updates the live position of whatever the current gesture moves.
    pub fn pointer_move(&mut self, pos: Vec2) -> EditorOutcome {
        self.cursor = pos;
        if let EditorState::MovingGate { gate, grab_offset } = self.state {
            return match self.graph.set_position(gate, pos + grab_offset) {
                Ok(()) => EditorOutcome::Applied,
                Err(e) => self.abort(StateTag::MovingGate, e),
            };
        }
        match &mut self.state {
            EditorState::Idle | EditorState::MovingGate { .. } => EditorOutcome::Ignored,
            EditorState::Dragging { last } => {
                self.pan += pos - *last;
                *last = pos;
                EditorOutcome::Applied
            }
            EditorState::Attached { gate } => {
                gate.position = pos;
                EditorOutcome::Applied
            }
            EditorState::CreatingLink { cursor, .. } => {
                *cursor = pos;
                EditorOutcome::Applied
            }
        }
    }

    /// Finishes the current gesture.
    pub fn pointer_up(&mut self, pos: Vec2, button: PointerButton) -> EditorOutcome {
        self.cursor = pos;
        if button != PointerButton::Primary {
            return EditorOutcome::Ignored;
        }
        let tag = self.state.tag();
        match mem::take(&mut self.state) {
            EditorState::Idle => EditorOutcome::Ignored,
            EditorState::Dragging { last } => {
                self.pan += pos - last;
                EditorOutcome::Applied
            }
            EditorState::Attached { mut gate } => {
                gate.position = pos;
                let kind = gate.kind();
                let id = self.graph.insert_gate(gate);
                info!("Placed {} gate {:?} at ({}, {})", kind, id, pos.x, pos.y);
                EditorOutcome::Applied
            }
            EditorState::MovingGate { gate, grab_offset } => {
                match self.graph.set_position(gate, pos + grab_offset) {
                    Ok(()) => EditorOutcome::Applied,
                    Err(e) => self.abort(tag, e),
                }
            }
            EditorState::CreatingLink { from, .. } => self.finish_link(from, pos),
        }
    }

    /// Advances the circuit by one tick. Runner mode only.
    pub fn step(&mut self) -> EditorOutcome {
        if self.mode != EditorMode::Runner {
            return EditorOutcome::Ignored;
        }
        self.simulator.step(&mut self.graph);
        EditorOutcome::Applied
    }

    /// Switches between builder and runner, cancelling any gesture first.
    pub fn toggle_mode(&mut self) -> EditorOutcome {
        self.cancel();
        self.mode = self.mode.toggled();
        info!("Switched to {} mode", self.mode);
        EditorOutcome::Applied
    }

    /// Flips the output of a switch gate. Runner mode only.
    pub fn toggle_switch(&mut self, id: GateId) -> EditorOutcome {
        if self.mode != EditorMode::Runner {
            return EditorOutcome::Ignored;
        }
        match self.graph.toggle_switch(id) {
            Ok(value) => {
                debug!("Switch {:?} set to {}", id, value);
                EditorOutcome::Applied
            }
            Err(e) => self.abort(self.state.tag(), e),
        }
    }

    /// Deletes a gate and its links. Builder mode only.
    ///
    /// A gesture holding on to the gate is cancelled first.
    pub fn delete_gate(&mut self, id: GateId) -> EditorOutcome {
        if self.mode != EditorMode::Builder {
            return EditorOutcome::Ignored;
        }
        if self.state.references(id) {
            self.cancel();
        }
        match self.graph.remove_gate(id) {
            Ok(gate) => {
                info!("Deleted {} gate {:?}", gate.kind(), id);
                EditorOutcome::Applied
            }
            Err(e) => self.abort(self.state.tag(), e),
        }
    }

    /// Abandons the current gesture without touching the graph.
    ///
    /// An attached gate is discarded, a dragged link is dropped and a moved
    /// gate stays where it was last moved to.
    pub fn cancel(&mut self) -> EditorOutcome {
        let previous = mem::take(&mut self.state);
        if previous.is_idle() {
            return EditorOutcome::Ignored;
        }
        info!("Cancelled {} gesture", previous.tag());
        EditorOutcome::Applied
    }

    // --- Internals ---

    fn builder_pointer_down(&mut self, pos: Vec2, button: PointerButton) -> EditorOutcome {
        if button == PointerButton::Secondary {
            return match body_at(&self.graph, &self.layout, pos) {
                Some(id) => self.delete_gate(id),
                None => EditorOutcome::Ignored,
            };
        }

        match hit_test(&self.graph, &self.layout, pos) {
            Hit::Socket(SocketRef::Output(from)) => {
                debug!("Started link from {:?}", from);
                self.state = EditorState::CreatingLink { from, cursor: pos };
                EditorOutcome::Applied
            }
            Hit::Socket(SocketRef::Input(to)) => {
                if self.graph.link_source(to).is_none() {
                    return EditorOutcome::Ignored;
                }
                match self.graph.detach(to.gate, to.index) {
                    Ok(from) => {
                        debug!("Picked up link {:?} -> {:?}", from, to);
                        self.state = EditorState::CreatingLink { from, cursor: pos };
                        EditorOutcome::Applied
                    }
                    Err(e) => self.abort(self.state.tag(), e),
                }
            }
            Hit::Body(id) => match self.graph.gate(id) {
                Ok(gate) => {
                    self.state = EditorState::MovingGate {
                        gate: id,
                        grab_offset: gate.position - pos,
                    };
                    EditorOutcome::Applied
                }
                Err(e) => self.abort(self.state.tag(), e),
            },
            Hit::Canvas => {
                self.state = EditorState::Dragging { last: pos };
                EditorOutcome::Applied
            }
        }
    }

    fn runner_pointer_down(&mut self, pos: Vec2, button: PointerButton) -> EditorOutcome {
        if button != PointerButton::Primary {
            return EditorOutcome::Ignored;
        }
        let switch = body_at(&self.graph, &self.layout, pos).filter(|id| {
            self.graph
                .gate(*id)
                .is_ok_and(|gate| gate.kind() == GateKind::Switch)
        });
        match switch {
            Some(id) => self.toggle_switch(id),
            None => {
                self.state = EditorState::Dragging { last: pos };
                EditorOutcome::Applied
            }
        }
    }

    fn finish_link(&mut self, from: OutputRef, pos: Vec2) -> EditorOutcome {
        let Hit::Socket(SocketRef::Input(to)) = hit_test(&self.graph, &self.layout, pos) else {
            debug!("Dropped link from {:?}", from);
            return EditorOutcome::Ignored;
        };
        match self.graph.connect(from.gate, from.index, to.gate, to.index) {
            Ok(()) => EditorOutcome::Applied,
            Err(e) => self.abort(StateTag::CreatingLink, e),
        }
    }

    fn abort(&mut self, during: StateTag, error: GraphError) -> EditorOutcome {
        warn!("Aborted while {}: {}", during, error);
        self.state = EditorState::Idle;
        EditorOutcome::Aborted(error)
    }
}
