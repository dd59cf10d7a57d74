//! Gate graph: an arena of gates wired together by socket links.

use log::debug;
use slotmap::{SlotMap, new_key_type};

use crate::error::GraphError;
use crate::model::gate::Gate;
use crate::model::gate_kind::GateKind;
use crate::model::geometry::Vec2;
use crate::model::socket::{InputRef, LinkView, OutputRef, SocketDirection};

new_key_type! {
    /// Generational handle to a gate. A handle to a removed gate never
    /// resolves again, even after its slot is reused.
    pub struct GateId;
}

/// The circuit: owns every placed gate and the links between them.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    gates: SlotMap<GateId, Gate>,
    allow_self_loops: bool,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether a gate may feed one of its own inputs. Rejected by default.
    pub fn with_self_loops(mut self, allow: bool) -> Self {
        self.allow_self_loops = allow;
        self
    }

    pub fn allows_self_loops(&self) -> bool {
        self.allow_self_loops
    }

    pub fn add_gate(&mut self, kind: GateKind, position: Vec2) -> GateId {
        self.insert_gate(Gate::new(kind, position))
    }

    /// Inserts a gate built outside the graph. Any links it carries are
    /// dropped since they cannot refer to gates of this graph.
    pub fn insert_gate(&mut self, mut gate: Gate) -> GateId {
        if gate.has_links() {
            for socket in &mut gate.input_sockets {
                socket.link = None;
            }
            for socket in &mut gate.output_sockets {
                socket.links.clear();
            }
        }
        let kind = gate.kind();
        let id = self.gates.insert(gate);
        debug!("Added {} gate {:?}", kind, id);
        id
    }

    /// Removes a gate after severing every link that touches it.
    pub fn remove_gate(&mut self, id: GateId) -> Result<Gate, GraphError> {
        let gate = self.gates.get(id).ok_or(GraphError::NoSuchGate(id))?;

        let upstream: Vec<(OutputRef, InputRef)> = gate
            .input_sockets
            .iter()
            .filter_map(|s| s.link.map(|from| (from, InputRef::new(id, s.index))))
            .collect();
        let downstream: Vec<InputRef> = gate
            .output_sockets
            .iter()
            .flat_map(|s| s.links.iter().copied())
            .collect();

        for (from, to) in upstream {
            if let Some(source) = self.gates.get_mut(from.gate) {
                if let Some(socket) = source.output_sockets.get_mut(from.index) {
                    socket.detach(to);
                }
            }
        }
        for to in downstream {
            if let Some(target) = self.gates.get_mut(to.gate) {
                if let Some(socket) = target.input_sockets.get_mut(to.index) {
                    socket.link = None;
                }
            }
        }

        let mut gate = self.gates.remove(id).ok_or(GraphError::NoSuchGate(id))?;
        for socket in &mut gate.input_sockets {
            socket.link = None;
        }
        for socket in &mut gate.output_sockets {
            socket.links.clear();
        }
        debug!("Removed {} gate {:?}", gate.kind(), id);
        Ok(gate)
    }

    /// Links an output socket to an input socket.
    ///
    /// An input that already has a link is rejected with
    /// [`GraphError::InputOccupied`]; the existing link must be removed with
    /// [`Graph::disconnect`] first.
    pub fn connect(
        &mut self,
        from_gate: GateId,
        from_output: usize,
        to_gate: GateId,
        to_input: usize,
    ) -> Result<(), GraphError> {
        let source = self.gate(from_gate)?;
        if from_output >= source.output_sockets.len() {
            return Err(GraphError::InvalidSocket {
                gate: from_gate,
                index: from_output,
                kind: source.kind(),
                direction: SocketDirection::Output,
            });
        }
        let target = self.gate(to_gate)?;
        let Some(input) = target.input_sockets.get(to_input) else {
            return Err(GraphError::InvalidSocket {
                gate: to_gate,
                index: to_input,
                kind: target.kind(),
                direction: SocketDirection::Input,
            });
        };
        if from_gate == to_gate && !self.allow_self_loops {
            return Err(GraphError::SelfLoopDenied(from_gate));
        }
        if input.link.is_some() {
            return Err(GraphError::InputOccupied {
                gate: to_gate,
                index: to_input,
            });
        }

        let from = OutputRef::new(from_gate, from_output);
        let to = InputRef::new(to_gate, to_input);
        self.gates[to_gate].input_sockets[to_input].link = Some(from);
        self.gates[from_gate].output_sockets[from_output].attach(to);
        debug!("Linked {:?} -> {:?}", from, to);
        Ok(())
    }

    /// Removes the link feeding an input socket, returning its former source.
    ///
    /// Returns `Ok(None)` when the input has no link.
    pub fn disconnect(
        &mut self,
        to_gate: GateId,
        to_input: usize,
    ) -> Result<Option<OutputRef>, GraphError> {
        let target = self.gates.get_mut(to_gate).ok_or(GraphError::NoSuchGate(to_gate))?;
        let kind = target.kind();
        let socket = target
            .input_sockets
            .get_mut(to_input)
            .ok_or(GraphError::InvalidSocket {
                gate: to_gate,
                index: to_input,
                kind,
                direction: SocketDirection::Input,
            })?;
        let Some(from) = socket.link.take() else {
            return Ok(None);
        };

        let to = InputRef::new(to_gate, to_input);
        if let Some(socket) = self
            .gates
            .get_mut(from.gate)
            .and_then(|g| g.output_sockets.get_mut(from.index))
        {
            socket.detach(to);
        }
        debug!("Unlinked {:?} -> {:?}", from, to);
        Ok(Some(from))
    }

    /// Like [`Graph::disconnect`], but an unlinked input is an error.
    pub fn detach(&mut self, to_gate: GateId, to_input: usize) -> Result<OutputRef, GraphError> {
        self.disconnect(to_gate, to_input)?
            .ok_or(GraphError::NoSuchLink {
                gate: to_gate,
                index: to_input,
            })
    }

    pub fn gate(&self, id: GateId) -> Result<&Gate, GraphError> {
        self.gates.get(id).ok_or(GraphError::NoSuchGate(id))
    }

    pub fn gate_mut(&mut self, id: GateId) -> Result<&mut Gate, GraphError> {
        self.gates.get_mut(id).ok_or(GraphError::NoSuchGate(id))
    }

    pub fn contains(&self, id: GateId) -> bool {
        self.gates.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    pub fn gates(&self) -> impl Iterator<Item = (GateId, &Gate)> {
        self.gates.iter()
    }

    pub fn gate_ids(&self) -> Vec<GateId> {
        self.gates.keys().collect()
    }

    pub(crate) fn gates_mut(&mut self) -> impl Iterator<Item = (GateId, &mut Gate)> {
        self.gates.iter_mut()
    }

    /// Every link, grouped by source gate.
    pub fn links(&self) -> Vec<LinkView> {
        self.gates
            .iter()
            .flat_map(|(id, gate)| {
                gate.output_sockets.iter().flat_map(move |socket| {
                    socket.links.iter().map(move |to| LinkView {
                        from: OutputRef::new(id, socket.index),
                        to: *to,
                    })
                })
            })
            .collect()
    }

    /// The output socket feeding `input`, if linked.
    pub fn link_source(&self, input: InputRef) -> Option<OutputRef> {
        self.gates
            .get(input.gate)
            .and_then(|g| g.input_sockets.get(input.index))
            .and_then(|s| s.link)
    }

    pub fn set_position(&mut self, id: GateId, position: Vec2) -> Result<(), GraphError> {
        self.gate_mut(id)?.position = position;
        Ok(())
    }

    /// Writes the output of a `Switch` gate.
    pub fn set_switch(&mut self, id: GateId, value: bool) -> Result<(), GraphError> {
        let gate = self.gate_mut(id)?;
        if gate.kind() != GateKind::Switch {
            return Err(GraphError::NotASwitch(id));
        }
        gate.outputs[0] = value;
        Ok(())
    }

    /// Flips the output of a `Switch` gate, returning the new value.
    pub fn toggle_switch(&mut self, id: GateId) -> Result<bool, GraphError> {
        let current = self.gate(id)?.outputs.first().copied().unwrap_or(false);
        self.set_switch(id, !current)?;
        Ok(!current)
    }

    pub fn clear(&mut self) {
        self.gates.clear();
    }

    /// Verifies the arity and dual-pointer invariants over the whole graph.
    pub fn check_consistency(&self) -> Result<(), GraphError> {
        for (id, gate) in &self.gates {
            let (n_in, n_out) = gate.kind().arity();
            if gate.inputs.len() != n_in
                || gate.input_sockets.len() != n_in
                || gate.outputs.len() != n_out
                || gate.output_sockets.len() != n_out
            {
                return Err(GraphError::Inconsistent(format!(
                    "gate {:?} does not match {} arity",
                    id,
                    gate.kind()
                )));
            }

            for socket in &gate.input_sockets {
                let Some(from) = socket.link else { continue };
                let to = InputRef::new(id, socket.index);
                let fed = self
                    .gates
                    .get(from.gate)
                    .and_then(|g| g.output_sockets.get(from.index))
                    .is_some_and(|s| s.contains(to));
                if !fed {
                    return Err(GraphError::Inconsistent(format!(
                        "{:?} points at {:?} which does not list it",
                        to, from
                    )));
                }
            }

            for socket in &gate.output_sockets {
                let from = OutputRef::new(id, socket.index);
                for to in &socket.links {
                    let back = self
                        .gates
                        .get(to.gate)
                        .and_then(|g| g.input_sockets.get(to.index))
                        .and_then(|s| s.link);
                    if back != Some(from) {
                        return Err(GraphError::Inconsistent(format!(
                            "{:?} lists {:?} which points at {:?}",
                            from, to, back
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn and_pair() -> (Graph, GateId, GateId) {
        let mut graph = Graph::new();
        let a = graph.add_gate(GateKind::And, Vec2::ZERO);
        let b = graph.add_gate(GateKind::And, Vec2::new(200.0, 0.0));
        (graph, a, b)
    }

    #[test]
    fn test_connect_sets_both_sides() {
        let (mut graph, a, b) = and_pair();
        graph.connect(a, 0, b, 1).unwrap();

        assert_eq!(graph.link_source(InputRef::new(b, 1)), Some(OutputRef::new(a, 0)));
        assert_eq!(graph.gate(a).unwrap().output_sockets()[0].links(), &[InputRef::new(b, 1)]);
        assert_eq!(graph.links().len(), 1);
        graph.check_consistency().unwrap();
    }

    #[test]
    fn test_connect_rejects_out_of_range_sockets() {
        let (mut graph, a, b) = and_pair();
        assert!(matches!(
            graph.connect(a, 1, b, 0),
            Err(GraphError::InvalidSocket { direction: SocketDirection::Output, index: 1, .. })
        ));
        assert!(matches!(
            graph.connect(a, 0, b, 2),
            Err(GraphError::InvalidSocket { direction: SocketDirection::Input, index: 2, .. })
        ));
        assert!(graph.links().is_empty());
    }

    #[test]
    fn test_self_loop_policy() {
        let (mut graph, a, _) = and_pair();
        assert_eq!(graph.connect(a, 0, a, 0), Err(GraphError::SelfLoopDenied(a)));

        let mut graph = Graph::new().with_self_loops(true);
        let g = graph.add_gate(GateKind::Nand, Vec2::ZERO);
        graph.connect(g, 0, g, 0).unwrap();
        graph.check_consistency().unwrap();
    }

    #[test]
    fn test_connect_never_overwrites() {
        let (mut graph, a, b) = and_pair();
        let c = graph.add_gate(GateKind::Or, Vec2::ZERO);
        graph.connect(a, 0, c, 0).unwrap();

        assert_eq!(
            graph.connect(b, 0, c, 0),
            Err(GraphError::InputOccupied { gate: c, index: 0 })
        );
        assert_eq!(graph.link_source(InputRef::new(c, 0)), Some(OutputRef::new(a, 0)));
        assert!(graph.gate(b).unwrap().output_sockets()[0].links().is_empty());
    }

    #[test]
    fn test_disconnect_returns_former_source() {
        let (mut graph, a, b) = and_pair();
        graph.connect(a, 0, b, 0).unwrap();

        assert_eq!(graph.disconnect(b, 0).unwrap(), Some(OutputRef::new(a, 0)));
        assert_eq!(graph.disconnect(b, 0).unwrap(), None);
        assert_eq!(graph.detach(b, 0), Err(GraphError::NoSuchLink { gate: b, index: 0 }));
        assert!(graph.links().is_empty());
        graph.check_consistency().unwrap();
    }

    #[test]
    fn test_remove_gate_scrubs_links() {
        let mut graph = Graph::new();
        let s = graph.add_gate(GateKind::Switch, Vec2::ZERO);
        let n = graph.add_gate(GateKind::Not, Vec2::ZERO);
        let o = graph.add_gate(GateKind::Out, Vec2::ZERO);
        graph.connect(s, 0, n, 0).unwrap();
        graph.connect(n, 0, o, 0).unwrap();

        let removed = graph.remove_gate(n).unwrap();
        assert_eq!(removed.kind(), GateKind::Not);
        assert!(!removed.has_links());
        assert!(graph.links().is_empty());
        assert!(graph.gate(s).unwrap().output_sockets()[0].links().is_empty());
        assert_eq!(graph.link_source(InputRef::new(o, 0)), None);
        graph.check_consistency().unwrap();
    }

    #[test]
    fn test_stale_id_does_not_resolve() {
        let (mut graph, a, _) = and_pair();
        graph.remove_gate(a).unwrap();
        let reused = graph.add_gate(GateKind::Or, Vec2::ZERO);

        assert_ne!(reused, a);
        assert_eq!(graph.remove_gate(a).unwrap_err(), GraphError::NoSuchGate(a));
        assert_eq!(graph.set_switch(a, true), Err(GraphError::NoSuchGate(a)));
    }

    #[test]
    fn test_set_switch_rejects_other_kinds() {
        let (mut graph, a, _) = and_pair();
        let s = graph.add_gate(GateKind::Switch, Vec2::ZERO);
        assert_eq!(graph.set_switch(a, true), Err(GraphError::NotASwitch(a)));
        assert!(graph.toggle_switch(s).unwrap());
        assert!(!graph.toggle_switch(s).unwrap());
    }
}
