//! Resolves a world-space point to the gate part under it.

use crate::model::geometry::{GateLayout, Vec2};
use crate::model::graph::{GateId, Graph};
use crate::model::socket::{InputRef, OutputRef, SocketRef};

/// What lies under a point on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
    Socket(SocketRef),
    Body(GateId),
    Canvas,
}

/// Finds the topmost item under `point`.
///
/// Sockets straddle the edge of their gate body, so any socket wins over any
/// body. Among gates, later ones in iteration order are on top.
pub fn hit_test(graph: &Graph, layout: &GateLayout, point: Vec2) -> Hit {
    if let Some(socket) = socket_at(graph, layout, point) {
        return Hit::Socket(socket);
    }
    match body_at(graph, layout, point) {
        Some(id) => Hit::Body(id),
        None => Hit::Canvas,
    }
}

pub fn socket_at(graph: &Graph, layout: &GateLayout, point: Vec2) -> Option<SocketRef> {
    let gates: Vec<_> = graph.gates().collect();
    for (id, gate) in gates.into_iter().rev() {
        let n_in = gate.input_sockets().len();
        for index in 0..n_in {
            let center = layout.input_socket_position(gate.position, index, n_in);
            if layout.socket_contains(center, point) {
                return Some(SocketRef::Input(InputRef::new(id, index)));
            }
        }
        let n_out = gate.output_sockets().len();
        for index in 0..n_out {
            let center = layout.output_socket_position(gate.position, index, n_out);
            if layout.socket_contains(center, point) {
                return Some(SocketRef::Output(OutputRef::new(id, index)));
            }
        }
    }
    None
}

pub fn body_at(graph: &Graph, layout: &GateLayout, point: Vec2) -> Option<GateId> {
    let gates: Vec<_> = graph.gates().collect();
    gates
        .into_iter()
        .rev()
        .find(|(_, gate)| layout.body_contains(gate.position, point))
        .map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::gate_kind::GateKind;

    #[test]
    fn test_sockets_win_over_bodies() {
        let mut graph = Graph::new();
        let layout = GateLayout::default();
        let and = graph.add_gate(GateKind::And, Vec2::ZERO);

        assert_eq!(
            hit_test(&graph, &layout, Vec2::new(-50.0, -17.5)),
            Hit::Socket(SocketRef::Input(InputRef::new(and, 0)))
        );
        assert_eq!(
            hit_test(&graph, &layout, Vec2::new(55.0, 0.0)),
            Hit::Socket(SocketRef::Output(OutputRef::new(and, 0)))
        );
        assert_eq!(hit_test(&graph, &layout, Vec2::ZERO), Hit::Body(and));
        assert_eq!(hit_test(&graph, &layout, Vec2::new(300.0, 0.0)), Hit::Canvas);
    }

    #[test]
    fn test_switch_has_no_input_socket() {
        let mut graph = Graph::new();
        let layout = GateLayout::default();
        let switch = graph.add_gate(GateKind::Switch, Vec2::ZERO);
        assert_eq!(hit_test(&graph, &layout, Vec2::new(-55.0, 0.0)), Hit::Body(switch));
    }
}
