//! Read-only snapshots of the graph for the presentation layer.

use crate::model::gate::Gate;
use crate::model::gate_kind::GateKind;
use crate::model::geometry::Vec2;
use crate::model::graph::GateId;

/// Everything needed to draw one gate.
#[derive(Clone, Debug, PartialEq)]
pub struct GateView {
    pub id: GateId,
    pub kind: GateKind,
    pub position: Vec2,
    pub inputs: Vec<bool>,
    pub outputs: Vec<bool>,
}

impl GateView {
    pub(crate) fn new(id: GateId, gate: &Gate) -> Self {
        Self {
            id,
            kind: gate.kind(),
            position: gate.position,
            inputs: gate.inputs().to_vec(),
            outputs: gate.outputs().to_vec(),
        }
    }
}
