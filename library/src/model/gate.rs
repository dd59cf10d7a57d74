//! A logic gate and its sockets.

use crate::model::gate_kind::GateKind;
use crate::model::geometry::Vec2;
use crate::model::socket::{InputSocket, OutputSocket};

/// A gate on the canvas.
///
/// The socket vectors and the value vectors are sized from the catalog at
/// construction and never change length afterwards. A gate can exist outside
/// a [`Graph`](crate::model::graph::Graph) (for example while it follows the
/// pointer before placement), in which case its sockets carry no links.
#[derive(Clone, Debug, PartialEq)]
pub struct Gate {
    kind: GateKind,
    pub(crate) input_sockets: Vec<InputSocket>,
    pub(crate) output_sockets: Vec<OutputSocket>,
    pub(crate) inputs: Vec<bool>,
    pub(crate) outputs: Vec<bool>,
    pub position: Vec2,
}

impl Gate {
    pub fn new(kind: GateKind, position: Vec2) -> Self {
        let (n_inputs, n_outputs) = kind.arity();
        Self {
            kind,
            input_sockets: (0..n_inputs).map(InputSocket::new).collect(),
            output_sockets: (0..n_outputs).map(OutputSocket::new).collect(),
            inputs: vec![false; n_inputs],
            outputs: vec![false; n_outputs],
            position,
        }
    }

    pub fn kind(&self) -> GateKind {
        self.kind
    }

    /// Current input values, one per input socket.
    pub fn inputs(&self) -> &[bool] {
        &self.inputs
    }

    /// Current output values, one per output socket.
    pub fn outputs(&self) -> &[bool] {
        &self.outputs
    }

    pub fn input_sockets(&self) -> &[InputSocket] {
        &self.input_sockets
    }

    pub fn output_sockets(&self) -> &[OutputSocket] {
        &self.output_sockets
    }

    pub fn input_socket(&self, index: usize) -> Option<&InputSocket> {
        self.input_sockets.get(index)
    }

    pub fn output_socket(&self, index: usize) -> Option<&OutputSocket> {
        self.output_sockets.get(index)
    }

    /// Recomputes the outputs from the current inputs.
    ///
    /// Sources and sinks are left untouched.
    pub fn evaluate(&mut self) {
        if let Some(values) = self.kind.evaluate(&self.inputs) {
            self.outputs = values;
        }
    }

    pub(crate) fn has_links(&self) -> bool {
        self.input_sockets.iter().any(|s| s.link.is_some())
            || self.output_sockets.iter().any(|s| !s.links.is_empty())
    }
}
