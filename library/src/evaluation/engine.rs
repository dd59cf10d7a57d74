//! Tick engine for the gate graph.
//!
//! One step is one clock tick, run as two whole-graph phases:
//!
//! 1. **Propagate**: every output value is copied along its links into the
//!    fed input slots. Unlinked inputs keep whatever value they had.
//! 2. **Evaluate**: every combinational gate recomputes its outputs from its
//!    own inputs.
//!
//! Propagate only reads outputs and only writes inputs, and evaluate only
//! reads and writes the gate it is visiting, so neither phase depends on the
//! order gates are visited in. A value therefore advances by one
//! combinational stage per step; feedback loops are not settled within a
//! step.

use log::trace;

use crate::model::graph::Graph;
use crate::model::socket::InputRef;

/// Copies every output value into the inputs it feeds.
pub fn propagate(graph: &mut Graph) {
    let transfers: Vec<(InputRef, bool)> = graph
        .gates()
        .flat_map(|(_, gate)| {
            gate.output_sockets().iter().flat_map(move |socket| {
                let value = gate.outputs()[socket.index];
                socket.links().iter().map(move |to| (*to, value))
            })
        })
        .collect();

    for (to, value) in transfers {
        if let Ok(gate) = graph.gate_mut(to.gate) {
            if let Some(slot) = gate.inputs.get_mut(to.index) {
                *slot = value;
            }
        }
    }
}

/// Recomputes the outputs of every gate from its current inputs.
pub fn evaluate(graph: &mut Graph) {
    for (_, gate) in graph.gates_mut() {
        gate.evaluate();
    }
}

/// Advances the graph by exactly one tick.
pub fn step(graph: &mut Graph) {
    propagate(graph);
    evaluate(graph);
}

/// Drives the graph tick by tick and counts elapsed ticks.
#[derive(Clone, Debug, Default)]
pub struct Simulator {
    tick: u64,
}

impl Simulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of steps taken so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn step(&mut self, graph: &mut Graph) {
        step(graph);
        self.tick += 1;
        trace!("Tick {} over {} gates", self.tick, graph.len());
    }

    pub fn step_n(&mut self, graph: &mut Graph, n: usize) {
        for _ in 0..n {
            self.step(graph);
        }
    }

    pub fn reset(&mut self) {
        self.tick = 0;
    }
}
