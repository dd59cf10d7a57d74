//! Socket model for the gate graph.
//!
//! A link is not a standalone entity: it is the pair of back-references held
//! by its two endpoints. An [`InputSocket`] knows the single output feeding
//! it, an [`OutputSocket`] knows every input it feeds. [`Graph`] keeps the two
//! sides in agreement.
//!
//! [`Graph`]: crate::model::graph::Graph

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::graph::GateId;

/// Direction of a socket.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SocketDirection {
    Input,
    Output,
}

impl fmt::Display for SocketDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SocketDirection::Input => f.write_str("input"),
            SocketDirection::Output => f.write_str("output"),
        }
    }
}

/// Identifies an input socket on a specific gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InputRef {
    pub gate: GateId,
    pub index: usize,
}

impl InputRef {
    pub fn new(gate: GateId, index: usize) -> Self {
        Self { gate, index }
    }
}

/// Identifies an output socket on a specific gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutputRef {
    pub gate: GateId,
    pub index: usize,
}

impl OutputRef {
    pub fn new(gate: GateId, index: usize) -> Self {
        Self { gate, index }
    }
}

/// Either kind of socket, as reported by hit-testing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SocketRef {
    Input(InputRef),
    Output(OutputRef),
}

/// Input terminal of a gate. Fan-in is at most one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputSocket {
    pub index: usize,
    pub(crate) link: Option<OutputRef>,
}

impl InputSocket {
    pub(crate) fn new(index: usize) -> Self {
        Self { index, link: None }
    }

    /// The output socket feeding this input, if any.
    pub fn link(&self) -> Option<OutputRef> {
        self.link
    }

    pub fn is_linked(&self) -> bool {
        self.link.is_some()
    }
}

/// Output terminal of a gate. Fan-out is unbounded, without duplicates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputSocket {
    pub index: usize,
    pub(crate) links: Vec<InputRef>,
}

impl OutputSocket {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            links: Vec::new(),
        }
    }

    /// Input sockets fed by this output, in link creation order.
    pub fn links(&self) -> &[InputRef] {
        &self.links
    }

    pub fn contains(&self, input: InputRef) -> bool {
        self.links.contains(&input)
    }

    pub(crate) fn attach(&mut self, input: InputRef) {
        if !self.links.contains(&input) {
            self.links.push(input);
        }
    }

    pub(crate) fn detach(&mut self, input: InputRef) -> bool {
        let before = self.links.len();
        self.links.retain(|l| *l != input);
        self.links.len() != before
    }
}

/// A directed edge from an output socket to an input socket (view data).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LinkView {
    pub from: OutputRef,
    pub to: InputRef,
}
