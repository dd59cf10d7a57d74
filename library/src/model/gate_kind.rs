//! Gate catalog: the closed set of gate kinds and their fixed arities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of a logic gate.
///
/// Binary kinds take two inputs and drive one output. `Switch` is a source
/// whose output is only ever written by the user, `Out` is a sink whose
/// single input is observed.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateKind {
    And,
    Or,
    Nand,
    Nor,
    Xor,
    Not,
    Switch,
    Out,
}

impl GateKind {
    /// Palette order.
    pub const ALL: [GateKind; 8] = [
        GateKind::And,
        GateKind::Or,
        GateKind::Nand,
        GateKind::Nor,
        GateKind::Xor,
        GateKind::Not,
        GateKind::Switch,
        GateKind::Out,
    ];

    /// `(inputs, outputs)` for this kind.
    pub fn arity(self) -> (usize, usize) {
        match self {
            GateKind::And | GateKind::Or | GateKind::Nand | GateKind::Nor | GateKind::Xor => (2, 1),
            GateKind::Not => (1, 1),
            GateKind::Switch => (0, 1),
            GateKind::Out => (1, 0),
        }
    }

    pub fn input_count(self) -> usize {
        self.arity().0
    }

    pub fn output_count(self) -> usize {
        self.arity().1
    }

    pub fn name(self) -> &'static str {
        match self {
            GateKind::And => "AND",
            GateKind::Or => "OR",
            GateKind::Nand => "NAND",
            GateKind::Nor => "NOR",
            GateKind::Xor => "XOR",
            GateKind::Not => "NOT",
            GateKind::Switch => "SWITCH",
            GateKind::Out => "OUT",
        }
    }

    /// Combinational function of this kind.
    ///
    /// Returns `None` for kinds that are never recomputed: `Switch` (set by
    /// the user) and `Out` (no outputs). `inputs` must have `input_count()`
    /// elements.
    pub fn evaluate(self, inputs: &[bool]) -> Option<Vec<bool>> {
        let value = match self {
            GateKind::And => inputs[0] && inputs[1],
            GateKind::Or => inputs[0] || inputs[1],
            GateKind::Nand => !(inputs[0] && inputs[1]),
            GateKind::Nor => !(inputs[0] || inputs[1]),
            GateKind::Xor => inputs[0] != inputs[1],
            GateKind::Not => !inputs[0],
            GateKind::Switch | GateKind::Out => return None,
        };
        Some(vec![value])
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a gate name is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown gate kind: {0}")]
pub struct UnknownGateKind(pub String);

impl FromStr for GateKind {
    type Err = UnknownGateKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GateKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownGateKind(s.to_string()))
    }
}
