use thiserror::Error;

use crate::model::gate_kind::GateKind;
use crate::model::graph::GateId;
use crate::model::socket::SocketDirection;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("{direction} socket {index} out of range for {kind} gate {gate:?}")]
    InvalidSocket {
        gate: GateId,
        index: usize,
        kind: GateKind,
        direction: SocketDirection,
    },
    #[error("Gate {0:?} not found")]
    NoSuchGate(GateId),
    #[error("Input socket {index} of gate {gate:?} has no link")]
    NoSuchLink { gate: GateId, index: usize },
    #[error("Cannot connect gate {0:?} to itself")]
    SelfLoopDenied(GateId),
    #[error("Input socket {index} of gate {gate:?} already has a link")]
    InputOccupied { gate: GateId, index: usize },
    #[error("Gate {0:?} is not a switch")]
    NotASwitch(GateId),
    #[error("Graph inconsistent: {0}")]
    Inconsistent(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
