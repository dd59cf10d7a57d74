pub mod engine;

pub use engine::{Simulator, evaluate, propagate, step};
