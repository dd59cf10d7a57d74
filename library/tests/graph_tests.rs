//! Integration tests for the gate graph: linking, unlinking and deletion
//! over long mutation sequences.

use logic_canvas::model::{GateId, GateKind, Graph, InputRef, OutputRef, Vec2};
use logic_canvas::GraphError;

/// Small deterministic generator so the sequences are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }
}

fn assert_arity(graph: &Graph) {
    for (_, gate) in graph.gates() {
        let (n_in, n_out) = gate.kind().arity();
        assert_eq!(gate.inputs().len(), n_in);
        assert_eq!(gate.outputs().len(), n_out);
    }
}

fn assert_no_reference_to(graph: &Graph, removed: GateId) {
    for (_, gate) in graph.gates() {
        for socket in gate.input_sockets() {
            assert_ne!(socket.link().map(|l| l.gate), Some(removed));
        }
        for socket in gate.output_sockets() {
            assert!(socket.links().iter().all(|l| l.gate != removed));
        }
    }
}

#[test]
fn test_random_mutations_keep_links_consistent() {
    for seed in 0..16 {
        let mut rng = Lcg(seed);
        let mut graph = Graph::new();
        let mut live: Vec<GateId> = Vec::new();

        for _ in 0..400 {
            match rng.below(10) {
                0..=2 => {
                    let kind = GateKind::ALL[rng.below(GateKind::ALL.len())];
                    live.push(graph.add_gate(kind, Vec2::ZERO));
                }
                3..=6 if !live.is_empty() => {
                    let from = live[rng.below(live.len())];
                    let to = live[rng.below(live.len())];
                    let _ = graph.connect(from, rng.below(2), to, rng.below(3));
                }
                7 | 8 if !live.is_empty() => {
                    let to = live[rng.below(live.len())];
                    let _ = graph.disconnect(to, rng.below(2));
                }
                9 if !live.is_empty() => {
                    let id = live.swap_remove(rng.below(live.len()));
                    graph.remove_gate(id).unwrap();
                    assert!(!graph.contains(id));
                    assert_no_reference_to(&graph, id);
                }
                _ => {}
            }
            graph.check_consistency().unwrap();
            assert_arity(&graph);
        }
        assert_eq!(graph.len(), live.len());
    }
}

#[test]
fn test_links_agree_with_both_endpoints() {
    let mut graph = Graph::new();
    let s = graph.add_gate(GateKind::Switch, Vec2::ZERO);
    let a = graph.add_gate(GateKind::And, Vec2::ZERO);
    let o = graph.add_gate(GateKind::Out, Vec2::ZERO);
    graph.connect(s, 0, a, 0).unwrap();
    graph.connect(s, 0, a, 1).unwrap();
    graph.connect(a, 0, o, 0).unwrap();

    for link in graph.links() {
        assert_eq!(graph.link_source(link.to), Some(link.from));
        let source = graph.gate(link.from.gate).unwrap();
        assert!(source.output_sockets()[link.from.index].contains(link.to));
    }
    assert_eq!(graph.links().len(), 3);
}

#[test]
fn test_relink_requires_explicit_detach() {
    let mut graph = Graph::new();
    let first = graph.add_gate(GateKind::Switch, Vec2::ZERO);
    let second = graph.add_gate(GateKind::Switch, Vec2::ZERO);
    let not = graph.add_gate(GateKind::Not, Vec2::ZERO);
    graph.connect(first, 0, not, 0).unwrap();

    assert_eq!(
        graph.connect(second, 0, not, 0),
        Err(GraphError::InputOccupied { gate: not, index: 0 })
    );
    assert_eq!(graph.link_source(InputRef::new(not, 0)), Some(OutputRef::new(first, 0)));

    let former = graph.disconnect(not, 0).unwrap();
    assert_eq!(former, Some(OutputRef::new(first, 0)));
    graph.connect(second, 0, not, 0).unwrap();
    assert_eq!(graph.link_source(InputRef::new(not, 0)), Some(OutputRef::new(second, 0)));
    assert!(graph.gate(first).unwrap().output_sockets()[0].links().is_empty());
    graph.check_consistency().unwrap();
}

#[test]
fn test_removing_a_fanned_out_source_clears_every_input() {
    let mut graph = Graph::new();
    let s = graph.add_gate(GateKind::Switch, Vec2::ZERO);
    let sinks: Vec<GateId> = (0..3).map(|_| graph.add_gate(GateKind::Out, Vec2::ZERO)).collect();
    for sink in &sinks {
        graph.connect(s, 0, *sink, 0).unwrap();
    }

    graph.remove_gate(s).unwrap();
    for sink in sinks {
        assert!(!graph.gate(sink).unwrap().input_sockets()[0].is_linked());
    }
    assert!(graph.links().is_empty());
}

#[test]
fn test_operations_on_removed_gate_report_no_such_gate() {
    let mut graph = Graph::new();
    let a = graph.add_gate(GateKind::And, Vec2::ZERO);
    let b = graph.add_gate(GateKind::And, Vec2::ZERO);
    graph.remove_gate(a).unwrap();

    assert_eq!(graph.connect(a, 0, b, 0), Err(GraphError::NoSuchGate(a)));
    assert_eq!(graph.connect(b, 0, a, 0), Err(GraphError::NoSuchGate(a)));
    assert_eq!(graph.disconnect(a, 0), Err(GraphError::NoSuchGate(a)));
    assert!(graph.gate(a).is_err());
}
