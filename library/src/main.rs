use std::env;

use anyhow::{Context, Result, anyhow};
use log::info;

use logic_canvas::editor::hit_test::body_at;
use logic_canvas::{Editor, EditorConfig, EditorOutcome, GateId, GateKind, PointerButton, Vec2};

const DEFAULT_TICKS: usize = 4;

fn place(editor: &mut Editor, kind: GateKind, pos: Vec2) -> Result<GateId> {
    editor.select_palette_gate(kind);
    editor.pointer_up(pos, PointerButton::Primary);
    body_at(editor.graph(), editor.layout(), pos)
        .ok_or_else(|| anyhow!("{} gate was not placed at ({}, {})", kind, pos.x, pos.y))
}

fn wire(editor: &mut Editor, from: Vec2, to: Vec2) -> Result<()> {
    editor.pointer_down(from, PointerButton::Primary);
    match editor.pointer_up(to, PointerButton::Primary) {
        EditorOutcome::Applied => Ok(()),
        other => Err(anyhow!("link ({}, {}) -> ({}, {}) failed: {:?}", from.x, from.y, to.x, to.y, other)),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let ticks = match env::args().nth(1) {
        Some(arg) => arg
            .parse::<usize>()
            .with_context(|| format!("invalid tick count: {}", arg))?,
        None => DEFAULT_TICKS,
    };

    let config = EditorConfig::load_or_default();
    let layout = config.layout();
    let mut editor = Editor::new(&config);

    // a XOR b -> NOT -> OUT
    let a = place(&mut editor, GateKind::Switch, Vec2::new(0.0, 0.0))?;
    let b = place(&mut editor, GateKind::Switch, Vec2::new(0.0, 200.0))?;
    let xor_pos = Vec2::new(200.0, 100.0);
    let not_pos = Vec2::new(400.0, 100.0);
    let out_pos = Vec2::new(600.0, 100.0);
    place(&mut editor, GateKind::Xor, xor_pos)?;
    place(&mut editor, GateKind::Not, not_pos)?;
    let out = place(&mut editor, GateKind::Out, out_pos)?;

    let a_pos = editor.graph().gate(a)?.position;
    let b_pos = editor.graph().gate(b)?.position;
    wire(
        &mut editor,
        layout.output_socket_position(a_pos, 0, 1),
        layout.input_socket_position(xor_pos, 0, 2),
    )?;
    wire(
        &mut editor,
        layout.output_socket_position(b_pos, 0, 1),
        layout.input_socket_position(xor_pos, 1, 2),
    )?;
    wire(
        &mut editor,
        layout.output_socket_position(xor_pos, 0, 1),
        layout.input_socket_position(not_pos, 0, 1),
    )?;
    wire(
        &mut editor,
        layout.output_socket_position(not_pos, 0, 1),
        layout.input_socket_position(out_pos, 0, 1),
    )?;
    info!(
        "Built circuit with {} gates and {} links",
        editor.graph().len(),
        editor.links().len()
    );

    editor.toggle_mode();
    editor.pointer_down(a_pos, PointerButton::Primary);
    editor.pointer_up(a_pos, PointerButton::Primary);

    for _ in 0..ticks {
        editor.step();
        let observed = editor.graph().gate(out)?.inputs()[0];
        info!("Tick {}: OUT = {}", editor.tick(), observed);
    }

    Ok(())
}
