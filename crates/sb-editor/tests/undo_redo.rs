//! Integration tests: bounded undo/redo through the scene engine.
//!
//! Exercises the inverse law, redo semantics and the capacity cap using
//! real engine operations rather than raw history commits.

use pretty_assertions::assert_eq;
use sb_core::{ElementPatch, Scene};
use sb_editor::{EditorConfig, SceneEngine};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn engine() -> SceneEngine {
    init_logs();
    SceneEngine::new(EditorConfig::default())
}

/// One commit of varying kind, so the sequence mixes adds, updates,
/// reorders and removals.
fn commit_step(engine: &mut SceneEngine, step: usize) {
    match step % 4 {
        0 => {
            engine.add_rectangle(&ElementPatch::default()).unwrap();
        }
        1 => {
            engine.add_ring(&ElementPatch::default()).unwrap();
        }
        2 => {
            let id = engine.elements()[0].id;
            let patch = ElementPatch {
                fill: Some(format!("#00000{}", step % 10)),
                ..Default::default()
            };
            assert!(engine.update_element(id, &patch));
        }
        _ => {
            let id = engine.elements()[0].id;
            assert!(engine.move_element_to_index(id, usize::MAX));
        }
    }
}

// ─── Inverse law ─────────────────────────────────────────────────────────

#[test]
fn n_commits_then_n_undos_restore_original() {
    for n in 1..=10 {
        let mut engine = engine();
        let original: Scene = engine.snapshot().clone();
        for step in 0..n {
            commit_step(&mut engine, step);
        }
        for _ in 0..n {
            assert!(engine.undo());
        }
        assert_eq!(engine.snapshot(), &original, "n = {n}");
        assert!(!engine.can_undo());
    }
}

#[test]
fn eleventh_commit_evicts_the_oldest() {
    let mut engine = engine();
    for step in 0..11 {
        commit_step(&mut engine, step);
    }
    assert_eq!(engine.history().past_len(), 10);
    while engine.undo() {}
    // The empty starting scene is gone; the oldest survivor has one element.
    assert_eq!(engine.elements().len(), 1);
    assert_eq!(engine.history().future_len(), 10);
}

// ─── Redo ────────────────────────────────────────────────────────────────

#[test]
fn redo_restores_exactly_what_was_undone() {
    let mut engine = engine();
    commit_step(&mut engine, 0);
    commit_step(&mut engine, 1);
    let after = engine.snapshot().clone();

    assert!(engine.undo());
    assert!(engine.redo());
    assert_eq!(engine.snapshot(), &after);
}

#[test]
fn redo_without_undo_is_noop() {
    let mut engine = engine();
    commit_step(&mut engine, 0);
    let before = engine.snapshot().clone();
    assert!(!engine.redo());
    assert_eq!(engine.snapshot(), &before);
}

#[test]
fn commit_after_undo_clears_future() {
    let mut engine = engine();
    commit_step(&mut engine, 0);
    commit_step(&mut engine, 1);
    engine.undo();
    assert!(engine.can_redo());

    commit_step(&mut engine, 1);
    assert!(!engine.can_redo());
    assert!(!engine.redo());
}

#[test]
fn selection_changes_do_not_enter_history() {
    let mut engine = engine();
    let a = engine.add_circle(&ElementPatch::default()).unwrap();
    let b = engine.add_text(&ElementPatch::default()).unwrap();
    let past = engine.history().past_len();

    engine.select(Some(a));
    engine.select(None);
    engine.select(Some(b));
    engine.on_stage_background_click();
    assert_eq!(engine.history().past_len(), past);

    // A single undo reverts the text add, not any of the selection moves.
    assert!(engine.undo());
    assert_eq!(engine.elements().len(), 1);
}

#[test]
fn configured_capacity_is_respected() {
    init_logs();
    let config = EditorConfig {
        history_capacity: 3,
        ..Default::default()
    };
    let mut engine = SceneEngine::new(config);
    for step in 0..6 {
        commit_step(&mut engine, step);
    }
    assert_eq!(engine.history().past_len(), 3);
}
