use egui::{Color32, Pos2};
use kids_drawing::history::StrokeHistory;
use kids_drawing::stroke::{Stroke, StrokeRef};
use std::sync::Arc;

fn stroke(id: f32, color: Color32, thickness: f32) -> StrokeRef {
    Stroke::new_ref(
        color,
        thickness,
        vec![Pos2::new(id, id), Pos2::new(id + 5.0, id + 1.0), Pos2::new(id + 9.0, id)],
    )
}

fn history_with(n: usize) -> (StrokeHistory, Vec<StrokeRef>) {
    let mut history = StrokeHistory::new();
    let strokes: Vec<StrokeRef> = (0..n)
        .map(|i| stroke(i as f32 * 10.0, Color32::BLACK, 10.0 + i as f32))
        .collect();
    for s in &strokes {
        history.commit(s.clone());
    }
    (history, strokes)
}

#[test]
fn test_undo_moves_last_commit_to_undone() {
    for n in 1..6 {
        let (mut history, strokes) = history_with(n);
        let undone = history.undo().expect("something to undo");

        assert_eq!(history.committed().len(), n - 1);
        assert_eq!(history.undone().len(), 1);
        assert!(Arc::ptr_eq(&undone, &strokes[n - 1]));
        assert!(Arc::ptr_eq(&history.undone()[0], &strokes[n - 1]));
        for (kept, committed) in history.committed().iter().zip(&strokes) {
            assert!(Arc::ptr_eq(kept, committed));
        }
    }
}

#[test]
fn test_undo_then_redo_restores_exact_stroke() {
    let (mut history, strokes) = history_with(3);
    let before: Vec<Stroke> = history.committed().iter().map(|s| (**s).clone()).collect();

    history.undo();
    history.redo();

    let after: Vec<Stroke> = history.committed().iter().map(|s| (**s).clone()).collect();
    assert_eq!(before, after);
    assert!(Arc::ptr_eq(&history.committed()[2], &strokes[2]));
    assert!(history.undone().is_empty());
}

#[test]
fn test_multiple_undo_redo_in_order() {
    let (mut history, strokes) = history_with(3);

    history.undo();
    history.undo();
    assert_eq!(history.committed().len(), 1);

    history.redo();
    assert!(Arc::ptr_eq(&history.committed()[1], &strokes[1]));
    history.redo();
    assert!(Arc::ptr_eq(&history.committed()[2], &strokes[2]));
    assert_eq!(history.redone().len(), 2);
}

#[test]
fn test_commit_after_undo_clears_redo() {
    let (mut history, _) = history_with(3);
    history.undo();
    history.undo();
    history.redo();
    assert!(history.can_redo());

    history.commit(stroke(100.0, Color32::RED, 30.0));

    assert!(!history.can_redo());
    assert!(history.undone().is_empty());
    assert!(history.redone().is_empty());
    assert_eq!(history.committed().len(), 3);
    assert!(history.redo().is_none());
}

#[test]
fn test_undo_redo_on_empty_are_noops() {
    let mut history = StrokeHistory::new();
    assert!(history.undo().is_none());
    assert!(history.redo().is_none());
    assert!(history.committed().is_empty());
    assert!(history.undone().is_empty());

    let (mut history, _) = history_with(2);
    assert!(history.redo().is_none());
    assert_eq!(history.committed().len(), 2);
    history.undo();
    history.undo();
    assert!(history.undo().is_none());
    assert_eq!(history.undone().len(), 2);
}

#[test]
fn test_stroke_is_in_exactly_one_list() {
    let (mut history, strokes) = history_with(4);
    history.undo();
    history.undo();
    history.redo();

    for s in &strokes {
        let in_committed = history.committed().iter().any(|c| Arc::ptr_eq(c, s));
        let in_undone = history.undone().iter().any(|u| Arc::ptr_eq(u, s));
        assert!(in_committed ^ in_undone);
    }
}
