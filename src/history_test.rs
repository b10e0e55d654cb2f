use super::*;
use crate::action::{ActionId, Freehand, Stroke};
use crate::geometry::Point;

// =============================================================
// Helpers
// =============================================================

fn clear(id: u64) -> Action {
    Action::Clear { id: ActionId(id) }
}

fn stroke(id: u64) -> Action {
    Action::Stroke(Stroke {
        id: ActionId(id),
        tool: Freehand::Pencil,
        points: vec![Point::new(0.0, 0.0)],
        stroke_color: "#000000".into(),
        fill_color: None,
        size: 1.0,
        open: false,
    })
}

fn ids(actions: &[Action]) -> Vec<u64> {
    actions.iter().map(|a| a.id().0).collect()
}

fn log_of(n: u64) -> ActionLog {
    let mut log = ActionLog::new();
    for id in 0..n {
        log.append(clear(id));
    }
    log
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_log_is_empty_with_cursor_minus_one() {
    let log = ActionLog::new();
    assert!(log.is_empty());
    assert_eq!(log.cursor(), None);
    assert_eq!(log.history_index(), -1);
    assert!(!log.can_undo());
    assert!(!log.can_redo());
    assert!(log.visible().is_empty());
}

#[test]
fn from_parts_rejects_cursor_past_end() {
    assert!(ActionLog::from_parts(vec![clear(1)], 2).is_none());
    let log = ActionLog::from_parts(vec![clear(1), clear(2)], 1).unwrap();
    assert_eq!(log.cursor(), Some(0));
    assert!(log.can_redo());
}

// =============================================================
// append
// =============================================================

#[test]
fn append_moves_cursor_to_new_entry() {
    let mut log = ActionLog::new();
    assert_eq!(log.append(clear(1)), 0);
    assert_eq!(log.append(clear(2)), 1);
    assert_eq!(log.cursor(), Some(1));
    assert_eq!(ids(log.visible()), vec![1, 2]);
}

#[test]
fn append_after_undo_discards_redo_tail() {
    let mut log = log_of(3);
    log.undo();
    log.undo();
    assert_eq!(log.append(clear(10)), 1);
    assert_eq!(ids(log.entries()), vec![0, 10]);
    assert!(!log.can_redo());
    assert!(!log.redo());
    assert_eq!(log.cursor(), Some(1));
}

#[test]
fn append_after_undo_to_start_replaces_everything() {
    let mut log = log_of(2);
    log.undo();
    log.undo();
    log.append(clear(7));
    assert_eq!(ids(log.entries()), vec![7]);
}

#[test]
fn append_seals_previous_open_tail() {
    let mut log = ActionLog::new();
    log.begin_open(stroke(1));
    log.append(clear(2));
    assert!(!log.entries()[0].is_open());
}

// =============================================================
// Open tail
// =============================================================

#[test]
fn begin_open_marks_action_open() {
    let mut log = ActionLog::new();
    log.begin_open(stroke(1));
    assert!(log.open_tail().is_some());
}

#[test]
fn mutate_open_tail_applies_to_open_action() {
    let mut log = ActionLog::new();
    log.begin_open(stroke(1));
    let ran = log.mutate_open_tail(|a| {
        if let Action::Stroke(s) = a {
            s.points.push(Point::new(1.0, 1.0));
        }
    });
    assert!(ran);
    let Action::Stroke(s) = &log.visible()[0] else {
        panic!("expected stroke");
    };
    assert_eq!(s.points.len(), 2);
}

#[test]
fn mutate_after_seal_is_ignored() {
    let mut log = ActionLog::new();
    log.begin_open(stroke(1));
    assert!(log.seal_open_tail());
    let before = log.clone();
    assert!(!log.mutate_open_tail(|a| a.set_open(true)));
    assert_eq!(log, before);
}

#[test]
fn mutate_on_empty_log_is_ignored() {
    let mut log = ActionLog::new();
    assert!(!log.mutate_open_tail(|_| {}));
    assert!(!log.seal_open_tail());
}

#[test]
fn seal_is_idempotent() {
    let mut log = ActionLog::new();
    log.begin_open(stroke(1));
    assert!(log.seal_open_tail());
    assert!(!log.seal_open_tail());
    assert!(log.open_tail().is_none());
}

#[test]
fn undo_seals_open_tail() {
    let mut log = ActionLog::new();
    log.begin_open(stroke(1));
    log.undo();
    log.redo();
    assert!(!log.visible()[0].is_open());
    assert!(!log.mutate_open_tail(|_| {}));
}

// =============================================================
// undo / redo
// =============================================================

#[test]
fn undo_on_empty_log_is_noop() {
    let mut log = ActionLog::new();
    assert!(!log.undo());
    assert_eq!(log.history_index(), -1);
}

#[test]
fn redo_at_end_is_noop() {
    let mut log = log_of(2);
    assert!(!log.redo());
    assert_eq!(log.history_index(), 1);
}

#[test]
fn undo_redo_walks_cursor() {
    let mut log = log_of(3);
    assert!(log.undo());
    assert_eq!(ids(log.visible()), vec![0, 1]);
    assert!(log.undo());
    assert!(log.undo());
    assert!(log.visible().is_empty());
    assert!(!log.undo());
    assert!(log.redo());
    assert_eq!(ids(log.visible()), vec![0]);
    assert_eq!(log.len(), 3);
}

#[test]
fn replay_slice_matches_model_for_mixed_sequence() {
    // Simple LCG drives a mixed op sequence; a Vec + index is the model.
    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    let mut next = || {
        state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        state >> 33
    };

    let mut log = ActionLog::new();
    let mut model: Vec<u64> = Vec::new();
    let mut cursor: i64 = -1;
    let mut id = 0;

    for _ in 0..500 {
        match next() % 3 {
            0 => {
                id += 1;
                log.append(clear(id));
                let keep = usize::try_from(cursor + 1).unwrap();
                model.truncate(keep);
                model.push(id);
                cursor = i64::try_from(model.len()).unwrap() - 1;
            }
            1 => {
                log.undo();
                if cursor > -1 {
                    cursor -= 1;
                }
            }
            _ => {
                log.redo();
                if cursor < i64::try_from(model.len()).unwrap() - 1 {
                    cursor += 1;
                }
            }
        }
        let visible = usize::try_from(cursor + 1).unwrap();
        assert_eq!(ids(log.visible()), model[..visible].to_vec());
        assert_eq!(log.history_index(), cursor);
        assert_eq!(log.can_undo(), cursor > -1);
        assert_eq!(log.can_redo(), cursor < i64::try_from(model.len()).unwrap() - 1);
    }
}
