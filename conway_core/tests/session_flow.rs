use conway_core::runner::{run, Outcome, Unpaced};
use conway_core::storage;
use conway_core::{
    Action, EndReason, Flow, Grid, LifeError, Mode, Scene, ScriptedInput, SessionConfig, SessionState,
};
use std::collections::HashSet;
use std::fs;
use std::time::Duration;

fn empty_session(rows: usize, cols: usize) -> SessionState {
    SessionState::new(SessionConfig { rows, cols, scene: Scene::Empty, ..Default::default() }).unwrap()
}

fn frame(state: &mut SessionState, actions: Vec<Action>) -> Flow {
    state.tick(actions, Duration::from_millis(16))
}

fn live_set(grid: &Grid) -> HashSet<(usize, usize)> {
    grid.live_cells().collect()
}

fn normalise(cells: &HashSet<(usize, usize)>) -> HashSet<(usize, usize)> {
    let top = cells.iter().map(|c| c.0).min().unwrap_or(0);
    let left = cells.iter().map(|c| c.1).min().unwrap_or(0);
    cells.iter().map(|&(r, c)| (r - top, c - left)).collect()
}

#[test]
fn pattern_save_then_load_preserves_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shape.json");

    let mut state = empty_session(12, 12);
    for (row, col) in [(5, 6), (6, 7), (7, 5), (7, 6), (7, 7)] {
        frame(&mut state, vec![Action::Toggle { row, col }]);
    }
    let original = live_set(state.grid());
    frame(&mut state, vec![Action::Save(path.clone())]);
    assert!(path.exists());

    frame(&mut state, vec![Action::Clear, Action::Load(path.clone())]);
    assert!(state.grid().is_empty(), "loading a pattern must not stamp it");
    assert!(matches!(state.mode(), Mode::PlacingPattern { .. }));

    frame(&mut state, vec![Action::MoveCursor { row: 1, col: 2 }, Action::ConfirmPlacement]);
    let placed = live_set(state.grid());
    assert_eq!(normalise(&placed), normalise(&original));
    assert!(placed.contains(&(1, 3)));
}

#[test]
fn whole_grid_save_then_load_is_exact_and_resets_ages() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid.json");

    let mut state = empty_session(6, 6);
    for (row, col) in [(0, 0), (1, 1), (5, 5), (2, 1), (2, 2), (2, 3)] {
        frame(&mut state, vec![Action::Toggle { row, col }]);
    }
    // Give some cells a history before saving.
    frame(&mut state, vec![Action::Start]);
    let snapshot = state.grid().clone();
    assert!(snapshot.ages().iter().any(|&a| a > 1));

    storage::save_grid(&snapshot, &path).unwrap();
    let mut restored = empty_session(6, 6);
    frame(&mut restored, vec![Action::Load(path)]);
    let restored = restored.grid();

    assert_eq!(restored.cells(), snapshot.cells());
    for (alive, age) in restored.cells().iter().zip(restored.ages()) {
        assert_eq!(*age, u32::from(*alive));
    }
}

#[test]
fn whole_grid_load_through_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid.json");
    fs::write(&path, "[[0,1,0],[0,1,0],[0,1,0]]").unwrap();

    let mut state = empty_session(3, 3);
    frame(&mut state, vec![Action::Load(path)]);
    assert_eq!(state.mode(), &Mode::Editing);
    assert_eq!(state.grid().live_count(), 3);
    assert_eq!(state.grid().age(1, 1), 1);
}

#[test]
fn whole_grid_of_wrong_size_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid.json");
    fs::write(&path, "[[0,1],[1,0]]").unwrap();

    let err = storage::load_any(&path, 3, 3).unwrap_err();
    assert!(matches!(err, LifeError::DimensionMismatch { .. }));

    let mut state = empty_session(3, 3);
    frame(&mut state, vec![Action::Toggle { row: 1, col: 1 }, Action::Load(path)]);
    assert_eq!(state.mode(), &Mode::Editing);
    assert_eq!(state.grid().live_count(), 1);
}

#[test]
fn failed_load_leaves_grid_and_mode_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"{"pattern": [[0, 0], [0, 1]], "height": 1}"#).unwrap();

    let mut state = empty_session(5, 5);
    frame(&mut state, vec![Action::Toggle { row: 2, col: 2 }]);
    let before = state.grid().clone();
    frame(&mut state, vec![Action::Load(path)]);

    assert_eq!(state.mode(), &Mode::Editing);
    assert!(state.grid().same_cells(&before));
    assert!(state.status().unwrap().contains("missing `width`"));
}

#[test]
fn empty_save_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nothing.json");
    let mut state = empty_session(5, 5);
    frame(&mut state, vec![Action::Save(path.clone())]);
    assert!(!path.exists());
    assert_eq!(state.status(), Some("Nothing to save"));
}

#[test]
fn empty_whole_grid_save_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid.json");
    let mut state = empty_session(4, 4);
    frame(&mut state, vec![Action::SaveGrid(path.clone())]);
    assert!(!path.exists());
    assert_eq!(state.status(), Some("Nothing to save"));
}

#[test]
fn clipped_placement_keeps_only_in_bounds_cells() {
    let mut state = empty_session(10, 10);
    frame(&mut state, vec![
        Action::SelectPattern("Lightweight Spaceship".into()),
        Action::MoveCursor { row: 8, col: 7 },
        Action::ConfirmPlacement,
    ]);
    // Rows 8..=9 and cols 7..=9 survive; the spaceship's other cells are dropped.
    let expected: HashSet<_> = [(8, 8), (9, 7)].into_iter().collect();
    assert_eq!(live_set(state.grid()), expected);
}

#[test]
fn headless_run_reports_periodic_blinker() {
    let mut state = empty_session(9, 9);
    let mut frames = vec![vec![
        Action::SelectPattern("Blinker".into()),
        Action::MoveCursor { row: 4, col: 3 },
        Action::ConfirmPlacement,
        Action::Start,
    ]];
    frames.extend(std::iter::repeat_with(Vec::new).take(40));
    frames.push(vec![Action::Acknowledge]);
    let mut input = ScriptedInput::new(frames);

    let outcome = run(&mut state, &mut input, &mut Unpaced(Duration::from_millis(5)), None);
    match outcome {
        Outcome::Exited { termination: Some(t) } => {
            assert_eq!(t.reason, EndReason::Periodic);
            assert_eq!(t.generation, 21);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}
