// input.rs - Discrete actions and the adapter contract for input sources

use std::collections::VecDeque;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    Toggle { row: usize, col: usize },
    /// Brush stroke: sets liveness without giving the cell an age.
    Paint { row: usize, col: usize, alive: bool },
    SelectPattern(String),
    MoveCursor { row: usize, col: usize },
    ConfirmPlacement,
    CancelPlacement,
    Start,
    Clear,
    /// Save live cells in the relative pattern format.
    Save(PathBuf),
    /// Save every cell in the whole-grid format.
    SaveGrid(PathBuf),
    /// Load either format; patterns enter placement, grids replace the cells.
    Load(PathBuf),
    /// Continue/exit after a run has terminated.
    Acknowledge,
}

/// Maps some raw device state to actions. The session only ever sees the
/// actions.
pub trait InputAdapter {
    /// Appends this frame's actions in arrival order. Returns `false` once
    /// the source is closed and no more frames will come.
    fn poll(&mut self, out: &mut Vec<Action>) -> bool;
}

/// Replays a fixed list of frames, then closes.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<Action>>,
}

impl ScriptedInput {
    pub fn new<I>(frames: I) -> Self
    where
        I: IntoIterator<Item = Vec<Action>>,
    {
        Self { frames: frames.into_iter().collect() }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputAdapter for ScriptedInput {
    fn poll(&mut self, out: &mut Vec<Action>) -> bool {
        match self.frames.pop_front() {
            Some(frame) => {
                out.extend(frame);
                true
            }
            None => false,
        }
    }
}

/// Everything a single click landed on, as seen by a front end.
#[derive(Clone, Debug, Default)]
pub struct ClickHits {
    /// Secondary click or a cancel control.
    pub cancel: bool,
    pub library: Option<String>,
    pub button: Option<Action>,
    pub cell: Option<(usize, usize)>,
}

/// Picks the one action a click means. Priority: placement and cancellation,
/// then library selection, then main buttons, then the raw cell toggle.
pub fn resolve_click(placing: bool, hits: ClickHits) -> Option<Action> {
    if placing {
        if hits.cancel {
            return Some(Action::CancelPlacement);
        }
        if hits.cell.is_some() && hits.library.is_none() && hits.button.is_none() {
            return Some(Action::ConfirmPlacement);
        }
    }
    if let Some(name) = hits.library {
        return Some(Action::SelectPattern(name));
    }
    if let Some(action) = hits.button {
        return Some(action);
    }
    match hits.cell {
        Some((row, col)) if !placing && !hits.cancel => Some(Action::Toggle { row, col }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_input_replays_then_closes() {
        let mut input = ScriptedInput::new([vec![Action::Start], vec![], vec![Action::Quit, Action::Clear]]);
        let mut out = Vec::new();
        assert!(input.poll(&mut out));
        assert!(input.poll(&mut out));
        assert!(input.poll(&mut out));
        assert_eq!(out, vec![Action::Start, Action::Quit, Action::Clear]);
        assert!(!input.poll(&mut out));
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn placement_beats_everything_on_the_grid() {
        let hits = ClickHits { cell: Some((2, 3)), ..Default::default() };
        assert_eq!(resolve_click(true, hits.clone()), Some(Action::ConfirmPlacement));
        assert_eq!(resolve_click(false, hits), Some(Action::Toggle { row: 2, col: 3 }));
    }

    #[test]
    fn cancel_only_applies_while_placing() {
        let hits = ClickHits { cancel: true, cell: Some((0, 0)), ..Default::default() };
        assert_eq!(resolve_click(true, hits.clone()), Some(Action::CancelPlacement));
        assert_eq!(resolve_click(false, hits), None);
    }

    #[test]
    fn library_beats_buttons_and_cells() {
        let hits = ClickHits {
            library: Some("Glider".into()),
            button: Some(Action::Start),
            cell: Some((1, 1)),
            ..Default::default()
        };
        assert_eq!(resolve_click(false, hits), Some(Action::SelectPattern("Glider".into())));
    }

    #[test]
    fn buttons_beat_cells() {
        let hits = ClickHits { button: Some(Action::Clear), cell: Some((1, 1)), ..Default::default() };
        assert_eq!(resolve_click(false, hits), Some(Action::Clear));
    }
}
