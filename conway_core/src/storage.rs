// storage.rs - Pattern and whole-grid file formats
//
// Pattern file:    {"name": "...", "pattern": [[dr, dc], ...], "width": w, "height": h}
// Whole-grid file: [[0, 1, ...], ...] with exactly the session's rows x cols

use crate::error::{LifeError, Result};
use crate::grid::Grid;
use crate::patterns::Pattern;
use serde::Serialize;
use serde_json::Value;
use std::{fs, io, path::Path};

#[derive(Serialize)]
struct PatternFile<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    pattern: Vec<[i64; 2]>,
    width: u32,
    height: u32,
}

/// What a format-sniffing load produced.
#[derive(Clone, Debug, PartialEq)]
pub enum Loaded {
    /// A relocatable pattern, still to be placed by the caller.
    Pattern(Pattern),
    /// Full liveness for a grid of the requested size, row-major.
    Cells(Vec<bool>),
}

/// Writes the live cells of `grid` relative to their bounding box.
/// Returns the saved pattern.
pub fn save_pattern(grid: &Grid, path: &Path, name: Option<&str>) -> Result<Pattern> {
    let (top, left, bottom, right) = grid.bounding_box().ok_or(LifeError::EmptySave)?;
    let cells: Vec<(i32, i32)> = grid
        .live_cells()
        .map(|(r, c)| ((r - top) as i32, (c - left) as i32))
        .collect();
    let width = (right - left + 1) as u32;
    let height = (bottom - top + 1) as u32;

    let file = PatternFile {
        name,
        pattern: cells.iter().map(|&(r, c)| [i64::from(r), i64::from(c)]).collect(),
        width,
        height,
    };
    write_atomic(path, &serde_json::to_vec_pretty(&file)?)?;
    tracing::info!(path = %path.display(), cells = cells.len(), width, height, "saved pattern");
    Ok(Pattern::with_size(name.unwrap_or("Saved pattern"), cells, width, height))
}

/// Writes every cell of `grid` as nested 0/1 rows. An all-dead grid is
/// refused like an empty pattern save.
pub fn save_grid(grid: &Grid, path: &Path) -> Result<()> {
    if grid.is_empty() {
        return Err(LifeError::EmptySave);
    }
    let rows: Vec<Vec<u8>> = grid
        .to_rows()
        .into_iter()
        .map(|row| row.into_iter().map(u8::from).collect())
        .collect();
    write_atomic(path, &serde_json::to_vec(&rows)?)?;
    tracing::info!(path = %path.display(), rows = grid.rows(), cols = grid.cols(), "saved grid");
    Ok(())
}

/// Loads either format: a top-level array is a whole grid of exactly
/// `rows` x `cols`, anything else must be a pattern object. Nothing is
/// applied to a grid here.
pub fn load_any(path: &Path, rows: usize, cols: usize) -> Result<Loaded> {
    let value = read_json(path)?;
    if value.is_array() {
        cells_from_value(&value, rows, cols).map(Loaded::Cells)
    } else {
        pattern_from_value(&value, path).map(Loaded::Pattern)
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LifeError::NotFound(path.to_path_buf()),
        _ => LifeError::Io(e),
    })?;
    Ok(serde_json::from_str(&text)?)
}

fn pattern_from_value(value: &Value, path: &Path) -> Result<Pattern> {
    let obj = value
        .as_object()
        .ok_or_else(|| LifeError::Format("pattern file must hold an object".into()))?;
    for key in ["pattern", "width", "height"] {
        if !obj.contains_key(key) {
            return Err(LifeError::Format(format!("missing `{key}`")));
        }
    }

    let pairs = obj["pattern"]
        .as_array()
        .ok_or_else(|| LifeError::Format("`pattern` must be a list".into()))?;
    let mut cells = Vec::with_capacity(pairs.len());
    for pair in pairs {
        cells.push(coordinate(pair)?);
    }
    let width = dimension(&obj["width"], "width")?;
    let height = dimension(&obj["height"], "height")?;

    let name = match obj.get("name").and_then(Value::as_str) {
        Some(name) => name.to_string(),
        None => path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Loaded pattern".into()),
    };
    tracing::info!(path = %path.display(), %name, cells = cells.len(), "loaded pattern");
    Ok(Pattern::with_size(name, cells, width, height))
}

fn coordinate(pair: &Value) -> Result<(i32, i32)> {
    let bad = || LifeError::Format(format!("`pattern` entry {pair} is not a [row, col] pair"));
    match pair.as_array().map(Vec::as_slice) {
        Some([r, c]) => {
            let r = r.as_i64().and_then(|v| i32::try_from(v).ok()).ok_or_else(bad)?;
            let c = c.as_i64().and_then(|v| i32::try_from(v).ok()).ok_or_else(bad)?;
            Ok((r, c))
        }
        _ => Err(bad()),
    }
}

fn dimension(value: &Value, key: &str) -> Result<u32> {
    value
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| LifeError::Format(format!("`{key}` must be a non-negative integer")))
}

fn cells_from_value(value: &Value, rows: usize, cols: usize) -> Result<Vec<bool>> {
    let not_grid = || LifeError::Format("grid file must be a list of rows of 0/1".into());
    let lines = value.as_array().ok_or_else(not_grid)?;
    let lines: Vec<&Vec<Value>> = lines
        .iter()
        .map(|line| line.as_array().ok_or_else(not_grid))
        .collect::<Result<_>>()?;

    let found_cols = lines.first().map_or(0, |l| l.len());
    if lines.len() != rows || lines.iter().any(|l| l.len() != cols) {
        let found_cols = lines.iter().map(|l| l.len()).find(|&n| n != cols).unwrap_or(found_cols);
        return Err(LifeError::DimensionMismatch {
            expected: (rows, cols),
            found: (lines.len(), found_cols),
        });
    }

    let mut cells = Vec::with_capacity(rows * cols);
    for line in lines {
        for v in line {
            match v.as_u64() {
                Some(0) => cells.push(false),
                Some(1) => cells.push(true),
                _ => return Err(not_grid()),
            }
        }
    }
    Ok(cells)
}

fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}
