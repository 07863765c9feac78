//! Level assembly from row templates
//!
//! A template is a handful of strings, one per terrain row. Each character
//! is one 5 px cell: `-` is air, `^` a hazard, `X` a block.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::obstacle::{Obstacle, ObstacleKind};
use crate::consts::CELL_WIDTH;

/// One row of a level template
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateRow<'a> {
    /// Vertical coordinate shared by every obstacle in the row
    pub y: f32,
    pub cells: &'a str,
}

/// A complete level layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelTemplate<'a> {
    /// Horizontal position of cell 0
    pub base_x: f32,
    pub cell_width: f32,
    pub rows: &'a [TemplateRow<'a>],
}

/// Template problems reported by [`LevelTemplate::validate`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TemplateError {
    #[error("template has no rows")]
    EmptyTemplate,
    #[error("unknown token {token:?} at row {row}, column {column}")]
    UnknownToken { row: usize, column: usize, token: char },
}

/// The runner level: a staircase of blocks behind a field of spikes
pub const RUNNER_TEMPLATE: LevelTemplate<'static> = LevelTemplate {
    base_x: 40.0,
    cell_width: CELL_WIDTH,
    rows: &[
        TemplateRow {
            y: 19.0,
            cells: "-----------------------------------------X",
        },
        TemplateRow {
            y: 24.0,
            cells: "------------------------------------X----X",
        },
        TemplateRow {
            y: 29.0,
            cells: "-------------------------------X----X----X",
        },
        TemplateRow {
            y: 34.0,
            cells: "----^----^----^^--------^^X^^^^X^^^^X^^^^X",
        },
    ],
};

/// Empty layout (floor only)
pub const EMPTY_TEMPLATE: LevelTemplate<'static> = LevelTemplate {
    base_x: 40.0,
    cell_width: CELL_WIDTH,
    rows: &[],
};

impl LevelTemplate<'_> {
    /// Strict check: every token must be `-`, `^` or `X`.
    ///
    /// [`build_level`] itself is permissive and skips unknown tokens; call
    /// this first when a template comes from somewhere other than the
    /// built-in constants.
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.rows.is_empty() {
            return Err(TemplateError::EmptyTemplate);
        }
        for (row, r) in self.rows.iter().enumerate() {
            for (column, token) in r.cells.chars().enumerate() {
                if token != '-' && ObstacleKind::from_token(token).is_none() {
                    return Err(TemplateError::UnknownToken { row, column, token });
                }
            }
        }
        Ok(())
    }

    /// Width in cells of the longest row
    pub fn columns(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.cells.chars().count())
            .max()
            .unwrap_or(0)
    }
}

/// Owned copy of a [`LevelTemplate`], kept by states that must rebuild
/// their level after a save and load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub base_x: f32,
    pub cell_width: f32,
    /// `(y, cells)` per row
    pub rows: Vec<(f32, String)>,
}

impl From<&LevelTemplate<'_>> for LevelLayout {
    fn from(template: &LevelTemplate<'_>) -> Self {
        Self {
            base_x: template.base_x,
            cell_width: template.cell_width,
            rows: template
                .rows
                .iter()
                .map(|row| (row.y, row.cells.to_owned()))
                .collect(),
        }
    }
}

impl LevelLayout {
    /// Same obstacles as [`build_level`] on the template this was taken from
    pub fn build(&self) -> Level {
        assemble(
            self.base_x,
            self.cell_width,
            self.rows.iter().map(|(y, cells)| (*y, cells.as_str())),
        )
    }
}

/// The ordered obstacle set for one level instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub obstacles: Vec<Obstacle>,
}

impl Level {
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Obstacle> {
        self.obstacles.iter()
    }
}

/// Build the obstacle set for `template`.
///
/// Pure and deterministic: the same template always yields the same
/// obstacles in the same order (row by row, left to right), which is what
/// makes a reset exact.
pub fn build_level(template: &LevelTemplate<'_>) -> Level {
    assemble(
        template.base_x,
        template.cell_width,
        template.rows.iter().map(|row| (row.y, row.cells)),
    )
}

fn assemble<'a>(
    base_x: f32,
    cell_width: f32,
    rows: impl Iterator<Item = (f32, &'a str)>,
) -> Level {
    let mut obstacles = Vec::new();
    let mut ignored = 0usize;
    let mut row_count = 0usize;

    for (y, cells) in rows {
        row_count += 1;
        for (i, token) in cells.chars().enumerate() {
            if token == '-' {
                continue;
            }
            let Some(kind) = ObstacleKind::from_token(token) else {
                ignored += 1;
                continue;
            };
            let x = base_x + i as f32 * cell_width;
            obstacles.push(Obstacle::at(x, y, kind));
        }
    }

    if ignored > 0 {
        log::warn!("Level template: ignored {} unknown token(s)", ignored);
    }
    log::debug!(
        "Built level: {} obstacles from {} rows",
        obstacles.len(),
        row_count
    );

    Level { obstacles }
}
