#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared text rendering contracts for Rogue Board adapters.

use anyhow::Result as AnyResult;
use rogue_board_core::{BoardDimensions, Category, GridCoord, Placement};
use serde::{Deserialize, Serialize};
use std::{error::Error, fmt, io::Write};

/// Characters used to draw each category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Glyphs {
    /// Glyph for floor tiles.
    pub floor: char,
    /// Glyph for outer-wall tiles.
    pub outer_wall: char,
    /// Glyph for inner walls.
    pub inner_wall: char,
    /// Glyph for food pickups.
    pub food: char,
    /// Glyph for enemies.
    pub enemy: char,
    /// Glyph for the exit.
    pub exit: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            floor: '.',
            outer_wall: '#',
            inner_wall: 'x',
            food: 'f',
            enemy: 'E',
            exit: '>',
        }
    }
}

impl Glyphs {
    /// Glyph drawn for the provided category.
    #[must_use]
    pub const fn glyph(&self, category: Category) -> char {
        match category {
            Category::Floor => self.floor,
            Category::OuterWall => self.outer_wall,
            Category::InnerWall => self.inner_wall,
            Category::Food => self.food,
            Category::Enemy => self.enemy,
            Category::Exit => self.exit,
        }
    }
}

/// Draw priority of a category; higher layers cover lower ones on the same cell.
#[must_use]
pub const fn layer(category: Category) -> u8 {
    match category {
        Category::Floor => 0,
        Category::OuterWall => 1,
        Category::InnerWall => 2,
        Category::Food => 3,
        Category::Enemy => 4,
        Category::Exit => 5,
    }
}

/// Character grid covering the bordered board, stored top row first.
///
/// Row `y = rows` is drawn first so the exit corner appears top-right.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextFrame {
    width: usize,
    height: usize,
    cells: Vec<Option<(u8, char)>>,
}

impl TextFrame {
    /// Composes a frame from placements on a board of the given size.
    ///
    /// Returns an error when a placement lies outside the painted rectangle.
    pub fn compose<I>(
        dimensions: BoardDimensions,
        placements: I,
        glyphs: &Glyphs,
    ) -> Result<Self, RenderingError>
    where
        I: IntoIterator<Item = Placement>,
    {
        let width = dimensions.columns() as usize + 2;
        let height = dimensions.rows() as usize + 2;
        let mut frame = Self {
            width,
            height,
            cells: vec![None; width * height],
        };

        for placement in placements {
            let index = frame
                .index(dimensions, placement.coord)
                .ok_or(RenderingError::OutOfBounds {
                    coord: placement.coord,
                })?;
            let layer = layer(placement.category);
            let cell = &mut frame.cells[index];
            if cell.map_or(true, |(current, _)| layer >= current) {
                *cell = Some((layer, glyphs.glyph(placement.category)));
            }
        }

        Ok(frame)
    }

    /// Number of characters per line.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of lines.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Lines of the frame, top first. Unpainted cells render as spaces.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or(' ', |(_, glyph)| glyph))
                    .collect()
            })
            .collect()
    }

    fn index(&self, dimensions: BoardDimensions, coord: GridCoord) -> Option<usize> {
        if !dimensions.is_painted(coord) {
            return None;
        }

        let column = usize::try_from(coord.x() + 1).ok()?;
        let row_from_bottom = usize::try_from(coord.y() + 1).ok()?;
        let row = self.height.checked_sub(row_from_bottom + 1)?;
        Some(row * self.width + column)
    }
}

impl fmt::Display for TextFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Presentation {
    /// Heading printed above the frame.
    pub title: String,
    /// Board content that should be displayed.
    pub frame: TextFrame,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(title: T, frame: TextFrame) -> Self
    where
        T: Into<String>,
    {
        Self {
            title: title.into(),
            frame,
        }
    }
}

/// Rendering backend capable of presenting Rogue Board levels.
pub trait RenderingBackend {
    /// Presents a single composed level.
    fn present(&mut self, presentation: &Presentation) -> AnyResult<()>;
}

/// Backend that prints frames to any writer, usually standard output.
#[derive(Debug)]
pub struct TerminalBackend<W> {
    writer: W,
}

impl<W> TerminalBackend<W>
where
    W: Write,
{
    /// Creates a backend writing into `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the backend, yielding the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> RenderingBackend for TerminalBackend<W>
where
    W: Write,
{
    fn present(&mut self, presentation: &Presentation) -> AnyResult<()> {
        writeln!(self.writer, "{}", presentation.title)?;
        write!(self.writer, "{}", presentation.frame)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Errors that can occur when composing frames.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// A placement fell outside the bordered board.
    OutOfBounds {
        /// Offending coordinate.
        coord: GridCoord,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { coord } => {
                write!(f, "placement at {coord} lies outside the painted board")
            }
        }
    }
}

impl Error for RenderingError {}
