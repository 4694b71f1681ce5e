use anyhow::{bail, Context, Result};
use glam::Vec3;
use std::path::Path;

/// Side length of the stock maze.
pub const DEFAULT_MAZE_SIZE: usize = 10;

const DEFAULT_LAYOUT: [[u8; DEFAULT_MAZE_SIZE]; DEFAULT_MAZE_SIZE] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 0, 1, 1, 1, 0, 1],
    [1, 0, 1, 0, 0, 0, 0, 1, 0, 1],
    [1, 0, 1, 0, 1, 1, 0, 1, 0, 1],
    [1, 0, 0, 0, 1, 0, 0, 1, 0, 1],
    [1, 1, 1, 0, 1, 0, 1, 1, 0, 1],
    [1, 0, 0, 0, 1, 0, 0, 0, 0, 1],
    [1, 0, 1, 0, 0, 0, 1, 1, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// Read-only view of a tile grid's occupancy.
///
/// Rows run along world Z and columns along world X.
pub trait OccupancyGrid {
    /// Number of columns.
    fn width(&self) -> usize;

    /// Number of rows.
    fn height(&self) -> usize;

    /// Whether the cell is solid. Callers must stay within `width`/`height`.
    fn is_blocked(&self, row: usize, col: usize) -> bool;

    /// Whether a signed cell index lies inside the grid.
    fn contains(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height() && (col as usize) < self.width()
    }

    /// Bounds-checked occupancy lookup; `None` outside the grid.
    fn cell(&self, row: i32, col: i32) -> Option<bool> {
        self.contains(row, col)
            .then(|| self.is_blocked(row as usize, col as usize))
    }
}

impl<G: OccupancyGrid + ?Sized> OccupancyGrid for &G {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn is_blocked(&self, row: usize, col: usize) -> bool {
        (**self).is_blocked(row, col)
    }
}

/// A value stored in a raw occupancy array.
pub trait CellValue: Copy {
    fn is_solid(self) -> bool;
}

macro_rules! impl_cell_value {
    ($($ty:ty),*) => {
        $(
            impl CellValue for $ty {
                #[inline]
                fn is_solid(self) -> bool {
                    self == 1
                }
            }
        )*
    };
}

impl_cell_value!(u8, i8, u16, i16, u32, i32, i64);

impl CellValue for bool {
    #[inline]
    fn is_solid(self) -> bool {
        self
    }
}

/// Plain `[[cell; W]; H]` arrays, e.g. a hard-coded `[[i32; 10]; 10]` level.
impl<T: CellValue, const W: usize, const H: usize> OccupancyGrid for [[T; W]; H] {
    fn width(&self) -> usize {
        W
    }

    fn height(&self) -> usize {
        H
    }

    fn is_blocked(&self, row: usize, col: usize) -> bool {
        self[row][col].is_solid()
    }
}

/// Owned occupancy grid, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Maze {
    /// An all-open maze.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Build from rows of `0`/`1` flags.
    pub fn from_rows<const W: usize>(rows: &[[u8; W]]) -> Self {
        let cells = rows
            .iter()
            .flat_map(|row| row.iter().map(|&v| v.is_solid()))
            .collect();

        Self {
            width: W,
            height: rows.len(),
            cells,
        }
    }

    /// The stock 10x10 maze with a solid border.
    pub fn default_maze() -> Self {
        Self::from_rows(&DEFAULT_LAYOUT)
    }

    /// Parse the text layout: `#`/`1` solid, `.`/`0`/space open, `;` starts a comment line.
    pub fn parse(text: &str) -> Result<Self> {
        // Rows keep their 1-based file line so errors point into the file.
        let mut rows: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim_end_matches('\r')))
            .filter(|(_, line)| !line.starts_with(';'))
            .collect();

        while rows.last().is_some_and(|(_, line)| line.trim().is_empty()) {
            rows.pop();
        }

        let Some(&(first_line, first)) = rows.first() else {
            bail!("maze has no rows");
        };

        let width = first.chars().count();
        if width == 0 {
            bail!("maze line {} is empty", first_line);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for &(line_no, line) in &rows {
            let len = line.chars().count();
            if len != width {
                bail!("maze line {} has {} cells, expected {}", line_no, len, width);
            }

            for (col, ch) in line.chars().enumerate() {
                let solid = match ch {
                    '#' | '1' => true,
                    '.' | '0' | ' ' => false,
                    other => bail!(
                        "unknown maze cell {:?} at line {}, column {}",
                        other,
                        line_no,
                        col + 1
                    ),
                };
                cells.push(solid);
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            cells,
        })
    }

    /// Load a text layout from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read maze file: {:?}", path))?;
        let maze = Self::parse(&text)
            .with_context(|| format!("Failed to parse maze file: {:?}", path))?;

        log::info!(
            "Loaded maze {:?}: {}x{} cells, {} open",
            path,
            maze.width,
            maze.height,
            maze.open_cells()
        );
        Ok(maze)
    }

    pub fn set_blocked(&mut self, row: usize, col: usize, blocked: bool) {
        let idx = self.index(row, col);
        self.cells[idx] = blocked;
    }

    pub fn open_cells(&self) -> usize {
        self.cells.iter().filter(|&&solid| !solid).count()
    }

    /// First open cell in row-major order, as `(row, col)`.
    pub fn first_open_cell(&self) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(|&solid| !solid)
            .map(|idx| (idx / self.width, idx % self.width))
    }

    /// World-space centre of a cell on the ground plane.
    pub fn cell_center(row: usize, col: usize, tile_size: f32) -> Vec3 {
        Vec3::new(
            (col as f32 + 0.5) * tile_size,
            0.0,
            (row as f32 + 0.5) * tile_size,
        )
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }
}

impl Default for Maze {
    fn default() -> Self {
        Self::default_maze()
    }
}

impl OccupancyGrid for Maze {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn is_blocked(&self, row: usize, col: usize) -> bool {
        self.cells[self.index(row, col)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_maze_has_solid_border() {
        let maze = Maze::default_maze();
        assert_eq!(maze.width(), DEFAULT_MAZE_SIZE);
        assert_eq!(maze.height(), DEFAULT_MAZE_SIZE);
        for i in 0..DEFAULT_MAZE_SIZE {
            assert!(maze.is_blocked(0, i));
            assert!(maze.is_blocked(DEFAULT_MAZE_SIZE - 1, i));
            assert!(maze.is_blocked(i, 0));
            assert!(maze.is_blocked(i, DEFAULT_MAZE_SIZE - 1));
        }
    }

    #[test]
    fn test_first_open_cell() {
        assert_eq!(Maze::default_maze().first_open_cell(), Some((1, 1)));

        let mut solid = Maze::from_rows(&[[1u8, 1], [1, 1]]);
        assert_eq!(solid.first_open_cell(), None);
        solid.set_blocked(1, 0, false);
        assert_eq!(solid.first_open_cell(), Some((1, 0)));
    }

    #[test]
    fn test_cell_lookup_out_of_range() {
        let maze = Maze::new(3, 2);
        assert_eq!(maze.cell(0, 0), Some(false));
        assert_eq!(maze.cell(1, 2), Some(false));
        assert_eq!(maze.cell(2, 0), None);
        assert_eq!(maze.cell(0, 3), None);
        assert_eq!(maze.cell(-1, 0), None);
    }

    #[test]
    fn test_cell_center() {
        let c = Maze::cell_center(2, 3, 2.0);
        assert_eq!(c, Vec3::new(7.0, 0.0, 5.0));
    }

    #[test]
    fn test_parse_rejects_unknown_cell() {
        let err = Maze::parse("#.#\n#x#\n").unwrap_err();
        assert!(err.to_string().contains("line 2, column 2"));
    }

    #[test]
    fn test_parse_errors_count_comment_lines() {
        let err = Maze::parse("; header\n#.#\n#x#\n").unwrap_err();
        assert!(err.to_string().contains("line 3, column 2"), "{}", err);

        let err = Maze::parse("; a\n; b\n###\n##\n").unwrap_err();
        assert!(err.to_string().contains("line 4 has 2 cells"), "{}", err);
    }
}
