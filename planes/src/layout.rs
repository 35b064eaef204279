use crate::encoding::{decode, Planes};
use crate::error::{LayoutError, PlaneError};
use std::fmt;

/// Cell value for an empty square
pub const EMPTY: char = '1';

pub const NUM_CELLS: usize = 64;

const PIECE_LETTERS: &str = "RNBQKPrnbqkp";

/// Piece occupancy of the 64 squares, rank-major with rank 8 first
/// (the order of the piece placement field of a FEN)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout {
    cells: [char; NUM_CELLS],
}

impl Layout {
    pub fn empty() -> Self {
        Layout {
            cells: [EMPTY; NUM_CELLS],
        }
    }

    pub fn from_cells(cells: &[char]) -> Result<Self, LayoutError> {
        if cells.len() != NUM_CELLS {
            return Err(LayoutError::Length(cells.len()));
        }

        let mut layout = Layout::empty();
        for (index, &value) in cells.iter().enumerate() {
            if value != EMPTY && !PIECE_LETTERS.contains(value) {
                return Err(LayoutError::InvalidCell { cell: index, value });
            }
            layout.cells[index] = value;
        }

        Ok(layout)
    }

    /// Cells already known to hold only piece letters and placeholders
    pub(crate) fn from_trusted(cells: [char; NUM_CELLS]) -> Self {
        Layout { cells }
    }

    pub fn cells(&self) -> &[char; NUM_CELLS] {
        &self.cells
    }

    pub fn get(&self, cell: usize) -> char {
        self.cells[cell]
    }

    pub fn is_empty_cell(&self, cell: usize) -> bool {
        self.cells[cell] == EMPTY
    }
}

impl fmt::Display for Layout {
    /// One rank per line, the same picture a FEN describes
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in self.cells.chunks(8) {
            let line: String = rank.iter().collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Expands the digits of a single rank (or any fragment) into placeholders,
/// e.g. `"3p4"` becomes `111p1111`
pub fn expand_rank(rank: &str) -> Vec<char> {
    let mut cells = Vec::with_capacity(8);

    for c in rank.chars() {
        match c.to_digit(10) {
            Some(run @ 1..=8) => cells.extend(std::iter::repeat(EMPTY).take(run as usize)),
            _ => cells.push(c),
        }
    }

    cells
}

/// Expands a rank-compressed board string (`rnbqkbnr/pppppppp/8/...`) into
/// a 64-cell layout
pub fn expand(compact: &str) -> Result<Layout, LayoutError> {
    let cells: Vec<char> = compact.split('/').flat_map(expand_rank).collect();

    Layout::from_cells(&cells)
}

/// Collapses a layout back into its rank-compressed string
pub fn compact(layout: &Layout) -> String {
    let mut out = String::with_capacity(71);

    for (rank_index, rank) in layout.cells().chunks(8).enumerate() {
        if rank_index > 0 {
            out.push('/');
        }

        // runs never cross a rank boundary, so a maximal run is at most 8
        let mut run = 0;
        for &cell in rank {
            if cell == EMPTY {
                run += 1;
                continue;
            }
            if run > 0 {
                out.push_str(&run.to_string());
                run = 0;
            }
            out.push(cell);
        }
        if run > 0 {
            out.push_str(&run.to_string());
        }
    }

    out
}

/// Rebuilds the piece placement field of a FEN from encoded planes
pub fn planes_to_board_fen(planes: &Planes) -> Result<String, PlaneError> {
    Ok(compact(&decode(planes)?))
}
