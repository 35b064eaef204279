use crate::error::PlaneError;
use crate::layout::{Layout, EMPTY, NUM_CELLS};

/// Piece types in plane order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
    Pawn,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Rook,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Queen,
        PieceType::King,
        PieceType::Pawn,
    ];

    pub fn plane(self) -> usize {
        self as usize
    }

    /// Multiplier used to fold the six planes into one signed code per cell
    pub fn weight(self) -> i32 {
        self.plane() as i32 + 1
    }

    /// White's letter; Black uses the lowercase one
    pub fn letter(self) -> char {
        match self {
            PieceType::Rook => 'R',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
            PieceType::Pawn => 'P',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceType::Rook => "rook",
            PieceType::Knight => "knight",
            PieceType::Bishop => "bishop",
            PieceType::Queen => "queen",
            PieceType::King => "king",
            PieceType::Pawn => "pawn",
        }
    }

    /// Piece type and sign (+1 White, -1 Black) of a layout cell
    pub fn from_letter(letter: char) -> Option<(PieceType, i8)> {
        let role = match letter.to_ascii_uppercase() {
            'R' => PieceType::Rook,
            'N' => PieceType::Knight,
            'B' => PieceType::Bishop,
            'Q' => PieceType::Queen,
            'K' => PieceType::King,
            'P' => PieceType::Pawn,
            _ => return None,
        };
        let sign = if letter.is_ascii_uppercase() { 1 } else { -1 };
        Some((role, sign))
    }

    fn from_weight(weight: i32) -> Option<PieceType> {
        PieceType::ALL.get(usize::try_from(weight - 1).ok()?).copied()
    }
}

pub const NUM_PLANES: usize = 6;
pub const NUM_PLANE_CELLS: usize = NUM_PLANES * NUM_CELLS;

/// Six signed 64-cell planes, one per piece type.
/// +1 marks a White piece of the plane's type, -1 a Black one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Planes {
    planes: [[i8; NUM_CELLS]; NUM_PLANES],
}

impl Planes {
    pub fn zeros() -> Self {
        Planes {
            planes: [[0; NUM_CELLS]; NUM_PLANES],
        }
    }

    pub fn from_raw(planes: [[i8; NUM_CELLS]; NUM_PLANES]) -> Result<Self, PlaneError> {
        for (plane, values) in planes.iter().enumerate() {
            for (cell, &value) in values.iter().enumerate() {
                if !(-1..=1).contains(&value) {
                    return Err(PlaneError::Value { plane, cell, value });
                }
            }
        }
        Ok(Planes { planes })
    }

    /// Inverse of [`Planes::flatten`]
    pub fn from_flat(values: &[i8; NUM_PLANE_CELLS]) -> Result<Self, PlaneError> {
        let mut planes = [[0; NUM_CELLS]; NUM_PLANES];
        for (plane, chunk) in values.chunks_exact(NUM_CELLS).enumerate() {
            planes[plane].copy_from_slice(chunk);
        }
        Self::from_raw(planes)
    }

    pub fn plane(&self, piece: PieceType) -> &[i8; NUM_CELLS] {
        &self.planes[piece.plane()]
    }

    pub fn raw(&self) -> &[[i8; NUM_CELLS]; NUM_PLANES] {
        &self.planes
    }

    /// Number of planes claiming the cell
    pub fn occupancy(&self, cell: usize) -> u32 {
        self.planes
            .iter()
            .map(|plane| plane[cell].unsigned_abs() as u32)
            .sum()
    }

    /// All cells in plane order: 64 rook cells, then knight, bishop, queen, king, pawn
    pub fn flatten(&self) -> [i8; NUM_PLANE_CELLS] {
        let mut flat = [0; NUM_PLANE_CELLS];
        for (chunk, plane) in flat.chunks_exact_mut(NUM_CELLS).zip(self.planes.iter()) {
            chunk.copy_from_slice(plane);
        }
        flat
    }
}

pub fn encode(layout: &Layout) -> Planes {
    let mut planes = Planes::zeros();

    for (cell, &letter) in layout.cells().iter().enumerate() {
        // placeholders match no piece type
        if let Some((piece, sign)) = PieceType::from_letter(letter) {
            planes.planes[piece.plane()][cell] = sign;
        }
    }

    planes
}

/// Recovers the layout from its planes.
///
/// Each cell folds to `sum(planes[j][cell] * (j + 1))`: ±1..±6 name a single
/// piece and 0 an empty square. A cell claimed by more than one plane is
/// rejected even when its code happens to land in range.
pub fn decode(planes: &Planes) -> Result<Layout, PlaneError> {
    let mut cells = [EMPTY; NUM_CELLS];

    for (cell, out) in cells.iter_mut().enumerate() {
        let code: i32 = PieceType::ALL
            .iter()
            .map(|piece| planes.planes[piece.plane()][cell] as i32 * piece.weight())
            .sum();

        if planes.occupancy(cell) > 1 {
            return Err(PlaneError::Conflict { cell, code });
        }

        if code != 0 {
            let piece =
                PieceType::from_weight(code.abs()).ok_or(PlaneError::Conflict { cell, code })?;
            *out = if code > 0 {
                piece.letter()
            } else {
                piece.letter().to_ascii_lowercase()
            };
        }
    }

    Ok(Layout::from_trusted(cells))
}
