use crate::encoding::{encode, PieceType, Planes, NUM_PLANE_CELLS};
use crate::error::ScoreError;
use crate::layout::{expand, NUM_CELLS};
use crate::model::Predictor;
use crate::rules::{RulesEngine, Side};
use log::debug;

/// Side-to-move flag followed by the 384 plane cells
pub const NUM_COLUMNS: usize = 1 + NUM_PLANE_CELLS;

pub type FeatureRow = [f32; NUM_COLUMNS];

/// Model input, one row per candidate move
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    rows: Vec<FeatureRow>,
}

impl FeatureTable {
    pub fn new() -> Self {
        FeatureTable { rows: vec![] }
    }

    pub fn push(&mut self, row: FeatureRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `white_turn`, then `rook_0..rook_63`, `knight_0..`, ... `pawn_63`
    pub fn column_names() -> Vec<String> {
        let mut names = Vec::with_capacity(NUM_COLUMNS);
        names.push("white_turn".to_string());
        for piece in PieceType::ALL {
            for cell in 0..NUM_CELLS {
                names.push(format!("{}_{}", piece.name(), cell));
            }
        }
        names
    }
}

pub fn feature_row(planes: &Planes, side: Side) -> FeatureRow {
    let mut row = [0.0; NUM_COLUMNS];
    row[0] = match side {
        Side::White => 1.0,
        Side::Black => 0.0,
    };
    for (out, &cell) in row[1..].iter_mut().zip(planes.flatten().iter()) {
        *out = cell as f32;
    }
    row
}

/// A legal move and the position it leads to
#[derive(Debug, Clone)]
pub struct Candidate<M> {
    pub mov: M,
    pub notation: String,
    pub planes: Planes,
}

pub fn candidates<E: RulesEngine>(position: &E) -> Result<Vec<Candidate<E::Move>>, ScoreError> {
    let mut out = vec![];

    for mov in position.legal_moves() {
        let mut moved = position.clone();
        moved.apply_move(&mov)?;

        out.push(Candidate {
            notation: position.notation(&mov),
            planes: encode(&expand(&moved.board_layout())?),
            mov,
        });
    }

    Ok(out)
}

pub fn feature_table<M>(candidates: &[Candidate<M>], side: Side) -> FeatureTable {
    let mut table = FeatureTable::new();
    for candidate in candidates {
        table.push(feature_row(&candidate.planes, side));
    }
    table
}

#[derive(Debug, Clone)]
pub struct ScoredMove<M> {
    pub mov: M,
    pub notation: String,
    pub score: f32,
    /// Every candidate's notation and score, in legal move order
    pub ranking: Vec<(String, f32)>,
}

/// Index of the strictly greatest score; the first one wins ties
fn best_index(scores: &[f32]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &score) in scores.iter().enumerate() {
        match best {
            Some(b) if score <= scores[b] || score.is_nan() => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Scores every legal move of `position` with a single model call and
/// returns the best one. `side` is the side to move, written into the
/// first column of every row.
pub fn select_move<E, P>(
    position: &E,
    side: Side,
    model: &mut P,
) -> Result<ScoredMove<E::Move>, ScoreError>
where
    E: RulesEngine,
    P: Predictor + ?Sized,
{
    let candidates = candidates(position)?;
    if candidates.is_empty() {
        return Err(ScoreError::NoLegalMoves);
    }

    let table = feature_table(&candidates, side);
    let scores = model.predict(&table)?;
    if scores.len() != candidates.len() {
        return Err(ScoreError::ScoreCount {
            expected: candidates.len(),
            got: scores.len(),
        });
    }

    let best = best_index(&scores).ok_or(ScoreError::NoLegalMoves)?;

    let ranking: Vec<(String, f32)> = candidates
        .iter()
        .zip(scores.iter())
        .map(|(c, &s)| (c.notation.clone(), s))
        .collect();

    let chosen = candidates
        .into_iter()
        .nth(best)
        .ok_or(ScoreError::NoLegalMoves)?;

    debug!(
        "selected {} with score {} out of {} candidates",
        chosen.notation,
        scores[best],
        ranking.len()
    );

    Ok(ScoredMove {
        mov: chosen.mov,
        notation: chosen.notation,
        score: scores[best],
        ranking,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use crate::model::LinearModel;
    use shakmaty::Chess;

    /// Returns fixed scores, remembering how often it was called
    struct FixedScores {
        scores: Vec<f32>,
        calls: usize,
    }

    impl Predictor for FixedScores {
        fn predict(&mut self, table: &FeatureTable) -> Result<Vec<f32>, ModelError> {
            self.calls += 1;
            Ok(self.scores.iter().copied().take(table.len()).collect())
        }
    }

    /// Scores each row by its position in the table
    struct RowIndex;

    impl Predictor for RowIndex {
        fn predict(&mut self, table: &FeatureTable) -> Result<Vec<f32>, ModelError> {
            Ok((0..table.len()).map(|i| i as f32).collect())
        }
    }

    #[test]
    fn test_column_names() {
        let names = FeatureTable::column_names();
        assert_eq!(names.len(), NUM_COLUMNS);
        assert_eq!(names.len(), 385);
        assert_eq!(names[0], "white_turn");
        assert_eq!(names[1], "rook_0");
        assert_eq!(names[65], "knight_0");
        assert_eq!(names[384], "pawn_63");
    }

    #[test]
    fn test_feature_row_layout() {
        let pos = Chess::default();
        let planes = encode(&expand(&pos.board_layout()).unwrap());

        let row = feature_row(&planes, Side::White);
        assert_eq!(row[0], 1.0);
        assert_eq!(row[1], -1.0); // black rook on a8
        assert_eq!(row[1 + 63], 1.0); // white rook on h1
        assert_eq!(row[1 + 5 * 64 + 48], 1.0); // white pawn on a2

        assert_eq!(feature_row(&planes, Side::Black)[0], 0.0);
    }

    #[test]
    fn test_candidates_encode_resulting_positions() {
        let pos = Chess::default();
        let candidates = candidates(&pos).unwrap();
        assert_eq!(candidates.len(), 20);

        let e4 = candidates.iter().find(|c| c.notation == "e2e4").unwrap();
        let pawn = e4.planes.plane(PieceType::Pawn);
        assert_eq!(pawn[52], 0);
        assert_eq!(pawn[36], 1);
    }

    #[test]
    fn test_best_index() {
        assert_eq!(best_index(&[]), None);
        assert_eq!(best_index(&[0.1, 0.7, 0.3]), Some(1));
        // first seen wins ties
        assert_eq!(best_index(&[0.2, 0.9, 0.9, 0.1]), Some(1));
        assert_eq!(best_index(&[-5.0, -5.0]), Some(0));
        // a single candidate is chosen whatever its score
        assert_eq!(best_index(&[f32::NAN]), Some(0));
        assert_eq!(best_index(&[f32::NAN, 1.0]), Some(1));
    }

    #[test]
    fn test_select_move_single_call() {
        let pos = Chess::default();
        let mut scores = vec![0.0; 20];
        scores[7] = 3.0;
        scores[12] = 3.0;
        let mut model = FixedScores { scores, calls: 0 };

        let chosen = select_move(&pos, Side::White, &mut model).unwrap();
        assert_eq!(model.calls, 1);
        assert_eq!(chosen.score, 3.0);
        assert_eq!(chosen.ranking.len(), 20);
        assert_eq!(chosen.notation, chosen.ranking[7].0);
        assert_eq!(chosen.notation, pos.notation(&chosen.mov));
    }

    #[test]
    fn test_select_move_only_legal_move() {
        // black king in the corner, only Ka7 is legal
        let pos = Chess::from_fen("k7/2K5/8/8/8/8/8/1R6 b - - 0 1").unwrap();
        assert_eq!(RulesEngine::legal_moves(&pos).len(), 1);

        let mut model = FixedScores {
            scores: vec![-1000.0],
            calls: 0,
        };
        let chosen = select_move(&pos, Side::Black, &mut model).unwrap();
        assert_eq!(chosen.notation, "a8a7");
        assert_eq!(chosen.score, -1000.0);
    }

    #[test]
    fn test_select_move_no_legal_moves() {
        // fool's mate
        let pos =
            Chess::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        let mut model = RowIndex;

        assert!(matches!(
            select_move(&pos, Side::White, &mut model),
            Err(ScoreError::NoLegalMoves)
        ));
    }

    #[test]
    fn test_select_move_score_count_mismatch() {
        let pos = Chess::default();
        let mut model = FixedScores {
            scores: vec![1.0; 3],
            calls: 0,
        };
        assert!(matches!(
            select_move(&pos, Side::White, &mut model),
            Err(ScoreError::ScoreCount {
                expected: 20,
                got: 3
            })
        ));
    }

    #[test]
    fn test_select_move_with_linear_model() {
        // reward black pawns off their start squares: only pawn moves score
        let mut weights = vec![0.0; NUM_COLUMNS];
        weights[1 + 5 * 64 + 8 + 4] = 1.0; // e7 pawn cell, black pawns are -1
        let mut model = LinearModel::new(weights, 0.0).unwrap();

        let mut pos = Chess::default();
        pos.apply_san("d4").unwrap();

        let chosen = select_move(&pos, Side::Black, &mut model).unwrap();
        // moving the e-pawn clears -1 from e7, the highest score available
        assert!(chosen.notation.starts_with("e7"));
        assert_eq!(chosen.score, 0.0);
    }
}
