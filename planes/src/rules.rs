use crate::error::RulesError;
use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::{Bitboard, CastlingMode, Chess, Color, Move, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

/// What the encoding needs from a chess rules library.
/// Legality, move application and notation all live behind this trait.
pub trait RulesEngine: Clone {
    type Move: Clone;

    /// Builds a position from a full FEN
    fn from_fen(fen: &str) -> Result<Self, RulesError>;

    /// Piece placement in rank-compressed form (`rnbqkbnr/pppppppp/8/...`)
    fn board_layout(&self) -> String;

    fn side_to_move(&self) -> Side;

    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Plays a move given in SAN, rejecting illegal or malformed tokens
    fn apply_san(&mut self, token: &str) -> Result<(), RulesError>;

    fn apply_move(&mut self, mov: &Self::Move) -> Result<(), RulesError>;

    /// Engine notation of a move (UCI)
    fn notation(&self, mov: &Self::Move) -> String;
}

impl RulesEngine for Chess {
    type Move = Move;

    fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let position_error = |reason: String| RulesError::Position {
            fen: fen.to_string(),
            reason,
        };

        let parsed: Fen = fen.parse().map_err(|e| position_error(format!("{}", e)))?;
        parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| position_error(format!("{}", e)))
    }

    fn board_layout(&self) -> String {
        self.board().board_fen(Bitboard::EMPTY).to_string()
    }

    fn side_to_move(&self) -> Side {
        match self.turn() {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }

    fn legal_moves(&self) -> Vec<Move> {
        Position::legal_moves(self).into_iter().collect()
    }

    fn apply_san(&mut self, token: &str) -> Result<(), RulesError> {
        let san_plus =
            SanPlus::from_ascii(token.as_bytes()).map_err(|e| RulesError::Notation {
                token: token.to_string(),
                reason: format!("{}", e),
            })?;

        let mov = san_plus.san.to_move(&*self).map_err(|e| RulesError::Illegal {
            token: token.to_string(),
            reason: format!("{}", e),
        })?;

        self.play_unchecked(&mov);
        Ok(())
    }

    fn apply_move(&mut self, mov: &Move) -> Result<(), RulesError> {
        if !self.is_legal(mov) {
            return Err(RulesError::Illegal {
                token: self.notation(mov),
                reason: "not legal in this position".to_string(),
            });
        }

        self.play_unchecked(mov);
        Ok(())
    }

    fn notation(&self, mov: &Move) -> String {
        UciMove::from_move(mov, CastlingMode::Standard).to_string()
    }
}
