use thiserror::Error;

/// A board layout that is not 64 cells of piece letters and placeholders
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout has {0} cells, expected 64")]
    Length(usize),

    #[error("invalid cell {value:?} at index {cell}")]
    InvalidCell { cell: usize, value: char },
}

/// Planes that can not be turned back into a layout
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaneError {
    #[error("plane value {value} at plane {plane}, cell {cell} is not -1, 0 or 1")]
    Value { plane: usize, cell: usize, value: i8 },

    #[error("cell {cell} decodes to code {code}, which is not a single piece")]
    Conflict { cell: usize, code: i32 },
}

/// Failures reported by the rules engine
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("can not parse move {token:?}: {reason}")]
    Notation { token: String, reason: String },

    #[error("illegal move {token:?}: {reason}")]
    Illegal { token: String, reason: String },

    #[error("invalid position {fen:?}: {reason}")]
    Position { fen: String, reason: String },
}

#[derive(Debug, Error)]
pub enum TraversalError {
    #[error("replay failed at ply {ply}")]
    Rules {
        ply: usize,
        #[source]
        source: RulesError,
    },

    #[error("engine reported a bad layout at ply {ply}")]
    Layout {
        ply: usize,
        #[source]
        source: LayoutError,
    },
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("io error while loading model")]
    Io(#[from] std::io::Error),

    #[error("unknown model architecture: {0}")]
    Architecture(String),

    #[error("row has {got} columns, model expects {expected}")]
    Columns { expected: usize, got: usize },
}

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("position has no legal moves")]
    NoLegalMoves,

    #[error("model returned {got} scores for {expected} candidates")]
    ScoreCount { expected: usize, got: usize },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}
