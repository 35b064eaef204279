use pgn_reader::{RawHeader, SanPlus, Skip, Visitor};
use planes::text::{result_from_marker, ResultLabel};

/// Moves and outcome of one game record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub moves: Vec<String>,
    pub result: ResultLabel,
}

/// Collects the mainline SAN tokens and the `Result` header of each game.
/// Moves are kept as text; replaying them is left to the traversal.
pub struct GameVisitor {
    moves: Vec<String>,
    result: String,
    variant: Option<String>,
}

impl GameVisitor {
    pub fn new() -> Self {
        GameVisitor {
            moves: vec![],
            result: "".to_string(),
            variant: None,
        }
    }
}

impl Visitor for GameVisitor {
    type Result = Option<GameRecord>;

    fn begin_game(&mut self) {
        self.moves.clear();
        self.result = "".to_string();
        self.variant = None;
    }

    fn header(&mut self, _key: &[u8], _value: RawHeader<'_>) {
        let key = String::from_utf8_lossy(_key);
        let value = String::from_utf8_lossy(_value.as_bytes());

        if key == "Result" {
            self.result = value.to_string();
        } else if key == "Variant" || key == "FEN" {
            self.variant = Some(value.to_string());
        }
    }

    fn end_headers(&mut self) -> Skip {
        // games from a custom start position would break the ply parity
        Skip(self.variant.is_some())
    }

    fn begin_variation(&mut self) -> Skip {
        Skip(true)
    }

    fn san(&mut self, _san_plus: SanPlus) {
        self.moves.push(_san_plus.to_string());
    }

    fn end_game(&mut self) -> Self::Result {
        if self.variant.is_some() {
            // note: skipped games go through here too
            return None;
        }

        Some(GameRecord {
            moves: std::mem::take(&mut self.moves),
            result: result_from_marker(&self.result),
        })
    }
}
