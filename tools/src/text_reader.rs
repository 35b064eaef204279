use crate::game_visitor::GameRecord;
use planes::text::{parse_moves, parse_result};
use std::io::{self, BufRead};

/// Reads games already extracted from PGN into plain text: a line with the
/// moves (`1. e4 e5 2. Nf3 ...`) followed by a line with the result.
/// Lines keep their terminators, which the text normalizer strips.
pub struct TextGameReader<R: BufRead> {
    reader: R,
    moves_line: String,
    result_line: String,
}

impl<R: BufRead> TextGameReader<R> {
    pub fn new(reader: R) -> Self {
        TextGameReader {
            reader,
            moves_line: String::new(),
            result_line: String::new(),
        }
    }

    pub fn read_game(&mut self) -> io::Result<Option<GameRecord>> {
        self.moves_line.clear();
        self.result_line.clear();

        if self.reader.read_line(&mut self.moves_line)? == 0 {
            return Ok(None);
        }
        if self.reader.read_line(&mut self.result_line)? == 0 {
            // a move line without its result is cut off, skip it
            return Ok(None);
        }

        Ok(Some(GameRecord {
            moves: parse_moves(&self.moves_line),
            result: parse_result(&self.result_line),
        }))
    }
}
