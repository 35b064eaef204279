use crate::game_visitor::{GameRecord, GameVisitor};
use crate::pair_format::{PairRecord, PairWriter};
use crate::text_reader::TextGameReader;
use clap::{Args, ValueEnum};
use indicatif::{HumanCount, ProgressBar, ProgressStyle};
use log::warn;
use pgn_reader::BufferedReader;
use planes::text::ResultLabel;
use planes::traversal::{extract_pairs, replay_lenient, PairPolicy};
use shakmaty::Chess;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use zstd::Encoder;

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputFormat {
    /// PGN games, read with a PGN parser
    Pgn,
    /// Pre-extracted text: a move line followed by a result line per game
    Text,
}

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug)]
pub enum PolicyArg {
    /// Winner's moves for decisive games, every move for draws
    Auto,
    /// White's moves only
    White,
    /// Black's moves only
    Black,
    /// Every move
    All,
}

#[derive(Args, Clone, Debug)]
pub struct DatasetConfig {
    /// Which plies become pairs
    #[arg(long, value_enum, default_value = "auto")]
    policy: PolicyArg,

    /// Skip drawn games
    #[arg(long, default_value = "false")]
    skip_draws: bool,

    /// Keep the pairs before an illegal move instead of dropping the whole game
    #[arg(long, default_value = "false")]
    keep_partial: bool,

    /// Only accept games with at least this many plies
    #[arg(long, value_name = "min-plies", default_value = "2")]
    min_plies: usize,

    /// Stop after this many games have been read
    #[arg(long, value_name = "max-games")]
    max_games: Option<usize>,
}

impl DatasetConfig {
    fn policy_for(&self, result: &ResultLabel) -> Option<PairPolicy> {
        if self.skip_draws && *result == ResultLabel::Draw {
            return None;
        }
        // unknown outcomes can not be labeled
        if !result.is_known() {
            return None;
        }

        match self.policy {
            PolicyArg::Auto => PairPolicy::for_result(result),
            PolicyArg::White => Some(PairPolicy::WhiteMoved),
            PolicyArg::Black => Some(PairPolicy::BlackMoved),
            PolicyArg::All => Some(PairPolicy::All),
        }
    }
}

#[derive(Args)]
pub struct BuildDatasetCommand {
    /// Path or URL of a .pgn, .pgn.zst or .txt file to read games
    #[arg(long, value_name = "input")]
    input: String,

    /// Input format, guessed from the extension when missing
    #[arg(long, value_enum)]
    format: Option<InputFormat>,

    /// Output .planes file to write the pairs
    #[arg(long, value_name = "output")]
    output: String,

    /// Whether to compress the output with the ZSTD algorithm
    #[arg(long, default_value = "false")]
    compress: bool,

    /// Dataset configuration
    #[clap(flatten)]
    config: DatasetConfig,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DatasetStats {
    pub games: u64,
    pub accepted: u64,
    pub skipped: u64,
    pub failed: u64,
    pub pairs: u64,
}

fn guess_format(input: &str) -> InputFormat {
    let name = input.strip_suffix(".zst").unwrap_or(input);
    if name.ends_with(".txt") {
        InputFormat::Text
    } else {
        InputFormat::Pgn
    }
}

/// Turns one game into pair records and writes them
pub fn process_game<W: Write>(
    game: &GameRecord,
    config: &DatasetConfig,
    writer: &mut PairWriter<W>,
    stats: &mut DatasetStats,
) -> io::Result<()> {
    stats.games += 1;

    let Some(policy) = config.policy_for(&game.result) else {
        stats.skipped += 1;
        return Ok(());
    };
    if game.moves.len() < config.min_plies {
        stats.skipped += 1;
        return Ok(());
    }

    let (layouts, error) = replay_lenient(Chess::default(), &game.moves);
    if let Some(err) = error {
        stats.failed += 1;
        if !config.keep_partial {
            warn!("dropping game {}: {}", stats.games, err);
            return Ok(());
        }
        warn!("keeping {} plies of game {}: {}", layouts.len(), stats.games, err);
    }

    stats.accepted += 1;
    for pair in extract_pairs(&layouts, policy) {
        writer.write_record(&PairRecord {
            result: game.result.clone(),
            policy,
            pair,
        })?;
        stats.pairs += 1;
    }

    Ok(())
}

pub fn build_dataset(cmd: BuildDatasetCommand) -> Result<(), Box<dyn Error>> {
    // raw data stream (may be compressed)
    let raw_reader: Box<dyn io::Read> = if cmd.input.starts_with("http") {
        Box::new(reqwest::blocking::get(cmd.input.clone())?)
    } else {
        Box::new(File::open(&cmd.input)?)
    };

    // decompress if necessary
    let reader: Box<dyn io::Read> = if cmd.input.ends_with(".zst") {
        Box::new(zstd::Decoder::new(raw_reader)?)
    } else {
        raw_reader
    };

    // compress output if asked
    let output_file = File::create(cmd.output.clone())?;
    let output: Box<dyn io::Write> = if cmd.compress {
        // the encoder is buffered internally
        Box::new(Encoder::new(output_file, 3)?.auto_finish())
    } else {
        Box::new(BufWriter::new(output_file))
    };
    let mut writer = PairWriter::new(output)?;

    let format = cmd.format.unwrap_or_else(|| guess_format(&cmd.input));

    println!("Input: {} ({:?})", cmd.input, format);
    println!("Output: {}", cmd.output);
    println!("Write compressed: {}", cmd.compress);

    let bar = ProgressBar::new_spinner().with_style(
        ProgressStyle::default_spinner()
            .template(
                "{spinner:.green} [Elapsed {elapsed_precise}] [Games {human_pos} @ {per_sec}] {msg}",
            )?,
    );

    let mut stats = DatasetStats::default();
    let max_games = cmd.config.max_games.unwrap_or(usize::MAX) as u64;

    let mut on_game = |game: &GameRecord, stats: &mut DatasetStats| -> io::Result<()> {
        process_game(game, &cmd.config, &mut writer, stats)?;
        bar.inc(1);
        bar.set_message(format!("[Pairs {}]", HumanCount(writer.records_written())));
        Ok(())
    };

    match format {
        InputFormat::Pgn => {
            let mut visitor = GameVisitor::new();
            let mut game_reader = BufferedReader::new(reader);

            while stats.games < max_games {
                match game_reader.read_game(&mut visitor)? {
                    Some(Some(game)) => on_game(&game, &mut stats)?,
                    // skipped by the visitor
                    Some(None) => {
                        stats.games += 1;
                        stats.skipped += 1;
                        bar.inc(1);
                    }
                    None => break,
                }
            }
        }
        InputFormat::Text => {
            let mut game_reader = TextGameReader::new(BufReader::new(reader));

            while stats.games < max_games {
                match game_reader.read_game()? {
                    Some(game) => on_game(&game, &mut stats)?,
                    None => break,
                }
            }
        }
    }

    writer.finish()?;
    bar.finish();

    println!(
        "Done. Games: {} Accepted: {} Skipped: {} Failed: {} Pairs: {}",
        stats.games, stats.accepted, stats.skipped, stats.failed, stats.pairs
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pair_format::PairReader;
    use std::io::Cursor;

    fn config(policy: PolicyArg) -> DatasetConfig {
        DatasetConfig {
            policy,
            skip_draws: false,
            keep_partial: false,
            min_plies: 2,
            max_games: None,
        }
    }

    fn game(moves: &[&str], result: ResultLabel) -> GameRecord {
        GameRecord {
            moves: moves.iter().map(|m| m.to_string()).collect(),
            result,
        }
    }

    fn run(games: &[GameRecord], config: &DatasetConfig) -> (DatasetStats, Vec<PairRecord>) {
        let mut buffer = Vec::new();
        let mut stats = DatasetStats::default();
        {
            let mut writer = PairWriter::new(&mut buffer).unwrap();
            for g in games {
                process_game(g, config, &mut writer, &mut stats).unwrap();
            }
            writer.finish().unwrap();
        }

        let mut reader = PairReader::new(Cursor::new(buffer)).unwrap();
        let mut records = vec![];
        while let Some(record) = reader.read_record().unwrap() {
            records.push(record);
        }
        (stats, records)
    }

    #[test]
    fn test_auto_policy() {
        let moves = ["e4", "e5", "Nf3", "Nc6", "Bb5"];
        let games = [
            game(&moves, ResultLabel::Win),
            game(&moves, ResultLabel::Lose),
            game(&moves, ResultLabel::Draw),
            game(&moves, ResultLabel::Unknown("*".to_string())),
        ];

        let (stats, records) = run(&games, &config(PolicyArg::Auto));
        assert_eq!(stats.games, 4);
        assert_eq!(stats.accepted, 3);
        assert_eq!(stats.skipped, 1);
        // 5 layouts: 2 white pairs, 2 black pairs, 4 pairs for the draw
        assert_eq!(stats.pairs, 2 + 2 + 4);
        assert_eq!(records.len(), 8);
        assert_eq!(records[0].policy, PairPolicy::WhiteMoved);
        assert_eq!(records[2].policy, PairPolicy::BlackMoved);
        assert_eq!(records[7].result, ResultLabel::Draw);
    }

    #[test]
    fn test_skip_draws_and_short_games() {
        let mut config = config(PolicyArg::All);
        config.skip_draws = true;
        config.min_plies = 3;

        let games = [
            game(&["e4", "e5", "Nf3"], ResultLabel::Draw),
            game(&["e4", "e5"], ResultLabel::Win),
            game(&["e4", "e5", "Nf3"], ResultLabel::Win),
        ];

        let (stats, records) = run(&games, &config);
        assert_eq!(stats.skipped, 2);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.policy == PairPolicy::All));
    }

    #[test]
    fn test_illegal_move_drops_or_keeps() {
        let games = [game(&["e4", "e5", "Ke3", "d5"], ResultLabel::Draw)];

        let (stats, records) = run(&games, &config(PolicyArg::Auto));
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.accepted, 0);
        assert!(records.is_empty());

        let mut keep = config(PolicyArg::Auto);
        keep.keep_partial = true;
        let (stats, records) = run(&games, &keep);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.accepted, 1);
        // layouts before e4, e5 and Ke3
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_guess_format() {
        assert_eq!(guess_format("games.pgn"), InputFormat::Pgn);
        assert_eq!(guess_format("games.pgn.zst"), InputFormat::Pgn);
        assert_eq!(guess_format("moves.txt"), InputFormat::Text);
        assert_eq!(guess_format("moves.txt.zst"), InputFormat::Text);
    }
}
