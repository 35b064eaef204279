use crate::pair_format::PairReader;
use clap::Args;
use indicatif::HumanCount;
use planes::layout::planes_to_board_fen;
use planes::text::ResultLabel;
use planes::traversal::PairPolicy;
use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader};

#[derive(Args)]
pub struct DatasetInfoCommand {
    /// A .planes (or .planes.zst) file written by build-dataset
    #[arg(long, value_name = "input")]
    input: String,

    /// Print the boards of the first N pairs
    #[arg(long, value_name = "show", default_value = "0")]
    show: usize,
}

pub fn dataset_info(cmd: DatasetInfoCommand) -> Result<(), Box<dyn Error>> {
    let file = File::open(&cmd.input)?;
    let raw_reader: Box<dyn io::Read> = if cmd.input.ends_with(".zst") {
        Box::new(zstd::Decoder::new(file)?)
    } else {
        Box::new(BufReader::new(file))
    };
    let mut reader = PairReader::new(raw_reader)?;

    let mut count = 0u64;
    let mut by_kind: HashMap<(String, PairPolicy), u64> = HashMap::new();

    while let Some(record) = reader.read_record()? {
        if (count as usize) < cmd.show {
            println!(
                "{} {:?}: {} -> {}",
                record.result,
                record.policy,
                planes_to_board_fen(&record.pair.before)?,
                planes_to_board_fen(&record.pair.after)?
            );
        }

        *by_kind
            .entry((record.result.to_string(), record.policy))
            .or_default() += 1;
        count += 1;
    }

    for result in [ResultLabel::Win, ResultLabel::Lose, ResultLabel::Draw] {
        for policy in [PairPolicy::WhiteMoved, PairPolicy::BlackMoved, PairPolicy::All] {
            if let Some(n) = by_kind.get(&(result.to_string(), policy)) {
                println!("{} {:?}: {}", result, policy, HumanCount(*n));
            }
        }
    }
    println!("Total pairs: {}", HumanCount(count));

    Ok(())
}
