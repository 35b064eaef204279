mod best_move;
mod build_dataset;
mod dataset_info;
mod game_visitor;
mod inspect;
mod pair_format;
mod text_reader;

use crate::best_move::best_move;
use crate::build_dataset::build_dataset;
use crate::dataset_info::dataset_info;
use crate::inspect::inspect;
use best_move::BestMoveCommand;
use build_dataset::BuildDatasetCommand;
use clap::{Parser, Subcommand};
use dataset_info::DatasetInfoCommand;
use inspect::InspectCommand;
use std::error::Error;

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replays games and writes before/after piece plane pairs to a .planes file
    BuildDataset(BuildDatasetCommand),
    /// Counts the pairs of a .planes file and prints some of them
    DatasetInfo(DatasetInfoCommand),
    /// Prints the layout and piece planes of a position
    Inspect(InspectCommand),
    /// Picks a move for a position with a linear model
    BestMove(BestMoveCommand),
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Cli::parse();

    match args.command {
        Commands::BuildDataset(cmd) => build_dataset(cmd),
        Commands::DatasetInfo(cmd) => dataset_info(cmd),
        Commands::Inspect(cmd) => inspect(cmd),
        Commands::BestMove(cmd) => best_move(cmd),
    }
}
