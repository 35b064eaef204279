use clap::{Args, ValueEnum};
use planes::model::LinearModel;
use planes::rules::{RulesEngine, Side};
use planes::scorer::select_move;
use shakmaty::Chess;
use std::error::Error;

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SideArg {
    White,
    Black,
}

#[derive(Args)]
pub struct BestMoveCommand {
    /// FEN of the position to play from, the starting position by default
    #[arg(long, value_name = "fen")]
    fen: Option<String>,

    /// The linear model file to score candidates with
    #[arg(long, value_name = "model")]
    model: String,

    /// Side-to-move flag given to the model, the position's turn by default
    #[arg(long, value_enum)]
    side: Option<SideArg>,

    /// Print the score of every legal move
    #[arg(long, default_value = "false")]
    ranking: bool,
}

pub fn best_move(cmd: BestMoveCommand) -> Result<(), Box<dyn Error>> {
    let position = match cmd.fen {
        Some(ref fen) => Chess::from_fen(fen)?,
        None => Chess::default(),
    };

    let side = match cmd.side {
        Some(SideArg::White) => Side::White,
        Some(SideArg::Black) => Side::Black,
        None => position.side_to_move(),
    };

    let mut model = LinearModel::load(&cmd.model)?;
    let chosen = select_move(&position, side, &mut model)?;

    if cmd.ranking {
        for (notation, score) in &chosen.ranking {
            println!("{} {}", notation, score);
        }
    }

    println!("bestmove {} score {}", chosen.notation, chosen.score);

    Ok(())
}
