use clap::Args;
use planes::encoding::{encode, PieceType, Planes};
use planes::layout::{expand, planes_to_board_fen};
use planes::rules::RulesEngine;
use shakmaty::Chess;
use std::error::Error;

#[derive(Args)]
pub struct InspectCommand {
    /// FEN of the position to print
    #[arg(long, value_name = "fen")]
    fen: String,

    /// Also print every piece plane as an 8x8 grid
    #[arg(long, default_value = "false")]
    planes: bool,
}

fn print_plane(planes: &Planes, piece: PieceType) {
    println!("{}:", piece.name());
    for rank in planes.plane(piece).chunks(8) {
        let line: Vec<String> = rank.iter().map(|v| format!("{:>2}", v)).collect();
        println!("  {}", line.join(" "));
    }
}

pub fn inspect(cmd: InspectCommand) -> Result<(), Box<dyn Error>> {
    let position = Chess::from_fen(&cmd.fen)?;
    let layout = expand(&position.board_layout())?;
    let planes = encode(&layout);

    // print the layout, one rank per line
    print!("{}", layout);

    if cmd.planes {
        for piece in PieceType::ALL {
            print_plane(&planes, piece);
        }
    }

    // print what the planes decode back to
    println!("{}", planes_to_board_fen(&planes)?);

    Ok(())
}
