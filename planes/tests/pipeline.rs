use planes::encoding::decode;
use planes::layout::{compact, planes_to_board_fen};
use planes::text::{parse_moves, parse_result, ResultLabel};
use planes::traversal::{game_pairs, replay, PairPolicy};
use shakmaty::Chess;

const GAME: &str = "1. e4 e5 2. Nf3 Nc6 3. Bb5 a6 4. Ba4 Nf6 5. O-O Be7 6. Re1 b5 7. Bb3 d6\r\n";

#[test]
fn test_text_to_pairs() {
    let moves = parse_moves(GAME);
    assert_eq!(moves.len(), 14);
    assert_eq!(moves[8], "O-O");

    let result = parse_result("1-0\n");
    assert_eq!(result, ResultLabel::Win);

    let policy = PairPolicy::for_result(&result).unwrap();
    let pairs = game_pairs(Chess::default(), &moves, policy).unwrap();

    // 14 captured layouts, White's pairs start at plies 0, 2, ..., 12
    assert_eq!(pairs.len(), 7);

    // every pair decodes back to the captured layouts
    let layouts = replay(Chess::default(), &moves).unwrap();
    for (k, pair) in pairs.iter().enumerate() {
        assert_eq!(decode(&pair.before).unwrap(), layouts[2 * k]);
        assert_eq!(decode(&pair.after).unwrap(), layouts[2 * k + 1]);
    }

    // castling shows up in the planes: the white king lands on g1
    let castled = planes_to_board_fen(&pairs[4].after).unwrap();
    assert!(castled.ends_with("RNBQ1RK1"), "{}", castled);
}

#[test]
fn test_draw_uses_every_ply() {
    let moves = parse_moves(GAME);
    let policy = PairPolicy::for_result(&parse_result("1/2-1/2\n")).unwrap();

    let pairs = game_pairs(Chess::default(), &moves, policy).unwrap();
    assert_eq!(pairs.len(), moves.len() - 1);
    for window in pairs.windows(2) {
        assert_eq!(window[0].after, window[1].before);
    }
}

#[test]
fn test_unknown_result_is_skipped() {
    assert_eq!(PairPolicy::for_result(&parse_result("*\n")), None);
}

#[test]
fn test_layouts_follow_rank_order() {
    let layouts = replay(Chess::default(), &["e4"]).unwrap();
    assert_eq!(
        compact(&layouts[0]),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
    );
}
