//! Invariant checks along randomly played games.
//!
//! Each test drives a game with moves picked by index from the legal move
//! list, so every reached position is a real game position rather than an
//! arbitrary piece arrangement.

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use chess_rules::{movegen, san, Game, Position};
use chess_types::Piece;

fn walk<F>(picks: &[usize], mut inspect: F) -> Result<(), TestCaseError>
where
    F: FnMut(&Game) -> Result<(), TestCaseError>,
{
    let mut game = Game::new();
    for &pick in picks {
        if game.is_over() {
            break;
        }
        let moves = game.legal_moves();
        let mv = moves[pick % moves.len()];
        game.play(mv.from, mv.to, mv.promotion)
            .expect("picked from the legal move list");
        inspect(&game)?;
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn no_move_leaves_the_mover_in_check(picks in prop::collection::vec(any::<usize>(), 1..80)) {
        walk(&picks, |game| {
            let last = game.moves().last().unwrap();
            prop_assert!(!game.position().is_in_check(last.mv.color));
            Ok(())
        })?;
    }

    #[test]
    fn fen_round_trips_in_played_positions(picks in prop::collection::vec(any::<usize>(), 1..60)) {
        walk(&picks, |game| {
            let fen = game.position().to_fen();
            let reloaded = Position::from_fen(&fen).unwrap();
            prop_assert_eq!(&reloaded, game.position());
            prop_assert_eq!(reloaded.to_fen(), fen);
            Ok(())
        })?;
    }

    #[test]
    fn hash_survives_fen_reload(picks in prop::collection::vec(any::<usize>(), 1..60)) {
        walk(&picks, |game| {
            let reloaded = Position::from_fen(&game.position().to_fen()).unwrap();
            prop_assert_eq!(reloaded.zobrist_hash(), game.position().zobrist_hash());
            Ok(())
        })?;
    }

    #[test]
    fn board_views_stay_synchronized(picks in prop::collection::vec(any::<usize>(), 1..60)) {
        walk(&picks, |game| {
            let position = game.position();
            let mut from_mailbox = 0u32;
            for index in 0..64u8 {
                let sq = chess_types::Square::from_index(index).unwrap();
                if let Some((piece, color)) = position.piece_at(sq) {
                    prop_assert!(position.pieces(piece, color).contains(sq));
                    from_mailbox += 1;
                }
            }
            prop_assert_eq!(from_mailbox, position.all_occupied().count());
            Ok(())
        })?;
    }

    #[test]
    fn san_names_exactly_the_move_it_came_from(picks in prop::collection::vec(any::<usize>(), 1..40)) {
        let mut game = Game::new();
        for pick in picks {
            if game.is_over() {
                break;
            }
            let moves = game.legal_moves();
            let mv = moves[pick % moves.len()];
            let san = san::move_to_san(game.position(), &mv);
            let parsed = san::san_to_move(game.position(), &san).unwrap();
            prop_assert_eq!(parsed, mv);
            game.play(mv.from, mv.to, mv.promotion).unwrap();
        }
    }

    #[test]
    fn kings_are_always_on_the_board(picks in prop::collection::vec(any::<usize>(), 1..80)) {
        walk(&picks, |game| {
            for color in [chess_types::Color::White, chess_types::Color::Black] {
                prop_assert_eq!(game.position().pieces(Piece::King, color).count(), 1);
            }
            Ok(())
        })?;
    }

    #[test]
    fn pseudo_legal_superset_of_legal(picks in prop::collection::vec(any::<usize>(), 1..40)) {
        walk(&picks, |game| {
            let pseudo = movegen::pseudo_legal_moves(game.position());
            for mv in movegen::legal_moves(game.position()) {
                prop_assert!(pseudo.contains(&mv));
            }
            Ok(())
        })?;
    }
}
