//! Perft: exhaustive move-path counting for validating the generator.

use crate::{movegen, Position};

/// Counts all leaf nodes of the legal move tree to the given depth.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = movegen::legal_moves(position);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|mv| {
            let mut next = position.clone();
            next.make_move(mv);
            perft(&next, depth - 1)
        })
        .sum()
}

/// Per-move node counts at the root, for diffing against a reference.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(chess_types::Move, u64)> {
    movegen::legal_moves(position)
        .into_iter()
        .map(|mv| {
            let mut next = position.clone();
            next.make_move(&mv);
            let nodes = perft(&next, depth.saturating_sub(1));
            (mv, nodes)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_counts() {
        let pos = Position::startpos();
        assert_eq!(perft(&pos, 1), 20);
        assert_eq!(perft(&pos, 2), 400);
        assert_eq!(perft(&pos, 3), 8_902);
        assert_eq!(perft(&pos, 4), 197_281);
    }

    #[test]
    fn kiwipete_counts() {
        // Exercises castling, en passant, promotions, and pins all at once.
        let pos = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        assert_eq!(perft(&pos, 1), 48);
        assert_eq!(perft(&pos, 2), 2_039);
        assert_eq!(perft(&pos, 3), 97_862);
    }

    #[test]
    fn en_passant_pin_position() {
        // Position 3 from the usual perft suite; the e2 pawn's en passant
        // capture can expose the king along the fifth rank.
        let pos = Position::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
        assert_eq!(perft(&pos, 1), 14);
        assert_eq!(perft(&pos, 2), 191);
        assert_eq!(perft(&pos, 3), 2_812);
        assert_eq!(perft(&pos, 4), 43_238);
    }

    #[test]
    fn divide_sums_to_perft() {
        let pos = Position::startpos();
        let total: u64 = perft_divide(&pos, 3).iter().map(|(_, n)| n).sum();
        assert_eq!(total, perft(&pos, 3));
    }

    #[test]
    fn promotion_heavy_position() {
        let pos = Position::from_fen("n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1").unwrap();
        assert_eq!(perft(&pos, 1), 24);
        assert_eq!(perft(&pos, 2), 496);
        assert_eq!(perft(&pos, 3), 9_483);
    }
}
