//! Move generation.
//!
//! Generation is pseudo-legal first: every move a piece could geometrically
//! make, ignoring whether it exposes its own king. Legality is then decided
//! by trial execution — apply the move to a copy and reject it if the
//! mover's king is attacked. Castling is the exception and checks its path
//! squares up front, since the king may not castle out of, through, or into
//! check.

pub mod attacks;
pub mod magics;
pub mod perft;

use chess_types::{CastleSide, Color, Move, Piece, Rank, Square};

use crate::position::rook_castle_squares;
use crate::{Bitboard, Position};

const PROMOTION_PIECES: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

/// All legal moves for the side to move.
pub fn legal_moves(position: &Position) -> Vec<Move> {
    pseudo_legal_moves(position)
        .into_iter()
        .filter(|mv| is_legal(position, mv))
        .collect()
}

/// True when applying `mv` leaves the mover's king safe.
pub fn is_legal(position: &Position, mv: &Move) -> bool {
    let mut copy = position.clone();
    copy.make_move(mv);
    !copy.is_in_check(mv.color)
}

/// All pseudo-legal moves for the side to move. The mover's king safety is
/// not considered, except for castling.
pub fn pseudo_legal_moves(position: &Position) -> Vec<Move> {
    let color = position.side_to_move();
    let mut moves = Vec::with_capacity(48);
    pawn_moves(position, color, &mut moves);
    leaper_moves(position, color, Piece::Knight, &mut moves);
    slider_moves(position, color, Piece::Bishop, &mut moves);
    slider_moves(position, color, Piece::Rook, &mut moves);
    slider_moves(position, color, Piece::Queen, &mut moves);
    king_moves(position, color, &mut moves);
    castling_moves(position, color, &mut moves);
    moves
}

fn push_pawn_move(moves: &mut Vec<Move>, mv: Move) {
    let last_rank = match mv.color {
        Color::White => Rank::EIGHTH,
        Color::Black => Rank::FIRST,
    };
    if mv.to.rank() == last_rank {
        for promotion in PROMOTION_PIECES {
            moves.push(Move {
                promotion: Some(promotion),
                ..mv
            });
        }
    } else {
        moves.push(mv);
    }
}

fn pawn_moves(position: &Position, color: Color, moves: &mut Vec<Move>) {
    let pawns = position.pieces(Piece::Pawn, color);
    let occupied = position.all_occupied();
    let enemies = position.occupied(color.opponent());
    let (single, double) = match color {
        Color::White => (pawns.north() & !occupied, Bitboard::rank(Rank::FOURTH)),
        Color::Black => (pawns.south() & !occupied, Bitboard::rank(Rank::FIFTH)),
    };

    // Single pushes, derived back from the destination set.
    for to in single {
        let from_index = match color {
            Color::White => to.index() - 8,
            Color::Black => to.index() + 8,
        };
        if let Some(from) = Square::from_index(from_index) {
            push_pawn_move(moves, Move::quiet(Piece::Pawn, color, from, to));
        }
    }

    // Double pushes advance the single-push set one more rank.
    let double_dests = match color {
        Color::White => single.north() & !occupied & double,
        Color::Black => single.south() & !occupied & double,
    };
    for to in double_dests {
        let from_index = match color {
            Color::White => to.index() - 16,
            Color::Black => to.index() + 16,
        };
        if let Some(from) = Square::from_index(from_index) {
            moves.push(Move {
                is_double_pawn_push: true,
                ..Move::quiet(Piece::Pawn, color, from, to)
            });
        }
    }

    for from in pawns {
        let targets = attacks::pawn_attacks(color, from);
        for to in targets & enemies {
            push_pawn_move(moves, Move::capture(Piece::Pawn, color, from, to));
        }
        if let Some(ep) = position.en_passant() {
            if targets.contains(ep) {
                moves.push(Move {
                    is_capture: true,
                    is_en_passant: true,
                    ..Move::quiet(Piece::Pawn, color, from, ep)
                });
            }
        }
    }
}

fn leaper_moves(position: &Position, color: Color, piece: Piece, moves: &mut Vec<Move>) {
    let own = position.occupied(color);
    for from in position.pieces(piece, color) {
        let targets = attacks::knight_attacks(from) & !own;
        push_piece_moves(position, piece, color, from, targets, moves);
    }
}

fn slider_moves(position: &Position, color: Color, piece: Piece, moves: &mut Vec<Move>) {
    let own = position.occupied(color);
    let occupied = position.all_occupied();
    for from in position.pieces(piece, color) {
        let rays = match piece {
            Piece::Bishop => magics::bishop_attacks(from, occupied),
            Piece::Rook => magics::rook_attacks(from, occupied),
            _ => magics::queen_attacks(from, occupied),
        };
        push_piece_moves(position, piece, color, from, rays & !own, moves);
    }
}

fn king_moves(position: &Position, color: Color, moves: &mut Vec<Move>) {
    let own = position.occupied(color);
    // Squares next to the enemy king are never available; pruning them here
    // keeps the trial-execution filter from doing the obvious work.
    let enemy_king_zone = match position.king_square(color.opponent()) {
        Some(sq) => attacks::king_attacks(sq),
        None => Bitboard::EMPTY,
    };
    for from in position.pieces(Piece::King, color) {
        let targets = attacks::king_attacks(from) & !own & !enemy_king_zone;
        push_piece_moves(position, Piece::King, color, from, targets, moves);
    }
}

fn push_piece_moves(
    position: &Position,
    piece: Piece,
    color: Color,
    from: Square,
    targets: Bitboard,
    moves: &mut Vec<Move>,
) {
    for to in targets {
        let mv = if position.piece_at(to).is_some() {
            Move::capture(piece, color, from, to)
        } else {
            Move::quiet(piece, color, from, to)
        };
        moves.push(mv);
    }
}

fn castling_moves(position: &Position, color: Color, moves: &mut Vec<Move>) {
    let king_from = match color {
        Color::White => Square::E1,
        Color::Black => Square::E8,
    };
    if position.piece_at(king_from) != Some((Piece::King, color)) {
        return;
    }
    for side in [CastleSide::King, CastleSide::Queen] {
        if !position.castling().allows(color, side) {
            continue;
        }
        if let Some(mv) = castle_move(position, color, side, king_from) {
            moves.push(mv);
        }
    }
}

fn castle_move(
    position: &Position,
    color: Color,
    side: CastleSide,
    king_from: Square,
) -> Option<Move> {
    let (rook_from, _) = rook_castle_squares(color, side);
    if position.piece_at(rook_from) != Some((Piece::Rook, color)) {
        return None;
    }

    let offsets: &[i8] = match side {
        CastleSide::King => &[1, 2],
        CastleSide::Queen => &[-1, -2, -3],
    };
    let occupied = position.all_occupied();
    for &offset in offsets {
        let between = Square::from_index((king_from.index() as i8 + offset) as u8)?;
        if occupied.contains(between) {
            return None;
        }
    }

    // The king's own square, the square it crosses, and its destination must
    // all be safe.
    let opponent = color.opponent();
    let step = match side {
        CastleSide::King => 1i8,
        CastleSide::Queen => -1,
    };
    for crossed in 0..=2 {
        let sq = Square::from_index((king_from.index() as i8 + step * crossed) as u8)?;
        if position.is_square_attacked(sq, opponent) {
            return None;
        }
    }

    let king_to = Square::from_index((king_from.index() as i8 + step * 2) as u8)?;
    Some(Move {
        castle: Some(side),
        ..Move::quiet(Piece::King, color, king_from, king_to)
    })
}
