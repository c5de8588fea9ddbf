//! Move records.

use std::fmt;

use crate::{Color, Piece, Square};

/// The side of the board a castling move targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    King,
    Queen,
}

/// A fully described move.
///
/// Records everything needed to apply the move without consulting the
/// position it came from: the moving piece, its color, and flags for the
/// special move kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub color: Color,
    /// Promotion target, set only for pawn moves reaching the last rank.
    pub promotion: Option<Piece>,
    /// True when a piece is removed from the board, including en passant.
    pub is_capture: bool,
    pub is_en_passant: bool,
    pub castle: Option<CastleSide>,
    /// True for a pawn's initial two-square advance.
    pub is_double_pawn_push: bool,
}

impl Move {
    /// A quiet move with no special flags.
    pub const fn quiet(piece: Piece, color: Color, from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            piece,
            color,
            promotion: None,
            is_capture: false,
            is_en_passant: false,
            castle: None,
            is_double_pawn_push: false,
        }
    }

    /// A plain capture.
    pub const fn capture(piece: Piece, color: Color, from: Square, to: Square) -> Self {
        Move {
            is_capture: true,
            ..Move::quiet(piece, color, from, to)
        }
    }

    pub const fn is_castle(&self) -> bool {
        self.castle.is_some()
    }

    pub const fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Coordinate notation: origin, destination, and promotion letter if any
    /// ("e2e4", "e7e8q").
    pub fn to_coordinate(&self) -> String {
        match self.promotion {
            Some(p) => format!(
                "{}{}{}",
                self.from,
                self.to,
                p.letter().to_ascii_lowercase()
            ),
            None => format!("{}{}", self.from, self.to),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coordinate())
    }
}
