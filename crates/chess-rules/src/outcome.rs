//! Game results and draw-by-material detection.

use std::fmt;

use chess_types::{Color, Piece};

use crate::{Bitboard, Position};

/// Who won, if anyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
}

impl GameResult {
    pub fn winner(self) -> Option<Color> {
        match self {
            GameResult::WhiteWins => Some(Color::White),
            GameResult::BlackWins => Some(Color::Black),
            GameResult::Draw => None,
        }
    }

    pub fn win_for(color: Color) -> Self {
        match color {
            Color::White => GameResult::WhiteWins,
            Color::Black => GameResult::BlackWins,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let score = match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
        };
        write!(f, "{score}")
    }
}

/// Why the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEndReason {
    Checkmate,
    Stalemate,
    FiftyMoveRule,
    ThreefoldRepetition,
    DeadPosition,
    Resignation,
    Agreement,
    Timeout,
    Abandonment,
}

/// A concluded game's result and the rule that concluded it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    pub result: GameResult,
    pub reason: GameEndReason,
}

impl GameOutcome {
    pub fn checkmate(winner: Color) -> Self {
        GameOutcome {
            result: GameResult::win_for(winner),
            reason: GameEndReason::Checkmate,
        }
    }

    pub fn draw(reason: GameEndReason) -> Self {
        GameOutcome {
            result: GameResult::Draw,
            reason,
        }
    }

    pub fn resignation(resigner: Color) -> Self {
        GameOutcome {
            result: GameResult::win_for(resigner.opponent()),
            reason: GameEndReason::Resignation,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.result == GameResult::Draw
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.result, self.reason)
    }
}

/// True when neither side can possibly deliver checkmate.
///
/// Covered material patterns:
/// - king versus king
/// - king and one minor piece versus king
/// - kings and any number of bishops that all stand on the same square color
///
/// Combinations involving two or more knights are not declared dead, even
/// when no forced mate exists.
pub fn is_dead_position(position: &Position) -> bool {
    for color in [Color::White, Color::Black] {
        let heavy = position.pieces(Piece::Pawn, color)
            | position.pieces(Piece::Rook, color)
            | position.pieces(Piece::Queen, color);
        if !heavy.is_empty() {
            return false;
        }
    }

    let knights = position.pieces(Piece::Knight, Color::White)
        | position.pieces(Piece::Knight, Color::Black);
    let bishops = position.pieces(Piece::Bishop, Color::White)
        | position.pieces(Piece::Bishop, Color::Black);
    let minors = knights.count() + bishops.count();

    match minors {
        0 | 1 => true,
        _ => knights.is_empty() && same_shade(bishops),
    }
}

fn same_shade(bishops: Bitboard) -> bool {
    let mut shades = bishops.map(|sq| sq.is_dark());
    match shades.next() {
        Some(first) => shades.all(|shade| shade == first),
        None => true,
    }
}
