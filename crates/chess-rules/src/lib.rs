//! Chess rules engine.
//!
//! Bitboard-based move generation (magic bitboards for the sliders,
//! compile-time tables for the leapers), full legality via trial execution,
//! FEN, SAN, Zobrist hashing, and game-level bookkeeping with automatic
//! end-of-game detection.
//!
//! The [`Position`] type answers single-position questions (what is legal,
//! who attacks what); [`Game`] adds history, notation, draw tracking, and
//! termination on top of it.

pub mod bitboard;
pub mod game;
pub mod movegen;
pub mod outcome;
pub mod position;
pub mod san;
pub mod zobrist;

pub use bitboard::Bitboard;
pub use game::{Game, GameError, GameState, RecordedMove};
pub use movegen::{legal_moves, perft::perft};
pub use outcome::{is_dead_position, GameEndReason, GameOutcome, GameResult};
pub use position::{CastlingRights, Position};
pub use san::{move_to_san, san_to_move, SanError};
