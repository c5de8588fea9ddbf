//! Foundational chess types.
//!
//! This crate provides the value types shared by the rules engine and its
//! consumers:
//! - [`Color`] and [`Piece`] for piece identity
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] — an immutable move record with capture/castling/en-passant flags
//! - [`FenFields`] — parsing and validation of FEN position strings

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenFields, STARTPOS};
pub use mov::{CastleSide, Move};
pub use piece::Piece;
pub use square::{File, Rank, Square};
