//! Precomputed attack sets for the non-sliding pieces.
//!
//! Pawn, knight, and king attack tables are built at compile time; sliding
//! piece attacks come from the magic tables in [`super::magics`].

use chess_types::{Color, Square};

use crate::Bitboard;

const FILE_A: u64 = 0x0101_0101_0101_0101;
const FILE_B: u64 = FILE_A << 1;
const FILE_G: u64 = FILE_A << 6;
const FILE_H: u64 = FILE_A << 7;

const NOT_A: u64 = !FILE_A;
const NOT_H: u64 = !FILE_H;
const NOT_AB: u64 = !(FILE_A | FILE_B);
const NOT_GH: u64 = !(FILE_G | FILE_H);

// Shift-and-mask: the mask kills targets that wrapped across the board edge.
const fn pawn_targets(sq: usize, color: usize) -> u64 {
    let bb = 1u64 << sq;
    if color == 0 {
        ((bb << 7) & NOT_H) | ((bb << 9) & NOT_A)
    } else {
        ((bb >> 7) & NOT_A) | ((bb >> 9) & NOT_H)
    }
}

const fn knight_targets(sq: usize) -> u64 {
    let bb = 1u64 << sq;
    ((bb << 17) & NOT_A)
        | ((bb << 15) & NOT_H)
        | ((bb << 10) & NOT_AB)
        | ((bb << 6) & NOT_GH)
        | ((bb >> 17) & NOT_H)
        | ((bb >> 15) & NOT_A)
        | ((bb >> 10) & NOT_GH)
        | ((bb >> 6) & NOT_AB)
}

const fn king_targets(sq: usize) -> u64 {
    let bb = 1u64 << sq;
    (bb << 8)
        | (bb >> 8)
        | ((bb << 1) & NOT_A)
        | ((bb >> 1) & NOT_H)
        | ((bb << 9) & NOT_A)
        | ((bb << 7) & NOT_H)
        | ((bb >> 7) & NOT_A)
        | ((bb >> 9) & NOT_H)
}

const fn build_pawn_table() -> [[u64; 64]; 2] {
    let mut table = [[0u64; 64]; 2];
    let mut color = 0;
    while color < 2 {
        let mut sq = 0;
        while sq < 64 {
            table[color][sq] = pawn_targets(sq, color);
            sq += 1;
        }
        color += 1;
    }
    table
}

const fn build_knight_table() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0;
    while sq < 64 {
        table[sq] = knight_targets(sq);
        sq += 1;
    }
    table
}

const fn build_king_table() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0;
    while sq < 64 {
        table[sq] = king_targets(sq);
        sq += 1;
    }
    table
}

static PAWN_ATTACKS: [[u64; 64]; 2] = build_pawn_table();
static KNIGHT_ATTACKS: [u64; 64] = build_knight_table();
static KING_ATTACKS: [u64; 64] = build_king_table();

/// Squares a pawn of `color` attacks from `sq` (captures only, not pushes).
#[inline]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    Bitboard(PAWN_ATTACKS[color.index()][sq.index() as usize])
}

/// Squares a knight attacks from `sq`.
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    Bitboard(KNIGHT_ATTACKS[sq.index() as usize])
}

/// Squares a king attacks from `sq`.
#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    Bitboard(KING_ATTACKS[sq.index() as usize])
}
