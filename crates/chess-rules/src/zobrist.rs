//! Zobrist hashing.
//!
//! Each hashable feature of a position (piece on a square, castling rights,
//! en passant file, side to move) gets a fixed pseudo-random key; a
//! position's hash is the XOR of the keys for its features. The keys are
//! generated at compile time from a fixed seed, so hashes are stable across
//! runs.

use chess_types::{Color, Piece};

use crate::Position;

const SEED: u64 = 0x9e37_79b9_7f4a_7c15;

/// xorshift64 step. Quality is plenty for hashing keys, and it runs in
/// const eval.
const fn next(state: u64) -> u64 {
    let mut x = state;
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    x
}

struct Keys {
    /// Indexed by piece, color, square.
    pieces: [[[u64; 64]; 2]; 6],
    /// Indexed by the packed castling rights (0..16).
    castling: [u64; 16],
    /// Indexed by the en passant file.
    en_passant: [u64; 8],
    /// Indexed by the side to move.
    side: [u64; 2],
}

const fn generate_keys() -> Keys {
    let mut state = SEED;
    let mut keys = Keys {
        pieces: [[[0; 64]; 2]; 6],
        castling: [0; 16],
        en_passant: [0; 8],
        side: [0; 2],
    };

    let mut piece = 0;
    while piece < 6 {
        let mut color = 0;
        while color < 2 {
            let mut sq = 0;
            while sq < 64 {
                state = next(state);
                keys.pieces[piece][color][sq] = state;
                sq += 1;
            }
            color += 1;
        }
        piece += 1;
    }

    let mut i = 0;
    while i < 16 {
        state = next(state);
        keys.castling[i] = state;
        i += 1;
    }
    let mut i = 0;
    while i < 8 {
        state = next(state);
        keys.en_passant[i] = state;
        i += 1;
    }
    state = next(state);
    keys.side[0] = state;
    state = next(state);
    keys.side[1] = state;

    keys
}

static KEYS: Keys = generate_keys();

/// Computes the Zobrist hash of a position.
///
/// The en passant key is applied only when an en passant square is set, and
/// depends on its file alone.
pub fn hash(position: &Position) -> u64 {
    let mut h = 0u64;

    for piece in Piece::ALL {
        for color in [Color::White, Color::Black] {
            for sq in position.pieces(piece, color) {
                h ^= KEYS.pieces[piece.index()][color.index()][sq.index() as usize];
            }
        }
    }

    h ^= KEYS.castling[position.castling().index()];
    if let Some(sq) = position.en_passant() {
        h ^= KEYS.en_passant[sq.file().index() as usize];
    }
    h ^= KEYS.side[position.side_to_move().index()];

    h
}
