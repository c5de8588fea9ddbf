//! Position state.
//!
//! [`Position`] keeps two synchronized views of the board: a square-indexed
//! array for "what is on e4" lookups and per-piece bitboards for set-wise
//! move generation. Every mutation goes through [`Position::make_move`],
//! which also maintains castling rights, the en passant square, and the
//! move clocks.

use std::fmt;

use chess_types::{CastleSide, Color, FenError, FenFields, Move, Piece, Square, STARTPOS};

use crate::movegen::{attacks, magics};
use crate::{zobrist, Bitboard};

/// Which castling moves each side is still entitled to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };

    pub fn allows(&self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::King) => self.white_kingside,
            (Color::White, CastleSide::Queen) => self.white_queenside,
            (Color::Black, CastleSide::King) => self.black_kingside,
            (Color::Black, CastleSide::Queen) => self.black_queenside,
        }
    }

    fn revoke(&mut self, color: Color, side: CastleSide) {
        match (color, side) {
            (Color::White, CastleSide::King) => self.white_kingside = false,
            (Color::White, CastleSide::Queen) => self.white_queenside = false,
            (Color::Black, CastleSide::King) => self.black_kingside = false,
            (Color::Black, CastleSide::Queen) => self.black_queenside = false,
        }
    }

    fn revoke_all(&mut self, color: Color) {
        self.revoke(color, CastleSide::King);
        self.revoke(color, CastleSide::Queen);
    }

    /// Packs the four flags into 0..16, in FEN order (K, Q, k, q).
    pub fn index(&self) -> usize {
        (self.white_kingside as usize)
            | (self.white_queenside as usize) << 1
            | (self.black_kingside as usize) << 2
            | (self.black_queenside as usize) << 3
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == CastlingRights::NONE {
            return write!(f, "-");
        }
        if self.white_kingside {
            write!(f, "K")?;
        }
        if self.white_queenside {
            write!(f, "Q")?;
        }
        if self.black_kingside {
            write!(f, "k")?;
        }
        if self.black_queenside {
            write!(f, "q")?;
        }
        Ok(())
    }
}

/// A complete chess position.
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    /// Mailbox view, indexed a1 = 0 through h8 = 63.
    squares: [Option<(Piece, Color)>; 64],
    /// Bitboard view, indexed by piece then color.
    pieces: [[Bitboard; 2]; 6],
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Position {
    /// The standard starting position.
    pub fn startpos() -> Self {
        // STARTPOS is a known-good record.
        match Self::from_fen(STARTPOS) {
            Ok(pos) => pos,
            Err(_) => unreachable!(),
        }
    }

    /// Builds a position from a FEN record.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let fields = FenFields::parse(fen)?;

        let mut pieces = [[Bitboard::EMPTY; 2]; 6];
        for (index, entry) in fields.placement.iter().enumerate() {
            if let (Some((piece, color)), Some(sq)) = (entry, Square::from_index(index as u8)) {
                pieces[piece.index()][color.index()] |= Bitboard::from_square(sq);
            }
        }

        Ok(Position {
            squares: fields.placement,
            pieces,
            side_to_move: fields.side_to_move,
            castling: CastlingRights {
                white_kingside: fields.white_kingside,
                white_queenside: fields.white_queenside,
                black_kingside: fields.black_kingside,
                black_queenside: fields.black_queenside,
            },
            en_passant: fields.en_passant,
            halfmove_clock: fields.halfmove_clock,
            fullmove_number: fields.fullmove_number,
        })
    }

    /// Serializes the position back to a FEN record.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.squares[rank * 8 + file] {
                    Some((piece, color)) => {
                        if empty > 0 {
                            fen.push(char::from_digit(empty, 10).unwrap_or('0'));
                            empty = 0;
                        }
                        fen.push(piece.to_fen_char(color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push(char::from_digit(empty, 10).unwrap_or('0'));
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        let en_passant = match self.en_passant {
            Some(sq) => sq.to_algebraic(),
            None => "-".to_string(),
        };
        format!(
            "{} {} {} {} {} {}",
            fen,
            self.side_to_move.to_fen_char(),
            self.castling,
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.squares[sq.index() as usize]
    }

    /// The bitboard of one piece kind for one color.
    #[inline]
    pub fn pieces(&self, piece: Piece, color: Color) -> Bitboard {
        self.pieces[piece.index()][color.index()]
    }

    /// All squares occupied by `color`.
    pub fn occupied(&self, color: Color) -> Bitboard {
        let mut all = Bitboard::EMPTY;
        for piece in Piece::ALL {
            all |= self.pieces(piece, color);
        }
        all
    }

    /// All occupied squares.
    #[inline]
    pub fn all_occupied(&self) -> Bitboard {
        self.occupied(Color::White) | self.occupied(Color::Black)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// The king's square, if `color` has a king on the board.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(Piece::King, color).first()
    }

    /// The Zobrist hash of this position.
    pub fn zobrist_hash(&self) -> u64 {
        zobrist::hash(self)
    }

    /// The pieces of one kind belonging to `by` that attack `sq`.
    pub fn piece_attackers(&self, sq: Square, by: Color, piece: Piece) -> Bitboard {
        let occupied = self.all_occupied();
        let reach = match piece {
            // A pawn of `by` attacks sq iff a pawn of the other color on sq
            // would attack the pawn's square.
            Piece::Pawn => attacks::pawn_attacks(by.opponent(), sq),
            Piece::Knight => attacks::knight_attacks(sq),
            Piece::Bishop => magics::bishop_attacks(sq, occupied),
            Piece::Rook => magics::rook_attacks(sq, occupied),
            Piece::Queen => magics::queen_attacks(sq, occupied),
            Piece::King => attacks::king_attacks(sq),
        };
        reach & self.pieces(piece, by)
    }

    /// Every piece of `by` that attacks `sq`, given the current occupancy.
    pub fn attackers_to(&self, sq: Square, by: Color) -> Bitboard {
        let mut attackers = Bitboard::EMPTY;
        for piece in Piece::ALL {
            attackers |= self.piece_attackers(sq, by, piece);
        }
        attackers
    }

    #[inline]
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        !self.attackers_to(sq, by).is_empty()
    }

    /// True when `color`'s king is under attack.
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king) => self.is_square_attacked(king, color.opponent()),
            None => false,
        }
    }

    fn put(&mut self, sq: Square, piece: Piece, color: Color) {
        self.squares[sq.index() as usize] = Some((piece, color));
        self.pieces[piece.index()][color.index()] |= Bitboard::from_square(sq);
    }

    fn take(&mut self, sq: Square) -> Option<(Piece, Color)> {
        let entry = self.squares[sq.index() as usize].take();
        if let Some((piece, color)) = entry {
            self.pieces[piece.index()][color.index()] =
                self.pieces[piece.index()][color.index()].without(sq);
        }
        entry
    }

    /// Applies a move without checking its legality, returning the captured
    /// piece if any. Callers are expected to pass moves produced by the move
    /// generator (or to check legality themselves via trial execution).
    pub fn make_move(&mut self, mv: &Move) -> Option<Piece> {
        let mover = mv.color;

        // En passant removes a pawn that is not on the destination square.
        let capture_square = if mv.is_en_passant {
            let behind = match mover {
                Color::White => mv.to.index().wrapping_sub(8),
                Color::Black => mv.to.index() + 8,
            };
            // Off-board values fall out of the conversion, so a malformed
            // en-passant destination captures nothing instead of panicking.
            Square::from_index(behind)
        } else if mv.is_capture {
            Some(mv.to)
        } else {
            None
        };
        let captured = capture_square.and_then(|sq| self.take(sq)).map(|(p, _)| p);

        self.take(mv.from);
        let placed = mv.promotion.unwrap_or(mv.piece);
        self.put(mv.to, placed, mover);

        if let Some(side) = mv.castle {
            let (rook_from, rook_to) = rook_castle_squares(mover, side);
            self.take(rook_from);
            self.put(rook_to, Piece::Rook, mover);
        }

        self.update_castling_rights(mv, captured);

        self.en_passant = if mv.is_double_pawn_push {
            let between = match mover {
                Color::White => mv.from.index() + 8,
                Color::Black => mv.from.index() - 8,
            };
            Square::from_index(between)
        } else {
            None
        };

        if mv.piece == Piece::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if mover == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = mover.opponent();

        captured
    }

    fn update_castling_rights(&mut self, mv: &Move, captured: Option<Piece>) {
        if mv.piece == Piece::King {
            self.castling.revoke_all(mv.color);
        } else if mv.piece == Piece::Rook {
            if let Some(side) = rook_home_side(mv.color, mv.from) {
                self.castling.revoke(mv.color, side);
            }
        }
        if captured == Some(Piece::Rook) {
            let opponent = mv.color.opponent();
            if let Some(side) = rook_home_side(opponent, mv.to) {
                self.castling.revoke(opponent, side);
            }
        }
    }
}

/// The rook's origin and destination for a castling move.
pub(crate) fn rook_castle_squares(color: Color, side: CastleSide) -> (Square, Square) {
    match (color, side) {
        (Color::White, CastleSide::King) => (Square::H1, Square::F1),
        (Color::White, CastleSide::Queen) => (Square::A1, Square::D1),
        (Color::Black, CastleSide::King) => (Square::H8, Square::F8),
        (Color::Black, CastleSide::Queen) => (Square::A8, Square::D8),
    }
}

/// If `sq` is one of `color`'s rook starting corners, the castle side it
/// guards.
fn rook_home_side(color: Color, sq: Square) -> Option<CastleSide> {
    match (color, sq) {
        (Color::White, Square::H1) => Some(CastleSide::King),
        (Color::White, Square::A1) => Some(CastleSide::Queen),
        (Color::Black, Square::H8) => Some(CastleSide::King),
        (Color::Black, Square::A8) => Some(CastleSide::Queen),
        _ => None,
    }
}

/// Renders the board as an 8x8 grid with rank 8 on top, FEN letters for
/// pieces.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                match self.squares[rank * 8 + file] {
                    Some((piece, color)) => write!(f, " {}", piece.to_fen_char(color))?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({})", self.to_fen())
    }
}
