//! 64-bit board sets.
//!
//! One bit per square, little-endian rank-file order (bit 0 = a1, bit 63 =
//! h8). All the usual set algebra is available through the bitwise operator
//! impls; iteration yields squares from a1 upward.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use chess_types::{File, Rank, Square};

/// A set of squares packed into a `u64`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const FULL: Bitboard = Bitboard(u64::MAX);

    pub const FILE_A: Bitboard = Bitboard(0x0101_0101_0101_0101);
    pub const FILE_H: Bitboard = Bitboard(0x8080_8080_8080_8080);
    pub const RANK_1: Bitboard = Bitboard(0x0000_0000_0000_00ff);
    pub const RANK_8: Bitboard = Bitboard(0xff00_0000_0000_0000);

    /// The singleton set containing one square.
    #[inline]
    pub const fn from_square(sq: Square) -> Self {
        Bitboard(1u64 << sq.index())
    }

    /// All squares on the given file.
    #[inline]
    pub const fn file(file: File) -> Self {
        Bitboard(Self::FILE_A.0 << file.index())
    }

    /// All squares on the given rank.
    #[inline]
    pub const fn rank(rank: Rank) -> Self {
        Bitboard(Self::RANK_1.0 << (rank.index() * 8))
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        self.0 & (1u64 << sq.index()) != 0
    }

    /// Number of squares in the set.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// This set with `sq` added.
    #[inline]
    pub const fn with(self, sq: Square) -> Self {
        Bitboard(self.0 | (1u64 << sq.index()))
    }

    /// This set with `sq` removed.
    #[inline]
    pub const fn without(self, sq: Square) -> Self {
        Bitboard(self.0 & !(1u64 << sq.index()))
    }

    /// The lowest square in the set, if any.
    #[inline]
    pub fn first(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            // trailing_zeros of a nonzero u64 is < 64
            Some(unsafe { Square::from_index_unchecked(self.0.trailing_zeros() as u8) })
        }
    }

    /// Removes and returns the lowest square in the set.
    #[inline]
    pub fn pop(&mut self) -> Option<Square> {
        let sq = self.first()?;
        self.0 &= self.0 - 1;
        Some(sq)
    }

    /// Shifts every square one rank toward rank 8.
    #[inline]
    pub const fn north(self) -> Self {
        Bitboard(self.0 << 8)
    }

    /// Shifts every square one rank toward rank 1.
    #[inline]
    pub const fn south(self) -> Self {
        Bitboard(self.0 >> 8)
    }
}

impl BitAnd for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitXor for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitxor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl Not for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.0 &= rhs.0;
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.0 |= rhs.0;
    }
}

impl BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Bitboard) {
        self.0 ^= rhs.0;
    }
}

impl Iterator for Bitboard {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        self.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.count() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Bitboard {}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitboard({:#018x})", self.0)
    }
}

/// Renders the board as an 8x8 grid with rank 8 on top.
impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let bit = 1u64 << (rank * 8 + file);
                write!(f, "{}", if self.0 & bit != 0 { " x" } else { " ." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singleton_and_membership() {
        let e4 = Square::from_algebraic("e4").unwrap();
        let bb = Bitboard::from_square(e4);
        assert!(bb.contains(e4));
        assert_eq!(bb.count(), 1);
        assert!(!bb.contains(Square::A1));
        assert_eq!(bb.0, 1u64 << 28);
    }

    #[test]
    fn set_algebra() {
        let a = Bitboard::from_square(Square::A1);
        let b = Bitboard::from_square(Square::H8);
        let both = a | b;
        assert_eq!(both.count(), 2);
        assert_eq!(both & a, a);
        assert!((both ^ a).contains(Square::H8));
        assert!(!(both ^ a).contains(Square::A1));
        assert_eq!((!Bitboard::EMPTY).count(), 64);
    }

    #[test]
    fn iteration_is_ascending() {
        let bb = Bitboard::from_square(Square::H8)
            .with(Square::A1)
            .with(Square::E1);
        let squares: Vec<Square> = bb.collect();
        assert_eq!(squares, vec![Square::A1, Square::E1, Square::H8]);
    }

    #[test]
    fn file_and_rank_masks() {
        assert_eq!(Bitboard::file(File::A), Bitboard::FILE_A);
        assert_eq!(Bitboard::rank(Rank::FIRST), Bitboard::RANK_1);
        assert_eq!(Bitboard::file(File::E).count(), 8);
        assert!(Bitboard::file(File::E).contains(Square::from_algebraic("e7").unwrap()));
        assert!(Bitboard::rank(Rank::FOURTH).contains(Square::from_algebraic("c4").unwrap()));
    }

    #[test]
    fn shifts() {
        let e4 = Bitboard::from_square(Square::from_algebraic("e4").unwrap());
        assert!(e4.north().contains(Square::from_algebraic("e5").unwrap()));
        assert!(e4.south().contains(Square::from_algebraic("e3").unwrap()));
        assert_eq!(Bitboard::RANK_8.north(), Bitboard::EMPTY);
    }
}
