//! Forsyth-Edwards Notation parsing.
//!
//! [`FenFields`] is the structural half of FEN handling: it validates the
//! record's shape and decodes each of the six fields into plain data. Whether
//! the described position makes sense as a game state is for the consumer to
//! decide.

use thiserror::Error;

use crate::{Color, Piece, Square};

/// The FEN record of the standard starting position.
pub const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Why a FEN record failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected 6 space-separated fields, found {0}")]
    FieldCount(usize),
    #[error("expected 8 ranks in piece placement, found {0}")]
    RankCount(usize),
    #[error("rank {rank:?} does not describe exactly 8 squares")]
    RankWidth { rank: String },
    #[error("invalid piece character {0:?}")]
    InvalidPiece(char),
    #[error("invalid side to move {0:?}")]
    InvalidSideToMove(String),
    #[error("invalid castling availability {0:?}")]
    InvalidCastling(String),
    #[error("invalid en passant square {0:?}")]
    InvalidEnPassant(String),
    #[error("invalid halfmove clock {0:?}")]
    InvalidHalfmoveClock(String),
    #[error("invalid fullmove number {0:?}")]
    InvalidFullmoveNumber(String),
}

/// The six fields of a FEN record, decoded but not yet validated as a
/// playable position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenFields {
    /// Contents of each square, indexed a1 = 0 through h8 = 63.
    pub placement: [Option<(Piece, Color)>; 64],
    pub side_to_move: Color,
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl FenFields {
    /// Parses a full FEN record.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::FieldCount(fields.len()));
        }

        let placement = parse_placement(fields[0])?;

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidSideToMove(other.to_string())),
        };

        let (white_kingside, white_queenside, black_kingside, black_queenside) =
            parse_castling(fields[2])?;

        let en_passant = match fields[3] {
            "-" => None,
            s => match Square::from_algebraic(s) {
                Some(sq) => Some(sq),
                None => return Err(FenError::InvalidEnPassant(s.to_string())),
            },
        };

        let halfmove_clock = fields[4]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(fields[4].to_string()))?;
        let fullmove_number = fields[5]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidFullmoveNumber(fields[5].to_string()))?;
        if fullmove_number == 0 {
            return Err(FenError::InvalidFullmoveNumber(fields[5].to_string()));
        }

        Ok(FenFields {
            placement,
            side_to_move,
            white_kingside,
            white_queenside,
            black_kingside,
            black_queenside,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }
}

fn parse_placement(field: &str) -> Result<[Option<(Piece, Color)>; 64], FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    let mut placement = [None; 64];
    // FEN lists ranks from 8 down to 1.
    for (row, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - row as u8;
        let mut file = 0u8;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                if skip == 0 || skip > 8 {
                    return Err(FenError::InvalidPiece(c));
                }
                file += skip as u8;
                if file > 8 {
                    return Err(FenError::RankWidth {
                        rank: rank_str.to_string(),
                    });
                }
            } else {
                let piece =
                    Piece::from_letter(c.to_ascii_uppercase()).ok_or(FenError::InvalidPiece(c))?;
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                if file >= 8 {
                    return Err(FenError::RankWidth {
                        rank: rank_str.to_string(),
                    });
                }
                placement[(rank * 8 + file) as usize] = Some((piece, color));
                file += 1;
            }
        }
        if file != 8 {
            return Err(FenError::RankWidth {
                rank: rank_str.to_string(),
            });
        }
    }
    Ok(placement)
}

fn parse_castling(field: &str) -> Result<(bool, bool, bool, bool), FenError> {
    if field == "-" {
        return Ok((false, false, false, false));
    }
    let (mut wk, mut wq, mut bk, mut bq) = (false, false, false, false);
    for c in field.chars() {
        match c {
            'K' => wk = true,
            'Q' => wq = true,
            'k' => bk = true,
            'q' => bq = true,
            _ => return Err(FenError::InvalidCastling(field.to_string())),
        }
    }
    Ok((wk, wq, bk, bq))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_starting_position() {
        let fields = FenFields::parse(STARTPOS).unwrap();
        assert_eq!(fields.side_to_move, Color::White);
        assert!(fields.white_kingside && fields.black_queenside);
        assert_eq!(fields.en_passant, None);
        assert_eq!(fields.halfmove_clock, 0);
        assert_eq!(fields.fullmove_number, 1);
        assert_eq!(
            fields.placement[Square::E1.index() as usize],
            Some((Piece::King, Color::White))
        );
        assert_eq!(
            fields.placement[Square::from_algebraic("d8").unwrap().index() as usize],
            Some((Piece::Queen, Color::Black))
        );
        assert_eq!(
            fields.placement[Square::from_algebraic("e4").unwrap().index() as usize],
            None
        );
    }

    #[test]
    fn parses_en_passant_and_clocks() {
        let fen = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 3 12";
        let fields = FenFields::parse(fen).unwrap();
        assert_eq!(fields.en_passant, Square::from_algebraic("e6"));
        assert_eq!(fields.halfmove_clock, 3);
        assert_eq!(fields.fullmove_number, 12);
    }

    #[test]
    fn rejects_malformed_records() {
        assert!(matches!(
            FenFields::parse("8/8/8/8 w - - 0 1"),
            Err(FenError::RankCount(4))
        ));
        assert!(matches!(
            FenFields::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0"),
            Err(FenError::FieldCount(5))
        ));
        assert!(matches!(
            FenFields::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1"),
            Err(FenError::InvalidPiece('X'))
        ));
        assert!(matches!(
            FenFields::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1"),
            Err(FenError::InvalidSideToMove(_))
        ));
        assert!(matches!(
            FenFields::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQxq - 0 1"),
            Err(FenError::InvalidCastling(_))
        ));
        assert!(matches!(
            FenFields::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9 0 1"),
            Err(FenError::InvalidEnPassant(_))
        ));
        assert!(matches!(
            FenFields::parse("rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::RankWidth { .. })
        ));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn parsing_arbitrary_strings_never_panics(s in "\\PC*") {
                let _ = FenFields::parse(&s);
            }
        }
    }
}
