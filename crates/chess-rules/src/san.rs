//! Standard Algebraic Notation.
//!
//! Rendering and parsing both work against the legal move list for the
//! position, so a SAN string is accepted exactly when it names a legal move
//! unambiguously. En passant captures are rendered with a trailing " e.p."
//! marker; the parser tolerates and discards it, along with check and
//! annotation suffixes.

use thiserror::Error;

use chess_types::{CastleSide, Move, Piece, Square};

use crate::{movegen, Position};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SanError {
    #[error("cannot parse {0:?} as a move")]
    Malformed(String),
    #[error("{0:?} is not a legal move in this position")]
    NoMatch(String),
    #[error("{0:?} matches more than one legal move")]
    Ambiguous(String),
}

/// Renders a move in SAN. `position` must be the position the move is
/// played from.
pub fn move_to_san(position: &Position, mv: &Move) -> String {
    let mut san = match mv.castle {
        Some(CastleSide::King) => "O-O".to_string(),
        Some(CastleSide::Queen) => "O-O-O".to_string(),
        None if mv.piece == Piece::Pawn => pawn_san(mv),
        None => piece_san(position, mv),
    };
    san.push_str(check_suffix(position, mv));
    if mv.is_en_passant {
        san.push_str(" e.p.");
    }
    san
}

fn pawn_san(mv: &Move) -> String {
    let mut san = String::new();
    if mv.is_capture {
        san.push(mv.from.file().to_char());
        san.push('x');
    }
    san.push_str(&mv.to.to_algebraic());
    if let Some(promotion) = mv.promotion {
        san.push('=');
        san.push(promotion.letter());
    }
    san
}

fn piece_san(position: &Position, mv: &Move) -> String {
    let mut san = String::new();
    san.push(mv.piece.letter());
    san.push_str(&disambiguation(position, mv));
    if mv.is_capture {
        san.push('x');
    }
    san.push_str(&mv.to.to_algebraic());
    san
}

/// The minimal origin hint: nothing if no other piece of the same kind can
/// legally reach the destination, otherwise the file, falling back to the
/// rank and finally the full square.
fn disambiguation(position: &Position, mv: &Move) -> String {
    let rivals: Vec<Square> = movegen::legal_moves(position)
        .iter()
        .filter(|other| other.piece == mv.piece && other.to == mv.to && other.from != mv.from)
        .map(|other| other.from)
        .collect();
    if rivals.is_empty() {
        return String::new();
    }
    if rivals.iter().all(|sq| sq.file() != mv.from.file()) {
        return mv.from.file().to_char().to_string();
    }
    if rivals.iter().all(|sq| sq.rank() != mv.from.rank()) {
        return mv.from.rank().to_char().to_string();
    }
    mv.from.to_algebraic()
}

fn check_suffix(position: &Position, mv: &Move) -> &'static str {
    let mut next = position.clone();
    next.make_move(mv);
    let opponent = mv.color.opponent();
    if !next.is_in_check(opponent) {
        return "";
    }
    if movegen::legal_moves(&next).is_empty() {
        "#"
    } else {
        "+"
    }
}

/// Parses a SAN string against the position's legal moves.
pub fn san_to_move(position: &Position, san: &str) -> Result<Move, SanError> {
    let body = strip_suffixes(san);
    if body.is_empty() {
        return Err(SanError::Malformed(san.to_string()));
    }

    if let Some(side) = castle_side(body) {
        return movegen::legal_moves(position)
            .into_iter()
            .find(|mv| mv.castle == Some(side))
            .ok_or_else(|| SanError::NoMatch(san.to_string()));
    }

    let pattern = Pattern::parse(body).ok_or_else(|| SanError::Malformed(san.to_string()))?;
    let mut matches = movegen::legal_moves(position)
        .into_iter()
        .filter(|mv| pattern.admits(mv));

    let first = matches.next().ok_or_else(|| SanError::NoMatch(san.to_string()))?;
    if matches.next().is_some() {
        return Err(SanError::Ambiguous(san.to_string()));
    }
    Ok(first)
}

/// Drops check marks, annotation glyphs, and the en passant marker.
fn strip_suffixes(san: &str) -> &str {
    let mut body = san.trim();
    loop {
        let before = body;
        body = body
            .trim_end_matches("e.p.")
            .trim_end()
            .trim_end_matches(['+', '#', '!', '?']);
        if body == before {
            return body;
        }
    }
}

fn castle_side(body: &str) -> Option<CastleSide> {
    match body {
        "O-O" | "0-0" => Some(CastleSide::King),
        "O-O-O" | "0-0-0" => Some(CastleSide::Queen),
        _ => None,
    }
}

/// The constraints a SAN body places on a move.
struct Pattern {
    piece: Piece,
    to: Square,
    from_file: Option<char>,
    from_rank: Option<char>,
    capture: bool,
    promotion: Option<Piece>,
}

impl Pattern {
    fn parse(body: &str) -> Option<Pattern> {
        let mut chars: Vec<char> = body.chars().collect();

        let promotion = if chars.len() >= 2 && chars[chars.len() - 2] == '=' {
            let piece = Piece::from_letter(chars[chars.len() - 1])?;
            chars.truncate(chars.len() - 2);
            Some(piece)
        } else {
            None
        };

        if chars.len() < 2 {
            return None;
        }
        let to = {
            let rank = chars.pop()?;
            let file = chars.pop()?;
            Square::from_algebraic(&format!("{file}{rank}"))?
        };

        let piece = match chars.first() {
            Some(&c) if c.is_ascii_uppercase() => {
                chars.remove(0);
                Piece::from_letter(c)?
            }
            _ => Piece::Pawn,
        };
        if promotion.is_some() && piece != Piece::Pawn {
            return None;
        }

        let mut from_file = None;
        let mut from_rank = None;
        let mut capture = false;
        for c in chars {
            match c {
                'x' => capture = true,
                'a'..='h' if from_file.is_none() => from_file = Some(c),
                '1'..='8' if from_rank.is_none() => from_rank = Some(c),
                _ => return None,
            }
        }

        Some(Pattern {
            piece,
            to,
            from_file,
            from_rank,
            capture,
            promotion,
        })
    }

    fn admits(&self, mv: &Move) -> bool {
        mv.piece == self.piece
            && mv.to == self.to
            && mv.promotion == self.promotion
            && self.from_file.map_or(true, |f| mv.from.file().to_char() == f)
            && self.from_rank.map_or(true, |r| mv.from.rank().to_char() == r)
            && (!self.capture || mv.is_capture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn play(position: &mut Position, san: &str) -> Move {
        let mv = san_to_move(position, san).unwrap();
        position.make_move(&mv);
        mv
    }

    #[test]
    fn renders_basic_moves() {
        let pos = Position::startpos();
        let e4 = san_to_move(&pos, "e4").unwrap();
        assert_eq!(move_to_san(&pos, &e4), "e4");
        let nf3 = san_to_move(&pos, "Nf3").unwrap();
        assert_eq!(move_to_san(&pos, &nf3), "Nf3");
    }

    #[test]
    fn parse_and_render_round_trip() {
        let mut pos = Position::startpos();
        for san in ["e4", "e5", "Nf3", "Nc6", "Bb5", "a6", "Bxc6", "dxc6", "O-O"] {
            let mv = san_to_move(&pos, san).unwrap();
            assert_eq!(move_to_san(&pos, &mv), san);
            pos.make_move(&mv);
        }
    }

    #[test]
    fn scholars_mate_ends_with_mate_mark() {
        let mut pos = Position::startpos();
        for san in ["e4", "e5", "Bc4", "Nc6", "Qh5", "Nf6"] {
            play(&mut pos, san);
        }
        let mate = san_to_move(&pos, "Qxf7#").unwrap();
        assert_eq!(move_to_san(&pos, &mate), "Qxf7#");
        assert!(mate.is_capture);
    }

    #[test]
    fn file_disambiguation() {
        // Knights on b1 and f3 both reach d2.
        let pos = Position::from_fen("4k3/8/8/8/8/5N2/8/1N2K3 w - - 0 1").unwrap();
        let mv = san_to_move(&pos, "Nbd2").unwrap();
        assert_eq!(mv.from, sq("b1"));
        assert_eq!(move_to_san(&pos, &mv), "Nbd2");
        assert!(matches!(
            san_to_move(&pos, "Nd2"),
            Err(SanError::Ambiguous(_))
        ));
    }

    #[test]
    fn rank_disambiguation() {
        // Rooks on a1 and a5 both reach a3 along the same file.
        let pos = Position::from_fen("4k3/8/8/R7/8/8/8/R3K3 w - - 0 1").unwrap();
        let mv = san_to_move(&pos, "R1a3").unwrap();
        assert_eq!(mv.from, Square::A1);
        assert_eq!(move_to_san(&pos, &mv), "R1a3");
    }

    #[test]
    fn en_passant_marker() {
        let pos =
            Position::from_fen("rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PP1/RNBQKBNR b KQkq e3 0 3")
                .unwrap();
        let mv = san_to_move(&pos, "dxe3").unwrap();
        assert!(mv.is_en_passant);
        assert_eq!(move_to_san(&pos, &mv), "dxe3 e.p.");
        // The marker is also accepted on input.
        assert_eq!(san_to_move(&pos, "dxe3 e.p.").unwrap(), mv);
    }

    #[test]
    fn promotion_notation() {
        let pos = Position::from_fen("8/P7/8/8/8/8/k6K/8 w - - 0 1").unwrap();
        let mv = san_to_move(&pos, "a8=Q").unwrap();
        assert_eq!(mv.promotion, Some(Piece::Queen));
        assert_eq!(move_to_san(&pos, &mv), "a8=Q");
        let under = san_to_move(&pos, "a8=N").unwrap();
        assert_eq!(under.promotion, Some(Piece::Knight));
    }

    #[test]
    fn rejects_garbage_and_illegal_moves() {
        let pos = Position::startpos();
        assert!(matches!(
            san_to_move(&pos, "zz9"),
            Err(SanError::Malformed(_))
        ));
        assert!(matches!(san_to_move(&pos, ""), Err(SanError::Malformed(_))));
        assert!(matches!(
            san_to_move(&pos, "Qd5"),
            Err(SanError::NoMatch(_))
        ));
        assert!(matches!(
            san_to_move(&pos, "exd5"),
            Err(SanError::NoMatch(_))
        ));
    }

    #[test]
    fn check_suffix_rendered() {
        let mut pos = Position::startpos();
        for san in ["e4", "e5", "Qh5", "Nc6"] {
            play(&mut pos, san);
        }
        let check = san_to_move(&pos, "Qxf7+").unwrap();
        assert_eq!(move_to_san(&pos, &check), "Qxf7+");
    }
}
