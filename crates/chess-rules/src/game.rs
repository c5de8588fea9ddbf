//! The game aggregate.
//!
//! [`Game`] wraps a [`Position`] with everything a full game needs on top of
//! single-position rules: move and notation history, per-ply FEN and Zobrist
//! hash records, captured piece lists, automatic end-of-game detection, and
//! external termination (resignation, agreed draws, timeouts).
//!
//! Once a game has an outcome it is frozen; further moves are rejected.

use thiserror::Error;

use chess_types::{Color, FenError, Move, Piece, Square};

use crate::outcome::{is_dead_position, GameEndReason, GameOutcome};
use crate::san::{self, SanError};
use crate::{movegen, Position};

/// Fifty-move counter threshold, in halfmoves.
const HALFMOVE_DRAW_THRESHOLD: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("the game is already over ({0})")]
    GameOver(GameOutcome),
    #[error("{0:?} is not a legal move in this position")]
    IllegalMove(String),
    #[error(transparent)]
    Notation(#[from] SanError),
    #[error(transparent)]
    Fen(#[from] FenError),
}

/// A played move together with the notation it was recorded under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedMove {
    pub mv: Move,
    pub san: String,
}

/// Read-only snapshot handed to the observer after every state change.
pub struct GameState<'a> {
    pub position: &'a Position,
    pub last_move: Option<&'a RecordedMove>,
    /// Legal moves available to the side to move. Empty once the game is
    /// over.
    pub legal_moves: &'a [Move],
    /// Pieces captured by White and Black, indexed by [`Color::index`].
    pub captured: [&'a [Piece]; 2],
    pub moves: &'a [RecordedMove],
    /// FEN of every position reached, the initial one first.
    pub fens: &'a [String],
    pub outcome: Option<GameOutcome>,
    pub ply: usize,
}

type Observer = Box<dyn FnMut(&GameState<'_>)>;

pub struct Game {
    position: Position,
    /// Legal moves in the current position, refreshed on every commit.
    /// Emptied once the game is over.
    legal: Vec<Move>,
    moves: Vec<RecordedMove>,
    /// FEN of every position reached, starting with the initial one.
    fens: Vec<String>,
    /// Zobrist hash of every position reached, aligned with `fens`.
    hashes: Vec<u64>,
    /// Pieces captured by each color.
    captured: [Vec<Piece>; 2],
    outcome: Option<GameOutcome>,
    observer: Option<Observer>,
}

impl Game {
    /// A new game from the standard starting position.
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    /// A game starting from an arbitrary FEN record.
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        Ok(Self::from_position(Position::from_fen(fen)?))
    }

    /// Replays a sequence of SAN moves from the starting position.
    pub fn from_moves<S: AsRef<str>>(sans: &[S]) -> Result<Self, GameError> {
        let mut game = Game::new();
        for san in sans {
            game.play_san(san.as_ref())?;
        }
        Ok(game)
    }

    /// A game starting from an already built position. The position can
    /// already be decided (a mate or a dead position loaded from FEN), in
    /// which case the game starts concluded.
    pub fn from_position(position: Position) -> Self {
        let fen = position.to_fen();
        let hash = position.zobrist_hash();
        let mut game = Game {
            position,
            legal: Vec::new(),
            moves: Vec::new(),
            fens: vec![fen],
            hashes: vec![hash],
            captured: [Vec::new(), Vec::new()],
            outcome: None,
            observer: None,
        };
        game.refresh();
        game
    }

    /// Regenerates the legal move cache and recomputes the outcome.
    fn refresh(&mut self) {
        self.legal = movegen::legal_moves(&self.position);
        self.outcome = self.detect_outcome();
        if self.outcome.is_some() {
            self.legal.clear();
        }
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Number of halfmoves played so far.
    #[inline]
    pub fn ply(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn moves(&self) -> &[RecordedMove] {
        &self.moves
    }

    /// The FEN of every position reached, the initial position first.
    pub fn fen_history(&self) -> &[String] {
        &self.fens
    }

    /// The Zobrist hash of every position reached, aligned with
    /// [`Game::fen_history`].
    pub fn hash_history(&self) -> &[u64] {
        &self.hashes
    }

    /// Pieces captured by `color`, in capture order. En passant victims are
    /// included.
    pub fn captured_by(&self, color: Color) -> &[Piece] {
        &self.captured[color.index()]
    }

    /// All legal moves in the current position. Empty once the game is over.
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal
    }

    /// Registers a callback invoked after every committed move and after
    /// external termination. Replaces any previous observer.
    pub fn set_observer<F>(&mut self, observer: F)
    where
        F: FnMut(&GameState<'_>) + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Plays a move given by origin, destination, and promotion piece.
    pub fn play(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Result<&RecordedMove, GameError> {
        self.ensure_active()?;
        let mv = self
            .legal
            .iter()
            .copied()
            .find(|mv| mv.from == from && mv.to == to && mv.promotion == promotion)
            .ok_or_else(|| {
                let promo = promotion.map(|p| p.letter().to_ascii_lowercase());
                GameError::IllegalMove(match promo {
                    Some(p) => format!("{from}{to}{p}"),
                    None => format!("{from}{to}"),
                })
            })?;
        self.commit(mv);
        Ok(self.last_move_record())
    }

    /// Plays a move given in SAN.
    pub fn play_san(&mut self, san: &str) -> Result<&RecordedMove, GameError> {
        self.ensure_active()?;
        let mv = san::san_to_move(&self.position, san)?;
        self.commit(mv);
        Ok(self.last_move_record())
    }

    /// Ends the game by resignation.
    pub fn resign(&mut self, color: Color) -> Result<(), GameError> {
        self.ensure_active()?;
        self.outcome = Some(GameOutcome::resignation(color));
        self.legal.clear();
        self.notify();
        Ok(())
    }

    /// Ends the game with an externally decided outcome (agreed draw, loss
    /// on time, adjudication).
    pub fn set_outcome(&mut self, outcome: GameOutcome) -> Result<(), GameError> {
        self.ensure_active()?;
        self.outcome = Some(outcome);
        self.legal.clear();
        self.notify();
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), GameError> {
        match self.outcome {
            Some(outcome) => Err(GameError::GameOver(outcome)),
            None => Ok(()),
        }
    }

    /// Applies an already validated move and updates every history.
    fn commit(&mut self, mv: Move) {
        let san = san::move_to_san(&self.position, &mv);
        let captured = self.position.make_move(&mv);
        if let Some(piece) = captured {
            self.captured[mv.color.index()].push(piece);
        }
        self.moves.push(RecordedMove { mv, san });
        self.fens.push(self.position.to_fen());
        self.hashes.push(self.position.zobrist_hash());
        self.refresh();
        self.notify();
    }

    /// Checks the board-state end conditions, most specific first:
    /// checkmate, stalemate, the fifty-move rule, threefold repetition, and
    /// dead position. Relies on `self.legal` being current.
    fn detect_outcome(&self) -> Option<GameOutcome> {
        let to_move = self.position.side_to_move();
        if self.legal.is_empty() {
            return Some(if self.position.is_in_check(to_move) {
                GameOutcome::checkmate(to_move.opponent())
            } else {
                GameOutcome::draw(GameEndReason::Stalemate)
            });
        }
        if self.position.halfmove_clock() >= HALFMOVE_DRAW_THRESHOLD {
            return Some(GameOutcome::draw(GameEndReason::FiftyMoveRule));
        }
        if self.repetition_count() >= 3 {
            return Some(GameOutcome::draw(GameEndReason::ThreefoldRepetition));
        }
        if is_dead_position(&self.position) {
            return Some(GameOutcome::draw(GameEndReason::DeadPosition));
        }
        None
    }

    /// How many times the current position has occurred, counting itself.
    fn repetition_count(&self) -> usize {
        let current = match self.hashes.last() {
            Some(hash) => *hash,
            None => return 0,
        };
        self.hashes.iter().filter(|&&h| h == current).count()
    }

    fn last_move_record(&self) -> &RecordedMove {
        // Only called right after a commit.
        &self.moves[self.moves.len() - 1]
    }

    fn notify(&mut self) {
        if let Some(mut observer) = self.observer.take() {
            let state = GameState {
                position: &self.position,
                last_move: self.moves.last(),
                legal_moves: &self.legal,
                captured: [&self.captured[0], &self.captured[1]],
                moves: &self.moves,
                fens: &self.fens,
                outcome: self.outcome,
                ply: self.moves.len(),
            };
            observer(&state);
            self.observer = Some(observer);
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
