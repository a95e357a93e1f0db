use crate::attacks;
use crate::chess_move::ChessMove;
use crate::color::Color;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::make_move::{make_move, undo_move, MoveUndo};
use crate::movegen::{generate_pseudo_legals, MoveGen, MoveList};
use crate::position::Position;
use crate::square::Square;
use tracing::trace;

/// What is the status of this game?
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Eq, Hash)]
pub enum BoardStatus {
    Ongoing,
    Stalemate,
    Checkmate,
}

/// The rules of chess, applied to a `Position` owned by the caller.
///
/// The engine holds no position of its own.  Every method that needs to try moves takes the
/// position mutably and hands it back exactly as it was.
///
/// ```
/// use chess_rules::{ChessEngine, Position};
///
/// let engine = ChessEngine::default();
/// let mut position = Position::default();
/// assert_eq!(engine.legal_moves(&mut position).len(), 20);
/// assert_eq!(engine.perft(&mut position, 3), 8902);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct ChessEngine {
    config: EngineConfig,
}

impl ChessEngine {
    pub fn new(config: EngineConfig) -> ChessEngine {
        ChessEngine { config }
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Moves that follow the piece geometry, ignoring whether they leave the king in check.
    pub fn pseudo_legal_moves(&self, position: &Position) -> MoveGen {
        MoveGen::new_pseudo_legal(position, &self.config)
    }

    /// Generate every legal move for the side to move.
    ///
    /// Each pseudo-legal candidate is applied, the mover's king is tested for check, and the move
    /// is taken back.  `position` is left exactly as it was found.
    pub fn legal_moves(&self, position: &mut Position) -> MoveGen {
        let mut candidates = MoveList::new();
        generate_pseudo_legals(position, &self.config, &mut candidates);
        let total = candidates.len();

        let mover = position.side_to_move();
        candidates.retain(|m| {
            let undo = match make_move(position, *m) {
                Ok(undo) => undo,
                Err(_) => return false,
            };
            let legal = !attacks::is_king_in_check(position, mover);
            undo_move(position, &undo);
            legal
        });

        trace!(candidates = total, legal = candidates.len(), "generated legal moves");
        MoveGen::from_list(candidates)
    }

    /// Find the legal move with the same source, destination and promotion as `chess_move`.
    ///
    /// This recovers the full flags of a move that was built from text.
    pub fn find_legal(&self, position: &mut Position, chess_move: ChessMove) -> Option<ChessMove> {
        self.legal_moves(position).find(&chess_move)
    }

    /// Is `chess_move` legal in `position`?
    pub fn is_legal(&self, position: &mut Position, chess_move: ChessMove) -> bool {
        self.legal_moves(position).contains(&chess_move)
    }

    /// Apply a move without checking that it keeps the king safe.
    #[inline]
    pub fn make_move(&self, position: &mut Position, chess_move: ChessMove) -> EngineResult<MoveUndo> {
        make_move(position, chess_move)
    }

    /// Take back a move applied by `make_move` or `make_legal_move`.
    #[inline]
    pub fn undo_move(&self, position: &mut Position, undo: &MoveUndo) {
        undo_move(position, undo)
    }

    /// Apply `chess_move` only if it is legal.  The move is matched on its squares and
    /// promotion, so one parsed from UCI text works too.
    pub fn make_legal_move(
        &self,
        position: &mut Position,
        chess_move: ChessMove,
    ) -> EngineResult<MoveUndo> {
        match self.find_legal(position, chess_move) {
            Some(legal) => make_move(position, legal),
            None => Err(EngineError::illegal(format!(
                "{} is not legal in {}",
                chess_move, position
            ))),
        }
    }

    #[inline]
    pub fn is_square_attacked(&self, position: &Position, square: Square, by: Color) -> bool {
        attacks::is_square_attacked(position, square, by)
    }

    #[inline]
    pub fn is_king_in_check(&self, position: &Position, color: Color) -> bool {
        attacks::is_king_in_check(position, color)
    }

    /// Turn UCI text into the matching legal move, with all of its flags.
    ///
    /// ```
    /// use chess_rules::{ChessEngine, EngineErrorCode, Position};
    ///
    /// let engine = ChessEngine::default();
    /// let mut position = Position::default();
    /// assert!(engine.parse_uci(&mut position, "e2e4").is_ok());
    /// assert_eq!(
    ///     engine.parse_uci(&mut position, "e2e5").unwrap_err().code(),
    ///     EngineErrorCode::IllegalMove
    /// );
    /// assert_eq!(
    ///     engine.parse_uci(&mut position, "e2").unwrap_err().code(),
    ///     EngineErrorCode::InvalidMoveFormat
    /// );
    /// ```
    pub fn parse_uci(&self, position: &mut Position, text: &str) -> EngineResult<ChessMove> {
        let parsed = ChessMove::from_uci(text)
            .map_err(|e| EngineError::invalid_format(e.to_string()))?;
        self.find_legal(position, parsed)
            .ok_or_else(|| EngineError::illegal(format!("{} is not legal in {}", text, position)))
    }

    /// Is the game over, and how?
    pub fn status(&self, position: &mut Position) -> BoardStatus {
        if self.legal_moves(position).len() > 0 {
            BoardStatus::Ongoing
        } else if attacks::is_king_in_check(position, position.side_to_move()) {
            BoardStatus::Checkmate
        } else {
            BoardStatus::Stalemate
        }
    }

    /// Count the leaf nodes of the legal move tree `depth` plies deep.
    pub fn perft(&self, position: &mut Position, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.legal_moves(position);
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut result = 0;
        for m in moves {
            if let Ok(undo) = make_move(position, m) {
                result += self.perft(position, depth - 1);
                undo_move(position, &undo);
            }
        }
        result
    }
}
