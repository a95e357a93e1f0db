use crate::chess_move::ChessMove;
use crate::config::EngineConfig;
use crate::movegen::piece_type::*;
use crate::piece::Piece;
use crate::position::Position;
use arrayvec::ArrayVec;
use std::iter::ExactSizeIterator;

/// Room for every pseudo-legal move of any position reachable with at most 16 pieces per side.
pub const MAX_MOVES: usize = 384;

/// A fixed-capacity list of moves that lives on the stack.
pub type MoveList = ArrayVec<ChessMove, MAX_MOVES>;

/// Generate the pseudo-legal moves of every piece of `color` into `movelist`.
///
/// Pieces are visited in square index order (a1, b1, ... h8).  The moves of one piece are kept
/// together, with castling after the king's single steps.
pub(crate) fn generate_pseudo_legals(
    position: &Position,
    config: &EngineConfig,
    movelist: &mut MoveList,
) {
    let color = position.side_to_move();
    for (src, piece) in position.pieces_of(color) {
        match piece.piece {
            Piece::Pawn => PawnType::pseudo_legals(position, src, color, movelist),
            Piece::Knight => KnightType::pseudo_legals(position, src, color, movelist),
            Piece::Bishop => BishopType::pseudo_legals(position, src, color, movelist),
            Piece::Rook => RookType::pseudo_legals(position, src, color, movelist),
            Piece::Queen => QueenType::pseudo_legals(position, src, color, movelist),
            Piece::King => {
                KingType::pseudo_legals(position, src, color, movelist);
                KingType::castle_moves(position, src, color, config.strict_castling(), movelist);
            }
        }
    }
}

/// An iterator over a generated set of moves.
///
/// `MoveGen::new_pseudo_legal` yields every move that follows the piece geometry for the side to
/// move, including ones that leave its own king in check.  Use `ChessEngine::legal_moves` for the
/// filtered set.
///
/// ```
/// use chess_rules::{EngineConfig, MoveGen, Position};
///
/// let position = Position::default();
/// let movegen = MoveGen::new_pseudo_legal(&position, &EngineConfig::default());
/// assert_eq!(movegen.len(), 20);
/// ```
#[derive(Clone, Debug)]
pub struct MoveGen {
    moves: MoveList,
    index: usize,
}

impl MoveGen {
    /// Generate all pseudo-legal moves for the side to move.
    pub fn new_pseudo_legal(position: &Position, config: &EngineConfig) -> MoveGen {
        let mut moves = MoveList::new();
        generate_pseudo_legals(position, config, &mut moves);
        MoveGen { moves, index: 0 }
    }

    pub(crate) fn from_list(moves: MoveList) -> MoveGen {
        MoveGen { moves, index: 0 }
    }

    /// The moves not yet iterated, in generation order.
    pub fn as_slice(&self) -> &[ChessMove] {
        &self.moves[self.index..]
    }

    /// Is `chess_move` among the remaining moves?
    pub fn contains(&self, chess_move: &ChessMove) -> bool {
        self.as_slice().contains(chess_move)
    }

    /// Never iterate this move.  Returns false if it was not in the list.
    pub fn remove_move(&mut self, chess_move: ChessMove) -> bool {
        match self.as_slice().iter().position(|m| *m == chess_move) {
            Some(i) => {
                self.moves.remove(self.index + i);
                true
            }
            None => false,
        }
    }

    /// Find the remaining move going from `source` to `dest`, with the matching promotion piece.
    pub fn find(&self, probe: &ChessMove) -> Option<ChessMove> {
        self.as_slice().iter().find(|m| m.same_path(probe)).copied()
    }

    /// Run a perft on the pseudo-legal tree.  Mostly useful to compare against the legal count.
    pub fn pseudo_legal_perft(position: &mut Position, config: &EngineConfig, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = MoveGen::new_pseudo_legal(position, config);
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut result = 0;
        for m in moves {
            if let Ok(undo) = crate::make_move::make_move(position, m) {
                result += MoveGen::pseudo_legal_perft(position, config, depth - 1);
                crate::make_move::undo_move(position, &undo);
            }
        }
        result
    }
}

impl ExactSizeIterator for MoveGen {
    /// Give the exact length of this iterator
    fn len(&self) -> usize {
        self.moves.len() - self.index
    }
}

impl Iterator for MoveGen {
    type Item = ChessMove;

    /// Give a size_hint to some functions that need it
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }

    fn next(&mut self) -> Option<ChessMove> {
        let result = self.moves.get(self.index).copied();
        if result.is_some() {
            self.index += 1;
        }
        result
    }
}
