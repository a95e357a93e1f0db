use crate::color::Color;
use crate::piece::{ColoredPiece, Piece};
use crate::square::{Square, ALL_SQUARES, NUM_SQUARES};

/// A 64 slot piece store.  Each square holds at most one piece, and exactly the squares that
/// were set are occupied.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct Board {
    squares: [Option<ColoredPiece>; NUM_SQUARES],
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl Board {
    /// An empty board.
    #[inline]
    pub fn new() -> Board {
        Board {
            squares: [None; NUM_SQUARES],
        }
    }

    /// What piece is on a particular `Square`?  Is there even one?
    #[inline]
    pub fn piece_on(&self, square: Square) -> Option<ColoredPiece> {
        self.squares[square.to_index()]
    }

    /// Put a piece on a square, replacing whatever was there.
    #[inline]
    pub fn set_piece(&mut self, square: Square, piece: ColoredPiece) {
        self.squares[square.to_index()] = Some(piece);
    }

    /// Remove whatever is on a square, and return it.
    #[inline]
    pub fn clear_square(&mut self, square: Square) -> Option<ColoredPiece> {
        self.squares[square.to_index()].take()
    }

    /// Empty the whole board.
    #[inline]
    pub fn clear(&mut self) {
        self.squares = [None; NUM_SQUARES];
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.squares[square.to_index()].is_none()
    }

    /// Is there a `piece` of `color` on `square`?
    #[inline]
    pub fn has(&self, square: Square, piece: Piece, color: Color) -> bool {
        match self.squares[square.to_index()] {
            Some(p) => p.is(piece, color),
            None => false,
        }
    }

    /// Every occupied square and its piece, in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, ColoredPiece)> + '_ {
        ALL_SQUARES
            .iter()
            .filter_map(move |&sq| self.squares[sq.to_index()].map(|p| (sq, p)))
    }

    /// Every square occupied by `color`, in index order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, ColoredPiece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// Where is the king of `color`, if there is one?
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.is(Piece::King, color))
            .map(|(sq, _)| sq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_clear() {
        let mut board = Board::new();
        let knight = ColoredPiece::new(Piece::Knight, Color::Black);
        assert!(board.is_empty(Square::F6));
        board.set_piece(Square::F6, knight);
        assert_eq!(board.piece_on(Square::F6), Some(knight));
        assert!(board.has(Square::F6, Piece::Knight, Color::Black));
        assert!(!board.has(Square::F6, Piece::Knight, Color::White));
        assert_eq!(board.clear_square(Square::F6), Some(knight));
        assert_eq!(board.clear_square(Square::F6), None);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn enumerate_in_index_order() {
        let mut board = Board::new();
        board.set_piece(Square::E8, ColoredPiece::new(Piece::King, Color::Black));
        board.set_piece(Square::E1, ColoredPiece::new(Piece::King, Color::White));
        board.set_piece(Square::D1, ColoredPiece::new(Piece::Queen, Color::White));
        let squares: Vec<Square> = board.pieces().map(|(sq, _)| sq).collect();
        assert_eq!(squares, vec![Square::D1, Square::E1, Square::E8]);
        assert_eq!(board.pieces_of(Color::Black).count(), 1);
        assert_eq!(board.find_king(Color::White), Some(Square::E1));
        board.clear();
        assert_eq!(board.find_king(Color::White), None);
    }
}
