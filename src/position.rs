use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::Error;
use crate::file::ALL_FILES;
use crate::piece::{ColoredPiece, Piece};
use crate::square::Square;

const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

/// A board plus everything else needed to know whose move it is and what they may do: side to
/// move, castle rights, en-passant target, halfmove clock and fullmove number.
///
/// Play through a position with `make_move` and `undo_move`.  The setters here exist for setting
/// up a position (for example, while loading a FEN) and are not needed during play.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Position {
    board: Board,
    side_to_move: Color,
    castle_rights: CastleRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Default for Position {
    /// The standard starting position.
    ///
    /// ```
    /// use chess_rules::Position;
    ///
    /// assert_eq!(
    ///     Position::default().to_string(),
    ///     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    /// );
    /// ```
    fn default() -> Position {
        let mut position = Position::empty();
        for (&file, &piece) in ALL_FILES.iter().zip(BACK_RANK.iter()) {
            for &color in [Color::White, Color::Black].iter() {
                position.set_piece(
                    Square::make_square(color.to_my_backrank(), file),
                    ColoredPiece::new(piece, color),
                );
                position.set_piece(
                    Square::make_square(color.to_second_rank(), file),
                    ColoredPiece::new(Piece::Pawn, color),
                );
            }
        }
        position.castle_rights = CastleRights::ALL;
        position
    }
}

impl Position {
    /// An empty board, white to move, no castle rights, clocks at 0 and 1.
    pub fn empty() -> Position {
        Position {
            board: Board::new(),
            side_to_move: Color::White,
            castle_rights: CastleRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Empty the board and reset all of the state to that of `Position::empty()`.
    pub fn clear(&mut self) {
        *self = Position::empty();
    }

    /// Grab the underlying piece store.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn piece_on(&self, square: Square) -> Option<ColoredPiece> {
        self.board.piece_on(square)
    }

    /// Is there a `piece` of `color` on `square`?
    #[inline]
    pub fn has(&self, square: Square, piece: Piece, color: Color) -> bool {
        self.board.has(square, piece, color)
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.board.is_empty(square)
    }

    #[inline]
    pub fn set_piece(&mut self, square: Square, piece: ColoredPiece) {
        self.board.set_piece(square, piece);
    }

    #[inline]
    pub fn clear_square(&mut self, square: Square) -> Option<ColoredPiece> {
        self.board.clear_square(square)
    }

    /// Every occupied square and its piece, in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, ColoredPiece)> + '_ {
        self.board.pieces()
    }

    /// Every square occupied by `color`, in index order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, ColoredPiece)> + '_ {
        self.board.pieces_of(color)
    }

    /// Who's turn is it?
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castle_rights(&self) -> CastleRights {
        self.castle_rights
    }

    /// The square a pawn skipped over with its last two square push, if any.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Half moves since the last pawn move or capture.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Starts at 1 and goes up after every black move.
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[inline]
    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    #[inline]
    pub fn set_castle_rights(&mut self, rights: CastleRights) {
        self.castle_rights = rights;
    }

    #[inline]
    pub fn set_en_passant(&mut self, square: Option<Square>) {
        self.en_passant = square;
    }

    /// Set both clocks.  The fullmove number must be at least 1.
    pub fn set_clocks(&mut self, halfmove_clock: u32, fullmove_number: u32) -> Result<(), Error> {
        if fullmove_number < 1 {
            return Err(Error::invalid_argument(format!(
                "fullmove number must be >= 1, got {}",
                fullmove_number
            )));
        }
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number;
        Ok(())
    }

    /// Replace every state scalar at once.
    pub fn set_state(
        &mut self,
        side_to_move: Color,
        castle_rights: CastleRights,
        en_passant: Option<Square>,
        halfmove_clock: u32,
        fullmove_number: u32,
    ) -> Result<(), Error> {
        self.set_clocks(halfmove_clock, fullmove_number)?;
        self.side_to_move = side_to_move;
        self.castle_rights = castle_rights;
        self.en_passant = en_passant;
        Ok(())
    }

    /// Where is the king of `color`?
    ///
    /// # Panics
    ///
    /// A position without a king of each color is corrupt.  This panics rather than pretend
    /// otherwise.
    pub fn king_square(&self, color: Color) -> Square {
        match self.board.find_king(color) {
            Some(sq) => sq,
            None => panic!("King not found for color {}.", color),
        }
    }

    /// Take an independent copy of this position for later `restore`.
    pub fn snapshot(&self) -> PositionSnapshot {
        PositionSnapshot {
            pieces: self.pieces().collect(),
            side_to_move: self.side_to_move,
            castle_rights: self.castle_rights,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    /// Throw away the current state and go back to a snapshot.
    pub fn restore(&mut self, snapshot: &PositionSnapshot) {
        self.board.clear();
        for &(sq, piece) in snapshot.pieces.iter() {
            self.board.set_piece(sq, piece);
        }
        self.side_to_move = snapshot.side_to_move;
        self.castle_rights = snapshot.castle_rights;
        self.en_passant = snapshot.en_passant;
        self.halfmove_clock = snapshot.halfmove_clock;
        self.fullmove_number = snapshot.fullmove_number;
    }

    // The move applier writes state without the range checks; it only ever moves the clocks
    // forward from valid values, or back to values it saved.
    #[inline]
    pub(crate) fn write_state(
        &mut self,
        side_to_move: Color,
        castle_rights: CastleRights,
        en_passant: Option<Square>,
        halfmove_clock: u32,
        fullmove_number: u32,
    ) {
        self.side_to_move = side_to_move;
        self.castle_rights = castle_rights;
        self.en_passant = en_passant;
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number;
    }
}

/// An immutable copy of a position, independent of the position it came from.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PositionSnapshot {
    pieces: Vec<(Square, ColoredPiece)>,
    side_to_move: Color,
    castle_rights: CastleRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl PositionSnapshot {
    pub fn pieces(&self) -> &[(Square, ColoredPiece)] {
        &self.pieces
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castle_rights(&self) -> CastleRights {
        self.castle_rights
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }
}

impl From<&PositionSnapshot> for Position {
    fn from(snapshot: &PositionSnapshot) -> Position {
        let mut position = Position::empty();
        position.restore(snapshot);
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_layout() {
        let pos = Position::default();
        assert_eq!(pos.pieces().count(), 32);
        assert_eq!(pos.king_square(Color::White), Square::E1);
        assert_eq!(pos.king_square(Color::Black), Square::E8);
        assert!(pos.has(Square::D8, Piece::Queen, Color::Black));
        assert_eq!(pos.castle_rights(), CastleRights::ALL);
    }

    #[test]
    #[should_panic(expected = "King not found")]
    fn missing_king_is_fatal() {
        Position::empty().king_square(Color::Black);
    }

    #[test]
    fn clocks_are_range_checked() {
        let mut pos = Position::empty();
        assert!(pos.set_clocks(0, 0).is_err());
        assert_eq!(pos.fullmove_number(), 1);
        assert!(pos.set_clocks(17, 40).is_ok());
        assert_eq!(pos.halfmove_clock(), 17);
        assert_eq!(pos.fullmove_number(), 40);
        assert!(pos
            .set_state(Color::Black, CastleRights::NONE, None, 0, 0)
            .is_err());
        assert_eq!(pos.side_to_move(), Color::White);
    }

    #[test]
    fn snapshot_is_independent() {
        let mut pos = Position::default();
        let snap = pos.snapshot();
        pos.clear_square(Square::E2);
        pos.set_side_to_move(Color::Black);
        assert_eq!(snap.pieces().len(), 32);
        assert_eq!(snap.side_to_move(), Color::White);
        pos.restore(&snap);
        assert_eq!(pos, Position::default());
        assert_eq!(Position::from(&snap), Position::default());
    }
}
