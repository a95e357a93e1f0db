use crate::color::Color;
use std::fmt;

/// Represent a chess piece type as a very simple enum
#[derive(PartialEq, Eq, Ord, PartialOrd, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// How many piece types are there?
pub const NUM_PIECES: usize = 6;

/// An array representing each piece type, in order of ascending value.
pub const ALL_PIECES: [Piece; NUM_PIECES] = [
    Piece::Pawn,
    Piece::Knight,
    Piece::Bishop,
    Piece::Rook,
    Piece::Queen,
    Piece::King,
];

/// How many ways can I promote?
pub const NUM_PROMOTION_PIECES: usize = 4;

/// What pieces can I promote to, in the order they are generated?
pub const PROMOTION_PIECES: [Piece; NUM_PROMOTION_PIECES] =
    [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

impl Piece {
    /// Convert the `Piece` to a `usize` for table lookups.
    #[inline]
    pub fn to_index(&self) -> usize {
        *self as usize
    }

    /// Can a pawn become this piece?
    #[inline]
    pub fn is_promotion_target(&self) -> bool {
        PROMOTION_PIECES.contains(self)
    }

    /// Convert a piece with a color to a string.  White pieces are uppercase, black pieces are
    /// lowercase.
    ///
    /// ```
    /// use chess_rules::{Piece, Color};
    ///
    /// assert_eq!(Piece::King.to_string(Color::White), "K");
    /// assert_eq!(Piece::Knight.to_string(Color::Black), "n");
    /// ```
    #[inline]
    pub fn to_string(&self, color: Color) -> String {
        let piece = format!("{}", self);
        if color == Color::White {
            piece.to_uppercase()
        } else {
            piece
        }
    }

    /// Parse a lowercase or uppercase piece letter, ignoring the case.
    pub fn from_char(c: char) -> Option<Piece> {
        match c.to_ascii_lowercase() {
            'p' => Some(Piece::Pawn),
            'n' => Some(Piece::Knight),
            'b' => Some(Piece::Bishop),
            'r' => Some(Piece::Rook),
            'q' => Some(Piece::Queen),
            'k' => Some(Piece::King),
            _ => None,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match *self {
                Piece::Pawn => "p",
                Piece::Knight => "n",
                Piece::Bishop => "b",
                Piece::Rook => "r",
                Piece::Queen => "q",
                Piece::King => "k",
            }
        )
    }
}

/// A piece of a particular color, as it sits on a square.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ColoredPiece {
    pub piece: Piece,
    pub color: Color,
}

impl ColoredPiece {
    #[inline]
    pub fn new(piece: Piece, color: Color) -> ColoredPiece {
        ColoredPiece { piece, color }
    }

    /// Is this a `piece` belonging to `color`?
    #[inline]
    pub fn is(&self, piece: Piece, color: Color) -> bool {
        self.piece == piece && self.color == color
    }

    /// The FEN letter for this piece.
    #[inline]
    pub fn to_char(&self) -> char {
        let c = match self.piece {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        };
        if self.color == Color::White {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }

    /// Parse a FEN letter; uppercase is white.
    pub fn from_char(c: char) -> Option<ColoredPiece> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Piece::from_char(c).map(|piece| ColoredPiece::new(piece, color))
    }
}

impl fmt::Display for ColoredPiece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fen_letters() {
        for &piece in ALL_PIECES.iter() {
            for &color in [Color::White, Color::Black].iter() {
                let cp = ColoredPiece::new(piece, color);
                assert_eq!(ColoredPiece::from_char(cp.to_char()), Some(cp));
            }
        }
        assert_eq!(ColoredPiece::from_char('x'), None);
        assert_eq!(
            ColoredPiece::from_char('Q'),
            Some(ColoredPiece::new(Piece::Queen, Color::White))
        );
    }

    #[test]
    fn promotion_targets() {
        assert!(Piece::Knight.is_promotion_target());
        assert!(!Piece::King.is_promotion_target());
        assert!(!Piece::Pawn.is_promotion_target());
    }
}
