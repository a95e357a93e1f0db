use crate::rank::Rank;
use std::fmt;
use std::ops::Not;

/// The two sides.  White moves first and its pawns walk towards the eighth rank.
#[derive(PartialOrd, Ord, PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    White,
    Black,
}

pub const ALL_COLORS: [Color; 2] = [Color::White, Color::Black];

impl Color {
    /// The side-to-move letter of a FEN record.
    pub fn to_fen_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    /// Read a side-to-move field.  Only the lowercase letters are accepted.
    pub fn from_fen_str(s: &str) -> Option<Color> {
        match s {
            "w" => Some(Color::White),
            "b" => Some(Color::Black),
            _ => None,
        }
    }

    /// Rank the king and rooks of this color start on.
    #[inline]
    pub fn to_my_backrank(&self) -> Rank {
        if *self == Color::White {
            Rank::First
        } else {
            Rank::Eighth
        }
    }

    /// Rank my pawns promote on.
    #[inline]
    pub fn to_their_backrank(&self) -> Rank {
        (!*self).to_my_backrank()
    }

    /// Rank my pawns start on, and may double-push from.
    #[inline]
    pub fn to_second_rank(&self) -> Rank {
        if *self == Color::White {
            Rank::Second
        } else {
            Rank::Seventh
        }
    }

    /// Rank step of a pawn push.
    #[inline]
    pub fn forward(&self) -> i8 {
        if *self == Color::White {
            1
        } else {
            -1
        }
    }
}

impl Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Color::White => "White",
            Color::Black => "Black",
        };
        f.write_str(name)
    }
}
