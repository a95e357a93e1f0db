use crate::color::Color;
use crate::error::Error;
use crate::file::File;
use crate::square::Square;
use std::fmt;
use std::str::FromStr;

/// Which side of the board is a castle happening on?
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

/// Both castle sides, in FEN order.
pub const ALL_CASTLE_SIDES: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];

impl CastleSide {
    /// The file the rook starts on.
    #[inline]
    pub fn rook_file(&self) -> File {
        match *self {
            CastleSide::KingSide => File::H,
            CastleSide::QueenSide => File::A,
        }
    }

    /// The file the rook lands on, next to the king.
    #[inline]
    pub fn rook_dest_file(&self) -> File {
        match *self {
            CastleSide::KingSide => File::F,
            CastleSide::QueenSide => File::D,
        }
    }

    /// The file the king lands on.
    #[inline]
    pub fn king_dest_file(&self) -> File {
        match *self {
            CastleSide::KingSide => File::G,
            CastleSide::QueenSide => File::C,
        }
    }

    /// Files between king and rook that must be empty.
    #[inline]
    pub fn empty_files(&self) -> &'static [File] {
        match *self {
            CastleSide::KingSide => &[File::F, File::G],
            CastleSide::QueenSide => &[File::D, File::C, File::B],
        }
    }

    /// Files the king stands on, passes through and lands on.  None of them may be attacked.
    #[inline]
    pub fn king_path_files(&self) -> [File; 3] {
        match *self {
            CastleSide::KingSide => [File::E, File::F, File::G],
            CastleSide::QueenSide => [File::E, File::D, File::C],
        }
    }

    /// Given the king's source and destination, which way is it castling?
    #[inline]
    pub fn from_king_move(source: Square, dest: Square) -> CastleSide {
        if dest.get_file() > source.get_file() {
            CastleSide::KingSide
        } else {
            CastleSide::QueenSide
        }
    }
}

/// What castle rights do both players have?  Four independent flags in a bitset.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct CastleRights(u8);

const WHITE_KINGSIDE: u8 = 1 << 0;
const WHITE_QUEENSIDE: u8 = 1 << 1;
const BLACK_KINGSIDE: u8 = 1 << 2;
const BLACK_QUEENSIDE: u8 = 1 << 3;

impl CastleRights {
    /// Nobody may castle.
    pub const NONE: CastleRights = CastleRights(0);
    /// Everybody may castle on both sides.
    pub const ALL: CastleRights =
        CastleRights(WHITE_KINGSIDE | WHITE_QUEENSIDE | BLACK_KINGSIDE | BLACK_QUEENSIDE);

    #[inline]
    fn bit(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => WHITE_KINGSIDE,
            (Color::White, CastleSide::QueenSide) => WHITE_QUEENSIDE,
            (Color::Black, CastleSide::KingSide) => BLACK_KINGSIDE,
            (Color::Black, CastleSide::QueenSide) => BLACK_QUEENSIDE,
        }
    }

    /// Can `color` castle on `side`?
    #[inline]
    pub fn has(&self, color: Color, side: CastleSide) -> bool {
        self.0 & CastleRights::bit(color, side) != 0
    }

    /// Return a copy with one flag turned on or off.
    #[inline]
    pub fn with(&self, color: Color, side: CastleSide, enabled: bool) -> CastleRights {
        let bit = CastleRights::bit(color, side);
        if enabled {
            CastleRights(self.0 | bit)
        } else {
            CastleRights(self.0 & !bit)
        }
    }

    /// Remove every right `color` has, and return a new `CastleRights`.
    #[inline]
    pub fn remove_color(&self, color: Color) -> CastleRights {
        self.with(color, CastleSide::KingSide, false)
            .with(color, CastleSide::QueenSide, false)
    }

    /// A rook of `color` left (or was captured on) `square`.  If that was one of its home corners,
    /// the matching right goes away.
    #[inline]
    pub fn remove_rook_square(&self, color: Color, square: Square) -> CastleRights {
        if square.get_rank() != color.to_my_backrank() {
            return *self;
        }
        match square.get_file() {
            File::A => self.with(color, CastleSide::QueenSide, false),
            File::H => self.with(color, CastleSide::KingSide, false),
            _ => *self,
        }
    }

    /// Are there no rights left at all?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Convert `CastleRights` to `usize` for table lookups
    #[inline]
    pub fn to_index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CastleRights {
    /// Canonical FEN order `KQkq`, or `-` if nobody may castle.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for &(bit, c) in [
            (WHITE_KINGSIDE, 'K'),
            (WHITE_QUEENSIDE, 'Q'),
            (BLACK_KINGSIDE, 'k'),
            (BLACK_QUEENSIDE, 'q'),
        ]
        .iter()
        {
            if self.0 & bit != 0 {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

impl FromStr for CastleRights {
    type Err = Error;

    /// Any order or repetition of `KQkq` is accepted; repeated letters set the same flag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            return Ok(CastleRights::NONE);
        }
        if s.is_empty() {
            return Err(Error::invalid_argument("empty castling field"));
        }

        let mut rights = CastleRights::NONE;
        for c in s.chars() {
            rights = match c {
                'K' => rights.with(Color::White, CastleSide::KingSide, true),
                'Q' => rights.with(Color::White, CastleSide::QueenSide, true),
                'k' => rights.with(Color::Black, CastleSide::KingSide, true),
                'q' => rights.with(Color::Black, CastleSide::QueenSide, true),
                _ => {
                    return Err(Error::invalid_argument(format!(
                        "invalid castling symbol '{}'",
                        c
                    )))
                }
            };
        }
        Ok(rights)
    }
}
