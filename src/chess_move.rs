use crate::error::Error;
use crate::piece::Piece;
use crate::square::Square;
use bitflags::bitflags;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

bitflags! {
    /// What else is true about a move, beyond where it goes.  The bits are informative, not
    /// exclusive: a promotion can also be a capture.
    #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Debug, Hash)]
    #[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
    pub struct MoveFlags: u8 {
        const CAPTURE = 1 << 0;
        const PROMOTION = 1 << 1;
        const EN_PASSANT = 1 << 2;
        const CASTLING = 1 << 3;
        const CHECK = 1 << 4;
        const CHECKMATE = 1 << 5;
    }
}

/// The single most specific description of a move, by flag priority:
/// castling, en passant, promotion, capture, then quiet.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveKind {
    Quiet,
    Capture,
    Promotion,
    EnPassant,
    Castling,
}

impl MoveKind {
    /// Derive the kind of a move from its flags.
    pub fn from_flags(flags: MoveFlags) -> MoveKind {
        if flags.contains(MoveFlags::CASTLING) {
            MoveKind::Castling
        } else if flags.contains(MoveFlags::EN_PASSANT) {
            MoveKind::EnPassant
        } else if flags.contains(MoveFlags::PROMOTION) {
            MoveKind::Promotion
        } else if flags.contains(MoveFlags::CAPTURE) {
            MoveKind::Capture
        } else {
            MoveKind::Quiet
        }
    }
}

/// Represent a ChessMove in memory
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ChessMove {
    source: Square,
    dest: Square,
    flags: MoveFlags,
    promotion: Option<Piece>,
}

impl ChessMove {
    /// Create a new chess move, given a source `Square`, a destination `Square`, its flags, and an
    /// optional promotion `Piece`.
    ///
    /// A promotion piece must be given if and only if the `PROMOTION` flag is set, and it must be
    /// a queen, rook, bishop or knight.
    ///
    /// ```
    /// use chess_rules::{ChessMove, MoveFlags, Piece, Square};
    ///
    /// assert!(ChessMove::new(Square::E7, Square::E8, MoveFlags::PROMOTION, Some(Piece::Queen)).is_ok());
    /// assert!(ChessMove::new(Square::E7, Square::E8, MoveFlags::PROMOTION, None).is_err());
    /// assert!(ChessMove::new(Square::E7, Square::E8, MoveFlags::empty(), Some(Piece::Queen)).is_err());
    /// assert!(ChessMove::new(Square::E7, Square::E8, MoveFlags::PROMOTION, Some(Piece::King)).is_err());
    /// ```
    pub fn new(
        source: Square,
        dest: Square,
        flags: MoveFlags,
        promotion: Option<Piece>,
    ) -> Result<ChessMove, Error> {
        match (flags.contains(MoveFlags::PROMOTION), promotion) {
            (false, Some(_)) => Err(Error::invalid_argument(
                "Promotion piece specified but Promotion flag is not set.",
            )),
            (true, None) => Err(Error::invalid_argument(
                "Promotion flag is set but promotion piece is not specified.",
            )),
            (true, Some(p)) if !p.is_promotion_target() => Err(Error::invalid_argument(
                "Promotion must be Queen, Rook, Bishop, or Knight.",
            )),
            _ => Ok(ChessMove {
                source,
                dest,
                flags,
                promotion,
            }),
        }
    }

    /// A move that is not a capture or anything special.
    #[inline]
    pub fn quiet(source: Square, dest: Square) -> ChessMove {
        ChessMove {
            source,
            dest,
            flags: MoveFlags::empty(),
            promotion: None,
        }
    }

    /// A move that takes whatever is on `dest`.
    #[inline]
    pub fn capture(source: Square, dest: Square) -> ChessMove {
        ChessMove {
            source,
            dest,
            flags: MoveFlags::CAPTURE,
            promotion: None,
        }
    }

    /// A pawn capturing en passant onto the empty target square.
    #[inline]
    pub fn en_passant(source: Square, dest: Square) -> ChessMove {
        ChessMove {
            source,
            dest,
            flags: MoveFlags::EN_PASSANT | MoveFlags::CAPTURE,
            promotion: None,
        }
    }

    /// A king moving two files towards one of its rooks.
    #[inline]
    pub fn castle(source: Square, dest: Square) -> ChessMove {
        ChessMove {
            source,
            dest,
            flags: MoveFlags::CASTLING,
            promotion: None,
        }
    }

    /// Get the source square (square the piece is currently on).
    #[inline]
    pub fn get_source(&self) -> Square {
        self.source
    }

    /// Get the destination square (square the piece is going to).
    #[inline]
    pub fn get_dest(&self) -> Square {
        self.dest
    }

    /// Get the promotion piece (maybe).
    #[inline]
    pub fn get_promotion(&self) -> Option<Piece> {
        self.promotion
    }

    #[inline]
    pub fn get_flags(&self) -> MoveFlags {
        self.flags
    }

    #[inline]
    pub fn kind(&self) -> MoveKind {
        MoveKind::from_flags(self.flags)
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.flags.contains(MoveFlags::CAPTURE)
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.flags.contains(MoveFlags::PROMOTION)
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.flags.contains(MoveFlags::EN_PASSANT)
    }

    #[inline]
    pub fn is_castling(&self) -> bool {
        self.flags.contains(MoveFlags::CASTLING)
    }

    /// Do two moves describe the same from/to/promotion, whatever their flags say?
    #[inline]
    pub fn same_path(&self, other: &ChessMove) -> bool {
        self.source == other.source && self.dest == other.dest && self.promotion == other.promotion
    }

    /// Convert a UCI `String` to a move.  The result only knows its squares and promotion; use
    /// `ChessEngine::parse_uci` to also learn whether it captures, castles, etc.
    ///
    /// ```
    /// use chess_rules::{ChessMove, Square, Piece};
    ///
    /// let mv = ChessMove::from_uci("e7e8q").expect("Valid Move");
    /// assert_eq!(mv.get_source(), Square::E7);
    /// assert_eq!(mv.get_promotion(), Some(Piece::Queen));
    /// assert!(ChessMove::from_uci("e7e8k").is_err());
    /// ```
    pub fn from_uci(s: &str) -> Result<ChessMove, Error> {
        let err = || Error::InvalidUciMove {
            text: s.to_string(),
        };
        let text = s.trim();
        if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
            return Err(err());
        }

        let source = Square::from_str(&text[0..2]).map_err(|_| err())?;
        let dest = Square::from_str(&text[2..4]).map_err(|_| err())?;

        match text[4..].chars().next() {
            None => Ok(ChessMove::quiet(source, dest)),
            Some(c) => {
                let promo = match c.to_ascii_lowercase() {
                    'q' => Piece::Queen,
                    'r' => Piece::Rook,
                    'b' => Piece::Bishop,
                    'n' => Piece::Knight,
                    _ => return Err(err()),
                };
                Ok(ChessMove {
                    source,
                    dest,
                    flags: MoveFlags::PROMOTION,
                    promotion: Some(promo),
                })
            }
        }
    }

    /// Unchecked constructor for the generator, which only ever passes promotion pieces from
    /// `PROMOTION_PIECES`.
    #[inline]
    pub(crate) fn promotion(source: Square, dest: Square, piece: Piece, capture: bool) -> ChessMove {
        let flags = if capture {
            MoveFlags::PROMOTION | MoveFlags::CAPTURE
        } else {
            MoveFlags::PROMOTION
        };
        ChessMove {
            source,
            dest,
            flags,
            promotion: Some(piece),
        }
    }
}

impl FromStr for ChessMove {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChessMove::from_uci(s)
    }
}

impl fmt::Display for ChessMove {
    /// Write the move in UCI coordinate notation.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.promotion {
            None => write!(f, "{}{}", self.source, self.dest),
            Some(x) => write!(f, "{}{}{}", self.source, self.dest, x),
        }
    }
}

impl PartialOrd for ChessMove {
    fn partial_cmp(&self, other: &ChessMove) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ChessMove {
    fn cmp(&self, other: &ChessMove) -> Ordering {
        if self.source != other.source {
            self.source.cmp(&other.source)
        } else if self.dest != other.dest {
            self.dest.cmp(&other.dest)
        } else if self.promotion != other.promotion {
            match self.promotion {
                None => Ordering::Less,
                Some(x) => match other.promotion {
                    None => Ordering::Greater,
                    Some(y) => x.cmp(&y),
                },
            }
        } else {
            self.flags.cmp(&other.flags)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_uci_moves() {
        assert!(ChessMove::from_uci("e2e-").is_err());
        assert!(ChessMove::from_uci("").is_err());
        assert!(ChessMove::from_uci("e7e8p").is_err());
        assert!(ChessMove::from_uci("e7e8z").is_err());
        assert!(ChessMove::from_uci("e2e4e5").is_err());
        assert!(ChessMove::from_uci("é2e4").is_err());
        assert_eq!(
            ChessMove::from_uci("z9a1"),
            Err(Error::InvalidUciMove {
                text: "z9a1".to_string()
            })
        );
    }

    #[test]
    fn valid_uci_moves() {
        assert_eq!(
            ChessMove::from_uci("e2e4"),
            Ok(ChessMove::quiet(Square::E2, Square::E4))
        );
        assert_eq!(
            "g1f3".parse::<ChessMove>(),
            Ok(ChessMove::quiet(Square::G1, Square::F3))
        );
        assert_eq!(
            ChessMove::from_uci("a7a8N").map(|m| m.get_promotion()),
            Ok(Some(Piece::Knight))
        );
    }

    #[test]
    fn uci_display() {
        assert_eq!(ChessMove::quiet(Square::E2, Square::E4).to_string(), "e2e4");
        assert_eq!(
            ChessMove::promotion(Square::B7, Square::A8, Piece::Rook, true).to_string(),
            "b7a8r"
        );
    }

    #[test]
    fn kind_by_priority() {
        assert_eq!(ChessMove::quiet(Square::A2, Square::A3).kind(), MoveKind::Quiet);
        assert_eq!(ChessMove::capture(Square::A2, Square::B3).kind(), MoveKind::Capture);
        assert_eq!(
            ChessMove::promotion(Square::A7, Square::B8, Piece::Queen, true).kind(),
            MoveKind::Promotion
        );
        assert_eq!(
            ChessMove::en_passant(Square::E5, Square::D6).kind(),
            MoveKind::EnPassant
        );
        assert_eq!(ChessMove::castle(Square::E1, Square::G1).kind(), MoveKind::Castling);
    }

    #[test]
    fn check_flags_do_not_change_the_kind() {
        let mv = ChessMove::new(Square::D1, Square::D8, MoveFlags::CHECK, None).unwrap();
        assert!(mv.get_flags().contains(MoveFlags::CHECK));
        assert!(!mv.is_promotion());
        assert_eq!(mv.kind(), MoveKind::Quiet);
        assert!(mv.same_path(&ChessMove::quiet(Square::D1, Square::D8)));
    }
}
