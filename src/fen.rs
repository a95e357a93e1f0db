//! Forsyth-Edwards Notation for `Position`, through `FromStr` and `Display`.
//!
//! Loading is lenient about whitespace and the castling field (any order, repeats allowed) and
//! fills in missing clocks with `0 1`.  Saving always writes the six canonical fields.

use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::Error;
use crate::file::{File, ALL_FILES};
use crate::piece::ColoredPiece;
use crate::position::Position;
use crate::rank::{Rank, ALL_RANKS};
use crate::square::Square;
use std::fmt;
use std::str::FromStr;

/// The standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn parse_board(fen: &str, text: &str, position: &mut Position) -> Result<(), Error> {
    if text.is_empty() {
        return Err(Error::invalid_fen(fen, "empty board field"));
    }

    let mut rank = 7usize;
    let mut file = 0usize;
    for c in text.chars() {
        match c {
            '/' => {
                if file != 8 {
                    return Err(Error::invalid_fen(fen, "rank does not contain 8 squares"));
                }
                if rank == 0 {
                    return Err(Error::invalid_fen(fen, "too many ranks"));
                }
                rank -= 1;
                file = 0;
            }
            '1'..='8' => {
                file += (c as u8 - b'0') as usize;
                if file > 8 {
                    return Err(Error::invalid_fen(fen, "file index overflow"));
                }
            }
            _ => {
                if file >= 8 {
                    return Err(Error::invalid_fen(fen, "too many pieces in rank"));
                }
                let piece = ColoredPiece::from_char(c).ok_or_else(|| {
                    Error::invalid_fen(fen, format!("invalid piece character '{}'", c))
                })?;
                position.set_piece(
                    Square::make_square(Rank::from_index(rank), File::from_index(file)),
                    piece,
                );
                file += 1;
            }
        }
    }

    if rank != 0 || file != 8 {
        return Err(Error::invalid_fen(fen, "expected 8 ranks of 8 squares"));
    }
    Ok(())
}

fn parse_clock(fen: &str, text: Option<&str>, name: &str, default: u32) -> Result<u32, Error> {
    match text {
        None => Ok(default),
        Some(t) => t
            .parse::<u32>()
            .map_err(|_| Error::invalid_fen(fen, format!("invalid {} '{}'", name, t))),
    }
}

impl FromStr for Position {
    type Err = Error;

    /// Load a position from FEN.
    ///
    /// ```
    /// use chess_rules::Position;
    /// use std::str::FromStr;
    ///
    /// let position = Position::from_str("8/8/8/8/8/8/8/8 w KKKqq -").unwrap();
    /// assert_eq!(position.halfmove_clock(), 0);
    /// assert_eq!(position.fullmove_number(), 1);
    /// assert_eq!(position.to_string(), "8/8/8/8/8/8/8/8 w Kq - 0 1");
    /// ```
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = value.split_whitespace().collect();
        if tokens.len() < 4 {
            return Err(Error::invalid_fen(value, "expected at least 4 fields"));
        }

        let mut position = Position::empty();
        parse_board(value, tokens[0], &mut position)?;

        let side_to_move = Color::from_fen_str(tokens[1]).ok_or_else(|| {
            Error::invalid_fen(value, format!("invalid side to move '{}'", tokens[1]))
        })?;

        let castle_rights = CastleRights::from_str(tokens[2]).map_err(|_| {
            Error::invalid_fen(value, format!("invalid castling field '{}'", tokens[2]))
        })?;

        let en_passant = match tokens[3] {
            "-" => None,
            sq => Some(Square::from_str(sq).map_err(|_| {
                Error::invalid_fen(value, format!("invalid en passant square '{}'", sq))
            })?),
        };

        let halfmove_clock = parse_clock(value, tokens.get(4).copied(), "halfmove clock", 0)?;
        let fullmove_number = parse_clock(value, tokens.get(5).copied(), "fullmove number", 1)?;

        position
            .set_state(
                side_to_move,
                castle_rights,
                en_passant,
                halfmove_clock,
                fullmove_number,
            )
            .map_err(|e| Error::invalid_fen(value, e.to_string()))?;

        Ok(position)
    }
}

impl fmt::Display for Position {
    /// Write the position as a six field FEN string.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in ALL_RANKS.iter().rev() {
            let mut empty = 0;
            for file in ALL_FILES.iter() {
                match self.piece_on(Square::make_square(*rank, *file)) {
                    None => empty += 1,
                    Some(piece) => {
                        if empty != 0 {
                            write!(f, "{}", empty)?;
                            empty = 0;
                        }
                        write!(f, "{}", piece.to_char())?;
                    }
                }
            }
            if empty != 0 {
                write!(f, "{}", empty)?;
            }
            if *rank != Rank::First {
                write!(f, "/")?;
            }
        }

        write!(
            f,
            " {} {} ",
            self.side_to_move().to_fen_char(),
            self.castle_rights()
        )?;

        match self.en_passant() {
            Some(sq) => write!(f, "{}", sq)?,
            None => write!(f, "-")?,
        };

        write!(f, " {} {}", self.halfmove_clock(), self.fullmove_number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;

    fn load(fen: &str) -> Result<Position, Error> {
        Position::from_str(fen)
    }

    fn canonical(fen: &str) -> String {
        load(fen).unwrap().to_string()
    }

    #[test]
    fn start_position_round_trip() {
        let position = load(STARTING_FEN).unwrap();
        assert_eq!(position, Position::default());
        assert_eq!(position.to_string(), STARTING_FEN);
    }

    #[test]
    fn minimal_fen_gets_default_clocks() {
        assert_eq!(canonical("8/8/8/8/8/8/8/8 w - -"), "8/8/8/8/8/8/8/8 w - - 0 1");
    }

    #[test]
    fn state_fields() {
        let position = load("8/8/8/8/8/8/8/8 b Kq e3 12 34").unwrap();
        assert_eq!(position.side_to_move(), Color::Black);
        assert_eq!(position.castle_rights().to_string(), "Kq");
        assert_eq!(position.en_passant(), Some(Square::E3));
        assert_eq!(position.halfmove_clock(), 12);
        assert_eq!(position.fullmove_number(), 34);
    }

    #[test]
    fn castling_field_is_canonicalized() {
        assert_eq!(canonical("8/8/8/8/8/8/8/8 w KKKqq - 0 1"), "8/8/8/8/8/8/8/8 w Kq - 0 1");
        assert_eq!(
            canonical("8/8/8/8/8/8/8/8 w qkQK - 0 1"),
            canonical("8/8/8/8/8/8/8/8 w KQkq - 0 1")
        );
    }

    #[test]
    fn whitespace_is_normalized() {
        assert_eq!(
            canonical("   8/8/8/8/8/8/8/8    w   -   -   0   1   "),
            "8/8/8/8/8/8/8/8 w - - 0 1"
        );
        let once = canonical(" 8/8/8/8/8/8/8/8  b  qkQK  e3  12  34 ");
        assert_eq!(canonical(&once), once);
    }

    #[test]
    fn mixed_board_round_trip() {
        let fen = "3p2N1/8/8/8/8/8/8/1k2K3 w - - 0 1";
        assert_eq!(canonical(fen), fen);
        let position = load(fen).unwrap();
        assert!(position.has(Square::D8, Piece::Pawn, Color::Black));
        assert!(position.has(Square::G8, Piece::Knight, Color::White));
    }

    #[test]
    fn bad_fens_fail() {
        let bad = [
            "",
            "8/8/8/8/8/8/8/8 w -",
            " w - - 0 1",
            "8/8/8/8/8/8/8/8 x - - 0 1",
            "8/8/8/8/8/8/8/8 W - - 0 1",
            "8/8/8/8/8/8/8/8 w KX - 0 1",
            "8/8/8/8/8/8/8/8 w - - -1 1",
            "8/8/8/8/8/8/8/8 w - - xx 1",
            "8/8/8/8/8/8/8/8 w - - 0 -5",
            "8/8/8/8/8/8/8/8 w - - 0 xx",
            "8/8/8/8/8/8/8/8 w - - 0 0",
            "8/8/8/8/8/8/8/7Z w - - 0 1",
            "8/8/8/8/8/8/8/7 w - - 0 1",
            "8/8/8/8/8/8/8/9 w - - 0 1",
            "8/8/8/8/8/8/8/8/8 w - - 0 1",
            "8p/8/8/8/8/8/8/8 w - - 0 1",
            "8/8/8/8/8/8/8 w - - 0 1",
            "8/8/8/8/8/8/8/8 w - e9 0 1",
            "8/8/8/8/8/8/8/8 w - z3 0 1",
        ];
        for fen in bad.iter() {
            match load(fen) {
                Err(Error::InvalidFen { .. }) => {}
                other => panic!("{:?} should be an invalid FEN, got {:?}", fen, other),
            }
        }
    }
}
