use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// A row of the board.  `First` is White's back rank.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Rank {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
}

/// Ranks from White's side of the board to Black's.
pub const ALL_RANKS: [Rank; 8] = [
    Rank::First,
    Rank::Second,
    Rank::Third,
    Rank::Fourth,
    Rank::Fifth,
    Rank::Sixth,
    Rank::Seventh,
    Rank::Eighth,
];

impl Rank {
    /// Only the low three bits of `i` are used.
    #[inline]
    pub fn from_index(i: usize) -> Rank {
        ALL_RANKS[i % 8]
    }

    #[inline]
    pub fn to_index(&self) -> usize {
        *self as usize
    }

    /// How many ranks apart are `self` and `other`?
    #[inline]
    pub fn distance(&self, other: Rank) -> u8 {
        (*self as i8 - other as i8).unsigned_abs()
    }

    #[inline]
    pub fn to_char(&self) -> char {
        char::from(b'1' + *self as u8)
    }

    /// `'1'..='8'`.
    pub fn from_char(c: char) -> Option<Rank> {
        c.to_digit(10)
            .filter(|d| (1..=8).contains(d))
            .map(|d| ALL_RANKS[d as usize - 1])
    }
}

impl FromStr for Rank {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        chars
            .next()
            .filter(|_| chars.next().is_none())
            .and_then(Rank::from_char)
            .ok_or_else(|| Error::invalid_argument(format!("'{}' is not a rank", s)))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits() {
        assert_eq!(Rank::from_char('1'), Some(Rank::First));
        assert_eq!(Rank::from_char('8'), Some(Rank::Eighth));
        assert_eq!(Rank::from_char('0'), None);
        assert_eq!(Rank::from_char('9'), None);
        assert_eq!("4".parse::<Rank>().unwrap(), Rank::Fourth);
        assert!("45".parse::<Rank>().is_err());
        assert_eq!(Rank::Sixth.to_string(), "6");
    }

    #[test]
    fn double_push_distance() {
        assert_eq!(Rank::Second.distance(Rank::Fourth), 2);
        assert_eq!(Rank::Fifth.distance(Rank::Seventh), 2);
        assert_eq!(Rank::Eighth.distance(Rank::First), 7);
    }
}
