use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// A column of the board, `a` through `h`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

/// Files from the queen side to the king side.
pub const ALL_FILES: [File; 8] = [
    File::A,
    File::B,
    File::C,
    File::D,
    File::E,
    File::F,
    File::G,
    File::H,
];

impl File {
    /// Only the low three bits of `i` are used.
    #[inline]
    pub fn from_index(i: usize) -> File {
        ALL_FILES[i % 8]
    }

    #[inline]
    pub fn to_index(&self) -> usize {
        *self as usize
    }

    /// How many files apart are `self` and `other`?
    #[inline]
    pub fn distance(&self, other: File) -> u8 {
        (*self as i8 - other as i8).unsigned_abs()
    }

    #[inline]
    pub fn to_char(&self) -> char {
        char::from(b'a' + *self as u8)
    }

    /// `'a'..='h'`, in either case.
    pub fn from_char(c: char) -> Option<File> {
        let lower = c.to_ascii_lowercase();
        if ('a'..='h').contains(&lower) {
            Some(ALL_FILES[(lower as u8 - b'a') as usize])
        } else {
            None
        }
    }
}

impl FromStr for File {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        chars
            .next()
            .filter(|_| chars.next().is_none())
            .and_then(File::from_char)
            .ok_or_else(|| Error::invalid_argument(format!("'{}' is not a file", s)))
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters() {
        assert_eq!(File::from_char('e'), Some(File::E));
        assert_eq!(File::from_char('H'), Some(File::H));
        assert_eq!(File::from_char('i'), None);
        assert_eq!("c".parse::<File>().unwrap(), File::C);
        assert!("cd".parse::<File>().is_err());
        assert!("".parse::<File>().is_err());
        let written: String = ALL_FILES.iter().map(|f| f.to_string()).collect();
        assert_eq!(written, "abcdefgh");
    }

    #[test]
    fn distance_is_symmetric() {
        assert_eq!(File::E.distance(File::G), 2);
        assert_eq!(File::G.distance(File::E), 2);
        assert_eq!(File::A.distance(File::H), 7);
        assert_eq!(File::D.distance(File::D), 0);
    }
}
