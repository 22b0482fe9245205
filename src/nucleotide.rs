use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Nucleotide {
    A,
    C,
    G,
    T,
}

impl Nucleotide {
    pub const ALL: [Nucleotide; 4] = [Self::A, Self::C, Self::G, Self::T];

    #[inline(always)]
    pub fn from_letter(letter: u8) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            b'A' => Some(Self::A),
            b'C' => Some(Self::C),
            b'G' => Some(Self::G),
            b'T' => Some(Self::T),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn letter(self) -> u8 {
        match self {
            Self::A => b'A',
            Self::C => b'C',
            Self::G => b'G',
            Self::T => b'T',
        }
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::C => 1,
            Self::G => 2,
            Self::T => 3,
        }
    }

    #[inline(always)]
    pub fn is_gc(self) -> bool {
        matches!(self, Self::G | Self::C)
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter() as char)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_letter_is_case_insensitive() {
        assert_eq!(Nucleotide::from_letter(b'a'), Some(Nucleotide::A));
        assert_eq!(Nucleotide::from_letter(b'G'), Some(Nucleotide::G));
        assert_eq!(Nucleotide::from_letter(b'N'), None);
        assert_eq!(Nucleotide::from_letter(b'u'), None);
    }

    #[test]
    fn test_letter_round_trips_for_alphabet() {
        for n in Nucleotide::ALL {
            assert_eq!(Nucleotide::from_letter(n.letter()), Some(n));
            assert_eq!(Nucleotide::ALL[n.index()], n);
        }
        assert!(Nucleotide::C.is_gc());
        assert!(!Nucleotide::T.is_gc());
    }
}
