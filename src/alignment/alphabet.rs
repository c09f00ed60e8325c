use std::fmt;
use std::str::FromStr;

/// Number of resolved nucleotide states.
pub const NUM_STATES: usize = 4;

/// Nucleic-acid alphabet used to interpret alignment characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alphabet {
    /// A, C, G, T.
    #[default]
    Dna,
    /// A, C, G, U.
    Rna,
}

/// Classification of a single alignment character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    /// Resolved nucleotide, indexed 0..4 as A, C, G, T/U.
    State(u8),
    /// Alignment gap.
    Gap,
    /// Ambiguity code, `N`, `?` or any symbol foreign to the alphabet.
    Unresolved,
}

impl CharacterClass {
    /// State index for resolved characters.
    pub fn state(self) -> Option<usize> {
        match self {
            CharacterClass::State(idx) => Some(idx as usize),
            _ => None,
        }
    }
}

impl Alphabet {
    /// Classify one (case-insensitive) character.
    pub fn classify(self, symbol: u8) -> CharacterClass {
        match (self, symbol.to_ascii_uppercase()) {
            (_, b'A') => CharacterClass::State(0),
            (_, b'C') => CharacterClass::State(1),
            (_, b'G') => CharacterClass::State(2),
            (Alphabet::Dna, b'T') | (Alphabet::Rna, b'U') => CharacterClass::State(3),
            (_, b'-') | (_, b'.') => CharacterClass::Gap,
            _ => CharacterClass::Unresolved,
        }
    }

    /// Letter of a resolved state.
    pub fn state_symbol(self, state: usize) -> char {
        match (self, state) {
            (_, 0) => 'A',
            (_, 1) => 'C',
            (_, 2) => 'G',
            (Alphabet::Dna, 3) => 'T',
            (Alphabet::Rna, 3) => 'U',
            _ => 'N',
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alphabet::Dna => write!(f, "DNA"),
            Alphabet::Rna => write!(f, "RNA"),
        }
    }
}

impl FromStr for Alphabet {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dna" => Ok(Alphabet::Dna),
            "rna" => Ok(Alphabet::Rna),
            other => Err(crate::Error::configuration(format!(
                "unknown alphabet '{other}' (expected dna or rna)"
            ))),
        }
    }
}
