//! Nucleotide sequences.
//!
//! A [`Sequence`] is the unit that every dataset in this crate is keyed by.
//! Positions within a sequence are 1-based. Position 0 is reserved throughout
//! the crate as the "no data" sentinel, so it never refers to a nucleotide.

use std::str::FromStr;
use std::sync::Arc;

pub mod source;

pub use source::SequenceSource;

/// The symbol used to mark a gap within an already-aligned sequence.
pub const GAP: char = '-';

/// The symbol used to mark a masked or no-data position.
pub const MASK: char = '.';

/// The symbol for an unknown nucleotide.
pub const UNKNOWN: char = 'N';

/// The symbols (after normalization) that may be stored within a sequence.
pub const ALPHABET: [char; 7] = ['A', 'C', 'G', 'U', 'N', MASK, GAP];

/// An error related to a [`Sequence`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// A character outside of the accepted nucleotide alphabet was found at
    /// the given 1-based position.
    InvalidCharacter {
        /// The offending character.
        character: char,

        /// The 1-based position of the offending character.
        position: usize,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidCharacter {
                character,
                position,
            } => write!(
                f,
                "invalid nucleotide `{character}` at position {position}: expected one of \
                 A, C, G, U, T, N, `.`, or `-`"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// Normalizes a single character, returning [`None`] when the character is
/// not part of the accepted alphabet.
fn normalize(c: char) -> Option<char> {
    match c.to_ascii_uppercase() {
        'T' => Some('U'),
        c if ALPHABET.contains(&c) => Some(c),
        _ => None,
    }
}

/// An immutable RNA sequence.
///
/// The inner string is reference counted, so cloning a [`Sequence`] shares the
/// underlying characters rather than copying them. Equality and hashing are by
/// content.
#[derive(Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Sequence(Arc<str>);

impl Sequence {
    /// Attempts to create a new [`Sequence`] from a raw string.
    ///
    /// The input is uppercased and `T` is normalized to `U`. Any character
    /// outside of `A`, `C`, `G`, `U`, `T`, `N`, `.` and `-` (case-insensitive)
    /// is an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::Sequence;
    ///
    /// let sequence = Sequence::try_new("acgt")?;
    /// assert_eq!(sequence.as_str(), "ACGU");
    ///
    /// let err = Sequence::try_new("ACXU").unwrap_err();
    /// assert_eq!(
    ///     err.to_string(),
    ///     "invalid nucleotide `X` at position 3: expected one of A, C, G, U, T, N, `.`, or `-`"
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(raw: impl AsRef<str>) -> Result<Self> {
        let inner = raw
            .as_ref()
            .chars()
            .enumerate()
            .map(|(i, c)| {
                normalize(c).ok_or(Error::InvalidCharacter {
                    character: c,
                    position: i + 1,
                })
            })
            .collect::<Result<String>>()?;

        Ok(Self(Arc::from(inner)))
    }

    /// Creates a new [`Sequence`] without rejecting unknown characters.
    ///
    /// Characters outside of the accepted alphabet (modified or ambiguous
    /// bases, for example) are replaced with `N`. This is meant for
    /// placeholder sequences built from loosely formatted input.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::Sequence;
    ///
    /// let sequence = Sequence::lenient("ac?gt");
    /// assert_eq!(sequence.as_str(), "ACNGU");
    /// ```
    pub fn lenient(raw: impl AsRef<str>) -> Self {
        let inner = raw
            .as_ref()
            .chars()
            .map(|c| normalize(c).unwrap_or(UNKNOWN))
            .collect::<String>();

        Self(Arc::from(inner))
    }

    /// Gets the number of nucleotides in the sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::Sequence;
    ///
    /// let sequence = "AUCG".parse::<Sequence>()?;
    /// assert_eq!(sequence.len(), 4);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the sequence contains no nucleotides.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::Sequence;
    ///
    /// assert!("".parse::<Sequence>()?.is_empty());
    /// assert!(!"A".parse::<Sequence>()?.is_empty());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets the normalized characters of the sequence.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Gets the normalized characters of the sequence as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Gets the nucleotide at a 1-based `position`.
    ///
    /// Position 0 is the sentinel and never refers to a nucleotide, so it
    /// returns [`None`] (as does any position past the end).
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::Sequence;
    ///
    /// let sequence = "AUCG".parse::<Sequence>()?;
    /// assert_eq!(sequence.get(0), None);
    /// assert_eq!(sequence.get(1), Some('A'));
    /// assert_eq!(sequence.get(4), Some('G'));
    /// assert_eq!(sequence.get(5), None);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn get(&self, position: usize) -> Option<char> {
        position
            .checked_sub(1)
            .and_then(|i| self.as_bytes().get(i))
            .map(|b| *b as char)
    }

    /// Iterates over the 1-based positions and nucleotides of the sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::Sequence;
    ///
    /// let sequence = "AU".parse::<Sequence>()?;
    /// let items = sequence.iter().collect::<Vec<_>>();
    /// assert_eq!(items, vec![(1, 'A'), (2, 'U')]);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = (usize, char)> + '_ {
        self.0.chars().enumerate().map(|(i, c)| (i + 1, c))
    }

    /// Returns whether two handles share the same underlying allocation.
    pub fn ptr_eq(&self, other: &Sequence) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl FromStr for Sequence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_new(s)
    }
}

impl TryFrom<&str> for Sequence {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::try_new(value)
    }
}

impl std::fmt::Display for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
