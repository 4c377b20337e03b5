//! Forward index maps from one sequence's positions to another's.
//!
//! An [`AlignmentMap`] is the array every reprojection in this crate runs
//! through. Slot `i` holds the 1-based target position that source position
//! `i` aligned to, or [`SENTINEL`] (0) when the source position aligned to a
//! gap. Slot 0 itself is reserved and always holds the sentinel.

use crate::Sequence;
use crate::alignment::Column;
use crate::alignment::Side;
use crate::liftover::StepThrough;

/// The value marking a position with no correspondence in the other
/// coordinate system.
pub const SENTINEL: usize = 0;

/// An error related to building an [`AlignmentMap`] by hand.
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The forward array does not have one slot per source position plus the
    /// reserved slot 0.
    IncorrectLength {
        /// The expected length.
        expected: usize,

        /// The found length.
        found: usize,
    },

    /// Slot 0 does not hold the sentinel.
    SentinelSlotUsed(usize),

    /// A source position maps past the end of the target.
    OutOfBounds {
        /// The source position.
        position: usize,

        /// The target position it maps to.
        value: usize,
    },

    /// A source position maps at or before the target position of an earlier
    /// source position.
    NotIncreasing {
        /// The source position.
        position: usize,

        /// The target position it maps to.
        value: usize,
    },

    /// A column (1-based) does not pick up where the columns before it left
    /// off.
    UnexpectedColumn(usize),

    /// The columns do not cover every position of one side.
    Uncovered {
        /// The side that is not covered.
        side: Side,

        /// The length of that side's sequence.
        expected: usize,

        /// The number of positions the columns cover.
        found: usize,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::IncorrectLength { expected, found } => write!(
                f,
                "incorrect forward index length: expected {expected} slots, found {found} slots"
            ),
            Error::SentinelSlotUsed(value) => {
                write!(f, "slot 0 is reserved for the sentinel but holds {value}")
            }
            Error::OutOfBounds { position, value } => write!(
                f,
                "source position {position} maps to {value}, which is past the end of the target"
            ),
            Error::NotIncreasing { position, value } => write!(
                f,
                "source position {position} maps to {value}, which does not come after the \
                 previously mapped target position"
            ),
            Error::UnexpectedColumn(column) => {
                write!(f, "column {column} does not continue the alignment")
            }
            Error::Uncovered {
                side,
                expected,
                found,
            } => write!(
                f,
                "columns cover {found} {side} positions, but the {side} has {expected} positions"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A map from source positions to target positions.
///
/// Mapped (non-sentinel) entries are strictly increasing, so alignment never
/// reorders positions and no two source positions share a target position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AlignmentMap {
    /// The source sequence.
    source: Sequence,

    /// The target sequence.
    target: Sequence,

    /// The forward index, with `source.len() + 1` slots.
    forward: Vec<usize>,
}

impl AlignmentMap {
    /// Creates a map from parts that are known to uphold the invariants.
    pub(crate) fn from_parts(source: Sequence, target: Sequence, forward: Vec<usize>) -> Self {
        debug_assert_eq!(forward.len(), source.len() + 1);
        debug_assert_eq!(forward[0], SENTINEL);

        Self {
            source,
            target,
            forward,
        }
    }

    /// Creates the identity map of a sequence onto itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::AlignmentMap;
    /// use rnalign::Sequence;
    ///
    /// let sequence = "AUG".parse::<Sequence>()?;
    /// let map = AlignmentMap::identity(&sequence);
    ///
    /// assert_eq!(map.as_slice(), &[0, 1, 2, 3]);
    /// assert!(map.is_identity());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn identity(sequence: &Sequence) -> Self {
        Self::from_parts(
            sequence.clone(),
            sequence.clone(),
            (0..=sequence.len()).collect(),
        )
    }

    /// Attempts to build the forward map from the ordered columns of an
    /// alignment.
    ///
    /// Walking the columns with a source and a target counter (both starting
    /// at 1):
    ///
    /// - a source nucleotide against a gap records the sentinel and advances
    ///   the source counter,
    /// - a gap against a target nucleotide advances the target counter,
    /// - two nucleotides record the target counter and advance both.
    ///
    /// Every column must name the positions the counters are on, and the
    /// columns must cover both sequences end to end.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::alignment::Column;
    /// use rnalign::AlignmentMap;
    /// use rnalign::Sequence;
    ///
    /// let source = "AUG".parse::<Sequence>()?;
    /// let target = "AUUG".parse::<Sequence>()?;
    ///
    /// let columns = [
    ///     Column::Aligned { source: 1, target: 1 },
    ///     Column::TargetOnly(2),
    ///     Column::Aligned { source: 2, target: 3 },
    ///     Column::Aligned { source: 3, target: 4 },
    /// ];
    ///
    /// let map = AlignmentMap::try_from_columns(source.clone(), target.clone(), &columns)?;
    /// assert_eq!(map.as_slice(), &[0, 1, 3, 4]);
    ///
    /// assert!(AlignmentMap::try_from_columns(source, target, &columns[..3]).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_from_columns(
        source: Sequence,
        target: Sequence,
        columns: &[Column],
    ) -> Result<Self> {
        let (mut s, mut t) = (0, 0);

        for (i, column) in columns.iter().enumerate() {
            let next = match *column {
                Column::SourceOnly(a) => a == s + 1,
                Column::TargetOnly(b) => b == t + 1,
                Column::Aligned {
                    source: a,
                    target: b,
                } => a == s + 1 && b == t + 1,
            };

            if !next {
                return Err(Error::UnexpectedColumn(i + 1));
            }

            s += usize::from(column.source().is_some());
            t += usize::from(column.target().is_some());
        }

        if s != source.len() {
            return Err(Error::Uncovered {
                side: Side::Source,
                expected: source.len(),
                found: s,
            });
        }

        if t != target.len() {
            return Err(Error::Uncovered {
                side: Side::Target,
                expected: target.len(),
                found: t,
            });
        }

        Ok(Self::from_columns(source, target, columns))
    }

    /// Builds the forward map from columns that are known to cover both
    /// sequences in order.
    pub(crate) fn from_columns(source: Sequence, target: Sequence, columns: &[Column]) -> Self {
        let mut forward = Vec::with_capacity(source.len() + 1);
        forward.push(SENTINEL);

        let mut t = 1;

        for column in columns {
            match column {
                Column::SourceOnly(_) => forward.push(SENTINEL),
                Column::TargetOnly(_) => t += 1,
                Column::Aligned { .. } => {
                    forward.push(t);
                    t += 1;
                }
            }
        }

        Self::from_parts(source, target, forward)
    }

    /// Builds a map from a pair of gapped strings of equal length, as
    /// produced by [`Alignment::aligned()`](crate::Alignment::aligned).
    ///
    /// Each character either spells out the next nucleotide of its sequence
    /// (masked `.` positions included) or is a `-` gap. A sequence that
    /// itself holds `-` is ambiguous once rendered: a `-` that matches the
    /// next nucleotide is read as that nucleotide. Returns [`None`] when the
    /// gapped strings differ in length, when a character does not spell out
    /// its sequence, or when a column is a gap on both sides.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::AlignmentMap;
    /// use rnalign::Sequence;
    ///
    /// let source = "AUCUGGCUA".parse::<Sequence>()?;
    /// let target = "AUCGUGCUA".parse::<Sequence>()?;
    ///
    /// let map = AlignmentMap::from_gapped(source, target, "AUC-UGGCUA", "AUCGUG-CUA").unwrap();
    /// assert_eq!(map.as_slice(), &[0, 1, 2, 3, 5, 6, 0, 7, 8, 9]);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_gapped(
        source: Sequence,
        target: Sequence,
        gapped_source: &str,
        gapped_target: &str,
    ) -> Option<Self> {
        if gapped_source.len() != gapped_target.len() {
            return None;
        }

        // Whether `c` spells out the next nucleotide, is a gap, or neither.
        let step = |sequence: &[u8], consumed: usize, c: u8| -> Option<bool> {
            match sequence.get(consumed) {
                Some(&next) if next == c => Some(true),
                _ if c == crate::sequence::GAP as u8 => Some(false),
                _ => None,
            }
        };

        let (mut s, mut t) = (0, 0);
        let mut columns = Vec::with_capacity(gapped_source.len());

        for (a, b) in gapped_source.bytes().zip(gapped_target.bytes()) {
            let column = match (step(source.as_bytes(), s, a)?, step(target.as_bytes(), t, b)?) {
                (true, true) => {
                    s += 1;
                    t += 1;
                    Column::Aligned {
                        source: s,
                        target: t,
                    }
                }
                (true, false) => {
                    s += 1;
                    Column::SourceOnly(s)
                }
                (false, true) => {
                    t += 1;
                    Column::TargetOnly(t)
                }
                (false, false) => return None,
            };

            columns.push(column);
        }

        Self::try_from_columns(source, target, &columns).ok()
    }

    /// Attempts to create a map from an explicit forward array.
    ///
    /// The array must have `source.len() + 1` slots, hold the sentinel in slot
    /// 0, and have strictly increasing mapped entries that all fall within
    /// the target.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::map::Error;
    /// use rnalign::AlignmentMap;
    /// use rnalign::Sequence;
    ///
    /// let source = "AUG".parse::<Sequence>()?;
    /// let target = "AUUG".parse::<Sequence>()?;
    ///
    /// let map = AlignmentMap::try_from_forward(source.clone(), target.clone(), vec![0, 1, 0, 4])?;
    /// assert_eq!(map.translate(3), 4);
    ///
    /// let err =
    ///     AlignmentMap::try_from_forward(source, target, vec![0, 2, 1, 4]).unwrap_err();
    /// assert_eq!(err, Error::NotIncreasing { position: 2, value: 1 });
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_from_forward(
        source: Sequence,
        target: Sequence,
        forward: Vec<usize>,
    ) -> Result<Self> {
        if forward.len() != source.len() + 1 {
            return Err(Error::IncorrectLength {
                expected: source.len() + 1,
                found: forward.len(),
            });
        }

        if forward[0] != SENTINEL {
            return Err(Error::SentinelSlotUsed(forward[0]));
        }

        let mut last = SENTINEL;

        for (position, &value) in forward.iter().enumerate().skip(1) {
            if value == SENTINEL {
                continue;
            }

            if value > target.len() {
                return Err(Error::OutOfBounds { position, value });
            }

            if value <= last {
                return Err(Error::NotIncreasing { position, value });
            }

            last = value;
        }

        Ok(Self::from_parts(source, target, forward))
    }

    /// Gets the source sequence.
    pub fn source(&self) -> &Sequence {
        &self.source
    }

    /// Gets the target sequence.
    pub fn target(&self) -> &Sequence {
        &self.target
    }

    /// Gets the number of source positions covered by the map.
    pub fn len(&self) -> usize {
        self.forward.len() - 1
    }

    /// Returns whether the map covers no source positions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Translates a 1-based source position to a 1-based target position.
    ///
    /// Returns [`SENTINEL`] when the position is unmapped or out of range
    /// (including position 0 itself).
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::AlignmentMap;
    /// use rnalign::Sequence;
    ///
    /// let source = "AUG".parse::<Sequence>()?;
    /// let target = "AUUG".parse::<Sequence>()?;
    /// let map = AlignmentMap::try_from_forward(source, target, vec![0, 1, 0, 4])?;
    ///
    /// assert_eq!(map.translate(0), 0);
    /// assert_eq!(map.translate(1), 1);
    /// assert_eq!(map.translate(2), 0);
    /// assert_eq!(map.translate(3), 4);
    /// assert_eq!(map.translate(4), 0);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn translate(&self, position: usize) -> usize {
        self.forward.get(position).copied().unwrap_or(SENTINEL)
    }

    /// Translates a 1-based source position, returning [`None`] rather than
    /// the sentinel when there is no corresponding target position.
    pub fn get(&self, position: usize) -> Option<usize> {
        match self.translate(position) {
            SENTINEL => None,
            value => Some(value),
        }
    }

    /// Gets the whole forward index, including the reserved slot 0.
    pub fn as_slice(&self) -> &[usize] {
        &self.forward
    }

    /// Iterates over every mapped `(source, target)` position pair in order.
    pub fn mapped(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.forward
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, value)| **value != SENTINEL)
            .map(|(position, value)| (position, *value))
    }

    /// Gets the number of source positions that map to a target position.
    pub fn mapped_count(&self) -> usize {
        self.mapped().count()
    }

    /// Gets the fraction of source positions that do not map to a target
    /// position. An empty map has an unmapped fraction of zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::AlignmentMap;
    /// use rnalign::Sequence;
    ///
    /// let source = "AUGC".parse::<Sequence>()?;
    /// let target = "AUUG".parse::<Sequence>()?;
    /// let map = AlignmentMap::try_from_forward(source, target, vec![0, 1, 0, 4, 0])?;
    ///
    /// assert_eq!(map.mapped_count(), 2);
    /// assert_eq!(map.unmapped_fraction(), 0.5);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn unmapped_fraction(&self) -> f64 {
        match self.len() {
            0 => 0.0,
            n => (n - self.mapped_count()) as f64 / n as f64,
        }
    }

    /// Returns whether this map sends every position to itself.
    pub fn is_identity(&self) -> bool {
        self.source.len() == self.target.len()
            && self.forward.iter().enumerate().all(|(i, value)| i == *value)
    }

    /// Gets a [`StepThrough`] over the contiguous blocks of this map.
    pub fn blocks(&self) -> StepThrough<'_> {
        StepThrough::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_columns_with_indels() -> std::result::Result<(), Box<dyn std::error::Error>> {
        // Source:  AUC-UGGCUA
        // Target:  AUCGUG-CUA
        let source = "AUCUGGCUA".parse::<Sequence>()?;
        let target = "AUCGUGCUA".parse::<Sequence>()?;

        let columns = [
            Column::Aligned {
                source: 1,
                target: 1,
            },
            Column::Aligned {
                source: 2,
                target: 2,
            },
            Column::Aligned {
                source: 3,
                target: 3,
            },
            Column::TargetOnly(4),
            Column::Aligned {
                source: 4,
                target: 5,
            },
            Column::Aligned {
                source: 5,
                target: 6,
            },
            Column::SourceOnly(6),
            Column::Aligned {
                source: 7,
                target: 7,
            },
            Column::Aligned {
                source: 8,
                target: 8,
            },
            Column::Aligned {
                source: 9,
                target: 9,
            },
        ];

        let map = AlignmentMap::try_from_columns(source, target, &columns)?;
        assert_eq!(map.as_slice(), &[0, 1, 2, 3, 5, 6, 0, 7, 8, 9]);
        assert_eq!(map.mapped_count(), 8);

        Ok(())
    }

    #[test]
    fn test_gapped_strings_must_agree() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let source = "AUG".parse::<Sequence>()?;
        let target = "AUG".parse::<Sequence>()?;

        assert!(AlignmentMap::from_gapped(source.clone(), target.clone(), "AUG", "AU").is_none());
        assert!(AlignmentMap::from_gapped(source.clone(), target.clone(), "AU-G", "AU-G").is_none());
        assert!(AlignmentMap::from_gapped(source.clone(), target.clone(), "AUGG", "AUGG").is_none());
        assert!(AlignmentMap::from_gapped(source.clone(), target.clone(), "AUG", "AUG").is_some());

        // Every nucleotide must be spelled out as it is in the sequence.
        assert!(AlignmentMap::from_gapped(source.clone(), target.clone(), "ACG", "AUG").is_none());
        assert!(AlignmentMap::from_gapped(source, target, "AU.G", "AUG-").is_none());

        Ok(())
    }

    #[test]
    fn test_gapped_strings_with_masked_positions() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let source = "AU.GC".parse::<Sequence>()?;
        let target = "AUCGC".parse::<Sequence>()?;
        let map = AlignmentMap::from_gapped(source, target, "AU.GC", "AUCGC").unwrap();
        assert_eq!(map.as_slice(), &[0, 1, 2, 3, 4, 5]);

        // A stored gap that lines up with an alignment gap.
        let source = "AU-GC".parse::<Sequence>()?;
        let target = "AUGC".parse::<Sequence>()?;
        let map = AlignmentMap::from_gapped(source, target, "AU-GC", "AU-GC").unwrap();
        assert_eq!(map.as_slice(), &[0, 1, 2, 0, 3, 4]);

        Ok(())
    }

    #[test]
    fn test_malformed_columns() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let a = "A".parse::<Sequence>()?;

        // The target is walked past its end.
        let columns = [
            Column::TargetOnly(1),
            Column::Aligned {
                source: 1,
                target: 2,
            },
        ];
        let err = AlignmentMap::try_from_columns(a.clone(), a.clone(), &columns).unwrap_err();
        assert_eq!(
            err,
            Error::Uncovered {
                side: Side::Target,
                expected: 1,
                found: 2
            }
        );

        // A column that skips a source position.
        let columns = [Column::Aligned {
            source: 2,
            target: 1,
        }];
        let err = AlignmentMap::try_from_columns(a.clone(), a.clone(), &columns).unwrap_err();
        assert_eq!(err, Error::UnexpectedColumn(1));
        assert_eq!(err.to_string(), "column 1 does not continue the alignment");

        // The source is never covered.
        let err = AlignmentMap::try_from_columns(a.clone(), a, &[Column::TargetOnly(1)]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "columns cover 0 source positions, but the source has 1 positions"
        );

        Ok(())
    }

    #[test]
    fn test_invalid_forward_arrays() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let source = "AUG".parse::<Sequence>()?;
        let target = "AUG".parse::<Sequence>()?;

        let err = AlignmentMap::try_from_forward(source.clone(), target.clone(), vec![0, 1])
            .unwrap_err();
        assert_eq!(
            err,
            Error::IncorrectLength {
                expected: 4,
                found: 2
            }
        );

        let err = AlignmentMap::try_from_forward(source.clone(), target.clone(), vec![1, 1, 2, 3])
            .unwrap_err();
        assert_eq!(err, Error::SentinelSlotUsed(1));

        let err = AlignmentMap::try_from_forward(source.clone(), target.clone(), vec![0, 1, 2, 4])
            .unwrap_err();
        assert_eq!(
            err,
            Error::OutOfBounds {
                position: 3,
                value: 4
            }
        );

        // Injectivity: two source positions cannot share a target position.
        let err =
            AlignmentMap::try_from_forward(source, target, vec![0, 2, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            Error::NotIncreasing {
                position: 2,
                value: 2
            }
        );
        assert_eq!(
            err.to_string(),
            "source position 2 maps to 2, which does not come after the previously mapped target \
             position"
        );

        Ok(())
    }

    #[test]
    fn test_translate_and_get() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let source = "AUGC".parse::<Sequence>()?;
        let target = "AUG".parse::<Sequence>()?;
        let map = AlignmentMap::try_from_forward(source, target, vec![0, 1, 0, 2, 3])?;

        assert_eq!(map.get(2), None);
        assert_eq!(map.get(4), Some(3));
        assert_eq!(map.translate(100), SENTINEL);
        assert_eq!(map.mapped().collect::<Vec<_>>(), vec![(1, 1), (3, 2), (4, 3)]);
        assert!(!map.is_identity());

        Ok(())
    }
}
