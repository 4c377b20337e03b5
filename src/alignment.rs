//! Pairwise alignments between two sequences.
//!
//! An [`Alignment`] is cheap to construct: the dynamic programming step is
//! only run the first time the columns (or anything derived from them) are
//! requested, and the result is kept for the life of the object.

use std::sync::OnceLock;

use tracing::debug;

use crate::Sequence;
use crate::map::AlignmentMap;

pub mod aligner;
pub mod cache;
pub mod column;
pub mod scoring;

pub use cache::Cache;
pub use column::Column;
pub use scoring::Scoring;

/// The side of an alignment.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    /// The source sequence.
    Source,

    /// The target sequence.
    Target,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Source => write!(f, "source"),
            Side::Target => write!(f, "target"),
        }
    }
}

/// An error related to an [`Alignment`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// One of the sequences has no nucleotides, so there is nothing to align.
    EmptySequence(Side),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::EmptySequence(side) => {
                write!(f, "cannot align an empty {side} sequence")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A global alignment of a source sequence against a target sequence.
#[derive(Debug)]
pub struct Alignment {
    /// The source sequence.
    source: Sequence,

    /// The target sequence.
    target: Sequence,

    /// The scoring scheme.
    scoring: Scoring,

    /// The computed alignment.
    aligned: OnceLock<aligner::Aligned>,

    /// The forward map derived from the computed alignment.
    map: OnceLock<AlignmentMap>,
}

impl Alignment {
    /// Attempts to create a new [`Alignment`] with the default [`Scoring`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::Alignment;
    /// use rnalign::Sequence;
    ///
    /// let source = "AUCG".parse::<Sequence>()?;
    /// let target = "AUCG".parse::<Sequence>()?;
    /// let alignment = Alignment::try_new(source, target)?;
    ///
    /// assert_eq!(alignment.map().as_slice(), &[0, 1, 2, 3, 4]);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(source: Sequence, target: Sequence) -> Result<Self> {
        Self::try_with_scoring(source, target, Scoring::default())
    }

    /// Attempts to create a new [`Alignment`] with the provided [`Scoring`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::alignment::Error;
    /// use rnalign::alignment::Scoring;
    /// use rnalign::alignment::Side;
    /// use rnalign::Alignment;
    /// use rnalign::Sequence;
    ///
    /// let source = "".parse::<Sequence>()?;
    /// let target = "AUCG".parse::<Sequence>()?;
    ///
    /// let err = Alignment::try_with_scoring(source, target, Scoring::default()).unwrap_err();
    /// assert_eq!(err, Error::EmptySequence(Side::Source));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_with_scoring(source: Sequence, target: Sequence, scoring: Scoring) -> Result<Self> {
        if source.is_empty() {
            return Err(Error::EmptySequence(Side::Source));
        }

        if target.is_empty() {
            return Err(Error::EmptySequence(Side::Target));
        }

        Ok(Self {
            source,
            target,
            scoring,
            aligned: OnceLock::new(),
            map: OnceLock::new(),
        })
    }

    /// Gets the source sequence.
    pub fn source(&self) -> &Sequence {
        &self.source
    }

    /// Gets the target sequence.
    pub fn target(&self) -> &Sequence {
        &self.target
    }

    /// Gets the scoring scheme.
    pub fn scoring(&self) -> &Scoring {
        &self.scoring
    }

    /// Returns whether the alignment has already been computed.
    pub fn is_computed(&self) -> bool {
        self.aligned.get().is_some()
    }

    /// Gets the computed alignment, running the aligner on first use.
    fn computed(&self) -> &aligner::Aligned {
        self.aligned.get_or_init(|| {
            debug!(
                source = self.source.len(),
                target = self.target.len(),
                "computing pairwise alignment"
            );

            aligner::align(
                self.source.as_bytes(),
                self.target.as_bytes(),
                &self.scoring,
            )
        })
    }

    /// Gets the score of the alignment (scaled by
    /// [`SCALE`](scoring::SCALE)).
    pub fn score(&self) -> i32 {
        self.computed().score
    }

    /// Gets the ordered columns of the alignment.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::alignment::Column;
    /// use rnalign::Alignment;
    /// use rnalign::Sequence;
    ///
    /// let source = "GGGAAAUUU".parse::<Sequence>()?;
    /// let target = "GGGAAACCCUUU".parse::<Sequence>()?;
    /// let alignment = Alignment::try_new(source, target)?;
    ///
    /// let columns = alignment.columns();
    /// assert_eq!(columns.len(), 12);
    /// assert_eq!(columns[6], Column::TargetOnly(7));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn columns(&self) -> &[Column] {
        &self.computed().columns
    }

    /// Renders the alignment as a pair of gapped strings (source, target),
    /// using `-` for gaps.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::Alignment;
    /// use rnalign::Sequence;
    ///
    /// let source = "GGGAAAUUU".parse::<Sequence>()?;
    /// let target = "GGGAAACCCUUU".parse::<Sequence>()?;
    /// let alignment = Alignment::try_new(source, target)?;
    ///
    /// let (source, target) = alignment.aligned();
    /// assert_eq!(source, "GGGAAA---UUU");
    /// assert_eq!(target, "GGGAAACCCUUU");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn aligned(&self) -> (String, String) {
        let source = self.source.as_bytes();
        let target = self.target.as_bytes();

        self.columns()
            .iter()
            .map(|column| {
                let a = column
                    .source()
                    .map(|i| source[i - 1] as char)
                    .unwrap_or(crate::sequence::GAP);
                let b = column
                    .target()
                    .map(|j| target[j - 1] as char)
                    .unwrap_or(crate::sequence::GAP);
                (a, b)
            })
            .unzip()
    }

    /// Gets the forward [`AlignmentMap`] from the source to the target.
    pub fn map(&self) -> &AlignmentMap {
        self.map.get_or_init(|| {
            AlignmentMap::from_columns(
                self.source.clone(),
                self.target.clone(),
                self.columns(),
            )
        })
    }

    /// Consumes `self` and returns the forward [`AlignmentMap`].
    pub fn into_map(self) -> AlignmentMap {
        self.map();

        let Alignment { map, .. } = self;
        map.into_inner()
            .unwrap_or_else(|| unreachable!("the map is initialized before being taken"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_is_lazy() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let source = "AUCUGGCUA".parse::<Sequence>()?;
        let target = "AUCGUGCUA".parse::<Sequence>()?;

        let alignment = Alignment::try_new(source, target)?;
        assert!(!alignment.is_computed());

        let first = alignment.columns().as_ptr();
        assert!(alignment.is_computed());

        // Memoized: the same columns are handed back.
        assert_eq!(alignment.columns().as_ptr(), first);

        Ok(())
    }

    #[test]
    fn test_empty_target() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let source = "AUCG".parse::<Sequence>()?;
        let target = "".parse::<Sequence>()?;

        let err = Alignment::try_new(source, target).unwrap_err();
        assert_eq!(err, Error::EmptySequence(Side::Target));
        assert_eq!(err.to_string(), "cannot align an empty target sequence");

        Ok(())
    }

    #[test]
    fn test_self_alignment_is_identity() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let sequence = "GGCUAGCUAGGCUUAACG".parse::<Sequence>()?;
        let alignment = Alignment::try_new(sequence.clone(), sequence.clone())?;

        let map = alignment.map();
        assert_eq!(map.as_slice().len(), sequence.len() + 1);
        for i in 0..=sequence.len() {
            assert_eq!(map.translate(i), i);
        }

        Ok(())
    }

    #[test]
    fn test_into_map() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let source = "GGGAAACCCUUU".parse::<Sequence>()?;
        let target = "GGGAAAUUU".parse::<Sequence>()?;

        let map = Alignment::try_new(source, target)?.into_map();
        assert_eq!(map.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 0, 0, 0, 7, 8, 9]);

        Ok(())
    }
}
