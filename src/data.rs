//! Per-nucleotide datasets that can be reprojected onto another sequence.
//!
//! Every dataset is defined over a [`Sequence`]. Reprojecting a dataset
//! through an [`AlignmentMap`] (or anything that implements [`Remap`])
//! produces the same kind of dataset, now defined over the map's target.
//!
//! ```
//! use rnalign::data::Dataset;
//! use rnalign::data::Profile;
//! use rnalign::Sequence;
//!
//! let construct = "AUCGGCUAAGC".parse::<Sequence>()?;
//! let reference = "GGAAAAUCGGCUAAGCCCC".parse::<Sequence>()?;
//!
//! let profile = Profile::try_new(construct, vec![0.5; 11])?;
//! let fitted = profile.fit_to(&reference)?.into_inner();
//!
//! assert_eq!(fitted.len(), 19);
//! assert!(fitted.values()[0].is_nan());
//! assert_eq!(fitted.values()[5], 0.5);
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use tracing::warn;

use crate::Alignment;
use crate::AlignmentMap;
use crate::Sequence;
use crate::alignment::Cache;
use crate::reproject;
use crate::reproject::Coverage;
use crate::reproject::Remap;
use crate::reproject::Reprojection;
use crate::reproject::Threshold;
use crate::reproject::UnmappedPositionWarning;

pub mod annotation;
pub mod interactions;
pub mod profile;
pub mod structure;
pub mod track;

pub use annotation::Annotation;
pub use annotation::Span;
pub use interactions::Interaction;
pub use interactions::Interactions;
pub use profile::Profile;
pub use structure::Structure;
pub use track::Track;

/// An error related to constructing a dataset.
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The number of values doesn't match the length of the sequence.
    LengthMismatch {
        /// The expected number of values.
        expected: usize,

        /// The found number of values.
        found: usize,
    },

    /// A position falls outside of the sequence.
    PositionOutOfRange {
        /// The position.
        position: usize,

        /// The length of the sequence.
        length: usize,
    },

    /// A span starts at position 0 or ends before it starts.
    InvalidSpan {
        /// The start of the span.
        start: usize,

        /// The end of the span.
        end: usize,
    },

    /// A nucleotide was paired with itself.
    SelfPair(usize),

    /// A nucleotide was given more than one partner.
    ConflictingPair(usize),

    /// Two datasets that must share a sequence do not.
    SequenceMismatch,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::LengthMismatch { expected, found } => write!(
                f,
                "expected {expected} values (one per nucleotide), found {found} values"
            ),
            Error::PositionOutOfRange { position, length } => write!(
                f,
                "position {position} is outside of the sequence (valid positions are 1 to \
                 {length})"
            ),
            Error::InvalidSpan { start, end } => write!(
                f,
                "invalid span {start}-{end}: spans start at 1 and cannot end before they start"
            ),
            Error::SelfPair(position) => write!(f, "position {position} is paired with itself"),
            Error::ConflictingPair(position) => {
                write!(f, "position {position} is paired more than once")
            }
            Error::SequenceMismatch => {
                write!(f, "the datasets are not defined over the same sequence")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A [`Result`](std::result::Result) with a [`reproject::Error`].
type ReprojectResult<T> = std::result::Result<T, reproject::Error>;

/// Ensures a 1-based position falls within a sequence of `length`.
pub(crate) fn check_position(position: usize, length: usize) -> Result<()> {
    if position == 0 || position > length {
        return Err(Error::PositionOutOfRange { position, length });
    }

    Ok(())
}

/// A dataset defined over a sequence.
pub trait Dataset: Sized {
    /// Gets the sequence the dataset is defined over.
    fn sequence(&self) -> &Sequence;

    /// Gets the length of the sequence the dataset is defined over.
    fn len(&self) -> usize {
        self.sequence().len()
    }

    /// Returns whether the sequence the dataset is defined over is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reprojects the dataset through `map`, reporting how much of it
    /// survived.
    ///
    /// Callers should prefer [`Dataset::get_aligned_data()`], which checks
    /// that the map starts on this dataset's sequence.
    fn reproject(&self, map: &AlignmentMap) -> ReprojectResult<(Self, Coverage)>;

    /// Aligns this dataset's sequence against another dataset's sequence and
    /// returns the forward map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::data::Dataset;
    /// use rnalign::Sequence;
    ///
    /// let source = "GGGAAACCCUUU".parse::<Sequence>()?;
    /// let target = "GGGAAAUUU".parse::<Sequence>()?;
    ///
    /// let map = source.get_alignment_map(&target)?;
    /// assert_eq!(map.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 0, 0, 0, 7, 8, 9]);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    fn get_alignment_map<O: Dataset>(
        &self,
        other: &O,
    ) -> std::result::Result<AlignmentMap, crate::alignment::Error> {
        let alignment = Alignment::try_new(self.sequence().clone(), other.sequence().clone())?;
        Ok(alignment.into_map())
    }

    /// Reprojects the dataset onto the target of `remap`, flagging the result
    /// when more than half of the data is lost.
    fn get_aligned_data<R: Remap + ?Sized>(
        &self,
        remap: &R,
    ) -> ReprojectResult<Reprojection<Self>> {
        self.get_aligned_data_with(remap, Threshold::default())
    }

    /// Reprojects the dataset onto the target of `remap`, flagging the result
    /// when the fraction of lost data exceeds `threshold`.
    fn get_aligned_data_with<R: Remap + ?Sized>(
        &self,
        remap: &R,
        threshold: Threshold,
    ) -> ReprojectResult<Reprojection<Self>> {
        let map = remap.alignment_map();

        if map.source() != self.sequence() {
            return Err(reproject::Error::SourceMismatch);
        }

        let (data, coverage) = self.reproject(map)?;
        let warning = UnmappedPositionWarning::check(coverage, threshold);

        if let Some(warning) = &warning {
            warn!("{warning}");
        }

        Ok(Reprojection::new(data, warning))
    }

    /// Aligns this dataset's sequence against `other`'s and reprojects the
    /// dataset onto it.
    ///
    /// The alignment is thrown away afterwards. Use
    /// [`Dataset::fit_to_cached()`] when fitting several datasets onto the
    /// same sequence.
    fn fit_to<O: Dataset>(&self, other: &O) -> ReprojectResult<Reprojection<Self>> {
        let alignment = Alignment::try_new(self.sequence().clone(), other.sequence().clone())?;
        self.get_aligned_data(&alignment)
    }

    /// Like [`Dataset::fit_to()`], but looks the alignment up in (or adds it
    /// to) `cache`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::alignment::Cache;
    /// use rnalign::data::Dataset;
    /// use rnalign::data::Profile;
    /// use rnalign::Sequence;
    ///
    /// let construct = "AUCGGCUAAGC".parse::<Sequence>()?;
    /// let reference = "GGAAAAUCGGCUAAGCCCC".parse::<Sequence>()?;
    ///
    /// let mut cache = Cache::new();
    /// let profile = Profile::try_new(construct.clone(), vec![0.5; 11])?;
    ///
    /// let fitted = profile.fit_to_cached(&reference, &mut cache)?.into_inner();
    /// let sequence = construct.fit_to_cached(&reference, &mut cache)?.into_inner();
    ///
    /// assert_eq!(fitted.values()[5], 0.5);
    /// assert_eq!(sequence, reference);
    /// assert_eq!(cache.len(), 1);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    fn fit_to_cached<O: Dataset>(
        &self,
        other: &O,
        cache: &mut Cache,
    ) -> ReprojectResult<Reprojection<Self>> {
        let alignment = cache.get_or_align(self.sequence(), other.sequence())?;
        self.get_aligned_data(&*alignment)
    }
}

impl Dataset for Sequence {
    fn sequence(&self) -> &Sequence {
        self
    }

    fn reproject(&self, map: &AlignmentMap) -> ReprojectResult<(Self, Coverage)> {
        let coverage = Coverage::new(map.len(), map.len() - map.mapped_count());
        Ok((map.target().clone(), coverage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_mismatch() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let a = "AUCG".parse::<Sequence>()?;
        let b = "GCUA".parse::<Sequence>()?;

        let map = AlignmentMap::identity(&b);
        let err = a.get_aligned_data(&map).unwrap_err();

        assert_eq!(err, reproject::Error::SourceMismatch);

        Ok(())
    }

    #[test]
    fn test_warning_is_raised() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let a = "AUCG".parse::<Sequence>()?;
        let b = "AUCG".parse::<Sequence>()?;

        let map = AlignmentMap::try_from_forward(a.clone(), b, vec![0, 1, 0, 0, 0])?;

        let reprojection = a.get_aligned_data(&map)?;
        let warning = reprojection.warning().unwrap();
        assert_eq!(warning.coverage(), Coverage::new(4, 3));

        let reprojection = a.get_aligned_data_with(&map, Threshold::new(0.8).unwrap())?;
        assert!(reprojection.warning().is_none());

        Ok(())
    }

    #[test]
    fn test_fits_share_a_cached_alignment() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let construct = "GGGAAACCCUUU".parse::<Sequence>()?;
        let reference = "GGGAAAUUU".parse::<Sequence>()?;
        let profile = Profile::try_new(construct.clone(), (1..=12).map(f64::from).collect())?;

        let mut cache = Cache::new();
        let cached = profile.fit_to_cached(&reference, &mut cache)?;
        let uncached = profile.fit_to(&reference)?;

        assert_eq!(cached.data().values()[6], 10.0);
        assert_eq!(cached.data().values(), uncached.data().values());
        assert_eq!(cache.len(), 1);

        construct.fit_to_cached(&reference, &mut cache)?;
        assert_eq!(cache.len(), 1);

        Ok(())
    }

    #[test]
    fn test_out_of_range() {
        assert!(check_position(1, 1).is_ok());

        let err = check_position(0, 4).unwrap_err();
        assert_eq!(
            err.to_string(),
            "position 0 is outside of the sequence (valid positions are 1 to 4)"
        );
    }
}
