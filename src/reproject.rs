//! Reprojection of per-nucleotide data through an alignment map.
//!
//! Datasets are reprojected by scattering: every mapped source position
//! carries its value to the target position it maps to, and every target
//! position nobody maps to is filled with a neutral value (NaN for scalar
//! data). Sparse data (pairs, spans, sites) is remapped endpoint by endpoint
//! and dropped when it falls into a gap.
//!
//! Losing positions is expected (a truncated construct compared against a
//! full-length reference loses everything past the truncation), so it never
//! fails a reprojection. Instead, when the fraction of lost data exceeds a
//! [`Threshold`], an [`UnmappedPositionWarning`] is attached to the result.

use crate::Alignment;
use crate::AlignmentChain;
use crate::AlignmentMap;
use crate::alignment;
use crate::chain;

/// The default threshold above which lost data is reported.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// An error related to reprojecting data.
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The map does not start on the sequence the data is defined over.
    SourceMismatch,

    /// The values to scatter don't have one entry per source position.
    LengthMismatch {
        /// The expected number of values.
        expected: usize,

        /// The found number of values.
        found: usize,
    },

    /// An alignment error.
    Alignment(alignment::Error),

    /// An alignment chain error.
    Chain(chain::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::SourceMismatch => write!(
                f,
                "the source sequence of the map does not match the sequence of the data"
            ),
            Error::LengthMismatch { expected, found } => write!(
                f,
                "expected one value per source position ({expected}), found {found} values"
            ),
            Error::Alignment(err) => write!(f, "alignment error: {err}"),
            Error::Chain(err) => write!(f, "alignment chain error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<alignment::Error> for Error {
    fn from(err: alignment::Error) -> Self {
        Error::Alignment(err)
    }
}

impl From<chain::Error> for Error {
    fn from(err: chain::Error) -> Self {
        Error::Chain(err)
    }
}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// Anything that can hand out the [`AlignmentMap`] to reproject through.
pub trait Remap {
    /// Gets the map.
    fn alignment_map(&self) -> &AlignmentMap;
}

impl Remap for AlignmentMap {
    fn alignment_map(&self) -> &AlignmentMap {
        self
    }
}

impl Remap for Alignment {
    fn alignment_map(&self) -> &AlignmentMap {
        self.map()
    }
}

impl Remap for AlignmentChain {
    fn alignment_map(&self) -> &AlignmentMap {
        self.compose()
    }
}

impl<T: Remap + ?Sized> Remap for std::sync::Arc<T> {
    fn alignment_map(&self) -> &AlignmentMap {
        (**self).alignment_map()
    }
}

/// The fraction of lost data above which a reprojection is flagged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Threshold(f64);

impl Threshold {
    /// Creates a new [`Threshold`]. Returns [`None`] unless `fraction` is
    /// within `0.0..=1.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::reproject::Threshold;
    ///
    /// assert_eq!(Threshold::new(0.25).unwrap().get(), 0.25);
    /// assert!(Threshold::new(1.5).is_none());
    /// assert!(Threshold::new(f64::NAN).is_none());
    /// ```
    pub fn new(fraction: f64) -> Option<Self> {
        (0.0..=1.0).contains(&fraction).then_some(Self(fraction))
    }

    /// Gets the inner fraction.
    pub fn get(&self) -> f64 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(DEFAULT_THRESHOLD)
    }
}

/// How much of a dataset survived a reprojection.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Coverage {
    /// The number of data points before reprojection.
    total: usize,

    /// The number of data points that did not survive.
    lost: usize,
}

impl Coverage {
    /// Creates a new [`Coverage`].
    pub fn new(total: usize, lost: usize) -> Self {
        debug_assert!(lost <= total);
        Self { total, lost }
    }

    /// Gets the number of data points before reprojection.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Gets the number of data points that did not survive.
    pub fn lost(&self) -> usize {
        self.lost
    }

    /// Gets the fraction of data points that did not survive. A dataset with
    /// no data points loses nothing.
    pub fn fraction(&self) -> f64 {
        match self.total {
            0 => 0.0,
            n => self.lost as f64 / n as f64,
        }
    }
}

/// A non-fatal report that a large share of a dataset could not be mapped
/// onto the target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnmappedPositionWarning {
    /// The coverage that triggered the warning.
    coverage: Coverage,

    /// The threshold that was exceeded.
    threshold: Threshold,
}

impl UnmappedPositionWarning {
    /// Checks a [`Coverage`] against a [`Threshold`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::reproject::Coverage;
    /// use rnalign::reproject::Threshold;
    /// use rnalign::reproject::UnmappedPositionWarning;
    ///
    /// let threshold = Threshold::default();
    ///
    /// assert!(UnmappedPositionWarning::check(Coverage::new(10, 5), threshold).is_none());
    ///
    /// let warning = UnmappedPositionWarning::check(Coverage::new(10, 6), threshold).unwrap();
    /// assert_eq!(warning.fraction(), 0.6);
    /// assert_eq!(
    ///     warning.to_string(),
    ///     "6 of 10 data points (60.0%) could not be mapped onto the target, more than the 50.0% threshold"
    /// );
    /// ```
    pub fn check(coverage: Coverage, threshold: Threshold) -> Option<Self> {
        (coverage.fraction() > threshold.get()).then_some(Self {
            coverage,
            threshold,
        })
    }

    /// Gets the coverage that triggered the warning.
    pub fn coverage(&self) -> Coverage {
        self.coverage
    }

    /// Gets the fraction of data points that did not survive.
    pub fn fraction(&self) -> f64 {
        self.coverage.fraction()
    }
}

impl std::fmt::Display for UnmappedPositionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} of {} data points ({:.1}%) could not be mapped onto the target, more than the \
             {:.1}% threshold",
            self.coverage.lost(),
            self.coverage.total(),
            self.fraction() * 100.0,
            self.threshold.get() * 100.0
        )
    }
}

/// A reprojected dataset alongside any warning raised while producing it.
#[derive(Clone, Debug)]
pub struct Reprojection<T> {
    /// The reprojected data.
    data: T,

    /// The warning, if too much data was lost.
    warning: Option<UnmappedPositionWarning>,
}

impl<T> Reprojection<T> {
    /// Creates a new [`Reprojection`].
    pub(crate) fn new(data: T, warning: Option<UnmappedPositionWarning>) -> Self {
        Self { data, warning }
    }

    /// Gets the reprojected data.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Gets the warning, if one was raised.
    pub fn warning(&self) -> Option<&UnmappedPositionWarning> {
        self.warning.as_ref()
    }

    /// Consumes `self` and returns the reprojected data, discarding any
    /// warning.
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Consumes `self` and returns the reprojected data and the warning.
    pub fn into_parts(self) -> (T, Option<UnmappedPositionWarning>) {
        (self.data, self.warning)
    }

    /// Maps the reprojected data, keeping the warning.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reprojection<U> {
        Reprojection {
            data: f(self.data),
            warning: self.warning,
        }
    }
}

/// Scatters one value per source position onto the target.
///
/// `values[i]` belongs to source position `i + 1`. The output holds one value
/// per target position (`output[j]` belongs to target position `j + 1`), with
/// `fill` wherever no source position maps.
///
/// # Examples
///
/// ```
/// use rnalign::reproject::scatter;
/// use rnalign::AlignmentMap;
/// use rnalign::Sequence;
///
/// let source = "AUG".parse::<Sequence>()?;
/// let target = "AUUG".parse::<Sequence>()?;
/// let map = AlignmentMap::try_from_forward(source, target, vec![0, 1, 0, 4])?;
///
/// let scattered = scatter(&["a", "b", "c"], &map, "-")?;
/// assert_eq!(scattered, vec!["a", "-", "-", "c"]);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn scatter<T: Clone>(values: &[T], map: &AlignmentMap, fill: T) -> Result<Vec<T>> {
    if values.len() != map.len() {
        return Err(Error::LengthMismatch {
            expected: map.len(),
            found: values.len(),
        });
    }

    let mut output = vec![fill; map.target().len()];

    for (source, target) in map.mapped() {
        output[target - 1] = values[source - 1].clone();
    }

    Ok(output)
}

/// Scatters scalar values onto the target, filling unmapped target positions
/// with NaN.
///
/// # Examples
///
/// ```
/// use rnalign::reproject::scatter_scalars;
/// use rnalign::AlignmentMap;
/// use rnalign::Sequence;
///
/// let source = "AUG".parse::<Sequence>()?;
/// let target = "AUUG".parse::<Sequence>()?;
/// let map = AlignmentMap::try_from_forward(source, target, vec![0, 1, 2, 4])?;
///
/// let scattered = scatter_scalars(&[0.1, 0.2, 0.3], &map)?;
/// assert_eq!(scattered[0], 0.1);
/// assert_eq!(scattered[1], 0.2);
/// assert!(scattered[2].is_nan());
/// assert_eq!(scattered[3], 0.3);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn scatter_scalars(values: &[f64], map: &AlignmentMap) -> Result<Vec<f64>> {
    scatter(values, map, f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sequence;

    #[test]
    fn test_scatter_length_mismatch() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let sequence = "AUG".parse::<Sequence>()?;
        let map = AlignmentMap::identity(&sequence);

        let err = scatter(&[1, 2], &map, 0).unwrap_err();
        assert_eq!(
            err,
            Error::LengthMismatch {
                expected: 3,
                found: 2
            }
        );

        Ok(())
    }

    #[test]
    fn test_scatter_completeness() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let source = "AUCUGGCUA".parse::<Sequence>()?;
        let target = "AUCGUGCUA".parse::<Sequence>()?;
        let map = AlignmentMap::try_from_forward(
            source,
            target,
            vec![0, 1, 2, 3, 5, 6, 0, 7, 8, 9],
        )?;

        let values = (1..=9).map(|v| v as f64).collect::<Vec<_>>();
        let scattered = scatter_scalars(&values, &map)?;

        assert_eq!(scattered.len(), 9);

        // Target position 4 is not hit by any source position.
        assert!(scattered[3].is_nan());

        for (source, target) in map.mapped() {
            assert_eq!(scattered[target - 1], values[source - 1]);
        }

        Ok(())
    }

    #[test]
    fn test_remap_through_arc() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let sequence = "AUG".parse::<Sequence>()?;
        let alignment = std::sync::Arc::new(Alignment::try_new(sequence.clone(), sequence)?);

        assert!(alignment.alignment_map().is_identity());

        Ok(())
    }

    #[test]
    fn test_coverage_of_nothing() {
        assert_eq!(Coverage::default().fraction(), 0.0);
        assert!(UnmappedPositionWarning::check(Coverage::default(), Threshold::default()).is_none());
    }
}
