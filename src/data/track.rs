//! Per-nucleotide categorical tracks.

use crate::AlignmentMap;
use crate::Sequence;
use crate::data::Dataset;
use crate::data::Error;
use crate::reproject;
use crate::reproject::Coverage;
use crate::reproject::scatter;

/// One categorical value per nucleotide (for example, a color), with a
/// neutral value used wherever nothing maps after reprojection.
#[derive(Clone, Debug, PartialEq)]
pub struct Track<T> {
    /// The sequence the track is defined over.
    sequence: Sequence,

    /// One value per nucleotide.
    values: Vec<T>,

    /// The value given to positions without data.
    neutral: T,
}

impl<T: Clone> Track<T> {
    /// Attempts to create a new [`Track`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::data::Dataset;
    /// use rnalign::data::Track;
    /// use rnalign::AlignmentMap;
    /// use rnalign::Sequence;
    ///
    /// let source = "AUG".parse::<Sequence>()?;
    /// let target = "AUUG".parse::<Sequence>()?;
    /// let map = AlignmentMap::try_from_forward(source.clone(), target, vec![0, 1, 2, 4])?;
    ///
    /// let track = Track::try_new(source, vec!['x', 'y', 'z'], '.')?;
    /// let reprojected = track.get_aligned_data(&map)?.into_inner();
    ///
    /// assert_eq!(reprojected.values(), &['x', 'y', '.', 'z']);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(sequence: Sequence, values: Vec<T>, neutral: T) -> Result<Self, Error> {
        if values.len() != sequence.len() {
            return Err(Error::LengthMismatch {
                expected: sequence.len(),
                found: values.len(),
            });
        }

        Ok(Self {
            sequence,
            values,
            neutral,
        })
    }

    /// Gets the values. `values()[i]` belongs to position `i + 1`.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Gets the neutral value.
    pub fn neutral(&self) -> &T {
        &self.neutral
    }

    /// Consumes `self` and returns the values.
    pub fn into_values(self) -> Vec<T> {
        self.values
    }
}

impl<T: Clone> Dataset for Track<T> {
    fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    fn reproject(&self, map: &AlignmentMap) -> Result<(Self, Coverage), reproject::Error> {
        let values = scatter(&self.values, map, self.neutral.clone())?;

        let track = Self {
            sequence: map.target().clone(),
            values,
            neutral: self.neutral.clone(),
        };

        Ok((track, Coverage::new(map.len(), map.len() - map.mapped_count())))
    }
}
