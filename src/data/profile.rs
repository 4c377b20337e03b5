//! Per-nucleotide reactivity profiles.

use crate::AlignmentMap;
use crate::Sequence;
use crate::data::Dataset;
use crate::data::Error;
use crate::reproject;
use crate::reproject::Coverage;
use crate::reproject::scatter_scalars;

/// A per-nucleotide scalar profile (for example, chemical probing
/// reactivities), with optional per-nucleotide errors.
///
/// Missing values are NaN.
#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    /// The sequence the profile is defined over.
    sequence: Sequence,

    /// One value per nucleotide.
    values: Vec<f64>,

    /// One error per nucleotide, if known.
    errors: Option<Vec<f64>>,
}

impl Profile {
    /// Attempts to create a new [`Profile`] with one value per nucleotide.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::data::Profile;
    /// use rnalign::Sequence;
    ///
    /// let sequence = "AUCG".parse::<Sequence>()?;
    ///
    /// let profile = Profile::try_new(sequence.clone(), vec![0.1, 1.2, f64::NAN, 0.4])?;
    /// assert_eq!(profile.get(2), Some(1.2));
    ///
    /// assert!(Profile::try_new(sequence, vec![0.1]).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(sequence: Sequence, values: Vec<f64>) -> Result<Self, Error> {
        if values.len() != sequence.len() {
            return Err(Error::LengthMismatch {
                expected: sequence.len(),
                found: values.len(),
            });
        }

        Ok(Self {
            sequence,
            values,
            errors: None,
        })
    }

    /// Attaches one error per nucleotide to the profile.
    pub fn with_errors(mut self, errors: Vec<f64>) -> Result<Self, Error> {
        if errors.len() != self.sequence.len() {
            return Err(Error::LengthMismatch {
                expected: self.sequence.len(),
                found: errors.len(),
            });
        }

        self.errors = Some(errors);
        Ok(self)
    }

    /// Gets the values. `values()[i]` belongs to position `i + 1`.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Gets the errors, if any were attached.
    pub fn errors(&self) -> Option<&[f64]> {
        self.errors.as_deref()
    }

    /// Gets the value at a 1-based position.
    pub fn get(&self, position: usize) -> Option<f64> {
        position
            .checked_sub(1)
            .and_then(|i| self.values.get(i))
            .copied()
    }

    /// Gets the number of positions that carry a value.
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_nan()).count()
    }
}

impl Dataset for Profile {
    fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    fn reproject(&self, map: &AlignmentMap) -> Result<(Self, Coverage), reproject::Error> {
        let values = scatter_scalars(&self.values, map)?;

        let errors = match &self.errors {
            Some(errors) => Some(scatter_scalars(errors, map)?),
            None => None,
        };

        let lost = self
            .values
            .iter()
            .enumerate()
            .filter(|(i, v)| !v.is_nan() && map.get(i + 1).is_none())
            .count();

        let profile = Self {
            sequence: map.target().clone(),
            values,
            errors,
        };

        Ok((profile, Coverage::new(self.defined_count(), lost)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values_are_not_counted_as_lost() -> Result<(), Box<dyn std::error::Error>> {
        let source = "AUCG".parse::<Sequence>()?;
        let target = "AUG".parse::<Sequence>()?;
        let map = AlignmentMap::try_from_forward(source.clone(), target, vec![0, 1, 2, 0, 3])?;

        let profile = Profile::try_new(source, vec![0.1, 0.2, f64::NAN, 0.4])?
            .with_errors(vec![0.01, 0.02, 0.03, 0.04])?;

        let (reprojected, coverage) = profile.reproject(&map)?;

        assert_eq!(coverage, Coverage::new(3, 0));
        assert_eq!(reprojected.values(), &[0.1, 0.2, 0.4]);
        assert_eq!(reprojected.errors(), Some(&[0.01, 0.02, 0.04][..]));
        assert_eq!(reprojected.len(), 3);

        Ok(())
    }

    #[test]
    fn test_get_out_of_range() -> Result<(), Box<dyn std::error::Error>> {
        let profile = Profile::try_new("AU".parse()?, vec![1.0, 2.0])?;

        assert_eq!(profile.get(0), None);
        assert_eq!(profile.get(3), None);

        Ok(())
    }
}
