//! Secondary structures as base-pair tables.

use std::collections::HashSet;

use crate::AlignmentMap;
use crate::Sequence;
use crate::data::Dataset;
use crate::data::Error;
use crate::data::check_position;
use crate::map::SENTINEL;
use crate::reproject;
use crate::reproject::Coverage;

/// A secondary structure, stored as a 1-based partner table.
///
/// Slot `i` holds the position nucleotide `i` is paired with, or the sentinel
/// (0) when it is unpaired. Slot 0 is reserved.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Structure {
    /// The sequence the structure is defined over.
    sequence: Sequence,

    /// The partner table.
    partners: Vec<usize>,
}

impl Structure {
    /// Creates an unpaired structure over a sequence.
    pub fn unpaired(sequence: Sequence) -> Self {
        let partners = vec![SENTINEL; sequence.len() + 1];
        Self { sequence, partners }
    }

    /// Attempts to create a structure from a list of base pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::data::Error;
    /// use rnalign::data::Structure;
    /// use rnalign::Sequence;
    ///
    /// let sequence = "GGGAAACCC".parse::<Sequence>()?;
    ///
    /// let structure = Structure::try_from_pairs(sequence.clone(), [(1, 9), (8, 2), (3, 7)])?;
    /// assert_eq!(structure.partner(2), Some(8));
    /// assert_eq!(structure.partner(5), None);
    /// assert_eq!(structure.pairs().collect::<Vec<_>>(), vec![(1, 9), (2, 8), (3, 7)]);
    ///
    /// let err = Structure::try_from_pairs(sequence, [(1, 9), (1, 8)]).unwrap_err();
    /// assert_eq!(err, Error::ConflictingPair(1));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_from_pairs(
        sequence: Sequence,
        pairs: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, Error> {
        let mut structure = Self::unpaired(sequence);

        for (i, j) in pairs {
            check_position(i, structure.sequence.len())?;
            check_position(j, structure.sequence.len())?;

            if i == j {
                return Err(Error::SelfPair(i));
            }

            for position in [i, j] {
                if structure.partners[position] != SENTINEL {
                    return Err(Error::ConflictingPair(position));
                }
            }

            structure.partners[i] = j;
            structure.partners[j] = i;
        }

        Ok(structure)
    }

    /// Gets the partner of a 1-based position, if it is paired.
    pub fn partner(&self, position: usize) -> Option<usize> {
        match self.partners.get(position).copied() {
            None | Some(SENTINEL) => None,
            Some(partner) => Some(partner),
        }
    }

    /// Gets the whole partner table, including the reserved slot 0.
    pub fn partners(&self) -> &[usize] {
        &self.partners
    }

    /// Iterates over the base pairs as `(i, j)` with `i < j`, ordered by `i`.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.partners
            .iter()
            .enumerate()
            .filter(|(i, j)| **j != SENTINEL && *i < **j)
            .map(|(i, j)| (i, *j))
    }

    /// Gets the number of base pairs.
    pub fn pair_count(&self) -> usize {
        self.pairs().count()
    }

    /// Compares this structure's base pairs against a reference structure
    /// over the same sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::data::Structure;
    /// use rnalign::Sequence;
    ///
    /// let sequence = "GGGAAACCC".parse::<Sequence>()?;
    ///
    /// let predicted = Structure::try_from_pairs(sequence.clone(), [(1, 9), (2, 8), (4, 6)])?;
    /// let reference = Structure::try_from_pairs(sequence, [(1, 9), (2, 8), (3, 7), (4, 5)])?;
    ///
    /// let comparison = predicted.compare(&reference)?;
    /// assert_eq!(comparison.shared(), 2);
    /// assert_eq!(comparison.sensitivity(), Some(0.5));
    /// assert_eq!(comparison.ppv(), Some(2.0 / 3.0));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn compare(&self, reference: &Structure) -> Result<PairComparison, Error> {
        if self.sequence != reference.sequence {
            return Err(Error::SequenceMismatch);
        }

        let ours = self.pairs().collect::<HashSet<_>>();
        let shared = reference.pairs().filter(|pair| ours.contains(pair)).count();

        Ok(PairComparison {
            shared,
            predicted: ours.len(),
            reference: reference.pair_count(),
        })
    }
}

impl Dataset for Structure {
    fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    fn reproject(&self, map: &AlignmentMap) -> Result<(Self, Coverage), reproject::Error> {
        let mut reprojected = Self::unpaired(map.target().clone());
        let (mut total, mut kept) = (0, 0);

        for (i, j) in self.pairs() {
            total += 1;

            if let (Some(i), Some(j)) = (map.get(i), map.get(j)) {
                reprojected.partners[i] = j;
                reprojected.partners[j] = i;
                kept += 1;
            }
        }

        Ok((reprojected, Coverage::new(total, total - kept)))
    }
}

/// The agreement between the base pairs of two structures.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PairComparison {
    /// Pairs found in both structures.
    shared: usize,

    /// Pairs in the compared structure.
    predicted: usize,

    /// Pairs in the reference structure.
    reference: usize,
}

impl PairComparison {
    /// Gets the number of pairs found in both structures.
    pub fn shared(&self) -> usize {
        self.shared
    }

    /// Gets the fraction of reference pairs that were recovered. Returns
    /// [`None`] when the reference has no pairs.
    pub fn sensitivity(&self) -> Option<f64> {
        (self.reference > 0).then(|| self.shared as f64 / self.reference as f64)
    }

    /// Gets the fraction of compared pairs that are in the reference (the
    /// positive predictive value). Returns [`None`] when the compared
    /// structure has no pairs.
    pub fn ppv(&self) -> Option<f64> {
        (self.predicted > 0).then(|| self.shared as f64 / self.predicted as f64)
    }
}
