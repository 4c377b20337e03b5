//! Inter-nucleotide interaction data.

use crate::AlignmentMap;
use crate::Sequence;
use crate::data::Dataset;
use crate::data::Error;
use crate::data::check_position;
use crate::reproject;
use crate::reproject::Coverage;

/// A single interaction between two nucleotides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interaction {
    /// The 1-based position of the first nucleotide.
    pub i: usize,

    /// The 1-based position of the second nucleotide.
    pub j: usize,

    /// The strength of the interaction.
    pub value: f64,
}

impl Interaction {
    /// Creates a new [`Interaction`].
    pub fn new(i: usize, j: usize, value: f64) -> Self {
        Self { i, j, value }
    }
}

/// A list of pairwise interactions (for example, correlated chemical
/// modifications or crosslinks) over one sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Interactions {
    /// The sequence the interactions are defined over.
    sequence: Sequence,

    /// The interactions.
    interactions: Vec<Interaction>,
}

impl Interactions {
    /// Attempts to create a new [`Interactions`]. Every endpoint must fall
    /// within the sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::data::Interaction;
    /// use rnalign::data::Interactions;
    /// use rnalign::Sequence;
    ///
    /// let sequence = "GGGAAACCC".parse::<Sequence>()?;
    ///
    /// let interactions = Interactions::try_new(
    ///     sequence.clone(),
    ///     vec![Interaction::new(1, 9, 0.8), Interaction::new(2, 8, 0.6)],
    /// )?;
    /// assert_eq!(interactions.interactions().len(), 2);
    ///
    /// assert!(Interactions::try_new(sequence, vec![Interaction::new(1, 10, 0.8)]).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(sequence: Sequence, interactions: Vec<Interaction>) -> Result<Self, Error> {
        for interaction in &interactions {
            check_position(interaction.i, sequence.len())?;
            check_position(interaction.j, sequence.len())?;
        }

        Ok(Self {
            sequence,
            interactions,
        })
    }

    /// Gets the interactions.
    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    /// Iterates over the `(i, j)` position pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.interactions.iter().map(|x| (x.i, x.j))
    }

    /// Keeps only the interactions matching `predicate`.
    pub fn retain(&mut self, predicate: impl FnMut(&Interaction) -> bool) {
        self.interactions.retain(predicate);
    }
}

impl Dataset for Interactions {
    fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    fn reproject(&self, map: &AlignmentMap) -> Result<(Self, Coverage), reproject::Error> {
        let interactions = self
            .interactions
            .iter()
            .filter_map(|x| {
                let i = map.get(x.i)?;
                let j = map.get(x.j)?;
                Some(Interaction::new(i, j, x.value))
            })
            .collect::<Vec<_>>();

        let coverage = Coverage::new(
            self.interactions.len(),
            self.interactions.len() - interactions.len(),
        );

        let reprojected = Self {
            sequence: map.target().clone(),
            interactions,
        };

        Ok((reprojected, coverage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_dropped_when_an_end_is_unmapped() -> Result<(), Box<dyn std::error::Error>> {
        let source = "AUCUGGCUAG".parse::<Sequence>()?;
        let target = "AUCGGCUAG".parse::<Sequence>()?;
        let map = AlignmentMap::try_from_forward(
            source.clone(),
            target,
            vec![0, 1, 2, 3, 0, 4, 5, 6, 7, 8, 9],
        )?;

        let interactions = Interactions::try_new(
            source,
            vec![Interaction::new(4, 9, 1.0), Interaction::new(2, 10, 0.5)],
        )?;

        let (reprojected, coverage) = interactions.reproject(&map)?;

        assert_eq!(reprojected.pairs().collect::<Vec<_>>(), vec![(2, 9)]);
        assert_eq!(reprojected.interactions()[0].value, 0.5);
        assert_eq!(coverage, Coverage::new(2, 1));

        Ok(())
    }

    #[test]
    fn test_retain() -> Result<(), Box<dyn std::error::Error>> {
        let mut interactions = Interactions::try_new(
            "GGGAAACCC".parse()?,
            vec![Interaction::new(1, 9, 0.8), Interaction::new(2, 8, 0.1)],
        )?;

        interactions.retain(|x| x.value > 0.5);
        assert_eq!(interactions.pairs().collect::<Vec<_>>(), vec![(1, 9)]);

        Ok(())
    }
}
