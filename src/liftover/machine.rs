//! A machine for lifting spans of source positions over to the target.

use rust_lapper as lapper;

use crate::liftover::ContiguousBlock;

pub mod builder;

pub use builder::Builder;

/// A machine for lifting over inclusive spans of source positions to the
/// target of an [`AlignmentMap`](crate::AlignmentMap).
///
/// Generally, you will want to use a [`builder::Builder`] to construct one of
/// these.
#[derive(Debug)]
pub struct Machine {
    /// The inner lookup table of source ranges to contiguous blocks.
    inner: lapper::Lapper<usize, ContiguousBlock>,
}

impl Machine {
    /// Performs a liftover of the inclusive source span `start..=end`.
    ///
    /// The result holds one clamped block per contiguous piece of the span
    /// that survives, in source order. Returns [`None`] when no position in
    /// the span maps to the target.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::liftover::machine::Builder;
    /// use rnalign::AlignmentMap;
    /// use rnalign::Sequence;
    ///
    /// let source = "AUCUGGCUA".parse::<Sequence>()?;
    /// let target = "AUCGUGCUA".parse::<Sequence>()?;
    /// let map = AlignmentMap::try_from_forward(source, target, vec![0, 1, 2, 3, 5, 6, 0, 7, 8, 9])?;
    ///
    /// let machine = Builder.build_from(&map);
    /// let blocks = machine.liftover(2, 7).unwrap();
    ///
    /// assert_eq!(blocks.len(), 3);
    /// assert_eq!(blocks[0].target(), &(2..=3));
    /// assert_eq!(blocks[1].target(), &(5..=6));
    /// assert_eq!(blocks[2].target(), &(7..=7));
    ///
    /// assert!(machine.liftover(6, 6).is_none());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn liftover(&self, start: usize, end: usize) -> Option<Vec<ContiguousBlock>> {
        if start > end {
            return None;
        }

        // Lapper intervals are half-open.
        let results = self
            .inner
            .find(start, end + 1)
            .filter_map(|e| e.val.clone().clamp(start, end))
            .collect::<Vec<_>>();

        match results.is_empty() {
            true => None,
            false => Some(results),
        }
    }

    /// Lifts over the inclusive source span `start..=end` to the smallest
    /// target span covering every surviving position.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::liftover::machine::Builder;
    /// use rnalign::AlignmentMap;
    /// use rnalign::Sequence;
    ///
    /// let source = "AUCUGGCUA".parse::<Sequence>()?;
    /// let target = "AUCGUGCUA".parse::<Sequence>()?;
    /// let map = AlignmentMap::try_from_forward(source, target, vec![0, 1, 2, 3, 5, 6, 0, 7, 8, 9])?;
    ///
    /// let machine = Builder.build_from(&map);
    /// assert_eq!(machine.liftover_span(2, 7), Some((2, 7)));
    /// assert_eq!(machine.liftover_span(6, 6), None);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn liftover_span(&self, start: usize, end: usize) -> Option<(usize, usize)> {
        let blocks = self.liftover(start, end)?;

        let first = blocks.first()?;
        let last = blocks.last()?;

        Some((*first.target().start(), *last.target().end()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AlignmentMap;
    use crate::Sequence;
    use crate::liftover::machine;

    #[test]
    pub fn test_identity_liftover() -> Result<(), Box<dyn std::error::Error>> {
        let sequence = "GGAUCGGAUC".parse::<Sequence>()?;
        let map = AlignmentMap::identity(&sequence);
        let machine = machine::Builder.build_from(&map);

        let mut results = machine.liftover(2, 7).unwrap();
        assert_eq!(results.len(), 1);

        let result = results.pop().unwrap();
        assert_eq!(result.source(), &(2..=7));
        assert_eq!(result.target(), &(2..=7));

        Ok(())
    }

    #[test]
    pub fn test_span_clipped_at_the_edge() -> Result<(), Box<dyn std::error::Error>> {
        let source = "GGAUCGG".parse::<Sequence>()?;
        let target = "AUC".parse::<Sequence>()?;
        let map = AlignmentMap::try_from_forward(source, target, vec![0, 0, 0, 1, 2, 3, 0, 0])?;
        let machine = machine::Builder.build_from(&map);

        let results = machine.liftover(1, 4).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source(), &(3..=4));
        assert_eq!(results[0].target(), &(1..=2));

        assert_eq!(machine.liftover_span(5, 7), Some((3, 3)));

        Ok(())
    }

    #[test]
    pub fn test_nonexistent_span_liftover() -> Result<(), Box<dyn std::error::Error>> {
        let source = "GGAUCGG".parse::<Sequence>()?;
        let target = "AUC".parse::<Sequence>()?;
        let map = AlignmentMap::try_from_forward(source, target, vec![0, 0, 0, 1, 2, 3, 0, 0])?;
        let machine = machine::Builder.build_from(&map);

        assert_eq!(machine.liftover(1, 2), None);
        assert_eq!(machine.liftover(6, 100), None);
        assert_eq!(machine.liftover(5, 4), None);

        Ok(())
    }
}
