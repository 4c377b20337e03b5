//! Blocks of positions that map contiguously.

use std::ops::RangeInclusive;

/// An error related to constructing a contiguous block.
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The two ranges don't cover the same number of positions. As such, they
    /// can't contiguously map to one another.
    LengthsDontMatch(usize, usize),

    /// One of the ranges covers no positions.
    Empty,

    /// One of the ranges includes position 0, which is reserved for the
    /// sentinel.
    ZeroPosition,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::LengthsDontMatch(source, target) => write!(
                f,
                "source range length ({source}) doesn't match target range length ({target})"
            ),
            Error::Empty => write!(f, "contiguous blocks cannot be empty"),
            Error::ZeroPosition => write!(f, "position 0 cannot be part of a contiguous block"),
        }
    }
}

impl std::error::Error for Error {}

/// A run of source positions mapping onto an equally long run of consecutive
/// target positions. Both ranges are 1-based and inclusive.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ContiguousBlock(RangeInclusive<usize>, RangeInclusive<usize>);

impl ContiguousBlock {
    /// Attempts to create a new [`ContiguousBlock`] from a source range and a
    /// target range.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::liftover::ContiguousBlock;
    ///
    /// let block = ContiguousBlock::try_new(1..=4, 3..=6)?;
    /// assert_eq!(block.len(), 4);
    ///
    /// assert!(ContiguousBlock::try_new(1..=4, 3..=7).is_err());
    /// assert!(ContiguousBlock::try_new(0..=3, 3..=6).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(source: RangeInclusive<usize>, target: RangeInclusive<usize>) -> Result<Self, Error> {
        if source.is_empty() || target.is_empty() {
            return Err(Error::Empty);
        }

        if *source.start() == 0 || *target.start() == 0 {
            return Err(Error::ZeroPosition);
        }

        let (a, b) = (source.end() - source.start() + 1, target.end() - target.start() + 1);

        if a != b {
            return Err(Error::LengthsDontMatch(a, b));
        }

        Ok(Self(source, target))
    }

    /// Gets the source range of the block.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::liftover::ContiguousBlock;
    ///
    /// let block = ContiguousBlock::try_new(1..=4, 3..=6)?;
    /// assert_eq!(block.source(), &(1..=4));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn source(&self) -> &RangeInclusive<usize> {
        &self.0
    }

    /// Gets the target range of the block.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::liftover::ContiguousBlock;
    ///
    /// let block = ContiguousBlock::try_new(1..=4, 3..=6)?;
    /// assert_eq!(block.target(), &(3..=6));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn target(&self) -> &RangeInclusive<usize> {
        &self.1
    }

    /// Consumes `self` and returns the source and target ranges.
    pub fn into_parts(self) -> (RangeInclusive<usize>, RangeInclusive<usize>) {
        (self.0, self.1)
    }

    /// Gets the number of positions in the block.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.end() - self.0.start() + 1
    }

    /// Lifts a source position within the block over to the target.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::liftover::ContiguousBlock;
    ///
    /// let block = ContiguousBlock::try_new(1..=4, 3..=6)?;
    ///
    /// assert_eq!(block.liftover(2), Some(4));
    /// assert_eq!(block.liftover(5), None);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn liftover(&self, position: usize) -> Option<usize> {
        if !self.0.contains(&position) {
            return None;
        }

        Some(self.1.start() + (position - self.0.start()))
    }

    /// Consumes `self` to clamp the block to the inclusive source range
    /// `start..=end`. The target range is clamped to match. Returns [`None`]
    /// if the block and the range don't overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::liftover::ContiguousBlock;
    ///
    /// let block = ContiguousBlock::try_new(1..=4, 3..=6)?;
    /// let clamped = block.clone().clamp(3, 10).unwrap();
    ///
    /// assert_eq!(clamped.source(), &(3..=4));
    /// assert_eq!(clamped.target(), &(5..=6));
    ///
    /// assert_eq!(block.clamp(5, 10), None);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn clamp(self, start: usize, end: usize) -> Option<Self> {
        let from = start.max(*self.0.start());
        let to = end.min(*self.0.end());

        if from > to {
            return None;
        }

        let target_from = self.liftover(from)?;
        let target_to = self.liftover(to)?;

        Some(Self(from..=to, target_from..=target_to))
    }
}

impl std::fmt::Display for ContiguousBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{} -> {}-{}",
            self.0.start(),
            self.0.end(),
            self.1.start(),
            self.1.end()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_block() {
        ContiguousBlock::try_new(10..=19, 1..=10).unwrap();
    }

    #[test]
    fn block_lengths_dont_match() {
        let err = ContiguousBlock::try_new(1..=10, 1..=20).unwrap_err();
        assert_eq!(err, Error::LengthsDontMatch(10, 20));
        assert_eq!(
            err.to_string(),
            "source range length (10) doesn't match target range length (20)"
        );
    }

    #[test]
    #[allow(clippy::reversed_empty_ranges)]
    fn empty_block() {
        let err = ContiguousBlock::try_new(5..=4, 1..=1).unwrap_err();
        assert_eq!(err, Error::Empty);
    }

    #[test]
    fn display() {
        let block = ContiguousBlock::try_new(1..=4, 3..=6).unwrap();
        assert_eq!(block.to_string(), "1-4 -> 3-6");
    }
}
