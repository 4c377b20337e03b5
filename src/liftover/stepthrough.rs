//! Utilities for stepping through the contiguous blocks of a map.
//!
//! A contiguous block is a run of source positions whose target positions are
//! also consecutive. Any unmapped source position, or any jump in the target
//! positions (an insertion on the target side), ends the current block.

use crate::AlignmentMap;
use crate::liftover::stepthrough::block::ContiguousBlock;
use crate::map::SENTINEL;

pub mod block;

/// The core struct used for stepping through contiguous blocks.
#[derive(Debug)]
pub struct StepThrough<'a> {
    /// The forward index being stepped through.
    forward: &'a [usize],

    /// The next source position to look at.
    position: usize,
}

impl<'a> StepThrough<'a> {
    /// Creates a new [`StepThrough`] starting at the first source position.
    pub(crate) fn new(map: &'a AlignmentMap) -> Self {
        Self {
            forward: map.as_slice(),
            position: 1,
        }
    }
}

impl<'a> Iterator for StepThrough<'a> {
    type Item = ContiguousBlock;

    fn next(&mut self) -> Option<Self::Item> {
        // (1) Skip over any unmapped source positions.
        while self.forward.get(self.position) == Some(&SENTINEL) {
            self.position += 1;
        }

        let start = self.position;
        let first = *self.forward.get(start)?;

        // (2) Extend the block for as long as the target positions are
        // consecutive.
        let mut end = start;
        while self
            .forward
            .get(end + 1)
            .is_some_and(|next| *next == first + (end + 1 - start))
        {
            end += 1;
        }

        self.position = end + 1;

        let block = ContiguousBlock::try_new(start..=end, first..=first + (end - start))
            .unwrap_or_else(|_| unreachable!("blocks from a forward index are always valid"));

        Some(block)
    }
}

#[cfg(test)]
mod tests {
    use crate::AlignmentMap;
    use crate::Sequence;

    #[test]
    fn test_it_correctly_steps_through_a_map() -> Result<(), Box<dyn std::error::Error>> {
        let source = "AUCUGGCUA".parse::<Sequence>()?;
        let target = "AUCGUGCUA".parse::<Sequence>()?;
        let map = AlignmentMap::try_from_forward(source, target, vec![0, 1, 2, 3, 5, 6, 0, 7, 8, 9])?;

        let blocks = map
            .blocks()
            .map(|block| block.to_string())
            .collect::<Vec<_>>();

        assert_eq!(blocks, vec!["1-3 -> 1-3", "4-5 -> 5-6", "7-9 -> 7-9"]);

        Ok(())
    }

    #[test]
    fn test_leading_and_trailing_gaps() -> Result<(), Box<dyn std::error::Error>> {
        let source = "GGAUCGG".parse::<Sequence>()?;
        let target = "AUC".parse::<Sequence>()?;
        let map = AlignmentMap::try_from_forward(source, target, vec![0, 0, 0, 1, 2, 3, 0, 0])?;

        let mut stepthrough = map.blocks();
        assert_eq!(stepthrough.next().unwrap().to_string(), "3-5 -> 1-3");
        assert_eq!(stepthrough.next(), None);

        Ok(())
    }

    #[test]
    fn test_identity_is_a_single_block() -> Result<(), Box<dyn std::error::Error>> {
        let sequence = "GGAUCGG".parse::<Sequence>()?;
        let map = AlignmentMap::identity(&sequence);

        let blocks = map.blocks().collect::<Vec<_>>();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].len(), 7);

        Ok(())
    }
}
