//! A builder for a [`Machine`].

use rust_lapper as lapper;

use crate::AlignmentMap;
use crate::liftover::ContiguousBlock;
use crate::liftover::Machine;

/// The inner value of the liftover lookup data structure.
type Iv = lapper::Interval<usize, ContiguousBlock>;

/// A builder for a [`Machine`].
#[allow(missing_debug_implementations)]
pub struct Builder;

impl Builder {
    /// Builds a [`Machine`] from the contiguous blocks of an [`AlignmentMap`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::AlignmentMap;
    /// use rnalign::Sequence;
    ///
    /// let sequence = "AUCG".parse::<Sequence>()?;
    /// let map = AlignmentMap::identity(&sequence);
    ///
    /// let machine = rnalign::liftover::machine::Builder::default().build_from(&map);
    /// assert!(machine.liftover(1, 4).is_some());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn build_from(&self, map: &AlignmentMap) -> Machine {
        let intervals = map
            .blocks()
            .map(|block| Iv {
                start: *block.source().start(),
                stop: block.source().end() + 1,
                val: block,
            })
            .collect::<Vec<_>>();

        Machine {
            inner: lapper::Lapper::new(intervals),
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self
    }
}
