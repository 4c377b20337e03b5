//! A per-session cache of alignments.
//!
//! The same pair of sequences is commonly aligned over and over (once per
//! dataset, once per panel). Since alignment is quadratic in the sequence
//! lengths, alignments are kept here keyed by `(source, target)`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::Sequence;
use crate::alignment::Alignment;
use crate::alignment::Error;
use crate::alignment::Scoring;

/// A cache of [`Alignment`]s keyed by `(source, target)`.
#[derive(Debug, Default)]
pub struct Cache {
    /// The scoring scheme used for every alignment in the cache.
    scoring: Scoring,

    /// The cached alignments.
    inner: HashMap<(Sequence, Sequence), Arc<Alignment>>,
}

impl Cache {
    /// Creates a new, empty [`Cache`] using the default [`Scoring`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty [`Cache`] using the provided [`Scoring`].
    pub fn with_scoring(scoring: Scoring) -> Self {
        Self {
            scoring,
            inner: HashMap::new(),
        }
    }

    /// Gets the scoring scheme used by the cache.
    pub fn scoring(&self) -> &Scoring {
        &self.scoring
    }

    /// Gets the alignment of `source` against `target`, creating it if this
    /// pair has not been seen before.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use rnalign::alignment::Cache;
    /// use rnalign::Sequence;
    ///
    /// let source = "AUCUGGCUA".parse::<Sequence>()?;
    /// let target = "AUCGUGCUA".parse::<Sequence>()?;
    ///
    /// let mut cache = Cache::new();
    /// let first = cache.get_or_align(&source, &target)?;
    /// let second = cache.get_or_align(&source, &target)?;
    ///
    /// assert!(Arc::ptr_eq(&first, &second));
    /// assert_eq!(cache.len(), 1);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn get_or_align(
        &mut self,
        source: &Sequence,
        target: &Sequence,
    ) -> Result<Arc<Alignment>, Error> {
        let key = (source.clone(), target.clone());

        if let Some(alignment) = self.inner.get(&key) {
            return Ok(alignment.clone());
        }

        let alignment = Arc::new(Alignment::try_with_scoring(
            source.clone(),
            target.clone(),
            self.scoring,
        )?);

        self.inner.insert(key, alignment.clone());
        Ok(alignment)
    }

    /// Gets the number of cached alignments.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Removes every cached alignment.
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::Side;

    #[test]
    fn test_direction_matters() -> Result<(), Box<dyn std::error::Error>> {
        let a = "GGGAAACCCUUU".parse::<Sequence>()?;
        let b = "GGGAAAUUU".parse::<Sequence>()?;

        let mut cache = Cache::new();
        let forward = cache.get_or_align(&a, &b)?;
        let reverse = cache.get_or_align(&b, &a)?;

        assert_eq!(cache.len(), 2);
        assert_eq!(forward.map().len(), 12);
        assert_eq!(reverse.map().len(), 9);

        Ok(())
    }

    #[test]
    fn test_errors_are_not_cached() -> Result<(), Box<dyn std::error::Error>> {
        let a = "".parse::<Sequence>()?;
        let b = "GGGAAAUUU".parse::<Sequence>()?;

        let mut cache = Cache::new();
        let err = cache.get_or_align(&a, &b).unwrap_err();

        assert_eq!(err, Error::EmptySequence(Side::Source));
        assert!(cache.is_empty());

        Ok(())
    }

    #[test]
    fn test_clear() -> Result<(), Box<dyn std::error::Error>> {
        let a = "GGGAAAUUU".parse::<Sequence>()?;

        let mut cache = Cache::new();
        cache.get_or_align(&a, &a)?;
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());

        Ok(())
    }
}
