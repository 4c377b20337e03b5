//! Multi-hop composition of alignment maps.
//!
//! Data for one sequence often has to travel through an intermediate
//! sequence before it lands on the sequence being displayed (for example, a
//! mutant construct aligned to the wild type, which is in turn aligned to a
//! published reference). An [`AlignmentChain`] holds the hops and composes
//! them into a single end-to-end [`AlignmentMap`].

use std::sync::OnceLock;

use nonempty::NonEmpty;

use crate::AlignmentMap;
use crate::Sequence;
use crate::map::SENTINEL;

/// An error related to an [`AlignmentChain`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// No maps were provided.
    Empty,

    /// The map at index `hop` does not start on the sequence the previous map
    /// ends on.
    Mismatch {
        /// The index of the offending map within the chain.
        hop: usize,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Empty => write!(f, "an alignment chain needs at least one map"),
            Error::Mismatch { hop } => write!(
                f,
                "the source of map {hop} does not match the target of map {}",
                hop - 1
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// Ensures that `next` starts where `previous` ends.
fn check(previous: &AlignmentMap, next: &AlignmentMap, hop: usize) -> Result<()> {
    if previous.target() != next.source() {
        return Err(Error::Mismatch { hop });
    }

    Ok(())
}

/// An ordered, non-empty list of maps where each map's target is the next
/// map's source.
#[derive(Debug)]
pub struct AlignmentChain {
    /// The hops.
    maps: NonEmpty<AlignmentMap>,

    /// The composed end-to-end map.
    composed: OnceLock<AlignmentMap>,
}

impl AlignmentChain {
    /// Creates a chain with a single hop.
    pub fn new(map: AlignmentMap) -> Self {
        Self {
            maps: NonEmpty::new(map),
            composed: OnceLock::new(),
        }
    }

    /// Attempts to create a chain from a non-empty list of maps.
    ///
    /// # Examples
    ///
    /// ```
    /// use nonempty::NonEmpty;
    /// use rnalign::chain::Error;
    /// use rnalign::AlignmentChain;
    /// use rnalign::AlignmentMap;
    /// use rnalign::Sequence;
    ///
    /// let a = "AUG".parse::<Sequence>()?;
    /// let b = "AUUG".parse::<Sequence>()?;
    ///
    /// let ab = AlignmentMap::try_from_forward(a.clone(), b.clone(), vec![0, 1, 2, 4])?;
    /// let aa = AlignmentMap::identity(&a);
    ///
    /// let err = AlignmentChain::try_new(NonEmpty::from((ab, vec![aa]))).unwrap_err();
    /// assert_eq!(err, Error::Mismatch { hop: 1 });
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(maps: NonEmpty<AlignmentMap>) -> Result<Self> {
        for (i, (previous, next)) in maps.iter().zip(maps.iter().skip(1)).enumerate() {
            check(previous, next, i + 1)?;
        }

        Ok(Self {
            maps,
            composed: OnceLock::new(),
        })
    }

    /// Attempts to create a chain from a (possibly empty) list of maps.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::chain::Error;
    /// use rnalign::AlignmentChain;
    ///
    /// let err = AlignmentChain::try_from_vec(Vec::new()).unwrap_err();
    /// assert_eq!(err, Error::Empty);
    /// ```
    pub fn try_from_vec(maps: Vec<AlignmentMap>) -> Result<Self> {
        let maps = NonEmpty::from_vec(maps).ok_or(Error::Empty)?;
        Self::try_new(maps)
    }

    /// Appends a hop to the end of the chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::AlignmentChain;
    /// use rnalign::AlignmentMap;
    /// use rnalign::Sequence;
    ///
    /// let a = "AUG".parse::<Sequence>()?;
    /// let b = "AUUG".parse::<Sequence>()?;
    ///
    /// let mut chain = AlignmentChain::new(AlignmentMap::identity(&a));
    /// chain.push(AlignmentMap::try_from_forward(a.clone(), b.clone(), vec![0, 1, 2, 4])?)?;
    ///
    /// assert_eq!(chain.len(), 2);
    /// assert_eq!(chain.target(), &b);
    ///
    /// // A hop that starts anywhere else is refused.
    /// assert!(chain.push(AlignmentMap::identity(&a)).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn push(&mut self, map: AlignmentMap) -> Result<()> {
        check(self.maps.last(), &map, self.maps.len())?;

        self.maps.push(map);
        self.composed = OnceLock::new();

        Ok(())
    }

    /// Gets the hops of the chain.
    pub fn maps(&self) -> &NonEmpty<AlignmentMap> {
        &self.maps
    }

    /// Gets the number of hops in the chain.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    /// Gets the sequence the chain starts on.
    pub fn source(&self) -> &Sequence {
        self.maps.first().source()
    }

    /// Gets the sequence the chain ends on.
    pub fn target(&self) -> &Sequence {
        self.maps.last().target()
    }

    /// Gets the end-to-end map, composing the hops on first use.
    ///
    /// A source position is unmapped in the result as soon as any hop sends
    /// it (or its image) to the sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::AlignmentChain;
    /// use rnalign::AlignmentMap;
    /// use rnalign::Sequence;
    ///
    /// let a = "AUCG".parse::<Sequence>()?;
    /// let b = "AUG".parse::<Sequence>()?;
    /// let c = "GAUG".parse::<Sequence>()?;
    ///
    /// let ab = AlignmentMap::try_from_forward(a, b.clone(), vec![0, 1, 2, 0, 3])?;
    /// let bc = AlignmentMap::try_from_forward(b, c, vec![0, 2, 0, 4])?;
    ///
    /// let chain = AlignmentChain::try_from_vec(vec![ab, bc])?;
    /// assert_eq!(chain.compose().as_slice(), &[0, 2, 0, 0, 4]);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn compose(&self) -> &AlignmentMap {
        self.composed.get_or_init(|| {
            let first = self.maps.first();

            let forward = (0..=first.len())
                .map(|position| {
                    let mut current = position;

                    for map in self.maps.iter() {
                        current = map.translate(current);

                        if current == SENTINEL {
                            break;
                        }
                    }

                    current
                })
                .collect::<Vec<_>>();

            AlignmentMap::from_parts(self.source().clone(), self.target().clone(), forward)
        })
    }

    /// Consumes `self` and returns the end-to-end map.
    pub fn into_composed(self) -> AlignmentMap {
        self.compose();

        let AlignmentChain { composed, .. } = self;
        composed
            .into_inner()
            .unwrap_or_else(|| unreachable!("the composed map is initialized before being taken"))
    }
}

impl From<AlignmentMap> for AlignmentChain {
    fn from(map: AlignmentMap) -> Self {
        Self::new(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Alignment;

    #[test]
    fn test_single_hop_is_the_map_itself() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let a = "GGGAAACCCUUU".parse::<Sequence>()?;
        let b = "GGGAAAUUU".parse::<Sequence>()?;

        let map = Alignment::try_new(a, b)?.into_map();
        let chain = AlignmentChain::from(map.clone());

        assert_eq!(chain.compose(), &map);

        Ok(())
    }

    #[test]
    fn test_composition_matches_direct_alignment(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        // Each hop only inserts nucleotides, so no source position is lost and
        // the composed map agrees with the direct alignment.
        let a = "GGGAAAUUU".parse::<Sequence>()?;
        let b = "GGGAAACCCUUU".parse::<Sequence>()?;
        let c = "GGGAAACCCUUUAAAGGG".parse::<Sequence>()?;

        let ab = Alignment::try_new(a.clone(), b.clone())?.into_map();
        let bc = Alignment::try_new(b, c.clone())?.into_map();
        let ac = Alignment::try_new(a, c)?.into_map();

        let chain = AlignmentChain::try_from_vec(vec![ab, bc])?;
        assert_eq!(chain.compose().as_slice(), ac.as_slice());
        assert_eq!(chain.compose().mapped_count(), 9);

        Ok(())
    }

    #[test]
    fn test_any_unmapped_hop_unmaps() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let a = "AUCG".parse::<Sequence>()?;
        let b = "AUCG".parse::<Sequence>()?;
        let c = "AUCG".parse::<Sequence>()?;

        let ab = AlignmentMap::try_from_forward(a, b.clone(), vec![0, 1, 0, 3, 4])?;
        let bc = AlignmentMap::try_from_forward(b, c, vec![0, 1, 2, 3, 0])?;

        let chain = AlignmentChain::try_from_vec(vec![ab, bc])?;
        assert_eq!(chain.compose().as_slice(), &[0, 1, 0, 3, 0]);

        Ok(())
    }

    #[test]
    fn test_push_resets_the_composition() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let a = "AUCG".parse::<Sequence>()?;
        let b = "AUG".parse::<Sequence>()?;

        let mut chain = AlignmentChain::new(AlignmentMap::identity(&a));
        assert!(chain.compose().is_identity());

        chain.push(AlignmentMap::try_from_forward(a, b.clone(), vec![0, 1, 2, 0, 3])?)?;
        assert_eq!(chain.compose().as_slice(), &[0, 1, 2, 0, 3]);
        assert_eq!(chain.compose().target(), &b);

        Ok(())
    }

    #[test]
    fn test_mismatch_message() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let a = "AUCG".parse::<Sequence>()?;
        let b = "AUG".parse::<Sequence>()?;

        let err = AlignmentChain::try_from_vec(vec![
            AlignmentMap::identity(&a),
            AlignmentMap::identity(&a),
            AlignmentMap::identity(&b),
        ])
        .unwrap_err();

        assert_eq!(err, Error::Mismatch { hop: 2 });
        assert_eq!(
            err.to_string(),
            "the source of map 2 does not match the target of map 1"
        );

        Ok(())
    }
}
