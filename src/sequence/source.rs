//! Where a sequence comes from.

use std::str::FromStr;

use crate::Sample;
use crate::Sequence;
use crate::sample;
use crate::sample::Kind;

/// A reference to a sequence that is resolved once, at the point where it is
/// needed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SequenceSource {
    /// A raw nucleotide string.
    Literal(String),

    /// The sequence of a dataset within a sample.
    Key(Kind),

    /// An already resolved sequence.
    Resolved(Sequence),
}

impl SequenceSource {
    /// Resolves the source against a sample.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::sample::Kind;
    /// use rnalign::Sample;
    /// use rnalign::Sequence;
    /// use rnalign::SequenceSource;
    ///
    /// let mut sample = Sample::new("example");
    /// sample.insert(Kind::Sequence, "GGGAAACCC".parse::<Sequence>()?)?;
    ///
    /// let source = "sequence".parse::<SequenceSource>()?;
    /// assert_eq!(source.resolve(&sample)?.as_str(), "GGGAAACCC");
    ///
    /// let source = "auCG".parse::<SequenceSource>()?;
    /// assert_eq!(source.resolve(&sample)?.as_str(), "AUCG");
    ///
    /// let source = "profile".parse::<SequenceSource>()?;
    /// assert!(source.resolve(&sample).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn resolve(&self, sample: &Sample) -> Result<Sequence, sample::Error> {
        match self {
            SequenceSource::Literal(raw) => raw.parse().map_err(sample::Error::Sequence),
            SequenceSource::Key(kind) => sample.sequence_of(*kind).cloned(),
            SequenceSource::Resolved(sequence) => Ok(sequence.clone()),
        }
    }
}

impl FromStr for SequenceSource {
    type Err = sample::Error;

    /// Parses a source: the name of a [`Kind`] is a key, and anything else
    /// must be a valid nucleotide string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(kind) = s.parse::<Kind>() {
            return Ok(SequenceSource::Key(kind));
        }

        s.parse::<Sequence>().map_err(sample::Error::Sequence)?;
        Ok(SequenceSource::Literal(s.to_string()))
    }
}

impl From<Kind> for SequenceSource {
    fn from(kind: Kind) -> Self {
        SequenceSource::Key(kind)
    }
}

impl From<Sequence> for SequenceSource {
    fn from(sequence: Sequence) -> Self {
        SequenceSource::Resolved(sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_literal() {
        let err = "hello".parse::<SequenceSource>().unwrap_err();
        assert!(matches!(err, sample::Error::Sequence(_)));
    }

    #[test]
    fn test_resolved_ignores_the_sample() -> Result<(), Box<dyn std::error::Error>> {
        let sequence = "AUCG".parse::<Sequence>()?;
        let source = SequenceSource::from(sequence.clone());

        assert_eq!(source.resolve(&Sample::default())?, sequence);

        Ok(())
    }
}
