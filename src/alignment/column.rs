//! Columns of a pairwise alignment.

/// A single column of a pairwise alignment.
///
/// Positions are 1-based indices into the respective sequence.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Column {
    /// A source nucleotide aligned against a target nucleotide.
    Aligned {
        /// The 1-based source position.
        source: usize,

        /// The 1-based target position.
        target: usize,
    },

    /// A source nucleotide aligned against a gap in the target.
    SourceOnly(usize),

    /// A target nucleotide aligned against a gap in the source.
    TargetOnly(usize),
}

impl Column {
    /// Gets the source position of the column, or [`None`] if the source side
    /// is a gap.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::alignment::Column;
    ///
    /// assert_eq!(Column::Aligned { source: 1, target: 2 }.source(), Some(1));
    /// assert_eq!(Column::SourceOnly(3).source(), Some(3));
    /// assert_eq!(Column::TargetOnly(3).source(), None);
    /// ```
    pub fn source(&self) -> Option<usize> {
        match self {
            Column::Aligned { source, .. } => Some(*source),
            Column::SourceOnly(source) => Some(*source),
            Column::TargetOnly(_) => None,
        }
    }

    /// Gets the target position of the column, or [`None`] if the target side
    /// is a gap.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::alignment::Column;
    ///
    /// assert_eq!(Column::Aligned { source: 1, target: 2 }.target(), Some(2));
    /// assert_eq!(Column::SourceOnly(3).target(), None);
    /// assert_eq!(Column::TargetOnly(3).target(), Some(3));
    /// ```
    pub fn target(&self) -> Option<usize> {
        match self {
            Column::Aligned { target, .. } => Some(*target),
            Column::SourceOnly(_) => None,
            Column::TargetOnly(target) => Some(*target),
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Column::Aligned { source, target } => write!(f, "{source}:{target}"),
            Column::SourceOnly(source) => write!(f, "{source}:-"),
            Column::TargetOnly(target) => write!(f, "-:{target}"),
        }
    }
}
