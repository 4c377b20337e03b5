//! The scoring scheme used by the pairwise aligner.

/// The factor by which every score in a [`Scoring`] is scaled.
///
/// Scores are kept as integers so that equally scoring alignments compare as
/// exactly equal. A gap-extension penalty of `-0.1` is therefore stored as
/// `-1`.
pub const SCALE: i32 = 10;

/// The scoring scheme for a global alignment.
///
/// The defaults match/mismatch identical characters with `1.0`/`0.0`, open
/// gaps at `-1.0`, extend them at `-0.1`, and leave end gaps unpenalized.
/// Probing constructs often carry a structure cassette or primer binding site
/// on one end only, and penalizing end gaps would push the aligner to break up
/// the shared region instead.
///
/// A gap of length `k` costs `gap_open + (k - 1) * gap_extend`.
///
/// `Scoring::new(0, 0, -SCALE, -1, false)` scores every pair as zero, so only
/// gaps count.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Scoring {
    /// The score for aligning two identical, alignable characters.
    match_score: i32,

    /// The score for aligning two differing characters (or any masked
    /// character).
    mismatch_score: i32,

    /// The score for the first position of a gap.
    gap_open: i32,

    /// The score for each subsequent position of a gap.
    gap_extend: i32,

    /// Whether gaps at either end of the alignment are scored.
    penalize_end_gaps: bool,
}

impl Scoring {
    /// Creates a new [`Scoring`] from scores already scaled by [`SCALE`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::alignment::Scoring;
    ///
    /// let scoring = Scoring::new(10, 0, -10, -1, false);
    /// assert_eq!(scoring, Scoring::default());
    /// ```
    pub const fn new(
        match_score: i32,
        mismatch_score: i32,
        gap_open: i32,
        gap_extend: i32,
        penalize_end_gaps: bool,
    ) -> Self {
        Self {
            match_score,
            mismatch_score,
            gap_open,
            gap_extend,
            penalize_end_gaps,
        }
    }

    /// Gets the match score.
    pub fn match_score(&self) -> i32 {
        self.match_score
    }

    /// Gets the mismatch score.
    pub fn mismatch_score(&self) -> i32 {
        self.mismatch_score
    }

    /// Gets the gap-open score.
    pub fn gap_open(&self) -> i32 {
        self.gap_open
    }

    /// Gets the gap-extension score.
    pub fn gap_extend(&self) -> i32 {
        self.gap_extend
    }

    /// Gets whether end gaps are penalized.
    pub fn penalize_end_gaps(&self) -> bool {
        self.penalize_end_gaps
    }

    /// Consumes `self` and returns a [`Scoring`] with the provided match
    /// score.
    pub fn with_match_score(mut self, score: i32) -> Self {
        self.match_score = score;
        self
    }

    /// Consumes `self` and returns a [`Scoring`] with the provided mismatch
    /// score.
    pub fn with_mismatch_score(mut self, score: i32) -> Self {
        self.mismatch_score = score;
        self
    }

    /// Consumes `self` and returns a [`Scoring`] with the provided gap
    /// penalties.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::alignment::Scoring;
    ///
    /// let scoring = Scoring::default().with_gap_penalties(-20, -5);
    /// assert_eq!(scoring.gap_open(), -20);
    /// assert_eq!(scoring.gap_extend(), -5);
    /// ```
    pub fn with_gap_penalties(mut self, open: i32, extend: i32) -> Self {
        self.gap_open = open;
        self.gap_extend = extend;
        self
    }

    /// Consumes `self` and returns a [`Scoring`] that does (or does not)
    /// penalize end gaps.
    pub fn with_end_gap_penalties(mut self, penalize: bool) -> Self {
        self.penalize_end_gaps = penalize;
        self
    }

    /// Scores a single aligned pair of (normalized) nucleotides.
    ///
    /// Gap and mask symbols are not alignable: they score as a mismatch
    /// against everything, including themselves.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::alignment::Scoring;
    ///
    /// let scoring = Scoring::default();
    /// assert_eq!(scoring.pair(b'A', b'A'), 10);
    /// assert_eq!(scoring.pair(b'A', b'G'), 0);
    /// assert_eq!(scoring.pair(b'.', b'.'), 0);
    /// ```
    pub fn pair(&self, a: u8, b: u8) -> i32 {
        let alignable = |c: u8| c != b'.' && c != b'-';

        if a == b && alignable(a) {
            self.match_score
        } else {
            self.mismatch_score
        }
    }

    /// Gets the cost of a gap with `length` positions (not accounting for end
    /// gaps).
    pub fn gap(&self, length: usize) -> i32 {
        match length {
            0 => 0,
            n => self.gap_open + (n as i32 - 1) * self.gap_extend,
        }
    }
}

impl Default for Scoring {
    fn default() -> Self {
        Self::new(SCALE, 0, -SCALE, -1, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring() {
        let scoring = Scoring::default();
        assert_eq!(scoring.match_score(), 10);
        assert_eq!(scoring.mismatch_score(), 0);
        assert_eq!(scoring.gap_open(), -10);
        assert_eq!(scoring.gap_extend(), -1);
        assert!(!scoring.penalize_end_gaps());
    }

    #[test]
    fn test_gap_cost() {
        let scoring = Scoring::default();
        assert_eq!(scoring.gap(0), 0);
        assert_eq!(scoring.gap(1), -10);
        assert_eq!(scoring.gap(4), -13);
    }

    #[test]
    fn test_masked_characters_never_match() {
        let scoring = Scoring::default();
        assert_eq!(scoring.pair(b'-', b'-'), scoring.mismatch_score());
        assert_eq!(scoring.pair(b'.', b'A'), scoring.mismatch_score());
        assert_eq!(scoring.pair(b'N', b'N'), scoring.match_score());
    }

    #[test]
    fn test_gaps_only_scoring() {
        let scoring = Scoring::new(0, 0, -SCALE, -1, false);
        assert_eq!(scoring.pair(b'A', b'A'), 0);
        assert_eq!(scoring.pair(b'A', b'G'), 0);
        assert_eq!(scoring.gap(3), -12);
        assert_eq!(scoring, Scoring::default().with_match_score(0));
    }
}
