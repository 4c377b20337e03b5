//! A global pairwise aligner with affine gap penalties.
//!
//! This is the classic three-state (Gotoh) formulation of Needleman-Wunsch.
//! Every cell `(i, j)` tracks the best score of an alignment of the first `i`
//! source nucleotides and the first `j` target nucleotides that ends in one of
//! three states:
//!
//! - [`State::Aligned`]: source `i` aligned against target `j`,
//! - [`State::SourceOnly`]: source `i` aligned against a gap,
//! - [`State::TargetOnly`]: target `j` aligned against a gap.
//!
//! Scores are kept for two rows at a time. The traceback keeps one byte per
//! cell (the predecessor of each of the three states), so memory grows with
//! `n * m` bytes. Sequences beyond roughly 10,000 nucleotides each will take
//! noticeable time and hundreds of megabytes.

use crate::alignment::Column;
use crate::alignment::Scoring;

/// A score low enough to never be chosen, but far enough from [`i32::MIN`]
/// that adding penalties to it cannot overflow.
const UNREACHABLE: i32 = i32::MIN / 4;

/// The state an alignment ends in at a given cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    /// Both nucleotides are aligned (a match or a mismatch).
    Aligned = 0,

    /// The source nucleotide is aligned against a gap.
    SourceOnly = 1,

    /// The target nucleotide is aligned against a gap.
    TargetOnly = 2,
}

impl State {
    /// Decodes a state from the two lowest bits.
    fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => State::Aligned,
            1 => State::SourceOnly,
            _ => State::TargetOnly,
        }
    }
}

/// Picks the highest scoring candidate, preferring earlier candidates on ties.
fn best_of(candidates: [(State, i32); 3]) -> (State, i32) {
    let mut best = candidates[0];

    for candidate in &candidates[1..] {
        if candidate.1 > best.1 {
            best = *candidate;
        }
    }

    best
}

/// The scores of the three states at a single cell.
#[derive(Clone, Copy, Debug)]
struct Cell {
    /// The score ending in [`State::Aligned`].
    aligned: i32,

    /// The score ending in [`State::SourceOnly`].
    source_only: i32,

    /// The score ending in [`State::TargetOnly`].
    target_only: i32,
}

impl Cell {
    /// A cell where no state can be reached.
    const UNREACHABLE: Cell = Cell {
        aligned: UNREACHABLE,
        source_only: UNREACHABLE,
        target_only: UNREACHABLE,
    };

    /// Gets the best state of the cell.
    fn best(&self) -> (State, i32) {
        best_of([
            (State::Aligned, self.aligned),
            (State::SourceOnly, self.source_only),
            (State::TargetOnly, self.target_only),
        ])
    }
}

/// The predecessor states for every cell of the dynamic programming matrix.
struct Traceback {
    /// The number of columns in the matrix.
    width: usize,

    /// The packed predecessors, two bits per state.
    inner: Vec<u8>,
}

impl Traceback {
    /// Creates a traceback for a `height` by `width` matrix.
    fn new(height: usize, width: usize) -> Self {
        Self {
            width,
            inner: vec![0; height * width],
        }
    }

    /// Records the predecessor of each state at `(i, j)`.
    fn set(&mut self, i: usize, j: usize, aligned: State, source_only: State, target_only: State) {
        self.inner[i * self.width + j] =
            (aligned as u8) | ((source_only as u8) << 2) | ((target_only as u8) << 4);
    }

    /// Gets the predecessor of `state` at `(i, j)`.
    fn get(&self, i: usize, j: usize, state: State) -> State {
        let packed = self.inner[i * self.width + j];
        State::from_bits(packed >> (2 * state as u8))
    }
}

/// An optimal global alignment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Aligned {
    /// The score of the alignment (scaled by [`SCALE`](super::scoring::SCALE)).
    pub score: i32,

    /// The columns of the alignment, in order.
    pub columns: Vec<Column>,
}

/// Computes an optimal global alignment of `source` against `target`.
///
/// Both inputs are normalized nucleotide bytes. Empty inputs are handled (the
/// result is all gaps), but [`Alignment`](super::Alignment) rejects them
/// before ever getting here.
///
/// The result is deterministic: within a cell, ties prefer
/// [`Column::Aligned`], then [`Column::SourceOnly`], then
/// [`Column::TargetOnly`]. When end gaps are free, the alignment ends at the
/// first best cell found scanning `(n, m)`, then the last row right to left,
/// then the last column bottom to top.
///
/// # Examples
///
/// ```
/// use rnalign::alignment::aligner;
/// use rnalign::alignment::Column;
/// use rnalign::alignment::Scoring;
///
/// let result = aligner::align(b"AUCG", b"AUCG", &Scoring::default());
/// assert_eq!(result.score, 40);
/// assert_eq!(result.columns[0], Column::Aligned { source: 1, target: 1 });
/// ```
pub fn align(source: &[u8], target: &[u8], scoring: &Scoring) -> Aligned {
    let n = source.len();
    let m = target.len();

    let open = scoring.gap_open();
    let extend = scoring.gap_extend();
    let end_gap = |length: usize| match scoring.penalize_end_gaps() {
        true => scoring.gap(length),
        false => 0,
    };

    let mut traceback = Traceback::new(n + 1, m + 1);

    // (1) The first row consumes target nucleotides only.
    let mut previous = (0..=m)
        .map(|j| match j {
            0 => Cell {
                aligned: 0,
                ..Cell::UNREACHABLE
            },
            j => Cell {
                target_only: end_gap(j),
                ..Cell::UNREACHABLE
            },
        })
        .collect::<Vec<_>>();
    let mut current = vec![Cell::UNREACHABLE; m + 1];

    let mut last_column = Vec::with_capacity(n + 1);
    last_column.push(previous[m]);

    // (2) Fill the remaining rows.
    for i in 1..=n {
        current[0] = Cell {
            source_only: end_gap(i),
            ..Cell::UNREACHABLE
        };

        for j in 1..=m {
            let (from_diagonal, diagonal) = previous[j - 1].best();
            let aligned = diagonal + scoring.pair(source[i - 1], target[j - 1]);

            let up = previous[j];
            let (from_up, source_only) = best_of([
                (State::Aligned, up.aligned + open),
                (State::SourceOnly, up.source_only + extend),
                (State::TargetOnly, up.target_only + open),
            ]);

            let left = current[j - 1];
            let (from_left, target_only) = best_of([
                (State::Aligned, left.aligned + open),
                (State::SourceOnly, left.source_only + open),
                (State::TargetOnly, left.target_only + extend),
            ]);

            current[j] = Cell {
                aligned,
                source_only,
                target_only,
            };
            traceback.set(i, j, from_diagonal, from_up, from_left);
        }

        last_column.push(current[m]);
        std::mem::swap(&mut previous, &mut current);
    }

    // (3) Pick the cell the alignment ends in. Without end gap penalties, any
    // cell in the last row or column can be extended to `(n, m)` for free.
    let last_row = previous;
    let (mut end_i, mut end_j) = (n, m);
    let (mut state, mut score) = last_row[m].best();

    if !scoring.penalize_end_gaps() {
        for j in (0..m).rev() {
            let (s, value) = last_row[j].best();
            if value > score {
                (end_i, end_j, state, score) = (n, j, s, value);
            }
        }

        for (i, cell) in last_column.iter().enumerate().take(n).rev() {
            let (s, value) = cell.best();
            if value > score {
                (end_i, end_j, state, score) = (i, m, s, value);
            }
        }
    }

    // (4) Walk back from the end cell. Columns are collected in reverse.
    let mut columns = Vec::with_capacity(n + m);
    columns.extend((end_j + 1..=m).rev().map(Column::TargetOnly));
    columns.extend((end_i + 1..=n).rev().map(Column::SourceOnly));

    let (mut i, mut j) = (end_i, end_j);

    while i > 0 && j > 0 {
        let prior = traceback.get(i, j, state);

        match state {
            State::Aligned => {
                columns.push(Column::Aligned {
                    source: i,
                    target: j,
                });
                i -= 1;
                j -= 1;
            }
            State::SourceOnly => {
                columns.push(Column::SourceOnly(i));
                i -= 1;
            }
            State::TargetOnly => {
                columns.push(Column::TargetOnly(j));
                j -= 1;
            }
        }

        state = prior;
    }

    columns.extend((1..=i).rev().map(Column::SourceOnly));
    columns.extend((1..=j).rev().map(Column::TargetOnly));
    columns.reverse();

    Aligned { score, columns }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Renders the columns as two gapped strings.
    fn render(source: &[u8], target: &[u8], columns: &[Column]) -> (String, String) {
        let mut a = String::new();
        let mut b = String::new();

        for column in columns {
            a.push(column.source().map(|i| source[i - 1] as char).unwrap_or('-'));
            b.push(column.target().map(|j| target[j - 1] as char).unwrap_or('-'));
        }

        (a, b)
    }

    /// Checks that removing gaps from either side reconstructs that side.
    fn assert_reconstructs(source: &[u8], target: &[u8], columns: &[Column]) {
        let sources = columns.iter().filter_map(Column::source).collect::<Vec<_>>();
        let targets = columns.iter().filter_map(Column::target).collect::<Vec<_>>();

        assert_eq!(sources, (1..=source.len()).collect::<Vec<_>>());
        assert_eq!(targets, (1..=target.len()).collect::<Vec<_>>());
        assert!(columns.len() >= source.len().max(target.len()));
    }

    #[test]
    fn test_self_alignment_is_the_diagonal() {
        let sequence = b"GGAAUUCCGGAAUUCC";
        let result = align(sequence, sequence, &Scoring::default());

        assert_eq!(result.score, 160);
        assert_eq!(result.columns.len(), sequence.len());
        for (k, column) in result.columns.iter().enumerate() {
            assert_eq!(
                *column,
                Column::Aligned {
                    source: k + 1,
                    target: k + 1
                }
            );
        }
    }

    #[test]
    fn test_deletion_in_target() {
        let source = b"GGGAAACCCUUU";
        let target = b"GGGAAAUUU";
        let result = align(source, target, &Scoring::default());

        assert_reconstructs(source, target, &result.columns);
        assert_eq!(result.score, 90 + Scoring::default().gap(3));

        let (a, b) = render(source, target, &result.columns);
        assert_eq!(a, "GGGAAACCCUUU");
        assert_eq!(b, "GGGAAA---UUU");
    }

    #[test]
    fn test_insertion_in_target() {
        let source = b"GGGAAAUUU";
        let target = b"GGGAAACCCUUU";
        let result = align(source, target, &Scoring::default());

        let (a, b) = render(source, target, &result.columns);
        assert_eq!(a, "GGGAAA---UUU");
        assert_eq!(b, "GGGAAACCCUUU");
    }

    #[test]
    fn test_end_gaps_are_free() {
        let source = b"AUCGGCUAAGC";
        let target = b"GGAAAAUCGGCUAAGCCCC";
        let result = align(source, target, &Scoring::default());

        assert_reconstructs(source, target, &result.columns);
        assert_eq!(result.score, 110);

        let (a, b) = render(source, target, &result.columns);
        assert_eq!(a, "-----AUCGGCUAAGC---");
        assert_eq!(b, "GGAAAAUCGGCUAAGCCCC");
    }

    #[test]
    fn test_end_gaps_can_be_penalized() {
        let source = b"AUCGGCUAAGC";
        let target = b"GGAAAAUCGGCUAAGCCCC";
        let scoring = Scoring::default().with_end_gap_penalties(true);
        let result = align(source, target, &scoring);

        assert_reconstructs(source, target, &result.columns);
        assert_eq!(result.score, 110 + scoring.gap(5) + scoring.gap(3));
    }

    #[test]
    fn test_mismatches_do_not_open_gaps() {
        // A single substitution costs one match, which is cheaper than the two
        // gaps needed to avoid it.
        let source = b"AUCUGGCUA";
        let target = b"AUCGUGCUA";
        let result = align(source, target, &Scoring::default());

        assert_eq!(result.score, 70);
        let (a, b) = render(source, target, &result.columns);
        assert_eq!(a, "AUCUGGCUA");
        assert_eq!(b, "AUCGUGCUA");
    }

    #[test]
    fn test_masked_positions_are_not_matched() {
        let source = b"....";
        let target = b"....";
        let result = align(source, target, &Scoring::default());

        assert_reconstructs(source, target, &result.columns);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_alignment_is_deterministic() {
        let source = b"AAAAUUUUAAAA";
        let target = b"AAAAAAAA";

        let first = align(source, target, &Scoring::default());
        for _ in 0..10 {
            assert_eq!(align(source, target, &Scoring::default()), first);
        }
    }

    #[test]
    fn test_empty_inputs() {
        let result = align(b"", b"AUG", &Scoring::default());
        assert_eq!(result.score, 0);
        assert_eq!(
            result.columns,
            vec![
                Column::TargetOnly(1),
                Column::TargetOnly(2),
                Column::TargetOnly(3)
            ]
        );
    }
}
