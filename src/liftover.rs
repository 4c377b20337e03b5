//! Facilities for lifting ranges of positions through an [`AlignmentMap`].
//!
//! A map is a position-by-position array, which is the right shape for
//! scattering per-nucleotide values but the wrong shape for spans. The types
//! here decompose a map into maximal contiguous blocks (runs of source
//! positions that map onto consecutive target positions) and index those
//! blocks so that a span can be lifted over in one lookup.
//!
//! [`AlignmentMap`]: crate::AlignmentMap

pub mod machine;
pub mod stepthrough;

pub use machine::Machine;
pub use stepthrough::StepThrough;
pub use stepthrough::block::ContiguousBlock;
