//! `rnalign` is a crate for aligning related RNA sequences and reprojecting
//! per-nucleotide data onto a shared coordinate system.
//!
//! Structure-probing experiments produce data over many slightly different
//! sequences: a truncated construct, a mutant, a published reference. Before
//! any two of these datasets can be compared, they must be placed on the same
//! axis. The crate provides three main points of entry:
//!
//! - Aligning two sequences and turning the alignment into a position map.
//! - Composing maps into chains that cross intermediate sequences.
//! - Reprojecting datasets through a map or a chain.
//!
//! Positions are 1-based throughout. Position 0 is reserved as the "no data"
//! sentinel: it is what an unmapped position maps to.
//!
//! ## Aligning sequences
//!
//! An [`Alignment`] is a global alignment of a source [`Sequence`] against a
//! target [`Sequence`] using affine gap penalties, with gaps at either end of
//! either sequence left unpenalized (so a short construct can sit anywhere
//! within a longer reference). The alignment is computed lazily the first
//! time it is needed, and its [`AlignmentMap`] holds, for each source
//! position, the target position it aligned to.
//!
//! ```
//! use rnalign::Alignment;
//! use rnalign::Sequence;
//!
//! let source = "GGGAAACCCUUU".parse::<Sequence>()?;
//! let target = "GGGAAAUUU".parse::<Sequence>()?;
//!
//! let alignment = Alignment::try_new(source, target)?;
//! let (a, b) = alignment.aligned();
//! assert_eq!(a, "GGGAAACCCUUU");
//! assert_eq!(b, "GGGAAA---UUU");
//!
//! let map = alignment.map();
//! assert_eq!(map.translate(6), 6);
//! assert_eq!(map.translate(7), 0);
//! assert_eq!(map.translate(10), 7);
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Chaining maps
//!
//! When data must cross more than one sequence, an [`AlignmentChain`]
//! composes the hops. A position is unmapped at the end of the chain as soon
//! as any hop drops it.
//!
//! ## Reprojecting data
//!
//! Every dataset in [`data`] implements [`data::Dataset`], which can
//! reproject it through anything implementing [`reproject::Remap`] (a map,
//! an alignment, or a chain). Scalar data is scattered with NaN for target
//! positions nothing maps onto; pairs are dropped when either end is
//! unmapped; spans are clipped inwards.
//!
//! ```
//! use rnalign::data::Dataset;
//! use rnalign::data::Interaction;
//! use rnalign::data::Interactions;
//! use rnalign::Alignment;
//! use rnalign::Sequence;
//!
//! let source = "GGGAAACCCUUU".parse::<Sequence>()?;
//! let target = "GGGAAAUUU".parse::<Sequence>()?;
//!
//! let interactions = Interactions::try_new(
//!     source.clone(),
//!     vec![Interaction::new(1, 12, 0.9), Interaction::new(2, 8, 0.4)],
//! )?;
//!
//! let alignment = Alignment::try_new(source, target)?;
//! let reprojection = interactions.get_aligned_data(&alignment)?;
//!
//! let pairs = reprojection.data().pairs().collect::<Vec<_>>();
//! assert_eq!(pairs, vec![(1, 9)]);
//!
//! // Half of the interactions were lost, which is not more than the default
//! // threshold.
//! assert!(reprojection.warning().is_none());
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! For a larger bundle of datasets, a [`Sample`] collects them by
//! [`sample::Kind`] and fits any subset onto a shared target in one call.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod alignment;
pub mod chain;
pub mod color;
pub mod data;
pub mod liftover;
pub mod map;
pub mod reproject;
pub mod sample;
pub mod sequence;

pub use alignment::Alignment;
pub use chain::AlignmentChain;
pub use map::AlignmentMap;
pub use sample::Sample;
pub use sequence::Sequence;
pub use sequence::SequenceSource;
