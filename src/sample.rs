//! Samples: the datasets collected for a single experiment.
//!
//! A [`Sample`] maps a closed set of dataset [`Kind`]s to [`Data`] handles.
//! Fitting a sample reprojects some or all of its datasets onto a shared
//! target sequence, optionally through one more hop.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use crate::AlignmentChain;
use crate::AlignmentMap;
use crate::Sequence;
use crate::alignment::Cache;
use crate::data::Annotation;
use crate::data::Dataset;
use crate::data::Interactions;
use crate::data::Profile;
use crate::data::Structure;
use crate::reproject;
use crate::reproject::Remap;
use crate::reproject::Reprojection;
use crate::reproject::Threshold;
use crate::reproject::UnmappedPositionWarning;
use crate::sequence;

/// The kind of a dataset within a [`Sample`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Kind {
    /// A bare sequence.
    Sequence,

    /// A per-nucleotide reactivity profile.
    Profile,

    /// A secondary structure.
    Structure,

    /// A second secondary structure to compare against.
    Comparison,

    /// Inter-nucleotide interactions.
    Interactions,

    /// Annotated spans and sites.
    Annotation,
}

impl Kind {
    /// Every kind, in order.
    pub const ALL: [Kind; 6] = [
        Kind::Sequence,
        Kind::Profile,
        Kind::Structure,
        Kind::Comparison,
        Kind::Interactions,
        Kind::Annotation,
    ];

    /// Gets the name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Sequence => "sequence",
            Kind::Profile => "profile",
            Kind::Structure => "structure",
            Kind::Comparison => "comparison",
            Kind::Interactions => "interactions",
            Kind::Annotation => "annotation",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Kind {
    type Err = Error;

    /// Parses a kind from its name.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::sample::Kind;
    ///
    /// assert_eq!("profile".parse::<Kind>()?, Kind::Profile);
    /// assert!("shapemap".parse::<Kind>().is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        Kind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownKind(s.to_string()))
    }
}

/// An error related to a [`Sample`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The sample has no dataset of the requested kind.
    MissingKind(Kind),

    /// A dataset was stored under a kind it cannot be.
    KindMismatch {
        /// The kind it was stored under.
        kind: Kind,

        /// The kind of the dataset.
        found: Kind,
    },

    /// A name does not match any kind.
    UnknownKind(String),

    /// A sequence error.
    Sequence(sequence::Error),

    /// A reprojection error.
    Reproject(reproject::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MissingKind(kind) => write!(f, "no {kind} data in sample"),
            Error::KindMismatch { kind, found } => {
                write!(f, "cannot store {found} data as {kind} data")
            }
            Error::UnknownKind(name) => write!(f, "unknown data kind: {name}"),
            Error::Sequence(err) => write!(f, "sequence error: {err}"),
            Error::Reproject(err) => write!(f, "reprojection error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<reproject::Error> for Error {
    fn from(err: reproject::Error) -> Self {
        Error::Reproject(err)
    }
}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A dataset of any kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Data {
    /// A bare sequence.
    Sequence(Sequence),

    /// A reactivity profile.
    Profile(Profile),

    /// A secondary structure.
    Structure(Structure),

    /// Inter-nucleotide interactions.
    Interactions(Interactions),

    /// Annotated spans and sites.
    Annotation(Annotation),
}

impl Data {
    /// Gets the natural kind of the dataset.
    pub fn kind(&self) -> Kind {
        match self {
            Data::Sequence(_) => Kind::Sequence,
            Data::Profile(_) => Kind::Profile,
            Data::Structure(_) => Kind::Structure,
            Data::Interactions(_) => Kind::Interactions,
            Data::Annotation(_) => Kind::Annotation,
        }
    }

    /// Returns whether the dataset may be stored under `kind`.
    pub fn fits(&self, kind: Kind) -> bool {
        match (self, kind) {
            (Data::Structure(_), Kind::Comparison) => true,
            _ => self.kind() == kind,
        }
    }

    /// Gets the sequence the dataset is defined over.
    pub fn sequence(&self) -> &Sequence {
        match self {
            Data::Sequence(sequence) => sequence,
            Data::Profile(profile) => profile.sequence(),
            Data::Structure(structure) => structure.sequence(),
            Data::Interactions(interactions) => interactions.sequence(),
            Data::Annotation(annotation) => annotation.sequence(),
        }
    }

    /// Reprojects the dataset onto the target of `remap`.
    pub fn get_aligned_data_with<R: Remap + ?Sized>(
        &self,
        remap: &R,
        threshold: Threshold,
    ) -> std::result::Result<Reprojection<Data>, reproject::Error> {
        let reprojection = match self {
            Data::Sequence(v) => v.get_aligned_data_with(remap, threshold)?.map(Data::Sequence),
            Data::Profile(v) => v.get_aligned_data_with(remap, threshold)?.map(Data::Profile),
            Data::Structure(v) => v.get_aligned_data_with(remap, threshold)?.map(Data::Structure),
            Data::Interactions(v) => v
                .get_aligned_data_with(remap, threshold)?
                .map(Data::Interactions),
            Data::Annotation(v) => v.get_aligned_data_with(remap, threshold)?.map(Data::Annotation),
        };

        Ok(reprojection)
    }
}

/// Implements `From<T> for Data` for each variant wrapping a `T`.
macro_rules! data_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Data {
                fn from(value: $variant) -> Self {
                    Data::$variant(value)
                }
            }
        )*
    };
}

data_from!(Sequence, Profile, Structure, Interactions, Annotation);

/// The datasets of a [`Sample`] after they have been fitted onto a target.
#[derive(Clone, Debug)]
pub struct Fitted {
    /// The sequence every dataset is now defined over.
    target: Sequence,

    /// The fitted datasets.
    data: BTreeMap<Kind, Data>,

    /// The warnings raised while fitting, by kind.
    warnings: Vec<(Kind, UnmappedPositionWarning)>,
}

impl Fitted {
    /// Gets the sequence every dataset is now defined over.
    pub fn target(&self) -> &Sequence {
        &self.target
    }

    /// Gets a fitted dataset.
    pub fn get(&self, kind: Kind) -> Option<&Data> {
        self.data.get(&kind)
    }

    /// Iterates over the fitted datasets.
    pub fn iter(&self) -> impl Iterator<Item = (&Kind, &Data)> {
        self.data.iter()
    }

    /// Gets the warnings raised while fitting.
    pub fn warnings(&self) -> &[(Kind, UnmappedPositionWarning)] {
        &self.warnings
    }
}

/// The datasets collected for a single experiment.
#[derive(Clone, Debug, Default)]
pub struct Sample {
    /// The label of the sample.
    name: String,

    /// The datasets, shared with any sample that inherits from this one.
    data: BTreeMap<Kind, Arc<Data>>,
}

impl Sample {
    /// Creates a new, empty [`Sample`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: BTreeMap::new(),
        }
    }

    /// Creates a new [`Sample`] that starts with every dataset of `parent`.
    ///
    /// Datasets are shared rather than copied.
    pub fn inheriting(name: impl Into<String>, parent: &Sample) -> Self {
        Self {
            name: name.into(),
            data: parent.data.clone(),
        }
    }

    /// Gets the label of the sample.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stores a dataset under `kind`, returning the dataset it replaces.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::data::Structure;
    /// use rnalign::sample::Error;
    /// use rnalign::sample::Kind;
    /// use rnalign::Sample;
    /// use rnalign::Sequence;
    ///
    /// let sequence = "GGGAAACCC".parse::<Sequence>()?;
    /// let mut sample = Sample::new("example");
    ///
    /// sample.insert(Kind::Structure, Structure::unpaired(sequence.clone()))?;
    /// sample.insert(Kind::Comparison, Structure::unpaired(sequence.clone()))?;
    ///
    /// let err = sample.insert(Kind::Profile, sequence).unwrap_err();
    /// assert_eq!(
    ///     err,
    ///     Error::KindMismatch {
    ///         kind: Kind::Profile,
    ///         found: Kind::Sequence
    ///     }
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn insert(&mut self, kind: Kind, data: impl Into<Data>) -> Result<Option<Arc<Data>>> {
        let data = data.into();

        if !data.fits(kind) {
            return Err(Error::KindMismatch {
                kind,
                found: data.kind(),
            });
        }

        Ok(self.data.insert(kind, Arc::new(data)))
    }

    /// Gets the dataset stored under `kind`.
    pub fn get(&self, kind: Kind) -> Option<&Data> {
        self.data.get(&kind).map(|data| data.as_ref())
    }

    /// Gets the dataset stored under `kind`, failing when there is none.
    pub fn require(&self, kind: Kind) -> Result<&Data> {
        self.get(kind).ok_or(Error::MissingKind(kind))
    }

    /// Gets the sequence of the dataset stored under `kind`.
    pub fn sequence_of(&self, kind: Kind) -> Result<&Sequence> {
        self.require(kind).map(|data| data.sequence())
    }

    /// Iterates over the kinds present in the sample.
    pub fn kinds(&self) -> impl Iterator<Item = Kind> + '_ {
        self.data.keys().copied()
    }

    /// Reprojects the datasets stored under `kinds` onto `fit_to`.
    ///
    /// Alignments are taken from (and added to) `cache`, so fitting several
    /// datasets that share a sequence aligns that sequence only once.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::alignment::Cache;
    /// use rnalign::data::Profile;
    /// use rnalign::sample::Data;
    /// use rnalign::sample::Kind;
    /// use rnalign::Sample;
    /// use rnalign::Sequence;
    ///
    /// let construct = "AUCGGCUAAGC".parse::<Sequence>()?;
    /// let reference = "GGAAAAUCGGCUAAGCCCC".parse::<Sequence>()?;
    ///
    /// let mut sample = Sample::new("construct");
    /// sample.insert(Kind::Sequence, construct.clone())?;
    /// sample.insert(Kind::Profile, Profile::try_new(construct, vec![1.0; 11])?)?;
    ///
    /// let mut cache = Cache::new();
    /// let fitted = sample.fit(&[Kind::Sequence, Kind::Profile], &reference, &mut cache)?;
    ///
    /// assert_eq!(cache.len(), 1);
    /// assert!(fitted.warnings().is_empty());
    ///
    /// match fitted.get(Kind::Profile) {
    ///     Some(Data::Profile(profile)) => assert_eq!(profile.values().len(), 19),
    ///     _ => unreachable!(),
    /// }
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn fit(&self, kinds: &[Kind], fit_to: &Sequence, cache: &mut Cache) -> Result<Fitted> {
        self.fit_with(kinds, fit_to, None, cache, Threshold::default())
    }

    /// Reprojects the datasets stored under `kinds` onto `fit_to`, and then
    /// through `then` onto its target.
    pub fn fit_through(
        &self,
        kinds: &[Kind],
        fit_to: &Sequence,
        then: &AlignmentMap,
        cache: &mut Cache,
    ) -> Result<Fitted> {
        self.fit_with(kinds, fit_to, Some(then), cache, Threshold::default())
    }

    /// Reprojects the datasets stored under `kinds` onto `fit_to` (and then
    /// through `then`, if provided), flagging datasets that lose more than
    /// `threshold` of their data.
    pub fn fit_with(
        &self,
        kinds: &[Kind],
        fit_to: &Sequence,
        then: Option<&AlignmentMap>,
        cache: &mut Cache,
        threshold: Threshold,
    ) -> Result<Fitted> {
        let target = then.map(|map| map.target()).unwrap_or(fit_to).clone();

        let mut data = BTreeMap::new();
        let mut warnings = Vec::new();

        for kind in kinds {
            let dataset = self.require(*kind)?;

            let alignment = cache
                .get_or_align(dataset.sequence(), fit_to)
                .map_err(reproject::Error::from)?;

            let reprojection = match then {
                Some(then) => {
                    let chain =
                        AlignmentChain::try_from_vec(vec![alignment.map().clone(), then.clone()])
                            .map_err(reproject::Error::from)?;
                    dataset.get_aligned_data_with(&chain, threshold)?
                }
                None => dataset.get_aligned_data_with(&alignment, threshold)?,
            };

            let (fitted, warning) = reprojection.into_parts();

            if let Some(warning) = warning {
                warnings.push((*kind, warning));
            }

            data.insert(*kind, fitted);
        }

        Ok(Fitted {
            target,
            data,
            warnings,
        })
    }
}
