//! Sequence annotations: named spans and sites.

use crate::AlignmentMap;
use crate::Sequence;
use crate::color::Color;
use crate::data::Dataset;
use crate::data::Error;
use crate::data::check_position;
use crate::liftover::machine;
use crate::reproject;
use crate::reproject::Coverage;

/// An inclusive, 1-based span of positions.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Span {
    /// The first position.
    start: usize,

    /// The last position.
    end: usize,
}

impl Span {
    /// Attempts to create a new [`Span`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::data::Span;
    ///
    /// let span = Span::try_new(3, 7)?;
    /// assert_eq!(span.len(), 5);
    ///
    /// assert!(Span::try_new(7, 3).is_err());
    /// assert!(Span::try_new(0, 3).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(start: usize, end: usize) -> Result<Self, Error> {
        if start == 0 || end < start {
            return Err(Error::InvalidSpan { start, end });
        }

        Ok(Self { start, end })
    }

    /// Gets the first position.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Gets the last position.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Gets the number of positions in the span.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A named group of spans and sites over a sequence (for example, a
/// binding site, a primer, or a set of modified nucleotides).
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    /// The sequence the annotation is defined over.
    sequence: Sequence,

    /// The name of the annotation.
    name: String,

    /// The annotated spans.
    spans: Vec<Span>,

    /// The annotated sites.
    sites: Vec<usize>,

    /// The color to draw the annotation with.
    color: Option<Color>,
}

impl Annotation {
    /// Creates a new, empty [`Annotation`].
    pub fn new(sequence: Sequence, name: impl Into<String>) -> Self {
        Self {
            sequence,
            name: name.into(),
            spans: Vec::new(),
            sites: Vec::new(),
            color: None,
        }
    }

    /// Adds a span to the annotation.
    ///
    /// # Examples
    ///
    /// ```
    /// use rnalign::data::Annotation;
    /// use rnalign::data::Span;
    /// use rnalign::Sequence;
    ///
    /// let sequence = "GGGAAACCC".parse::<Sequence>()?;
    ///
    /// let annotation = Annotation::new(sequence, "loop")
    ///     .span(Span::try_new(4, 6)?)?
    ///     .site(1)?;
    ///
    /// assert_eq!(annotation.name(), "loop");
    /// assert_eq!(annotation.spans().len(), 1);
    /// assert_eq!(annotation.sites(), &[1]);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn span(mut self, span: Span) -> Result<Self, Error> {
        check_position(span.end(), self.sequence.len())?;

        self.spans.push(span);
        Ok(self)
    }

    /// Adds a site to the annotation.
    pub fn site(mut self, position: usize) -> Result<Self, Error> {
        check_position(position, self.sequence.len())?;

        self.sites.push(position);
        Ok(self)
    }

    /// Sets the color of the annotation.
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Gets the name of the annotation.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the spans.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Gets the sites.
    pub fn sites(&self) -> &[usize] {
        &self.sites
    }

    /// Gets the color of the annotation, if one was set.
    pub fn get_color(&self) -> Option<Color> {
        self.color
    }
}

impl Dataset for Annotation {
    fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    fn reproject(&self, map: &AlignmentMap) -> Result<(Self, Coverage), reproject::Error> {
        let machine = machine::Builder.build_from(map);

        // An endpoint that falls into a gap is pulled inwards to the nearest
        // position that does map.
        let spans = self
            .spans
            .iter()
            .filter_map(|span| {
                let (start, end) = machine.liftover_span(span.start(), span.end())?;
                Some(Span { start, end })
            })
            .collect::<Vec<_>>();

        let sites = self
            .sites
            .iter()
            .filter_map(|site| map.get(*site))
            .collect::<Vec<_>>();

        let total = self.spans.len() + self.sites.len();
        let coverage = Coverage::new(total, total - spans.len() - sites.len());

        let annotation = Self {
            sequence: map.target().clone(),
            name: self.name.clone(),
            spans,
            sites,
            color: self.color,
        };

        Ok((annotation, coverage))
    }
}
