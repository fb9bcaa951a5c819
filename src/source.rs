//! This module contains the decoding of syntax tree locations into the
//! human-readable `path:line` form used in validation findings.

use std::{collections::HashMap, fmt::Debug};

use crate::solc::{ast::Node, SolcInput, SolcOutput};

/// The interface to an object that can turn a syntax tree node into a
/// human-readable description of where it is in the source.
pub trait SourceDecoder
where
    Self: Debug,
{
    /// Describes the location of `node`.
    #[must_use]
    fn decode(&self, node: &Node<'_>) -> String;
}

/// A [`SourceDecoder`] that renders locations as `path:line`, using the
/// source texts from the compiler input to count lines.
///
/// Nodes whose location cannot be resolved are described by their raw `src`
/// attribute.
#[derive(Clone, Debug, Default)]
pub struct LineDecoder {
    /// The sources known to the decoder, keyed by their index in the `src`
    /// attributes.
    sources: HashMap<u32, DecodedSource>,
}

/// A single source file as seen by the [`LineDecoder`].
#[derive(Clone, Debug)]
struct DecodedSource {
    /// The path of the source.
    path: String,

    /// The byte offsets at which each line after the first begins.
    line_starts: Vec<usize>,
}

impl LineDecoder {
    /// Constructs a decoder for the sources that produced `output` from
    /// `input`.
    #[must_use]
    pub fn new(input: &SolcInput, output: &SolcOutput) -> Self {
        let sources = output
            .sources
            .iter()
            .map(|(path, source)| {
                let line_starts = input
                    .sources
                    .get(path)
                    .map(|s| line_starts(&s.content))
                    .unwrap_or_default();
                let decoded = DecodedSource {
                    path: path.clone(),
                    line_starts,
                };
                (source.id, decoded)
            })
            .collect();

        Self { sources }
    }

    /// Decodes the raw `start:length:source` location `src`, if possible.
    fn decode_src(&self, src: &str) -> Option<String> {
        let mut parts = src.split(':');
        let start: usize = parts.next()?.parse().ok()?;
        let _length = parts.next()?;
        let index: u32 = parts.next()?.parse().ok()?;

        let source = self.sources.get(&index)?;
        let line = 1 + source.line_starts.partition_point(|&s| s <= start);

        Some(format!("{}:{line}", source.path))
    }
}

impl SourceDecoder for LineDecoder {
    fn decode(&self, node: &Node<'_>) -> String {
        let src = node.src().unwrap_or_default();
        self.decode_src(src).unwrap_or_else(|| src.to_string())
    }
}

/// Computes the byte offsets just after every newline in `content`.
fn line_starts(content: &str) -> Vec<usize> {
    content
        .char_indices()
        .filter(|&(_, c)| c == '\n')
        .map(|(i, _)| i + 1)
        .collect()
}
