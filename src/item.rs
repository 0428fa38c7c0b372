//! Core value types for lexical item analysis
//!
//! A [`FoundLexicalItem`] records one lexical item discovered in an article:
//! its canonical (dictionary) form, every position it was found at, and the
//! possible interpretations of the item at those positions. Items are value
//! objects: they are produced per article and consumed by the caller.
use std::collections::{BTreeMap, HashMap};

use derive_more::{Display, IsVariant};
use serde::{Deserialize, Serialize};

/// A Japanese article to analyze
///
/// Callers usually carry more identity data (source, title, fetch date);
/// analysis only ever reads the full text, so this is the whole contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Article {
    /// The article body, blocks separated by newlines
    pub full_text: String,
}

impl Article {
    #[must_use]
    pub fn new(full_text: impl Into<String>) -> Self {
        Self {
            full_text: full_text.into(),
        }
    }
}

/// The position of a found lexical item within an article
///
/// Offsets and lengths count Unicode code points, not bytes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[display("{start}+{length}")]
pub struct TextPosition {
    /// Char offset of the first char of the item in the article text
    pub start: usize,
    /// Char length of the item in the article text
    pub length: usize,
}

impl TextPosition {
    #[must_use]
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Char offset one past the last char of the item
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// Which lookup produced an interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterpSource {
    /// The morphological tagger's own analysis
    Tagger,
    /// Dictionary lookup of the concatenated base forms
    DictBaseForm,
    /// Dictionary lookup of the concatenated surface forms
    DictSurfaceForm,
    /// Dictionary lookup of the morpheme decomposition
    DictMorphDecomp,
}

/// The morphological tagger's interpretation of a token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MorphInterp {
    /// Parts of speech, most general tag first (1 to 4 deep)
    pub parts_of_speech: Vec<String>,
    pub conjugated_type: Option<String>,
    pub conjugated_form: Option<String>,
}

/// The shape of a lexical item interpretation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, IsVariant)]
pub enum InterpKind {
    /// Interpreted by the morphological tagger
    Morph(MorphInterp),
    /// Matched a dictionary entry
    Dictionary { entry_id: String },
}

/// One possible interpretation of a found lexical item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexicalInterp {
    pub kind: InterpKind,
    /// Lookups that produced this interpretation, in discovery order,
    /// without duplicates
    pub sources: Vec<InterpSource>,
}

impl LexicalInterp {
    #[must_use]
    pub fn new(kind: InterpKind, source: InterpSource) -> Self {
        Self {
            kind,
            sources: vec![source],
        }
    }

    /// Record an additional source for this interpretation, keeping
    /// `sources` an ordered set
    pub fn add_source(&mut self, source: InterpSource) {
        if !self.sources.contains(&source) {
            self.sources.push(source);
        }
    }
}

/// A lexical item found in an article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundLexicalItem {
    /// The canonical (dictionary citation) form of the item
    pub base_form: String,
    /// Everywhere the item was found, sorted by start offset
    pub found_positions: Vec<TextPosition>,
    /// All interpretations produced for the item
    pub possible_interps: Vec<LexicalInterp>,
    /// Literal substrings for the positions where the article text differs
    /// from `base_form` (conjugation, alternate writing)
    pub surface_forms: BTreeMap<TextPosition, String>,
}

impl FoundLexicalItem {
    /// Create an item found at a single position with a single interpretation
    #[must_use]
    pub fn new(base_form: impl Into<String>, position: TextPosition, interp: LexicalInterp) -> Self {
        Self {
            base_form: base_form.into(),
            found_positions: vec![position],
            possible_interps: vec![interp],
            surface_forms: BTreeMap::new(),
        }
    }

    /// Cache the literal substring found at `position`
    ///
    /// Surfaces equal to the base form are not stored; [`Self::surface_form_at`]
    /// falls back to the base form for them.
    pub fn cache_surface_form(&mut self, position: TextPosition, surface: impl Into<String>) {
        let surface = surface.into();
        if surface != self.base_form {
            self.surface_forms.insert(position, surface);
        }
    }

    /// The literal substring at `position`
    #[must_use]
    pub fn surface_form_at(&self, position: &TextPosition) -> &str {
        self.surface_forms
            .get(position)
            .map_or(self.base_form.as_str(), String::as_str)
    }

    /// The literal substring at the first found position
    #[must_use]
    pub fn first_surface_form(&self) -> &str {
        self.found_positions
            .first()
            .map_or(self.base_form.as_str(), |pos| self.surface_form_at(pos))
    }

    /// The morph interpretations of this item, skipping dictionary ones
    pub(crate) fn morph_interps(&self) -> impl Iterator<Item = &MorphInterp> {
        self.possible_interps.iter().filter_map(|i| match &i.kind {
            InterpKind::Morph(morph) => Some(morph),
            InterpKind::Dictionary { .. } => None,
        })
    }

    fn merge(&mut self, other: FoundLexicalItem) {
        debug_assert_eq!(self.base_form, other.base_form);
        self.found_positions.extend(other.found_positions);
        self.surface_forms.extend(other.surface_forms);
        for interp in other.possible_interps {
            match self
                .possible_interps
                .iter_mut()
                .find(|existing| existing.kind == interp.kind)
            {
                Some(existing) => {
                    for source in interp.sources {
                        existing.add_source(source);
                    }
                }
                None => self.possible_interps.push(interp),
            }
        }
    }
}

/// Merge items that share a base form
///
/// The returned list contains one item per distinct base form, in order of
/// first appearance. Positions are concatenated (duplicates preserved, since
/// a base and a meta lookup may legitimately report overlapping hits) and
/// kept sorted by start offset; interpretations are deduplicated by kind
/// with their sources unioned.
#[must_use]
pub fn reduce_found_items(items: Vec<FoundLexicalItem>) -> Vec<FoundLexicalItem> {
    let mut reduced: Vec<FoundLexicalItem> = Vec::new();
    let mut by_base_form: HashMap<String, usize> = HashMap::new();
    for item in items {
        match by_base_form.get(&item.base_form) {
            Some(&idx) => reduced[idx].merge(item),
            None => {
                by_base_form.insert(item.base_form.clone(), reduced.len());
                reduced.push(item);
            }
        }
    }
    for item in &mut reduced {
        item.found_positions.sort_by_key(|pos| pos.start);
    }
    reduced
}
