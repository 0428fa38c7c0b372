//! Morphological tagger interface
//!
//! A [`Tag`] backend runs the external morphological analyzer over a block
//! of text and returns its raw chasen-format output. [`Tagger`] wraps a
//! backend and turns that output into base lexical items with article
//! positions.
use crate::{
    chasen,
    error::{Error, Result},
    item::{FoundLexicalItem, InterpKind, InterpSource, LexicalInterp, TextPosition},
};

#[cfg_attr(docsrs, doc(cfg(feature = "mecab")))]
#[cfg(feature = "mecab")]
pub mod mecab;

pub mod scripted;

/// The trait implemented by all tagger backends
///
/// Backends are stateful: the native handle a real backend wraps is not
/// safe for concurrent use, so callers wanting parallelism hold one backend
/// per worker.
pub trait Tag {
    /// Run the morphological analyzer and return its raw chasen output
    fn tag(&mut self, text: &str) -> Result<String>;
}

/// Adapter from raw tagger output to found lexical items
#[derive(Debug)]
pub struct Tagger<B> {
    backend: B,
}

impl<B: Tag> Tagger<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Find the base lexical items in a block of text
    ///
    /// Each returned item has exactly one position (shifted by
    /// `text_offset`, in chars) and exactly one tagger-sourced morph
    /// interpretation, in the order the tokens appear in the block.
    ///
    /// The tagger silently drops some whitespace, so positions are
    /// recovered by scanning the block for each surface form from a running
    /// cursor. A surface that cannot be found fails the whole block.
    pub fn parse(&mut self, text: &str, text_offset: usize) -> Result<Vec<FoundLexicalItem>> {
        let output = self.backend.tag(text)?;
        let tokens = chasen::parse_output(&output)?;

        let chars: Vec<char> = text.chars().collect();
        let mut cursor = 0;
        let mut items = Vec::with_capacity(tokens.len());
        for token in tokens {
            let surface: Vec<char> = token.surface.chars().collect();
            let start = align(&chars, cursor, &surface).ok_or_else(|| Error::SurfaceAlignment {
                surface: token.surface.clone(),
                offset: text_offset + cursor,
            })?;
            cursor = start + surface.len();

            let position = TextPosition::new(text_offset + start, surface.len());
            let interp = LexicalInterp::new(
                InterpKind::Morph(token.morph_interp()),
                InterpSource::Tagger,
            );
            let mut item = FoundLexicalItem::new(token.base_form, position, interp);
            item.cache_surface_form(position, token.surface);
            items.push(item);
        }
        Ok(items)
    }
}

/// Find the first occurrence of `surface` in `chars` at or after `from`
fn align(chars: &[char], from: usize, surface: &[char]) -> Option<usize> {
    let last_start = chars.len().checked_sub(surface.len())?;
    (from..=last_start).find(|&start| chars[start..start + surface.len()] == *surface)
}
