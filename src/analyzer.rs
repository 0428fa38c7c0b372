//! Analyze articles for the lexical items they use
//!
//! [`Analyzer`] is the main entrypoint of this library. It owns a loaded
//! [`Dictionary`] and a [`Tagger`], splits an article into newline-bounded
//! blocks, finds the base and meta items of each block, drops symbol
//! tokens, and merges duplicate findings across the whole article.
use tracing::debug;

use crate::{
    compound::find_meta_items,
    config::Config,
    dictionary::Dictionary,
    error::Result,
    item::{Article, FoundLexicalItem, reduce_found_items},
    tagger::{Tag, Tagger},
};

/// First-level part-of-speech tag the tagger gives punctuation and other
/// non-lexical symbols
const SYMBOL_PART_OF_SPEECH: &str = "記号";

/// Lexical item analyzer for Japanese article text
#[derive(Debug)]
pub struct Analyzer<B> {
    dictionary: Dictionary,
    tagger: Tagger<B>,
}

impl<B: Tag> Analyzer<B> {
    /// Wrap an already loaded dictionary and tagger
    pub fn new(dictionary: Dictionary, tagger: Tagger<B>) -> Self {
        Self { dictionary, tagger }
    }

    /// Load the dictionary per the configuration and wrap the backend
    pub fn load(config: &Config, backend: B) -> Result<Self> {
        let mut tagger = Tagger::new(backend);
        let dictionary = Dictionary::open(&config.jmdict_xml, &config.data_dir, &mut tagger)?;
        Ok(Self::new(dictionary, tagger))
    }

    /// Find all lexical items in an article
    ///
    /// The result holds one item per distinct base form; an item's
    /// positions are in document order. Callers that need source order
    /// sort by the first position's start. Any failure is fatal to the
    /// whole call; no partial results are returned.
    pub fn analyze(&mut self, article: &Article) -> Result<Vec<FoundLexicalItem>> {
        let mut found = Vec::new();
        let mut offset = 0;
        for block in article.full_text.split('\n') {
            let block_len = block.chars().count();
            if block_len == 0 {
                offset += 1;
                continue;
            }
            let items = self.analyze_block(block, offset)?;
            debug!(count = items.len(), offset, "analyzed text block");
            found.extend(items);
            offset += block_len + 1;
        }
        Ok(reduce_found_items(found))
    }

    /// Find the items of one block: tagger output plus dictionary
    /// compounds, without symbol tokens
    fn analyze_block(&mut self, block: &str, offset: usize) -> Result<Vec<FoundLexicalItem>> {
        let base_items = self.tagger.parse(block, offset)?;
        let meta_items = find_meta_items(&self.dictionary, &base_items)?;
        Ok(base_items
            .into_iter()
            .chain(meta_items)
            .filter(|item| !is_symbol(item))
            .collect())
    }
}

/// Whether an item is punctuation or another non-lexical symbol
///
/// An item is a symbol when it has tagger interpretations and every one of
/// them leads with the symbol part of speech. Items carrying only
/// dictionary interpretations are never symbols.
fn is_symbol(item: &FoundLexicalItem) -> bool {
    let mut interps = item.morph_interps().peekable();
    if interps.peek().is_none() {
        return false;
    }
    interps.all(|morph| {
        morph
            .parts_of_speech
            .first()
            .is_some_and(|pos| pos == SYMBOL_PART_OF_SPEECH)
    })
}
