//! Compound (meta) lexical item discovery
//!
//! The tagger reports atomic morphemes, so words made of several
//! consecutive morphemes (食べ物 from 食べ + 物) have to be recovered by
//! dictionary lookup. A window slides over the base items and every
//! dictionary entry matching the window by decomposition, surface
//! concatenation or base form concatenation yields one meta item.
use itertools::Itertools as _;

use crate::{
    dictionary::Dictionary,
    error::Result,
    item::{FoundLexicalItem, InterpKind, InterpSource, LexicalInterp, TextPosition},
};

/// Find the meta lexical items within a series of base items
///
/// `base_items` must be in text order, one position each, as returned by
/// the tagger adapter. Windows of two or more consecutive items are looked
/// up while any length measure stays within the store bounds.
pub fn find_meta_items(
    dictionary: &Dictionary,
    base_items: &[FoundLexicalItem],
) -> Result<Vec<FoundLexicalItem>> {
    let mut meta_items = Vec::new();
    for start in 0..base_items.len() {
        for end in start + 1..base_items.len() {
            let window = &base_items[start..=end];
            if !within_entry_len_bounds(dictionary, window)? {
                break;
            }
            lookup_window(dictionary, window, &mut meta_items)?;
        }
    }
    Ok(meta_items)
}

/// Check if any length measure of the window is within its store bound
///
/// A window over every bound can never match an entry, so the caller stops
/// extending it. The measures are checked cheapest first: item count
/// against the longest decomposition, then base form and surface form char
/// sums against the longest text form.
fn within_entry_len_bounds(dictionary: &Dictionary, window: &[FoundLexicalItem]) -> Result<bool> {
    if window.len() <= dictionary.max_decomp_len()? {
        return Ok(true);
    }
    let max_text_form_len = dictionary.max_text_form_len()?;
    let base_len: usize = window.iter().map(|i| i.base_form.chars().count()).sum();
    if base_len <= max_text_form_len {
        return Ok(true);
    }
    let surface_len: usize = window
        .iter()
        .map(|i| i.first_surface_form().chars().count())
        .sum();
    Ok(surface_len <= max_text_form_len)
}

/// Emit one meta item per dictionary entry matching the window
///
/// The same entry can be produced by several of the three lookups; it is
/// emitted once, with one source tag per producing lookup.
fn lookup_window(
    dictionary: &Dictionary,
    window: &[FoundLexicalItem],
    meta_items: &mut Vec<FoundLexicalItem>,
) -> Result<()> {
    let decomp: Vec<String> = window.iter().map(|i| i.base_form.clone()).collect();
    let decomp_entries = dictionary.entries_by_decomp(&decomp)?;

    let surface_form: String = window.iter().map(FoundLexicalItem::first_surface_form).collect();
    let surface_entries = dictionary.entries_by_form(&surface_form)?;

    let base_form = decomp.concat();
    let base_entries = dictionary.entries_by_form(&base_form)?;

    if decomp_entries.is_empty() && surface_entries.is_empty() && base_entries.is_empty() {
        return Ok(());
    }

    let position = TextPosition::new(
        window[0].found_positions[0].start,
        surface_form.chars().count(),
    );
    let unique_entries = decomp_entries
        .iter()
        .chain(surface_entries)
        .chain(base_entries)
        .unique_by(|entry| (entry.entry_id.clone(), entry.text_form.clone()));
    for entry in unique_entries {
        let mut sources = Vec::new();
        if decomp_entries.contains(entry) {
            sources.push(InterpSource::DictMorphDecomp);
        }
        if surface_entries.contains(entry) {
            sources.push(InterpSource::DictSurfaceForm);
        }
        if base_entries.contains(entry) {
            sources.push(InterpSource::DictBaseForm);
        }
        let interp = LexicalInterp {
            kind: InterpKind::Dictionary {
                entry_id: entry.entry_id.clone(),
            },
            sources,
        };
        let mut item = FoundLexicalItem::new(entry.text_form.clone(), position, interp);
        item.cache_surface_form(position, surface_form.clone());
        meta_items.push(item);
    }
    Ok(())
}
