//! Tagger output parser
//!
//! The morphological tagger is run in chasen output mode: one token per
//! line, tab-separated columns, a bare `EOS` line closing each sentence.
//! This module parses that output into typed [`TokenLine`]s and applies
//! corrections for tagging problems the tagger is known to have.
use winnow::{Parser as _, Result, combinator::separated, token::take_till};

use crate::{
    error::Error,
    item::MorphInterp,
};

/// Sentence terminator line in chasen output
const END_OF_SENTENCE: &str = "EOS";

/// Separator between the levels of the part-of-speech column
const POS_SEPARATOR: char = '-';

/// Exact-match replacement rules for token lines the tagger gets wrong
///
/// Each rule maps a full 6-column line to its replacement. New rules are
/// data additions to this table.
const TAG_CORRECTIONS: &[([&str; 6], [&str; 6])] = &[
    // The tagger gives a standalone な the base form だ. Technically correct,
    // but treating な as its own base form works far better for lexical
    // analysis.
    (
        ["な", "ナ", "だ", "助動詞", "特殊・ダ", "体言接続"],
        ["な", "ナ", "な", "助動詞", "特殊・ダ", "体言接続"],
    ),
];

/// One token line of tagger output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenLine {
    /// The literal substring of the input (column 0)
    pub surface: String,
    /// The reading in katakana (column 1)
    pub reading: String,
    /// The canonical dictionary form (column 2)
    pub base_form: String,
    /// Part-of-speech tags, most general first (column 3)
    pub parts_of_speech: Vec<String>,
    /// Conjugation type (column 4, optional)
    pub conjugated_type: Option<String>,
    /// Conjugation form (column 5, optional)
    pub conjugated_form: Option<String>,
}

impl TokenLine {
    /// The tagger's interpretation of this token
    #[must_use]
    pub fn morph_interp(&self) -> MorphInterp {
        MorphInterp {
            parts_of_speech: self.parts_of_speech.clone(),
            conjugated_type: self.conjugated_type.clone(),
            conjugated_form: self.conjugated_form.clone(),
        }
    }
}

/// Parse one output line into its tab-separated columns
fn columns<'s>(input: &mut &'s str) -> Result<Vec<&'s str>> {
    separated(1.., take_till(0.., |c| c == '\t'), '\t').parse_next(input)
}

/// Parse a full chasen output buffer into token lines
///
/// Empty lines and `EOS` sentence terminators are skipped. After
/// corrections, each remaining line must have 4, 5 or 6 non-empty columns;
/// anything else fails the analysis of the whole buffer.
pub fn parse_output(output: &str) -> crate::error::Result<Vec<TokenLine>> {
    let mut tokens = Vec::new();
    for line in output.lines() {
        if line.is_empty() || line == END_OF_SENTENCE {
            continue;
        }
        // the column parser matches any non-empty input, this arm is unreachable
        let raw = columns.parse(line).map_err(|_| Error::UnexpectedTokenColumns {
            count: 0,
            line: line.to_string(),
        })?;
        let mut cols: Vec<String> = raw.into_iter().map(str::to_string).collect();
        correct_known_problems(&mut cols);
        cols.retain(|col| !col.is_empty());
        if !(4..=6).contains(&cols.len()) {
            return Err(Error::UnexpectedTokenColumns {
                count: cols.len(),
                line: line.to_string(),
            });
        }
        let conjugated_form = if cols.len() == 6 { cols.pop() } else { None };
        let conjugated_type = if cols.len() == 5 { cols.pop() } else { None };
        let parts_of_speech = cols
            .pop()
            .unwrap_or_default()
            .split(POS_SEPARATOR)
            .map(str::to_string)
            .collect();
        let base_form = cols.pop().unwrap_or_default();
        let reading = cols.pop().unwrap_or_default();
        let surface = cols.pop().unwrap_or_default();
        tokens.push(TokenLine {
            surface,
            reading,
            base_form,
            parts_of_speech,
            conjugated_type,
            conjugated_form,
        });
    }
    Ok(tokens)
}

/// Fix token columns in place when they match a known tagger problem
fn correct_known_problems(cols: &mut [String]) {
    // Very rarely the tagger emits a blank base form for a proper noun; fall
    // back to the surface form.
    if cols.len() >= 4 && !cols[0].is_empty() && cols[2].is_empty() {
        cols[2] = cols[0].clone();
    }

    if let Ok(full) = <&[String; 6]>::try_from(&*cols) {
        for (from, to) in TAG_CORRECTIONS {
            if full.iter().zip(from.iter()).all(|(col, want)| col == want) {
                for (col, replacement) in cols.iter_mut().zip(to.iter()) {
                    *col = (*replacement).to_string();
                }
                break;
            }
        }
    }
}
