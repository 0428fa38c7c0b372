//! Scripted tagger backend
//!
//! Replays pre-recorded chasen output for known inputs. Useful for tests
//! and for running the pipeline where the real tagger is not installed.
use std::collections::HashMap;
use std::path::PathBuf;

use crate::{
    error::{Error, Result},
    tagger::Tag,
};

/// A [`Tag`] backend backed by a fixed text-to-output table
#[derive(Debug, Clone, Default)]
pub struct ScriptedBackend {
    outputs: HashMap<String, String>,
}

impl ScriptedBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the chasen output to replay for `text`
    pub fn insert(&mut self, text: impl Into<String>, output: impl Into<String>) {
        self.outputs.insert(text.into(), output.into());
    }
}

impl FromIterator<(String, String)> for ScriptedBackend {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            outputs: iter.into_iter().collect(),
        }
    }
}

impl Tag for ScriptedBackend {
    fn tag(&mut self, text: &str) -> Result<String> {
        self.outputs.get(text).cloned().ok_or_else(|| {
            Error::resource(
                PathBuf::from("<scripted tagger>"),
                format!("no scripted output for `{text}`"),
            )
        })
    }
}
