//! MeCab tagger backend
//!
//! Wraps the in-process MeCab library handle configured for chasen output.
//! The supplemental NEologd dictionary is used when its install directory
//! can be resolved through `mecab-config`.
use std::{
    path::{Path, PathBuf},
    process::Command,
};

use crate::{
    error::{Error, Result},
    tagger::Tag,
};

/// Directory name of the NEologd dictionary under the MeCab dicdir
const NEOLOGD_DIR_NAME: &str = "mecab-ipadic-neologd";

/// A [`Tag`] backend wrapping a native MeCab handle
///
/// The handle is `Send` but not `Sync`; hold one backend per worker.
pub struct MecabBackend {
    tagger: mecab::Tagger,
}

impl MecabBackend {
    /// Open MeCab in chasen output mode with its default dictionary
    pub fn new() -> Result<Self> {
        ensure_mecab_available()?;
        Ok(Self {
            tagger: mecab::Tagger::new("-Ochasen"),
        })
    }

    /// Open MeCab in chasen output mode with the NEologd dictionary
    ///
    /// Fails with a resource error when MeCab or the NEologd dictionary is
    /// not installed on the system.
    pub fn with_supplemental_dictionary() -> Result<Self> {
        let dict_dir = neologd_dict_dir()?;
        Ok(Self {
            tagger: mecab::Tagger::new(format!("-Ochasen -d {}", dict_dir.display())),
        })
    }
}

impl Tag for MecabBackend {
    fn tag(&mut self, text: &str) -> Result<String> {
        Ok(self.tagger.parse_str(text))
    }
}

/// Probe for the MeCab install before creating a native handle
fn ensure_mecab_available() -> Result<()> {
    run_mecab_config("--version").map(|_| ())
}

/// Resolve the NEologd dictionary directory through `mecab-config`
fn neologd_dict_dir() -> Result<PathBuf> {
    let dicdir = run_mecab_config("--dicdir")?;
    let path = Path::new(dicdir.trim()).join(NEOLOGD_DIR_NAME);
    if !path.exists() {
        return Err(Error::resource(
            path,
            "the NEologd dictionary is not installed on this system",
        ));
    }
    Ok(path)
}

fn run_mecab_config(arg: &str) -> Result<String> {
    let output = Command::new("mecab-config")
        .arg(arg)
        .output()
        .map_err(|err| Error::io(PathBuf::from("mecab-config"), err))?;
    if !output.status.success() {
        return Err(Error::resource(
            PathBuf::from("mecab-config"),
            "MeCab is not available on this system",
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
