//! Resource version reporting
//!
//! Reports the versions of the external resources analysis depends on:
//! the morphological tagger binary, the dictionary XML source, and the
//! supplemental dictionary package.
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufRead as _, BufReader},
    path::Path,
    process::Command,
    sync::LazyLock,
};

use regex::Regex;

use crate::{
    config::Config,
    error::{Error, Result},
};

/// Change log file inside the supplemental dictionary repository
const NEOLOGD_CHANGELOG_FILE: &str = "ChangeLog";

/// Creation date comment near the top of the dictionary XML
static JMDICT_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<!-- JMdict created: (\d{4})-(\d{2})-(\d{2}) -->$")
        .expect("hardcoded regex should compile")
});

/// Release header line of the NEologd change log
static NEOLOGD_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^# Release (\d{4})(\d{2})(\d{2})-.*$").expect("hardcoded regex should compile")
});

/// The versions of the resources used for analysis, keyed by resource name
///
/// Dictionary versions are reported as their generation date, `yyyy.mm.dd`.
pub fn resource_versions(config: &Config) -> Result<BTreeMap<String, String>> {
    let mut versions = BTreeMap::new();
    versions.insert("mecab".to_string(), tagger_version()?);
    versions.insert(
        "jmdict".to_string(),
        scan_for_version(&config.jmdict_xml, &JMDICT_VERSION)?,
    );
    versions.insert(
        "ipadic-neologd".to_string(),
        scan_for_version(&config.neologd_dir.join(NEOLOGD_CHANGELOG_FILE), &NEOLOGD_VERSION)?,
    );
    Ok(versions)
}

/// Version of the tagger installed on the system
fn tagger_version() -> Result<String> {
    let output = Command::new("mecab-config")
        .arg("--version")
        .output()
        .map_err(|err| Error::io("mecab-config", err))?;
    if !output.status.success() {
        return Err(Error::resource(
            "mecab-config",
            "MeCab is not available on this system",
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Scan a file for the first line matching a three-group date pattern
fn scan_for_version(path: &Path, pattern: &Regex) -> Result<String> {
    let file = File::open(path).map_err(|err| Error::io(path, err))?;
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|err| Error::io(path, err))?;
        if let Some(caps) = pattern.captures(&line) {
            return Ok(format!("{}.{}.{}", &caps[1], &caps[2], &caps[3]));
        }
    }
    Err(Error::resource(path, "no version info found in file"))
}
