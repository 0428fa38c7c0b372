//! The dictionary store
//!
//! Ingests the JMdict XML source into per-writing entries and indexes them
//! two ways: by text form and by the morpheme decomposition of the text
//! form. A binary cache under the application data directory skips the XML
//! parse and the re-tagging of every entry when it is newer than the
//! source file.
use std::{
    collections::HashMap,
    fs::{self, File},
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
    sync::Arc,
    time::SystemTime,
};

use quick_xml::{Reader, events::Event};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    tagger::{Tag, Tagger},
};

/// File name of the binary cache under the data directory
const CACHE_FILE_NAME: &str = "jmdict.cache.bin";

/// One writing of one dictionary record
///
/// A JMdict record carries every writing and reading of a word together;
/// analysis wants one entry per concrete text form, so each representation
/// element becomes its own entry, with the record's applicable sense
/// annotations projected onto it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictEntry {
    /// Id of the source record (`ent_seq`), shared by sibling entries
    pub entry_id: String,
    /// The writing or reading this entry pins to
    pub text_form: String,
    /// Info specific to this text form (`ke_inf`/`re_inf`)
    pub text_form_info: Vec<String>,
    /// Frequency markers for this text form (`ke_pri`/`re_pri`)
    pub text_form_freq: Vec<String>,
    /// Parts of speech from the last applicable sense
    pub parts_of_speech: Vec<String>,
    /// Fields of application (sports, medicine, ...)
    pub fields: Vec<String>,
    pub dialects: Vec<String>,
    pub misc: Vec<String>,
}

/// Entries are shared between both indexes
pub type EntryList = Vec<Arc<DictEntry>>;

#[derive(Debug)]
struct DictIndexes {
    text_form_index: HashMap<String, EntryList>,
    decomp_index: HashMap<Vec<String>, EntryList>,
    max_text_form_len: usize,
    max_decomp_len: usize,
}

impl DictIndexes {
    /// Build both indexes from the decomposition index items
    ///
    /// The text form index and the max-length bounds are always derived,
    /// so the cache only ever has to store the decomposition items.
    fn from_decomp_index(decomp_index: HashMap<Vec<String>, EntryList>) -> Self {
        let mut text_form_index: HashMap<String, EntryList> = HashMap::new();
        for entries in decomp_index.values() {
            for entry in entries {
                text_form_index
                    .entry(entry.text_form.clone())
                    .or_default()
                    .push(Arc::clone(entry));
            }
        }
        let max_text_form_len = text_form_index
            .keys()
            .map(|form| form.chars().count())
            .max()
            .unwrap_or(0);
        let max_decomp_len = decomp_index.keys().map(Vec::len).max().unwrap_or(0);
        Self {
            text_form_index,
            decomp_index,
            max_text_form_len,
            max_decomp_len,
        }
    }
}

/// The loaded dictionary, queried by text form or by decomposition
///
/// Immutable once loaded; share it behind a reference or an [`Arc`] freely.
/// Every accessor fails with [`Error::ResourceNotReady`] until a load has
/// succeeded.
#[derive(Debug, Default)]
pub struct Dictionary {
    indexes: Option<DictIndexes>,
}

impl Dictionary {
    /// Create an empty, unloaded store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store and load it from the XML source or its cache
    pub fn open<B: Tag>(
        xml_path: &Path,
        data_dir: &Path,
        tagger: &mut Tagger<B>,
    ) -> Result<Self> {
        let mut dictionary = Self::new();
        dictionary.load(xml_path, data_dir, tagger)?;
        Ok(dictionary)
    }

    /// Load dictionary data, preferring the cache when it is newer
    ///
    /// The cache is used iff it exists and was modified strictly later than
    /// the XML source. Otherwise the XML is parsed, every entry's text form
    /// is decomposed through the tagger, and the cache is rewritten.
    /// Failure to write the cache is logged and swallowed; the next load
    /// simply parses the XML again.
    pub fn load<B: Tag>(
        &mut self,
        xml_path: &Path,
        data_dir: &Path,
        tagger: &mut Tagger<B>,
    ) -> Result<()> {
        let xml_modified = fs::metadata(xml_path)
            .and_then(|meta| meta.modified())
            .map_err(|err| Error::resource(xml_path, format!("dictionary XML not found: {err}")))?;

        let cache_path = data_dir.join(CACHE_FILE_NAME);
        if self.load_cache_if_newer(&cache_path, xml_modified)? {
            return Ok(());
        }

        let entries = ingest::parse_file(xml_path)?;
        debug!(count = entries.len(), "parsed dictionary entries from XML");

        let mut decomp_index: HashMap<Vec<String>, EntryList> = HashMap::new();
        for entry in entries {
            let decomp: Vec<String> = tagger
                .parse(&entry.text_form, 0)?
                .into_iter()
                .map(|item| item.base_form)
                .collect();
            decomp_index.entry(decomp).or_default().push(Arc::new(entry));
        }
        write_cache(&cache_path, &decomp_index);
        self.indexes = Some(DictIndexes::from_decomp_index(decomp_index));
        Ok(())
    }

    fn load_cache_if_newer(&mut self, cache_path: &Path, xml_modified: SystemTime) -> Result<bool> {
        let Ok(meta) = fs::metadata(cache_path) else {
            debug!(path = %cache_path.display(), "no dictionary cache file");
            return Ok(false);
        };
        let cache_modified = meta.modified().map_err(|err| Error::io(cache_path, err))?;
        if cache_modified <= xml_modified {
            debug!(
                path = %cache_path.display(),
                "dictionary cache is not newer than the XML source"
            );
            return Ok(false);
        }

        let file = File::open(cache_path).map_err(|err| Error::io(cache_path, err))?;
        let items: Vec<(Vec<String>, EntryList)> = bincode::deserialize_from(BufReader::new(file))
            .map_err(|err| {
                Error::resource(cache_path, format!("could not read dictionary cache: {err}"))
            })?;
        debug!(path = %cache_path.display(), "loaded dictionary from cache");
        self.indexes = Some(DictIndexes::from_decomp_index(items.into_iter().collect()));
        Ok(true)
    }

    fn indexes(&self) -> Result<&DictIndexes> {
        self.indexes.as_ref().ok_or(Error::ResourceNotReady)
    }

    /// The entries whose text form is exactly `form` (empty when absent)
    pub fn entries_by_form(&self, form: &str) -> Result<&[Arc<DictEntry>]> {
        Ok(self
            .indexes()?
            .text_form_index
            .get(form)
            .map_or(&[], Vec::as_slice))
    }

    /// The entries whose text form decomposes into `decomp` (empty when absent)
    pub fn entries_by_decomp(&self, decomp: &[String]) -> Result<&[Arc<DictEntry>]> {
        Ok(self
            .indexes()?
            .decomp_index
            .get(decomp)
            .map_or(&[], Vec::as_slice))
    }

    pub fn contains_form(&self, form: &str) -> Result<bool> {
        Ok(self.indexes()?.text_form_index.contains_key(form))
    }

    pub fn contains_decomp(&self, decomp: &[String]) -> Result<bool> {
        Ok(self.indexes()?.decomp_index.contains_key(decomp))
    }

    /// Char length of the longest text form in the store
    pub fn max_text_form_len(&self) -> Result<usize> {
        Ok(self.indexes()?.max_text_form_len)
    }

    /// Morpheme count of the longest decomposition in the store
    pub fn max_decomp_len(&self) -> Result<usize> {
        Ok(self.indexes()?.max_decomp_len)
    }
}

/// Rewrite the cache atomically; failures are logged and swallowed
fn write_cache(cache_path: &Path, decomp_index: &HashMap<Vec<String>, EntryList>) {
    let items: Vec<(&Vec<String>, &EntryList)> = decomp_index.iter().collect();
    let tmp_path = cache_path.with_extension("bin.tmp");
    let result = (|| -> Result<()> {
        let file = File::create(&tmp_path).map_err(|err| Error::io(&tmp_path, err))?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, &items)
            .map_err(|err| Error::resource(&tmp_path, format!("cache encode failed: {err}")))?;
        writer.flush().map_err(|err| Error::io(&tmp_path, err))?;
        fs::rename(&tmp_path, cache_path).map_err(|err| Error::io(cache_path, err))
    })();
    match result {
        Ok(()) => debug!(path = %cache_path.display(), "wrote dictionary cache"),
        Err(err) => warn!(%err, "failed to write dictionary cache"),
    }
}

/// Streaming parser for the dictionary XML
mod ingest {
    use super::{
        BufReader, DictEntry, Error, Event, File, Path, PathBuf, Reader, Result,
    };

    /// Sense annotations collected before projection onto entries
    #[derive(Debug, Default)]
    struct Sense {
        /// Text forms this sense is restricted to (`stagk` + `stagr`);
        /// empty means it applies to every entry of the record
        applicable: Vec<String>,
        parts_of_speech: Vec<String>,
        fields: Vec<String>,
        dialects: Vec<String>,
        misc: Vec<String>,
    }

    struct XmlIngest {
        reader: Reader<BufReader<File>>,
        path: PathBuf,
    }

    /// Parse the full dictionary file into per-representation entries
    pub(super) fn parse_file(xml_path: &Path) -> Result<Vec<DictEntry>> {
        let mut reader = Reader::from_file(xml_path)
            .map_err(|err| Error::resource(xml_path, format!("cannot open dictionary XML: {err}")))?;
        reader.config_mut().trim_text(true);
        let mut ingest = XmlIngest {
            reader,
            path: xml_path.to_path_buf(),
        };

        let mut entries = Vec::new();
        let mut buf = Vec::new();
        loop {
            match ingest.next_event(&mut buf)? {
                Event::Start(e) if e.name().as_ref() == b"entry" => {
                    entries.extend(ingest.parse_record()?);
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        Ok(entries)
    }

    impl XmlIngest {
        fn next_event<'b>(&mut self, buf: &'b mut Vec<u8>) -> Result<Event<'b>> {
            self.reader
                .read_event_into(buf)
                .map_err(|err| Error::resource(&self.path, format!("XML read error: {err}")))
        }

        /// Parse one `<entry>` record into one entry per representation
        fn parse_record(&mut self) -> Result<Vec<DictEntry>> {
            let mut entry_id = String::new();
            let mut entries: Vec<DictEntry> = Vec::new();
            let mut senses: Vec<Sense> = Vec::new();

            let mut buf = Vec::new();
            loop {
                match self.next_event(&mut buf)? {
                    Event::Start(e) => match e.name().as_ref() {
                        b"ent_seq" => entry_id = self.read_text("ent_seq")?,
                        b"k_ele" => {
                            entries.push(self.parse_repr("k_ele", "keb", "ke_inf", "ke_pri")?);
                        }
                        b"r_ele" => {
                            entries.push(self.parse_repr("r_ele", "reb", "re_inf", "re_pri")?);
                        }
                        b"sense" => senses.push(self.parse_sense()?),
                        other => {
                            return Err(Error::DictionarySchema {
                                entry_id,
                                message: format!(
                                    "unknown element `{}` in record",
                                    String::from_utf8_lossy(other)
                                ),
                            });
                        }
                    },
                    Event::Empty(e) => {
                        return Err(Error::DictionarySchema {
                            entry_id,
                            message: format!(
                                "element `{}` in record has no content",
                                String::from_utf8_lossy(e.name().as_ref())
                            ),
                        });
                    }
                    Event::End(e) if e.name().as_ref() == b"entry" => break,
                    Event::Eof => {
                        return Err(Error::resource(
                            &self.path,
                            "dictionary XML ended inside a record",
                        ));
                    }
                    _ => {}
                }
                buf.clear();
            }

            if entry_id.is_empty() {
                return Err(Error::DictionarySchema {
                    entry_id,
                    message: "record has no `ent_seq` element".to_string(),
                });
            }
            for entry in &mut entries {
                entry.entry_id.clone_from(&entry_id);
            }
            project_senses(&mut entries, &senses);
            Ok(entries)
        }

        /// Parse one representation element (`k_ele` or `r_ele`)
        ///
        /// Children other than the text form and its info/frequency tuples
        /// (e.g. `re_nokanji`, `re_restr`) are skipped.
        fn parse_repr(
            &mut self,
            end_tag: &str,
            text_tag: &str,
            info_tag: &str,
            freq_tag: &str,
        ) -> Result<DictEntry> {
            let mut entry = DictEntry::default();
            let mut buf = Vec::new();
            loop {
                match self.next_event(&mut buf)? {
                    Event::Start(e) => {
                        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                        if name == text_tag {
                            entry.text_form = self.read_text(text_tag)?;
                        } else if name == info_tag {
                            entry.text_form_info.push(self.read_text(&name)?);
                        } else if name == freq_tag {
                            entry.text_form_freq.push(self.read_text(&name)?);
                        } else {
                            self.skip_element(&name)?;
                        }
                    }
                    Event::End(e) if e.name().as_ref() == end_tag.as_bytes() => break,
                    Event::Eof => {
                        return Err(Error::resource(
                            &self.path,
                            "dictionary XML ended inside a representation",
                        ));
                    }
                    _ => {}
                }
                buf.clear();
            }
            if entry.text_form.is_empty() {
                return Err(Error::DictionarySchema {
                    entry_id: String::new(),
                    message: format!("no `{text_tag}` element within `{end_tag}` element"),
                });
            }
            Ok(entry)
        }

        /// Parse one `sense` element
        ///
        /// Only the annotation tuples are kept; glosses, cross-references
        /// and the like are skipped.
        fn parse_sense(&mut self) -> Result<Sense> {
            let mut sense = Sense::default();
            let mut buf = Vec::new();
            loop {
                match self.next_event(&mut buf)? {
                    Event::Start(e) => {
                        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                        match name.as_str() {
                            "stagk" | "stagr" => sense.applicable.push(self.read_text(&name)?),
                            "pos" => sense.parts_of_speech.push(self.read_text(&name)?),
                            "field" => sense.fields.push(self.read_text(&name)?),
                            "dial" => sense.dialects.push(self.read_text(&name)?),
                            "misc" | "s_inf" => sense.misc.push(self.read_text(&name)?),
                            _ => self.skip_element(&name)?,
                        }
                    }
                    Event::End(e) if e.name().as_ref() == b"sense" => break,
                    Event::Eof => {
                        return Err(Error::resource(
                            &self.path,
                            "dictionary XML ended inside a sense",
                        ));
                    }
                    _ => {}
                }
                buf.clear();
            }
            Ok(sense)
        }

        /// Read the text content of the current element up to its end tag
        ///
        /// JMdict declares entity shorthands for annotation values in its
        /// DTD; unresolved references are kept literally.
        fn read_text(&mut self, tag: &str) -> Result<String> {
            let mut text = String::new();
            let mut buf = Vec::new();
            loop {
                match self.next_event(&mut buf)? {
                    Event::Text(t) => {
                        let chunk = t.decode().map_err(|err| Error::DictionarySchema {
                            entry_id: String::new(),
                            message: format!("bad text in `{tag}` element: {err}"),
                        })?;
                        text.push_str(&chunk);
                    }
                    Event::GeneralRef(r) => {
                        text.push('&');
                        text.push_str(&String::from_utf8_lossy(&r.into_inner()));
                        text.push(';');
                    }
                    Event::End(e) if e.name().as_ref() == tag.as_bytes() => break,
                    Event::Eof => {
                        return Err(Error::resource(
                            &self.path,
                            format!("dictionary XML ended inside a `{tag}` element"),
                        ));
                    }
                    _ => {}
                }
                buf.clear();
            }
            if text.is_empty() {
                return Err(Error::DictionarySchema {
                    entry_id: String::new(),
                    message: format!("no accessible text within `{tag}` element"),
                });
            }
            Ok(text)
        }

        /// Skip an element and all of its children
        fn skip_element(&mut self, tag: &str) -> Result<()> {
            let mut depth = 1usize;
            let mut buf = Vec::new();
            loop {
                match self.next_event(&mut buf)? {
                    Event::Start(_) => depth += 1,
                    Event::End(_) => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    Event::Eof => {
                        return Err(Error::resource(
                            &self.path,
                            format!("dictionary XML ended inside a `{tag}` element"),
                        ));
                    }
                    _ => {}
                }
                buf.clear();
            }
            Ok(())
        }
    }

    /// Project sense annotations onto the applicable entries of a record
    ///
    /// A sense with restrictions only applies to the listed text forms.
    /// Each applicable sense overwrites the annotation fields, so the last
    /// applicable sense wins.
    fn project_senses(entries: &mut [DictEntry], senses: &[Sense]) {
        for sense in senses {
            for entry in entries.iter_mut() {
                if !sense.applicable.is_empty() && !sense.applicable.contains(&entry.text_form) {
                    continue;
                }
                entry.parts_of_speech.clone_from(&sense.parts_of_speech);
                entry.fields.clone_from(&sense.fields);
                entry.dialects.clone_from(&sense.dialects);
                entry.misc.clone_from(&sense.misc);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use similar_asserts::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::tagger::scripted::ScriptedBackend;

    const FIXTURE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<JMdict>
<entry>
<ent_seq>1358280</ent_seq>
<k_ele>
<keb>食べ物</keb>
<ke_pri>ichi1</ke_pri>
</k_ele>
<r_ele>
<reb>たべもの</reb>
</r_ele>
<sense>
<pos>&n;</pos>
<gloss>food</gloss>
</sense>
</entry>
<entry>
<ent_seq>1578850</ent_seq>
<k_ele>
<keb>行く</keb>
</k_ele>
<k_ele>
<keb>往く</keb>
<ke_inf>&rK;</ke_inf>
</k_ele>
<sense>
<pos>&v5k-s;</pos>
<gloss>to go</gloss>
</sense>
<sense>
<stagk>行く</stagk>
<pos>&aux-v;</pos>
<gloss>to continue</gloss>
</sense>
</entry>
</JMdict>
"#;

    fn fixture_tagger() -> Tagger<ScriptedBackend> {
        let mut backend = ScriptedBackend::new();
        backend.insert(
            "食べ物",
            "食べ\tタベ\t食べる\t動詞-自立\t一段\t連用形\n物\tモノ\t物\t名詞-接尾-一般\nEOS\n",
        );
        backend.insert("たべもの", "たべもの\tタベモノ\tたべもの\t名詞-一般\nEOS\n");
        backend.insert("行く", "行く\tイク\t行く\t動詞-自立\t五段・カ行促音便\t基本形\nEOS\n");
        backend.insert("往く", "往く\tユク\t往く\t動詞-自立\t五段・カ行促音便\t基本形\nEOS\n");
        Tagger::new(backend)
    }

    fn write_fixture(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("JMdict.xml");
        fs::write(&path, FIXTURE_XML).unwrap();
        path
    }

    #[test]
    fn test_accessors_before_load() {
        let dictionary = Dictionary::new();
        assert!(matches!(
            dictionary.max_text_form_len(),
            Err(Error::ResourceNotReady)
        ));
        assert!(matches!(
            dictionary.contains_form("猫"),
            Err(Error::ResourceNotReady)
        ));
    }

    #[test]
    fn test_load_builds_both_indexes() {
        let dir = TempDir::new().unwrap();
        let xml = write_fixture(&dir);
        let dictionary = Dictionary::open(&xml, dir.path(), &mut fixture_tagger()).unwrap();

        assert!(dictionary.contains_form("食べ物").unwrap());
        assert!(dictionary.contains_form("たべもの").unwrap());
        assert!(!dictionary.contains_form("食べる").unwrap());

        let decomp = vec!["食べる".to_string(), "物".to_string()];
        let entries = dictionary.entries_by_decomp(&decomp).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry_id, "1358280");
        assert_eq!(entries[0].text_form, "食べ物");
        assert_eq!(entries[0].text_form_freq, vec!["ichi1"]);
        assert_eq!(entries[0].parts_of_speech, vec!["&n;"]);
    }

    #[test]
    fn test_max_lens_count_chars() {
        let dir = TempDir::new().unwrap();
        let xml = write_fixture(&dir);
        let dictionary = Dictionary::open(&xml, dir.path(), &mut fixture_tagger()).unwrap();
        // longest text form is たべもの (4 chars), longest decomposition
        // is 食べる + 物 (2 morphemes)
        assert_eq!(dictionary.max_text_form_len().unwrap(), 4);
        assert_eq!(dictionary.max_decomp_len().unwrap(), 2);
    }

    #[test]
    fn test_restricted_sense_only_applies_to_listed_forms() {
        let dir = TempDir::new().unwrap();
        let xml = write_fixture(&dir);
        let dictionary = Dictionary::open(&xml, dir.path(), &mut fixture_tagger()).unwrap();

        // the second sense is restricted to 行く and overwrites the first
        let iku = &dictionary.entries_by_form("行く").unwrap()[0];
        assert_eq!(iku.parts_of_speech, vec!["&aux-v;"]);
        let yuku = &dictionary.entries_by_form("往く").unwrap()[0];
        assert_eq!(yuku.parts_of_speech, vec!["&v5k-s;"]);
        assert_eq!(yuku.text_form_info, vec!["&rK;"]);
    }

    #[test]
    fn test_unknown_record_element_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.xml");
        fs::write(
            &path,
            "<JMdict><entry><ent_seq>1</ent_seq><bogus>x</bogus></entry></JMdict>",
        )
        .unwrap();
        let err = Dictionary::open(&path, dir.path(), &mut fixture_tagger()).unwrap_err();
        assert!(matches!(err, Error::DictionarySchema { ref message, .. }
            if message.contains("bogus")));
    }

    #[test]
    fn test_record_without_ent_seq_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.xml");
        fs::write(
            &path,
            "<JMdict><entry><r_ele><reb>たべもの</reb></r_ele></entry></JMdict>",
        )
        .unwrap();
        let err = Dictionary::open(&path, dir.path(), &mut fixture_tagger()).unwrap_err();
        assert!(matches!(err, Error::DictionarySchema { ref message, .. }
            if message.contains("ent_seq")));
    }

    #[test]
    fn test_repr_without_text_form_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.xml");
        fs::write(
            &path,
            "<JMdict><entry><ent_seq>1</ent_seq><k_ele><ke_pri>ichi1</ke_pri></k_ele></entry></JMdict>",
        )
        .unwrap();
        let err = Dictionary::open(&path, dir.path(), &mut fixture_tagger()).unwrap_err();
        assert!(matches!(err, Error::DictionarySchema { ref message, .. }
            if message.contains("keb")));
    }

    #[test]
    fn test_cache_round_trip() {
        let dir = TempDir::new().unwrap();
        let xml = write_fixture(&dir);
        let first = Dictionary::open(&xml, dir.path(), &mut fixture_tagger()).unwrap();

        // make the cache strictly newer than the XML source
        let cache_path = dir.path().join(CACHE_FILE_NAME);
        File::options()
            .write(true)
            .open(&cache_path)
            .unwrap()
            .set_modified(SystemTime::now() + Duration::from_secs(60))
            .unwrap();

        // an empty scripted tagger proves the XML is not re-parsed
        let mut untagger = Tagger::new(ScriptedBackend::new());
        let second = Dictionary::open(&xml, dir.path(), &mut untagger).unwrap();

        assert_eq!(
            first.max_text_form_len().unwrap(),
            second.max_text_form_len().unwrap()
        );
        assert_eq!(
            first.max_decomp_len().unwrap(),
            second.max_decomp_len().unwrap()
        );
        for form in ["食べ物", "たべもの", "行く", "往く"] {
            assert_eq!(
                first.entries_by_form(form).unwrap(),
                second.entries_by_form(form).unwrap(),
                "entries for {form}"
            );
        }
        let decomp = vec!["食べる".to_string(), "物".to_string()];
        assert_eq!(
            first.entries_by_decomp(&decomp).unwrap(),
            second.entries_by_decomp(&decomp).unwrap()
        );
    }

    #[test]
    fn test_stale_cache_is_ignored() {
        let dir = TempDir::new().unwrap();
        let xml = write_fixture(&dir);
        let _ = Dictionary::open(&xml, dir.path(), &mut fixture_tagger()).unwrap();

        // make the cache strictly older than the XML source
        let cache_path = dir.path().join(CACHE_FILE_NAME);
        File::options()
            .write(true)
            .open(&cache_path)
            .unwrap()
            .set_modified(SystemTime::now() - Duration::from_secs(3600))
            .unwrap();

        // the XML must be re-parsed, which needs the scripted outputs again
        let reloaded = Dictionary::open(&xml, dir.path(), &mut fixture_tagger()).unwrap();
        assert!(reloaded.contains_form("食べ物").unwrap());

        // and an empty tagger fails, proving the cache was not used
        let mut untagger = Tagger::new(ScriptedBackend::new());
        File::options()
            .write(true)
            .open(&cache_path)
            .unwrap()
            .set_modified(SystemTime::now() - Duration::from_secs(3600))
            .unwrap();
        assert!(Dictionary::open(&xml, dir.path(), &mut untagger).is_err());
    }
}
