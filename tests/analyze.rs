//! End-to-end analysis over a fixture dictionary and scripted tagger
use std::{collections::HashSet, fs};

use lexiscan::{
    analyzer::Analyzer,
    config::Config,
    item::{Article, InterpSource, TextPosition},
    tagger::scripted::ScriptedBackend,
};
use similar_asserts::assert_eq;
use tempfile::TempDir;

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
</JMdict>
"#;

const BLOCK_ONE: &str = "猫\tネコ\t猫\t名詞-一般\n\
                         が\tガ\tが\t助詞-格助詞-一般\n\
                         食べ\tタベ\t食べる\t動詞-自立\t一段\t連用形\n\
                         物\tモノ\t物\t名詞-接尾-一般\n\
                         を\tヲ\tを\t助詞-格助詞-一般\n\
                         食べ\tタベ\t食べる\t動詞-自立\t一段\t連用形\n\
                         た\tタ\tた\t助動詞\t特殊・タ\t基本形\n\
                         。\t。\t。\t記号-句点\n\
                         EOS\n";

const BLOCK_TWO: &str = "猫\tネコ\t猫\t名詞-一般\n\
                         も\tモ\tも\t助詞-係助詞\n\
                         食べ\tタベ\t食べる\t動詞-自立\t一段\t連用形\n\
                         た\tタ\tた\t助動詞\t特殊・タ\t基本形\n\
                         。\t。\t。\t記号-句点\n\
                         EOS\n";

fn fixture_analyzer(dir: &TempDir) -> Analyzer<ScriptedBackend> {
    let xml = dir.path().join("JMdict.xml");
    fs::write(&xml, FIXTURE_XML).unwrap();
    let data_dir = dir.path().join("data");
    fs::create_dir(&data_dir).unwrap();
    let config = Config::new(xml, dir.path().join("neologd"), data_dir);

    let mut backend = ScriptedBackend::new();
    backend.insert(
        "食べ物",
        "食べ\tタベ\t食べる\t動詞-自立\t一段\t連用形\n物\tモノ\t物\t名詞-接尾-一般\nEOS\n",
    );
    backend.insert("たべもの", "たべもの\tタベモノ\tたべもの\t名詞-一般\nEOS\n");
    backend.insert("猫が食べ物を食べた。", BLOCK_ONE);
    backend.insert("猫も食べた。", BLOCK_TWO);
    Analyzer::load(&config, backend).unwrap()
}

#[test]
fn test_full_article_analysis() {
    let dir = TempDir::new().unwrap();
    let mut analyzer = fixture_analyzer(&dir);
    let article = Article::new("猫が食べ物を食べた。\n\n猫も食べた。");

    let found = analyzer.analyze(&article).unwrap();

    // no two findings share a base form
    let base_forms: Vec<_> = found.iter().map(|i| i.base_form.as_str()).collect();
    let unique: HashSet<_> = base_forms.iter().copied().collect();
    assert_eq!(base_forms.len(), unique.len());

    // symbols are gone
    assert!(!base_forms.contains(&"。"));

    // the repeated noun is merged across blocks
    let cat = found.iter().find(|i| i.base_form == "猫").unwrap();
    assert_eq!(
        cat.found_positions,
        vec![TextPosition::new(0, 1), TextPosition::new(12, 1)]
    );

    // the conjugated verb keeps its surfaces and document order
    let eat = found.iter().find(|i| i.base_form == "食べる").unwrap();
    assert_eq!(
        eat.found_positions,
        vec![
            TextPosition::new(2, 2),
            TextPosition::new(6, 2),
            TextPosition::new(14, 2)
        ]
    );
    assert_eq!(eat.first_surface_form(), "食べ");

    // the compound was recovered from the dictionary
    let compound = found.iter().find(|i| i.base_form == "食べ物").unwrap();
    assert_eq!(compound.found_positions, vec![TextPosition::new(2, 3)]);
    let sources: HashSet<_> = compound.possible_interps[0].sources.iter().copied().collect();
    assert_eq!(
        sources,
        HashSet::from([InterpSource::DictMorphDecomp, InterpSource::DictSurfaceForm])
    );

    // every reported position points at the surface it claims
    let chars: Vec<char> = article.full_text.chars().collect();
    for item in &found {
        for position in &item.found_positions {
            let substring: String = chars[position.start..position.start + position.length]
                .iter()
                .collect();
            assert_eq!(&substring, item.surface_form_at(position));
        }
    }
}

#[test]
fn test_analysis_is_idempotent_and_caches_the_dictionary() {
    let dir = TempDir::new().unwrap();
    let mut analyzer = fixture_analyzer(&dir);
    let article = Article::new("猫も食べた。");

    let first = analyzer.analyze(&article).unwrap();
    let second = analyzer.analyze(&article).unwrap();
    assert_eq!(first, second);

    // the loader left a dictionary cache behind
    let cache_files = fs::read_dir(dir.path().join("data")).unwrap().count();
    assert_eq!(cache_files, 1);
}

#[test]
fn test_separate_analyzers_agree() {
    let dir = TempDir::new().unwrap();
    let mut one = fixture_analyzer(&dir);
    let other_dir = TempDir::new().unwrap();
    let mut two = fixture_analyzer(&other_dir);
    let article = Article::new("猫が食べ物を食べた。");
    assert_eq!(
        one.analyze(&article).unwrap(),
        two.analyze(&article).unwrap()
    );
}

#[test]
fn test_reloading_from_cache_gives_equal_results() {
    let dir = TempDir::new().unwrap();
    let mut first = fixture_analyzer(&dir);
    let article = Article::new("猫が食べ物を食べた。\n猫も食べた。");
    let from_xml = first.analyze(&article).unwrap();

    // nudge the cache mtime past the XML's so the second load takes it
    let cache_path = fs::read_dir(dir.path().join("data"))
        .unwrap()
        .next()
        .unwrap()
        .unwrap()
        .path();
    fs::File::options()
        .write(true)
        .open(&cache_path)
        .unwrap()
        .set_modified(std::time::SystemTime::now() + std::time::Duration::from_secs(60))
        .unwrap();

    let config = Config::new(
        dir.path().join("JMdict.xml"),
        dir.path().join("neologd"),
        dir.path().join("data"),
    );
    let mut backend = ScriptedBackend::new();
    backend.insert("猫が食べ物を食べた。", BLOCK_ONE);
    backend.insert("猫も食べた。", BLOCK_TWO);
    let mut second = Analyzer::load(&config, backend).unwrap();
    assert_eq!(second.analyze(&article).unwrap(), from_xml);
}
