pub mod definitions;
pub mod etymology;
pub mod expressions;
pub mod headword;
pub mod links;
pub mod pronunciation;
pub mod word_formation;
pub mod wordforms;

use std::collections::BTreeMap;

use super::sections::Sections;
use crate::entry::Entry;
use crate::error::SkipReason;

/// Run every field extractor over one located page. The headword is the only
/// hard requirement; every other field degrades to its empty value.
pub fn extract_all(source: &str, sections: &Sections) -> Result<Entry, SkipReason> {
    let head = headword::extract(sections)?;

    let forms = wordforms::extract(sections.word_forms_label, &head.raw);
    let word_forms = wordforms::expand_suffixes(&head.headword, forms);

    Ok(Entry {
        file: source.to_string(),
        headword: head.headword,
        pos: head.pos,
        pronunciations: pronunciation::extract(source, sections.pronunciation),
        word_forms,
        etymology: etymology::extract(sections.etymology_label),
        definitions: definitions::extract(source, sections.definitions),
        fixed_expressions: expressions::extract(sections.fixed_expressions),
        word_formation: word_formation::extract(sections.word_formation),
        extra: BTreeMap::new(),
    })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use crate::entry::{Detail, Etymology, EtymologySegment, Example, Pronunciation};
    use crate::error::SkipReason;
    use crate::parser::parse_document;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
    }

    #[test]
    fn hus_headword_and_forms() {
        let e = parse_document("hus1.html", &fixture("hus")).unwrap();
        assert_eq!(e.file, "hus1.html");
        assert_eq!(e.headword, "hus");
        assert_eq!(e.pos.as_deref(), Some("substantiv, intetkøn"));
        assert_eq!(e.word_forms, vec!["huset", "huse", "husene"]);
    }

    #[test]
    fn hus_pronunciations() {
        let e = parse_document("hus1.html", &fixture("hus")).unwrap();
        assert_eq!(
            e.pronunciations,
            vec![
                Pronunciation {
                    ipa: "[ˈhuˀs]".into(),
                    audio: Some("https://static.ordnet.dk/mp3/11021/11021784_1.mp3".into()),
                    label: None,
                },
                Pronunciation {
                    ipa: "[ˈhus-]".into(),
                    audio: Some("https://static.ordnet.dk/mp3/11021/11021784_2.mp3".into()),
                    label: Some("i sammensætning".into()),
                },
            ]
        );
    }

    #[test]
    fn hus_etymology() {
        let e = parse_document("hus1.html", &fixture("hus")).unwrap();
        assert_eq!(
            e.etymology,
            Some(Etymology {
                raw: "norrønt hús · gammelengelsk hus".into(),
                segments: vec![
                    EtymologySegment { form: "hús".into(), description: "norrønt".into() },
                    EtymologySegment { form: "hus".into(), description: "gammelengelsk".into() },
                ],
            })
        );
    }

    #[test]
    fn hus_definitions() {
        let e = parse_document("hus1.html", &fixture("hus")).unwrap();
        assert_eq!(e.definitions.len(), 2);

        let first = &e.definitions[0];
        assert_eq!(first.number, "1");
        assert_eq!(first.definition.as_deref(), Some("bygning der er indrettet til beboelse"));
        assert_eq!(first.grammar.as_deref(), Some("især i bestemt form"));
        assert_eq!(first.see_also, Some(vec!["bolig".to_string()]));
        assert_eq!(first.related, Some(vec!["bygning".to_string(), "hjem".to_string()]));
        assert_eq!(
            first.examples,
            vec![
                Example {
                    text: "de boede i et lille hus ved skoven".into(),
                    source: Some("Politiken 2001".into()),
                },
                Example { text: "huset var malet rødt".into(), source: None },
            ]
        );

        let second = &e.definitions[1];
        assert_eq!(second.number, "2");
        assert_eq!(second.definition.as_deref(), Some("husstand; familie"));
        assert_eq!(second.grammar, None);
        assert_eq!(second.see_also, None);
        assert_eq!(second.related, None);
        assert!(second.examples.is_empty());
    }

    #[test]
    fn hus_fixed_expressions() {
        let e = parse_document("hus1.html", &fixture("hus")).unwrap();
        let names: Vec<_> = e.fixed_expressions.iter().map(|x| x.expression.as_str()).collect();
        assert_eq!(names, vec!["holde hus", "gå hus forbi"]);
        assert_eq!(
            e.fixed_expressions[0].details,
            vec![
                Detail::Definition { text: "husholde; spare".into() },
                Detail::Usage { text: "talesprog".into() },
                Detail::Grammar { text: "holde hus med".into() },
                Detail::SeeAlso { items: vec!["spare".into()] },
                Detail::Example { text: "hun holdt hus med pengene".into(), source: None },
            ]
        );
        assert_eq!(
            e.fixed_expressions[1].details,
            vec![
                Detail::Definition { text: "ikke blive lagt mærke til".into() },
                Detail::Related { items: vec!["overse".into()] },
            ]
        );
    }

    #[test]
    fn hus_word_formation() {
        let e = parse_document("hus1.html", &fixture("hus")).unwrap();
        assert_eq!(e.word_formation.len(), 2);
        assert_eq!(
            e.word_formation["Sammensætninger"],
            vec!["husdyr", "husleje (kun ental)", "hustru"]
        );
        assert_eq!(e.word_formation["Afledninger"], vec!["huslig"]);
    }

    #[test]
    fn sparse_page_keeps_uniform_shape() {
        let e = parse_document("og.html", &fixture("og")).unwrap();
        assert_eq!(e.headword, "og");
        assert_eq!(e.pos.as_deref(), Some("konjunktion"));
        assert!(e.pronunciations.is_empty());
        assert!(e.word_forms.is_empty());
        assert!(e.etymology.is_none());
        assert!(e.fixed_expressions.is_empty());
        assert!(e.word_formation.is_empty());
        assert_eq!(e.definitions.len(), 1);

        let value = serde_json::to_value(&e).unwrap();
        for key in ["udtale", "wordforms", "etymology", "definitions", "fixed_expressions", "orddannelser"] {
            assert!(value.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(value["orddannelser"], serde_json::json!({}));
    }

    #[test]
    fn search_page_is_skipped() {
        let r = parse_document("hus.html", &fixture("search_results"));
        assert_eq!(r.err(), Some(SkipReason::MissingArticle));
    }
}
