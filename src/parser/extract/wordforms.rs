use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

use crate::parser::dom;
use crate::parser::sections::next_sibling_where;

static SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-[A-Za-zæøåÆØÅ]{1,6}$").unwrap());

/// Comma-separated forms next to the inflection label, minus the banner text itself.
pub fn extract(label: Option<ElementRef<'_>>, raw_headword: &str) -> Vec<String> {
    let Some(label) = label else {
        return Vec::new();
    };
    let text = next_sibling_where(label, |el| el.value().name() == "span")
        .map(|el| dom::text(el, ""))
        .unwrap_or_default();

    text.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty() && *f != raw_headword)
        .map(str::to_string)
        .collect()
}

/// Rewrite bare suffixes against the headword: `-et` → `huset`.
///
/// Plain concatenation; stem changes (`-ne` after a dropped vowel, doubled
/// consonants) are not modelled, so irregular forms come out wrong.
pub fn expand_suffixes(headword: &str, forms: Vec<String>) -> Vec<String> {
    forms
        .into_iter()
        .map(|f| {
            if SUFFIX_RE.is_match(&f) {
                format!("{}{}", headword, &f[1..])
            } else {
                f
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::sections::locate;
    use scraper::Html;

    fn forms(html: &str, raw: &str) -> Vec<String> {
        let doc = Html::parse_document(html);
        let s = locate(&doc).unwrap();
        extract(s.word_forms_label, raw)
    }

    #[test]
    fn expands_hyphen_suffixes() {
        let out = expand_suffixes("hus", vec!["-et".into(), "-ene".into()]);
        assert_eq!(out, vec!["huset", "husene"]);
    }

    #[test]
    fn leaves_other_forms_alone() {
        let out = expand_suffixes(
            "gå",
            vec!["gik".into(), "-r".into(), "-ået".into(), "-abcdefg".into(), "- et".into()],
        );
        assert_eq!(out, vec!["gik", "går", "gåået", "-abcdefg", "- et"]);
    }

    #[test]
    fn splits_and_drops_headword() {
        let out = forms(
            "<div class='artikel'><div class='definitionBox'>\
             <span class='stempel'>Bøjning</span> <span class='tekstmedium'>hus1, -et, huse,, -ene</span>\
             </div></div>",
            "hus1",
        );
        assert_eq!(out, vec!["-et", "huse", "-ene"]);
    }

    #[test]
    fn no_label_no_forms() {
        let out = forms("<div class='artikel'><span class='stempel'>Udtale</span></div>", "hus");
        assert!(out.is_empty());
    }
}
