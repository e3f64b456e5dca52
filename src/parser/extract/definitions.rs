use std::sync::LazyLock;

use scraper::{ElementRef, Selector};
use tracing::{debug, warn};

use super::links;
use crate::entry::{Definition, Example};
use crate::parser::dom;
use crate::parser::sections::class;

static NUMBER: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.definitionNumber").unwrap());
static DEFINITION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"div.definitionBox[id^="betydning-"] span.definition"#).unwrap());
static GRAMMAR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.definitionBox.grammatik").unwrap());
static SYNONYMS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.definitionBox.onym").unwrap());
static RELATED: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.definitionBox.rel-begreber").unwrap());
static CITATION_BOX: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.citat-box").unwrap());
static CITATION: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.citat").unwrap());
static CITATION_SOURCE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.kilde").unwrap());
static INLINE_LIST: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.inlineList").unwrap());

/// Senses of the definitions block, in document order.
pub fn extract(source: &str, block: Option<ElementRef<'_>>) -> Vec<Definition> {
    let Some(block) = block else {
        return Vec::new();
    };
    let (definitions, missing) = collect(block);
    for number in &missing {
        warn!("{}: no indent block for sense {}, dropped", source, number);
    }
    definitions
}

/// Returns the parsed senses and the numbers of senses dropped for lack of
/// an indent block.
pub fn collect(block: ElementRef<'_>) -> (Vec<Definition>, Vec<String>) {
    let mut definitions = Vec::new();
    let mut missing = Vec::new();

    for marker in block.select(&NUMBER) {
        let number = dom::text(marker, "");
        match find_indent(marker) {
            Some(indent) => definitions.push(parse_indent(number, indent)),
            None => missing.push(number),
        }
    }

    (definitions, missing)
}

/// The indent block owned by a number marker: the first following sibling
/// carrying the indent class, searched up to the next number marker.
fn find_indent(marker: ElementRef<'_>) -> Option<ElementRef<'_>> {
    for sib in dom::following_siblings(marker).into_iter().filter_map(|c| c.element()) {
        if dom::has_class(sib, class::INDENT) {
            return Some(sib);
        }
        if dom::has_class(sib, class::DEFINITION_NUMBER) {
            return None;
        }
    }
    None
}

fn parse_indent(number: String, indent: ElementRef<'_>) -> Definition {
    Definition {
        number,
        definition: dom::select_one(indent, &DEFINITION).map(|el| dom::text(el, " ")),
        grammar: dom::select_one(indent, &GRAMMAR).map(grammar_text),
        see_also: dom::select_one(indent, &SYNONYMS).map(links::extract),
        related: dom::select_one(indent, &RELATED).map(links::extract),
        examples: indent.select(&CITATION_BOX).filter_map(citation).collect(),
    }
}

/// Grammar note: the inline list when present, else the whole box.
pub(super) fn grammar_text(el: ElementRef<'_>) -> String {
    let target = dom::select_one(el, &INLINE_LIST).unwrap_or(el);
    dom::text(target, " ")
}

pub(super) fn citation(cite: ElementRef<'_>) -> Option<Example> {
    let Some(text) = dom::select_one(cite, &CITATION) else {
        debug!("citation box without quote text");
        return None;
    };
    Some(Example {
        text: dom::text(text, " "),
        source: dom::select_one(cite, &CITATION_SOURCE).map(|el| dom::text(el, "")),
    })
}

/// First citation box under `el`.
pub(super) fn first_citation(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    dom::select_one(el, &CITATION_BOX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn block(doc: &Html) -> ElementRef<'_> {
        doc.select(&Selector::parse("#content-betydninger").unwrap()).next().unwrap()
    }

    #[test]
    fn sense_without_indent_is_dropped() {
        let doc = Html::parse_document(
            "<div id='content-betydninger'>\
             <div class='definitionNumber'>1</div>\
             <div class='definitionIndent'><div class='definitionBox' id='betydning-1'>\
             <span class='definition'>bygning til beboelse</span></div></div>\
             <div class='definitionNumber'>2</div>\
             </div>",
        );
        let (defs, missing) = collect(block(&doc));
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].number, "1");
        assert_eq!(missing, vec!["2"]);
        assert_eq!(extract("hus.html", Some(block(&doc))).len(), 1);
    }

    #[test]
    fn indent_search_stops_at_next_marker() {
        let doc = Html::parse_document(
            "<div id='content-betydninger'>\
             <div class='definitionNumber'>1</div>\
             <div class='definitionNumber'>2</div>\
             <div class='definitionIndent'><div class='definitionBox' id='betydning-2'>\
             <span class='definition'>husstand</span></div></div>\
             </div>",
        );
        let (defs, missing) = collect(block(&doc));
        assert_eq!(missing, vec!["1"]);
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].number, "2");
        assert_eq!(defs[0].definition.as_deref(), Some("husstand"));
    }

    #[test]
    fn full_sense() {
        let doc = Html::parse_document(
            "<div id='content-betydninger'>\
             <div class='definitionNumber'>1.a</div> <span class='diskret'>x</span>\
             <div class='definitionIndent'>\
               <div class='definitionBox' id='betydning-1-1'><span class='definition'>bygning  <i>til</i> beboelse</span></div>\
               <div class='definitionBox grammatik'><span class='stempel'>Grammatik</span> <span class='inlineList'>især i bestemt form</span></div>\
               <div class='definitionBox onym'><span class='stempel'>Synonym</span> <a href='#'>bolig2</a></div>\
               <div class='definitionBox rel-begreber'><span class='inlineList'><a>bygning1</a> <a>...vis mere</a></span></div>\
               <div class='definitionBox'>\
                 <div class='citat-box'><span class='citat'>et lille hus</span> <span class='kilde'>Politiken 2001</span></div>\
                 <div class='citat-box'><span class='citat'>huset var rødt</span></div>\
                 <div class='citat-box'><span class='kilde'>uden citat</span></div>\
               </div>\
             </div></div>",
        );
        let (defs, _) = collect(block(&doc));
        let d = &defs[0];
        assert_eq!(d.number, "1.a");
        assert_eq!(d.definition.as_deref(), Some("bygning til beboelse"));
        assert_eq!(d.grammar.as_deref(), Some("især i bestemt form"));
        assert_eq!(d.see_also, Some(vec!["bolig".to_string()]));
        assert_eq!(d.related, Some(vec!["bygning".to_string()]));
        assert_eq!(
            d.examples,
            vec![
                Example { text: "et lille hus".into(), source: Some("Politiken 2001".into()) },
                Example { text: "huset var rødt".into(), source: None },
            ]
        );
    }

    #[test]
    fn grammar_falls_back_to_box_text() {
        let doc = Html::parse_document(
            "<div class='definitionBox grammatik' id='g'><span class='stempel'>Grammatik</span> <span>ofte i flertal</span></div>",
        );
        let el = doc.select(&Selector::parse("#g").unwrap()).next().unwrap();
        assert_eq!(grammar_text(el), "Grammatik ofte i flertal");
    }

    #[test]
    fn absent_block_has_no_senses() {
        assert!(extract("hus.html", None).is_empty());
    }
}
