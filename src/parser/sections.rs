use std::collections::HashMap;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::dom;

/// Named places in an article page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionName {
    Article,
    Banner,
    PartOfSpeech,
    Pronunciation,
    Definitions,
    FixedExpressions,
    WordFormation,
    Label,
}

/// Where each section lives in the page markup. Every other module asks for
/// sections by name; this is the only place the outer selectors are spelled.
const CAPABILITIES: &[(SectionName, &str)] = &[
    (SectionName::Article, "div.artikel"),
    (SectionName::Banner, "div.definitionBoxTop span.match"),
    (SectionName::PartOfSpeech, "div.definitionBoxTop span.tekstmedium"),
    (SectionName::Pronunciation, "div#id-udt"),
    (SectionName::Definitions, "#content-betydninger"),
    (SectionName::FixedExpressions, "#content-faste-udtryk"),
    (SectionName::WordFormation, "#content-orddannelser"),
    (SectionName::Label, "span.stempel"),
];

/// Inner markup conventions shared by the field extractors.
pub mod class {
    pub const TRANSCRIPTION: &str = "lydskrift";
    pub const DISCRETE_LABEL: &str = "diskret";
    pub const TEXT_MEDIUM: &str = "tekstmedium";
    pub const DEFINITION_NUMBER: &str = "definitionNumber";
    pub const INDENT: &str = "definitionIndent";
    pub const BOX: &str = "definitionBox";
    pub const SYNONYMS: &str = "onym";
    pub const RELATED: &str = "rel-begreber";
    pub const GRAMMAR: &str = "grammatik";
    pub const FORM: &str = "ordform";
    pub const DIVIDER: &str = "dividerDot";
}

/// Label texts of `span.stempel` headers.
pub mod label {
    pub const INFLECTION: &str = "Bøjning";
    pub const ORIGIN: &str = "Oprindelse";
    pub const USAGE: &str = "SPROGBRUG";
}

static SELECTORS: LazyLock<HashMap<SectionName, Selector>> = LazyLock::new(|| {
    CAPABILITIES
        .iter()
        .map(|(name, css)| (*name, Selector::parse(css).unwrap()))
        .collect()
});

pub fn selector(name: SectionName) -> &'static Selector {
    &SELECTORS[&name]
}

/// Handles to the parts of one page. Only `article` is required; every other
/// lookup may fail without invalidating the page.
#[derive(Debug, Clone, Copy)]
pub struct Sections<'a> {
    pub article: ElementRef<'a>,
    pub banner: Option<ElementRef<'a>>,
    pub part_of_speech: Option<ElementRef<'a>>,
    pub pronunciation: Option<ElementRef<'a>>,
    pub definitions: Option<ElementRef<'a>>,
    pub fixed_expressions: Option<ElementRef<'a>>,
    pub word_formation: Option<ElementRef<'a>>,
    pub etymology_label: Option<ElementRef<'a>>,
    pub word_forms_label: Option<ElementRef<'a>>,
}

/// Find the article root and its subsections. `None` means the page is not
/// an article.
pub fn locate(doc: &Html) -> Option<Sections<'_>> {
    let article = doc.select(selector(SectionName::Article)).next()?;
    let find = |name| dom::select_one(article, selector(name));

    Some(Sections {
        article,
        banner: find(SectionName::Banner),
        part_of_speech: find(SectionName::PartOfSpeech),
        pronunciation: find(SectionName::Pronunciation),
        definitions: find(SectionName::Definitions),
        fixed_expressions: find(SectionName::FixedExpressions),
        word_formation: find(SectionName::WordFormation),
        etymology_label: find_label(article, label::ORIGIN),
        word_forms_label: find_label(article, label::INFLECTION),
    })
}

/// First `span.stempel` whose text is exactly `text`.
fn find_label<'a>(article: ElementRef<'a>, text: &str) -> Option<ElementRef<'a>> {
    article
        .select(selector(SectionName::Label))
        .find(|el| dom::text(*el, "") == text)
}

/// First following sibling element that satisfies `pred`.
pub fn next_sibling_where<'a>(
    el: ElementRef<'a>,
    pred: impl Fn(ElementRef<'a>) -> bool,
) -> Option<ElementRef<'a>> {
    dom::following_siblings(el)
        .into_iter()
        .filter_map(|c| c.element())
        .find(|sib| pred(*sib))
}

// ── Tests ──
