use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use super::definitions::{citation, first_citation, grammar_text};
use super::links;
use crate::entry::{Detail, FixedExpression};
use crate::parser::dom::{self, Child};
use crate::parser::sections::{class, label, selector, SectionName};

static EXPRESSION_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^udtryk-\d+$").unwrap());
static ID_DIV: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div[id]").unwrap());
static MATCH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.match").unwrap());
static USAGE_TEXT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.tekstnormal").unwrap());

pub fn extract(block: Option<ElementRef<'_>>) -> Vec<FixedExpression> {
    let Some(block) = block else {
        return Vec::new();
    };

    block
        .select(&ID_DIV)
        .filter(|el| is_expression(*el))
        .filter_map(parse_expression)
        .collect()
}

fn is_expression(el: ElementRef<'_>) -> bool {
    el.value().name() == "div" && EXPRESSION_ID_RE.is_match(dom::id(el))
}

/// Walk the siblings after the expression container, collecting details
/// from every indent block until the next expression starts.
fn parse_expression(container: ElementRef<'_>) -> Option<FixedExpression> {
    let expression = dom::text(dom::select_one(container, &MATCH)?, "");
    let expr_id = dom::id(container);
    let mut details = Vec::new();

    for sib in dom::following_siblings(container).iter().filter_map(Child::element) {
        if is_expression(sib) {
            break;
        }
        if !dom::has_class(sib, class::INDENT) {
            continue;
        }
        for child in dom::children(sib).iter().filter_map(Child::element) {
            if child.value().name() == "div" && dom::has_class(child, class::BOX) {
                details.extend(classify(expr_id, child));
            }
        }
    }

    Some(FixedExpression { expression, details })
}

/// Decide the detail kind of one box. Boxes that match no convention, and
/// usage boxes without a payload, produce nothing.
fn classify(expr_id: &str, el: ElementRef<'_>) -> Option<Detail> {
    let box_id = dom::id(el);
    if !expr_id.is_empty() && box_id.starts_with(&format!("{}-betydning", expr_id)) {
        return Some(Detail::Definition {
            text: dom::text(el, " "),
        });
    }
    if dom::has_class(el, class::SYNONYMS) {
        return Some(Detail::SeeAlso {
            items: links::extract(el),
        });
    }
    if dom::has_class(el, class::RELATED) {
        return Some(Detail::Related {
            items: links::extract(el),
        });
    }
    if dom::has_class(el, class::GRAMMAR) {
        return Some(Detail::Grammar {
            text: grammar_text(el),
        });
    }

    let is_usage = dom::select_one(el, selector(SectionName::Label))
        .is_some_and(|st| dom::text(st, "") == label::USAGE);
    if is_usage {
        return dom::select_one(el, &USAGE_TEXT).map(|u| Detail::Usage {
            text: dom::text(u, ""),
        });
    }

    let example = citation(first_citation(el)?)?;
    Some(Detail::Example {
        text: example.text,
        source: example.source,
    })
}

// ── Tests ──
