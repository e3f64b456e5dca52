use scraper::ElementRef;

use crate::entry::{Etymology, EtymologySegment};
use crate::parser::dom::{self, Child};
use crate::parser::sections::{class, next_sibling_where};

pub fn extract(label: Option<ElementRef<'_>>) -> Option<Etymology> {
    let body = next_sibling_where(label?, |el| {
        el.value().name() == "span" && dom::has_class(el, class::TEXT_MEDIUM)
    })?;

    Some(Etymology {
        raw: dom::text(body, " "),
        segments: segments(&dom::children(body)),
    })
}

/// Split the origin text at each cited form. Text after the last form is not
/// attached to anything and is discarded.
pub fn segments(children: &[Child<'_>]) -> Vec<EtymologySegment> {
    let mut out = Vec::new();
    let mut desc = String::new();

    for child in children {
        match child {
            Child::Text(t) => desc.push_str(t),
            Child::Element(el) if is_form(*el) => {
                out.push(EtymologySegment {
                    form: dom::text(*el, ""),
                    description: desc.trim_matches(|c: char| c == ' ' || c == ',').to_string(),
                });
                desc.clear();
            }
            Child::Element(el) if dom::has_class(*el, class::DIVIDER) => {}
            Child::Element(el) => desc.push_str(&dom::text(*el, "")),
        }
    }

    out
}

fn is_form(el: ElementRef<'_>) -> bool {
    match el.value().name() {
        "a" => true,
        "span" => dom::has_class(el, class::FORM),
        _ => false,
    }
}
