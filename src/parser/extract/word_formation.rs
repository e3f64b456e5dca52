use std::collections::BTreeMap;
use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use crate::parser::dom::{self, Child};
use crate::parser::sections::{selector, SectionName};

static BOX: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.definitionBox").unwrap());
static INLINE_LIST: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.inlineList").unwrap());

/// Category label → combined forms. An absent block is an empty map.
pub fn extract(block: Option<ElementRef<'_>>) -> BTreeMap<String, Vec<String>> {
    let mut out = BTreeMap::new();
    let Some(block) = block else {
        return out;
    };

    for family in block.select(&BOX) {
        let Some(category) = dom::select_one(family, selector(SectionName::Label)) else {
            continue;
        };
        let forms = dom::select_one(family, &INLINE_LIST)
            .map(|list| combined_forms(&dom::children(list)))
            .unwrap_or_default();
        out.insert(dom::text(category, ""), forms);
    }

    out
}

/// Each link's text joined with the plain text run right after it,
/// e.g. `husleje` + ` (kun ental)`.
fn combined_forms(children: &[Child<'_>]) -> Vec<String> {
    let mut out = Vec::new();

    for (i, child) in children.iter().enumerate() {
        let Some(link) = child.element().filter(|el| el.value().name() == "a") else {
            continue;
        };
        let form = dom::text(link, "");
        let tail: String = children[i + 1..]
            .iter()
            .map_while(|c| match c {
                Child::Text(t) => Some(*t),
                Child::Element(_) => None,
            })
            .collect();
        let tail = tail.trim();
        if tail.is_empty() {
            out.push(form);
        } else {
            out.push(format!("{} {}", form, tail));
        }
    }

    out
}
