use itertools::Itertools;
use scraper::{ElementRef, Selector};

/// One direct child of an element, materialized so extractors can walk
/// sibling order with plain slices instead of re-traversing the tree.
#[derive(Debug, Clone, Copy)]
pub enum Child<'a> {
    Element(ElementRef<'a>),
    Text(&'a str),
}

impl<'a> Child<'a> {
    pub fn element(&self) -> Option<ElementRef<'a>> {
        match self {
            Child::Element(el) => Some(*el),
            Child::Text(_) => None,
        }
    }
}

/// Element and text children of `el`, in document order. Comments are dropped.
pub fn children(el: ElementRef<'_>) -> Vec<Child<'_>> {
    el.children()
        .filter_map(|node| match ElementRef::wrap(node) {
            Some(child) => Some(Child::Element(child)),
            None => node.value().as_text().map(|t| Child::Text(&**t)),
        })
        .collect()
}

/// Siblings after `el`, in document order.
pub fn following_siblings(el: ElementRef<'_>) -> Vec<Child<'_>> {
    el.next_siblings()
        .filter_map(|node| match ElementRef::wrap(node) {
            Some(sib) => Some(Child::Element(sib)),
            None => node.value().as_text().map(|t| Child::Text(&**t)),
        })
        .collect()
}

/// Descendant text, each piece trimmed, empties dropped, joined with `sep`.
pub fn text(el: ElementRef<'_>, sep: &str) -> String {
    el.text().map(str::trim).filter(|t| !t.is_empty()).join(sep)
}

pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

pub fn id(el: ElementRef<'_>) -> &str {
    el.value().id().unwrap_or("")
}

pub fn select_one<'a>(el: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    el.select(selector).next()
}
