use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::parser::dom;

static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());
static DIGITS_TRAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+$").unwrap());

/// Navigation and footer link texts that are not cross-references.
const BOILERPLATE: &[&str] = &[
    "...vis mere",
    "...vis mindre",
    "Læs mere om Den Danske Begrebsordbog",
];

/// Cross-reference words under `el`, cleaned.
pub fn extract(el: ElementRef<'_>) -> Vec<String> {
    clean(el.select(&ANCHOR).map(|a| dom::text(a, "")))
}

/// Drop boilerplate, strip homograph digits, drop what is left empty.
pub fn clean<I, S>(texts: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    texts
        .into_iter()
        .filter(|t| !BOILERPLATE.contains(&t.as_ref()))
        .map(|t| DIGITS_TRAIL_RE.replace(t.as_ref(), "").into_owned())
        .filter(|t| !t.is_empty())
        .collect()
}
