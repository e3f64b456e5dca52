use std::sync::LazyLock;

use scraper::{ElementRef, Selector};
use tracing::debug;

use crate::entry::Pronunciation;
use crate::parser::dom::{self, Child};
use crate::parser::sections::class;

static TEXT_MEDIUM: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.tekstmedium").unwrap());
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

const AUDIO_EXTENSIONS: &[&str] = &[".mp3"];

/// Label association over the ordered child list.
enum LabelState {
    NoPending,
    Pending(String),
}

impl LabelState {
    fn see_label(&mut self, text: String) {
        *self = LabelState::Pending(text);
    }

    /// A transcription consumes the pending label, if any.
    fn see_transcription(&mut self) -> Option<String> {
        match std::mem::replace(self, LabelState::NoPending) {
            LabelState::Pending(text) => Some(text),
            LabelState::NoPending => None,
        }
    }
}

pub fn extract(source: &str, block: Option<ElementRef<'_>>) -> Vec<Pronunciation> {
    let Some(block) = block else {
        debug!("{}: no pronunciation block", source);
        return Vec::new();
    };
    match dom::select_one(block, &TEXT_MEDIUM) {
        Some(body) => from_children(&dom::children(body)),
        None => Vec::new(),
    }
}

/// Single forward pass: a discrete label attaches to the next transcription
/// and never crosses a second one. A trailing label with nothing after it is
/// dropped.
pub fn from_children(children: &[Child<'_>]) -> Vec<Pronunciation> {
    let mut out = Vec::new();
    let mut state = LabelState::NoPending;

    for el in children.iter().filter_map(Child::element) {
        if dom::has_class(el, class::DISCRETE_LABEL) {
            state.see_label(dom::text(el, " "));
        } else if dom::has_class(el, class::TRANSCRIPTION) {
            out.push(Pronunciation {
                ipa: dom::text(el, " "),
                audio: audio_link(el),
                label: state.see_transcription(),
            });
        }
    }

    out
}

fn audio_link(el: ElementRef<'_>) -> Option<String> {
    el.select(&ANCHOR)
        .filter_map(|a| a.value().attr("href"))
        .find(|href| AUDIO_EXTENSIONS.iter().any(|ext| href.ends_with(ext)))
        .map(str::to_string)
}
