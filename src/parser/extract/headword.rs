use std::sync::LazyLock;

use regex::Regex;

use crate::error::SkipReason;
use crate::parser::dom;
use crate::parser::sections::Sections;

static DIGITS_TRAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+$").unwrap());

pub struct Headword {
    /// Banner text as printed, e.g. `hus3`.
    pub raw: String,
    /// Banner text without the homograph index, e.g. `hus`.
    pub headword: String,
    pub pos: Option<String>,
}

pub fn extract(sections: &Sections) -> Result<Headword, SkipReason> {
    let banner = sections.banner.ok_or(SkipReason::MissingBanner)?;
    let raw = dom::text(banner, "");
    let headword = strip_index(&raw);
    if headword.is_empty() {
        return Err(SkipReason::EmptyHeadword);
    }

    let pos = sections
        .part_of_speech
        .map(|el| dom::text(el, ""))
        .filter(|p| !p.is_empty());

    Ok(Headword { raw, headword, pos })
}

/// Drop a trailing run of digits: `hus3` → `hus`.
pub fn strip_index(raw: &str) -> String {
    DIGITS_TRAIL_RE.replace(raw.trim(), "").trim().to_string()
}
