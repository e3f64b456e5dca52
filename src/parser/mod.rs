pub mod dom;
pub mod extract;
pub mod sections;

use scraper::Html;

use crate::entry::Entry;
use crate::error::SkipReason;

/// One saved page → one entry, or the reason it has none.
pub fn parse_document(source: &str, html: &str) -> Result<Entry, SkipReason> {
    let doc = Html::parse_document(html);
    let sections = sections::locate(&doc).ok_or(SkipReason::MissingArticle)?;
    extract::extract_all(source, &sections)
}
