/// Why a page produced no entry. Kept next to the file name in the run report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("no article container")]
    MissingArticle,
    #[error("no headword banner")]
    MissingBanner,
    #[error("headword empty after stripping index digits")]
    EmptyHeadword,
}
