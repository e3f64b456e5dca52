use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One normalized lexical record built from one saved article page.
///
/// Keys are serialized under the names the downstream tools read (`udtale`,
/// `orddannelser`, ...). Optional fields serialize as `null` and collections
/// as empty values, so every entry has the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub file: String,
    pub headword: String,
    pub pos: Option<String>,
    #[serde(rename = "udtale")]
    pub pronunciations: Vec<Pronunciation>,
    #[serde(rename = "wordforms")]
    pub word_forms: Vec<String>,
    pub etymology: Option<Etymology>,
    pub definitions: Vec<Definition>,
    pub fixed_expressions: Vec<FixedExpression>,
    #[serde(rename = "orddannelser")]
    pub word_formation: BTreeMap<String, Vec<String>>,
    /// Keys added by later stages (frequency rank, translations). Kept
    /// verbatim so enriched files survive a read/write cycle.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pronunciation {
    pub ipa: String,
    pub audio: Option<String>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Etymology {
    pub raw: String,
    pub segments: Vec<EtymologySegment>,
}

/// A cited form and the text that introduced it, e.g. `norrønt` → `hús`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EtymologySegment {
    pub form: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub number: String,
    pub definition: Option<String>,
    pub grammar: Option<String>,
    pub see_also: Option<Vec<String>>,
    pub related: Option<Vec<String>>,
    pub examples: Vec<Example>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub text: String,
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedExpression {
    pub expression: String,
    pub details: Vec<Detail>,
}

/// One documented unit under a fixed expression. The tag is decided once,
/// when the markup box is classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Detail {
    Definition { text: String },
    SeeAlso { items: Vec<String> },
    Related { items: Vec<String> },
    Grammar { text: String },
    Usage { text: String },
    Example { text: String, source: Option<String> },
}

// ── Tests ──
