use rayon::prelude::*;

use crate::entry::Entry;
use crate::error::SkipReason;
use crate::parser;
use crate::source::Document;

pub struct Skipped {
    pub file: String,
    pub reason: SkipReason,
}

/// Everything a run produced, in input order.
#[derive(Default)]
pub struct BatchReport {
    pub entries: Vec<Entry>,
    pub skipped: Vec<Skipped>,
}

/// Parse documents in parallel. Results come back indexed by input
/// position, not completion order.
pub fn parse_documents(documents: &[Document]) -> Vec<Result<Entry, Skipped>> {
    documents
        .par_iter()
        .map(|doc| {
            parser::parse_document(&doc.name, &doc.content).map_err(|reason| Skipped {
                file: doc.name.clone(),
                reason,
            })
        })
        .collect()
}

impl BatchReport {
    pub fn absorb(&mut self, results: Vec<Result<Entry, Skipped>>) {
        for result in results {
            match result {
                Ok(entry) => self.entries.push(entry),
                Err(skipped) => self.skipped.push(skipped),
            }
        }
    }

    pub fn print(&self) {
        println!("Parsed {} entries.", self.entries.len());
        if !self.skipped.is_empty() {
            println!("Skipped {} files:", self.skipped.len());
            for s in &self.skipped {
                println!("  - {} ({})", s.file, s.reason);
            }
        }
    }
}

// ── Tests ──
