use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// A saved page, already read into memory.
pub struct Document {
    pub name: String,
    pub content: String,
}

/// Read every `*.html` file in `dir`, sorted by file name.
pub fn load_documents(dir: &Path, limit: Option<usize>) -> Result<Vec<Document>> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .with_context(|| format!("Failed to list {:?}", dir))?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| name.ends_with(".html"))
        .collect();
    names.sort();
    if let Some(n) = limit {
        names.truncate(n);
    }

    names
        .into_iter()
        .map(|name| {
            let path = dir.join(&name);
            let content =
                fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))?;
            Ok(Document { name, content })
        })
        .collect()
}
