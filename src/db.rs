use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};

use crate::batch::Skipped;
use crate::entry::Entry;

pub fn connect(path: &Path) -> Result<Connection> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    }
    let conn = Connection::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS runs (
            run_id      TEXT PRIMARY KEY,
            started_at  TEXT NOT NULL,
            source_dir  TEXT NOT NULL,
            parsed      INTEGER NOT NULL DEFAULT 0,
            skipped     INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS entries (
            file          TEXT PRIMARY KEY,
            headword      TEXT NOT NULL,
            pos           TEXT,
            definitions   INTEGER NOT NULL,
            expressions   INTEGER NOT NULL,
            json          TEXT NOT NULL,
            run_id        TEXT NOT NULL REFERENCES runs(run_id),
            processed_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_entries_headword ON entries(headword);

        CREATE TABLE IF NOT EXISTS skipped (
            run_id  TEXT NOT NULL REFERENCES runs(run_id),
            file    TEXT NOT NULL,
            reason  TEXT NOT NULL,
            UNIQUE(run_id, file)
        );
        ",
    )?;
    Ok(())
}

// ── Runs ──

pub struct RunRow {
    pub run_id: String,
    pub started_at: String,
    pub source_dir: String,
    pub parsed: usize,
    pub skipped: usize,
}

pub fn insert_run(conn: &Connection, run: &RunRow) -> Result<()> {
    conn.execute(
        "INSERT INTO runs (run_id, started_at, source_dir, parsed, skipped) VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![run.run_id, run.started_at, run.source_dir, run.parsed, run.skipped],
    )?;
    Ok(())
}

pub fn finish_run(conn: &Connection, run_id: &str, parsed: usize, skipped: usize) -> Result<()> {
    conn.execute(
        "UPDATE runs SET parsed = ?2, skipped = ?3 WHERE run_id = ?1",
        rusqlite::params![run_id, parsed, skipped],
    )?;
    Ok(())
}

// ── Entries ──

pub fn save_entries(conn: &Connection, run_id: &str, entries: &[Entry]) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT OR REPLACE INTO entries (file, headword, pos, definitions, expressions, json, run_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        for e in entries {
            let json = serde_json::to_string(e)?;
            stmt.execute(rusqlite::params![
                e.file,
                e.headword,
                e.pos,
                e.definitions.len(),
                e.fixed_expressions.len(),
                json,
                run_id,
            ])?;
        }
    }
    tx.commit()?;
    Ok(())
}

pub fn save_skipped(conn: &Connection, run_id: &str, skipped: &[Skipped]) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt =
            tx.prepare("INSERT OR REPLACE INTO skipped (run_id, file, reason) VALUES (?1, ?2, ?3)")?;
        for s in skipped {
            stmt.execute(rusqlite::params![run_id, s.file, s.reason.to_string()])?;
        }
    }
    tx.commit()?;
    Ok(())
}

pub fn find_by_headword(conn: &Connection, headword: &str) -> Result<Vec<Entry>> {
    let mut stmt = conn.prepare("SELECT json FROM entries WHERE headword = ?1 ORDER BY file")?;
    let rows = stmt
        .query_map([headword], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    rows.iter()
        .map(|json| serde_json::from_str(json).context("Corrupt entry JSON"))
        .collect()
}

// ── Stats ──

pub struct Stats {
    pub entries: usize,
    pub headwords: usize,
    pub runs: usize,
    pub latest: Option<RunRow>,
    pub latest_skipped: Vec<(String, String)>,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let count = |sql: &str| -> Result<usize> {
        Ok(conn.query_row(sql, [], |row| row.get::<_, i64>(0))? as usize)
    };
    let entries = count("SELECT COUNT(*) FROM entries")?;
    let headwords = count("SELECT COUNT(DISTINCT headword) FROM entries")?;
    let runs = count("SELECT COUNT(*) FROM runs")?;

    let latest = conn
        .query_row(
            "SELECT run_id, started_at, source_dir, parsed, skipped FROM runs
             ORDER BY started_at DESC, run_id DESC LIMIT 1",
            [],
            |row| {
                Ok(RunRow {
                    run_id: row.get(0)?,
                    started_at: row.get(1)?,
                    source_dir: row.get(2)?,
                    parsed: row.get::<_, i64>(3)? as usize,
                    skipped: row.get::<_, i64>(4)? as usize,
                })
            },
        )
        .optional()?;

    let latest_skipped = match &latest {
        Some(run) => {
            let mut stmt = conn.prepare("SELECT file, reason FROM skipped WHERE run_id = ?1 ORDER BY file")?;
            let rows = stmt.query_map([&run.run_id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?;
            rows.collect::<Result<Vec<_>, _>>()?
        }
        None => Vec::new(),
    };

    Ok(Stats {
        entries,
        headwords,
        runs,
        latest,
        latest_skipped,
    })
}

// ── Tests ──
