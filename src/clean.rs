//! `geocmp clean`: removes pages left in the temp dir by `--open-browser`.

use crate::messages;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const TEMP_FILE_PREFIX: &str = "geocmp_";
pub const TEMP_FILE_SUFFIX: &str = ".html";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CleanSummary {
    pub found: usize,
    pub deleted: usize,
    pub freed: u64,
}

pub fn is_temp_page(name: &str) -> bool {
    name.len() >= TEMP_FILE_PREFIX.len() + TEMP_FILE_SUFFIX.len()
        && name.starts_with(TEMP_FILE_PREFIX)
        && name.ends_with(TEMP_FILE_SUFFIX)
}

/// Temp pages in `dir` with their sizes, sorted by name.
pub fn find_temp_pages(dir: &Path) -> Result<Vec<(PathBuf, u64)>> {
    let mut found = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))? {
        let entry = entry?;
        let name = entry.file_name();
        if !is_temp_page(&name.to_string_lossy()) {
            continue;
        }
        let meta = entry.metadata()?;
        if meta.is_file() {
            found.push((entry.path(), meta.len()));
        }
    }
    found.sort();
    Ok(found)
}

pub fn run_clean(dir: &Path, dry_run: bool, out: &mut impl Write) -> Result<CleanSummary> {
    let pages = find_temp_pages(dir)?;
    let mut summary = CleanSummary { found: pages.len(), ..CleanSummary::default() };
    if pages.is_empty() {
        writeln!(out, "{}", messages::NO_TEMP_FILES)?;
        return Ok(summary);
    }

    writeln!(out, "{}", messages::found_temp_files(pages.len()))?;
    for (path, size) in &pages {
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        writeln!(out, "{}", messages::temp_file_entry(&name, &group_thousands(*size)))?;
    }
    if dry_run {
        writeln!(out, "{}", messages::DRY_RUN)?;
        return Ok(summary);
    }

    for (path, size) in pages {
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "deleted");
                summary.deleted += 1;
                summary.freed += size;
            }
            Err(e) => warn!("failed to delete {}: {}", path.display(), e),
        }
    }
    writeln!(out, "{}", messages::deleted_temp_files(summary.deleted, &group_thousands(summary.freed)))?;
    Ok(summary)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
