//! Pattern expansion for the command line.
//!
//! An existing file is taken as is. Anything else is matched recursively
//! under the base directory: each `/`-separated component of the pattern may
//! use `*` and `?`, and the components are matched against the trailing
//! components of every file path found.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub fn expand_globs<S: AsRef<str>>(patterns: &[S], base: &Path) -> Vec<PathBuf> {
    let mut found = BTreeSet::new();
    for pattern in patterns {
        found.extend(expand_glob(pattern.as_ref(), base));
    }
    found.into_iter().collect()
}

pub fn expand_glob(pattern: &str, base: &Path) -> Vec<PathBuf> {
    let direct = base.join(pattern);
    if !has_wildcards(pattern) && direct.is_file() {
        return vec![resolve(&direct)];
    }
    let parts: Vec<&str> = pattern.split(['/', '\\']).filter(|c| !c.is_empty() && *c != ".").collect();
    if parts.is_empty() {
        return Vec::new();
    }
    let mut files = Vec::new();
    walk(base, &mut files);
    files.into_iter().filter(|f| matches_tail(&parts, f)).map(|f| resolve(&f)).collect()
}

pub fn has_wildcards(pattern: &str) -> bool {
    pattern.contains(['*', '?'])
}

/// `*` matches any run of characters, `?` exactly one.
pub fn wildcard_match(pattern: &str, name: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let n: Vec<char> = name.chars().collect();
    let (mut pi, mut ni) = (0, 0);
    let mut star: Option<(usize, usize)> = None;
    while ni < n.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == n[ni]) {
            pi += 1;
            ni += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some((pi, ni));
            pi += 1;
        } else if let Some((sp, sn)) = star {
            pi = sp + 1;
            ni = sn + 1;
            star = Some((sp, sn + 1));
        } else {
            return false;
        }
    }
    p[pi..].iter().all(|c| *c == '*')
}

fn matches_tail(parts: &[&str], file: &Path) -> bool {
    let comps: Vec<String> = file.components().map(|c| c.as_os_str().to_string_lossy().into_owned()).collect();
    if comps.len() < parts.len() {
        return false;
    }
    let tail = &comps[comps.len() - parts.len()..];
    parts.iter().zip(tail).all(|(p, c)| wildcard_match(p, c))
}

// Symlinked directories are not followed.
fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            warn!("cannot list {}: {}", dir.display(), e);
            return;
        }
    };
    for entry in entries.flatten() {
        let path = entry.path();
        match entry.file_type() {
            Ok(t) if t.is_dir() => walk(&path, out),
            Ok(_) if path.is_file() => out.push(path),
            _ => {}
        }
    }
}

fn resolve(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
