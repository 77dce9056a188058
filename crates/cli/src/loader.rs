//! Per-system crontab directory loader.
//!
//! Scans a directory for `<system>.txt` files; the file stem names the
//! owning system and each file holds standard crontab lines. Comment and
//! blank lines are ignored, as are lines with fewer than six
//! whitespace-separated tokens (five schedule fields plus a command).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crontide_timeline::JobSpec;

/// Load every crontab file in `dir`.
///
/// Files are visited in sorted order so job (and therefore diagnostic)
/// ordering is stable across platforms. A missing or unreadable
/// directory is an error; an empty one yields no jobs.
pub fn load_dir(dir: &Path) -> io::Result<Vec<JobSpec>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()?;
    paths.sort();

    let mut jobs = Vec::new();
    for path in paths {
        if path.is_dir() {
            continue;
        }

        let is_crontab = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e == "txt")
            .unwrap_or(false);
        if !is_crontab {
            debug!(path = %path.display(), "skipping non-crontab file");
            continue;
        }

        let Some(system) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let contents = fs::read_to_string(&path)?;
        let before = jobs.len();
        parse_lines(system, &contents, &mut jobs);
        info!(
            system = %system,
            jobs = jobs.len() - before,
            "loaded crontab"
        );
    }

    Ok(jobs)
}

/// Parse one crontab file's contents into job specs.
fn parse_lines(system: &str, contents: &str, out: &mut Vec<JobSpec>) {
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 6 {
            debug!(system = %system, line = %line, "ignoring short crontab line");
            continue;
        }

        out.push(JobSpec::new(
            system,
            tokens[..5].join(" "),
            tokens[5..].join(" "),
        ));
    }
}

// ── Tests ───────────────────────────────────────────────────────────
