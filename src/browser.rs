use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Opens a local page with the platform's default handler.
///
/// With `GEOCMP_TEST_NO_SPAWN` set, prints `open:<path>` instead.
pub fn open(path: &Path) -> Result<()> {
    let path = std::fs::canonicalize(path).with_context(|| format!("failed to resolve {}", path.display()))?;
    let url = format!("file://{}", path.display());

    if std::env::var_os("GEOCMP_TEST_NO_SPAWN").is_some() {
        println!("open:{}", path.display());
        return Ok(());
    }

    debug!(%url, "opening in browser");
    let mut cmd = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        Command::new("xdg-open")
    };
    let status = cmd.arg(&url).status().context("failed to launch browser")?;
    if !status.success() {
        anyhow::bail!("browser launcher exited with status {status}");
    }
    Ok(())
}
