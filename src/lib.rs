//! `geocmp`: render GeoJSON files into a single comparison page.

pub mod browser;
pub mod clean;
pub mod cli;
pub mod globs;
pub mod html;
pub mod messages;
pub mod payload;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, RenderArgs};
use geocmp_core::ViewerConfig;
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    match cli.command {
        Some(Commands::Clean { verbose, dry_run }) => {
            init_logging(verbose);
            let stdout = std::io::stdout();
            clean::run_clean(&std::env::temp_dir(), dry_run, &mut stdout.lock())?;
            Ok(())
        }
        None => {
            init_logging(cli.render.verbose);
            run_render(cli.render)
        }
    }
}

/// Installs the stderr subscriber. Repeated calls (tests) keep the first one.
pub fn init_logging(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_render(args: RenderArgs) -> Result<()> {
    if args.patterns.is_empty() {
        anyhow::bail!(messages::PATTERN_REQUIRED);
    }
    debug!(count = args.patterns.len(), patterns = ?args.patterns, "received patterns");

    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let paths = globs::expand_globs(args.patterns.as_slice(), &cwd);
    debug!(count = paths.len(), paths = ?paths, "documents to compare");

    let config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            ViewerConfig::from_json_str(&text).with_context(|| format!("invalid config {}", path.display()))?
        }
        None => ViewerConfig::default(),
    };

    let layers = payload::make_layers(&paths);
    let page = html::PageOptions {
        title: args.title.clone(),
        ext_css: read_optional(args.ext_css.as_ref())?,
        ext_js: read_optional(args.ext_js.as_ref())?,
        config,
        wasm_module: args.wasm_module.clone(),
    };
    let content = html::generate_html(&layers, &page)?;

    let out = match (&args.out, args.open_browser) {
        (Some(out), _) => {
            debug!(path = %out.display(), "saving result to file");
            fs::write(out, &content).with_context(|| format!("failed to write {}", out.display()))?;
            Some(out.clone())
        }
        (None, true) => {
            let path = write_temp_page(&content)?;
            debug!(path = %path.display(), "saved to temporary file");
            Some(path)
        }
        (None, false) => {
            debug!("output to stdout");
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(content.as_bytes())?;
            lock.write_all(b"\n")?;
            None
        }
    };

    if let (Some(path), true) = (out, args.open_browser) {
        browser::open(&path)?;
    }
    Ok(())
}

fn read_optional(path: Option<&PathBuf>) -> Result<Option<String>> {
    path.map(|p| fs::read_to_string(p).with_context(|| format!("failed to read {}", p.display())))
        .transpose()
}

fn write_temp_page(content: &str) -> Result<PathBuf> {
    let file = tempfile::Builder::new()
        .prefix(clean::TEMP_FILE_PREFIX)
        .suffix(clean::TEMP_FILE_SUFFIX)
        .tempfile()
        .context("failed to create temporary file")?;
    let (mut file, path) = file.keep().context("failed to keep temporary file")?;
    file.write_all(content.as_bytes())?;
    Ok(path)
}
