//! Command-line interface for medal-clips.
//!
//! Provides commands for copying filtered clips, previewing a selection,
//! searching collections and showing the resolved configuration. With no
//! command the tool falls back to an interactive prompt.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::{Args, Parser, Subcommand};
use tracing::warn;

use crate::config::{paths, Settings};
use crate::core::{copy_clips, write_report_at, CopyResult};
use crate::library::{
    all_collections, filter_clips, search_collections, Catalog, Clip, CollectionInfo,
    FilterOptions,
};

pub mod interactive;

/// medal-clips - Filter Medal clips and copy them out of the library
#[derive(Parser, Debug)]
#[command(name = "medal-clips")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the Medal clips.json catalog
    #[arg(long, global = true, env = paths::CATALOG_ENV)]
    pub catalog: Option<PathBuf>,

    /// Command to run (interactive mode when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy matching clips into a directory and write a log file there
    Copy {
        /// Directory to copy clips to
        #[arg(short, long = "copy-dir", visible_alias = "dest")]
        dest: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// List the clips a copy with the same filters would select
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Search collections by name (lists all when no term is given)
    Collections {
        /// Collection name to search for
        term: Option<String>,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Clip filters shared by `copy` and `list`
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Filter by text in file path
    #[arg(long)]
    pub path_search: Option<String>,

    /// Filter by clip title
    #[arg(long)]
    pub title: Option<String>,

    /// Filter by game name
    #[arg(long)]
    pub game: Option<String>,

    /// Filter by collection ID
    #[arg(long)]
    pub collection_id: Option<String>,

    /// Filter by collection name
    #[arg(long)]
    pub collection_name: Option<String>,
}

impl From<FilterArgs> for FilterOptions {
    fn from(args: FilterArgs) -> Self {
        Self {
            path_search: args.path_search.unwrap_or_default(),
            title: args.title.unwrap_or_default(),
            game: args.game.unwrap_or_default(),
            collection_id: args.collection_id.unwrap_or_default(),
            collection_name: args.collection_name.unwrap_or_default(),
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let settings = Settings::load(self.catalog)?;
        let mut out = io::stdout();

        match self.command {
            None => {
                let mut input = io::stdin().lock();
                interactive::run(&settings, &mut input, &mut out).await
            }
            Some(Commands::Copy { dest, filters }) => {
                let dest = resolve_destination(dest, &settings)?;
                let catalog = load_catalog(&settings.catalog).await?;
                copy_matching(&catalog, &filters.into(), &dest, &mut out).await
            }
            Some(Commands::List { filters }) => {
                let catalog = load_catalog(&settings.catalog).await?;
                list_clips(&catalog, &filters.into(), &mut out)
            }
            Some(Commands::Collections { term }) => {
                let catalog = load_catalog(&settings.catalog).await?;
                list_collections(&catalog, term.as_deref(), &mut out)
            }
            Some(Commands::Config) => show_config(&settings, &mut out),
        }
    }
}

/// Load the catalog, attaching the path to any error
pub(crate) async fn load_catalog(path: &Path) -> Result<Catalog> {
    Catalog::load(path).await.context("Error loading clips")
}

/// Pick the copy destination: the flag first, then the configured default
fn resolve_destination(dest: Option<PathBuf>, settings: &Settings) -> Result<PathBuf> {
    dest.or_else(|| settings.destination.clone())
        .context("--copy-dir is required")
}

/// Filter the catalog and announce how many clips were selected
pub(crate) fn select_clips<'a, W: Write>(
    catalog: &'a Catalog,
    options: &FilterOptions,
    out: &mut W,
) -> Result<Vec<&'a Clip>> {
    let selected = filter_clips(catalog, options);

    if selected.is_empty() {
        writeln!(out, "No clips match the specified filters")?;
    } else {
        writeln!(out, "Found {} matching clips", selected.len())?;
    }

    Ok(selected)
}

/// Filter, copy and report.
///
/// Per-file failures are printed and logged but never fail the command.
pub(crate) async fn copy_matching<W: Write>(
    catalog: &Catalog,
    options: &FilterOptions,
    dest: &Path,
    out: &mut W,
) -> Result<()> {
    let selected = select_clips(catalog, options, out)?;
    if selected.is_empty() {
        return Ok(());
    }

    copy_selected(&selected, dest, &Local::now(), out).await
}

/// Copy an already selected set of clips and write the report for a run
/// started at `at`.
///
/// A report that cannot be written is printed and logged; the copied files
/// stay in place and the run still succeeds.
pub(crate) async fn copy_selected<W: Write>(
    selected: &[&Clip],
    dest: &Path,
    at: &DateTime<Local>,
    out: &mut W,
) -> Result<()> {
    let result = copy_clips(selected.iter().copied(), dest).await?;
    print_summary(&result, out)?;

    match write_report_at(dest, &result, at).await {
        Ok(path) => writeln!(out, "Detailed log file created: {}", path.display())?,
        Err(e) => {
            warn!("Failed to write copy log: {}", e);
            writeln!(out, "Error creating log file: {}", e)?;
        }
    }

    Ok(())
}

/// Print the outcome of a copy run
fn print_summary<W: Write>(result: &CopyResult, out: &mut W) -> Result<()> {
    writeln!(
        out,
        "\nCopy operation completed with {} successes and {} errors",
        result.success_count(),
        result.error_count()
    )?;

    if !result.failures.is_empty() {
        writeln!(out, "\nErrors encountered:")?;
        for failure in &result.failures {
            writeln!(out, "  - {}: {}", failure.source, failure.error)?;
        }
    }

    Ok(())
}

/// Print the collections matching `term`, or all of them
pub(crate) fn list_collections<W: Write>(
    catalog: &Catalog,
    term: Option<&str>,
    out: &mut W,
) -> Result<()> {
    let collections = all_collections(catalog);
    let collections = match term.filter(|t| !t.is_empty()) {
        Some(term) => search_collections(&collections, term),
        None => collections,
    };

    print_collections(&collections, out)
}

fn print_collections<W: Write>(collections: &[CollectionInfo], out: &mut W) -> Result<()> {
    if collections.is_empty() {
        writeln!(out, "No collections found.")?;
        return Ok(());
    }

    writeln!(out, "Collections found:")?;
    for collection in collections {
        writeln!(out, "  {}", collection)?;
    }

    Ok(())
}

/// Print the clips matching `options` without copying anything
fn list_clips<W: Write>(catalog: &Catalog, options: &FilterOptions, out: &mut W) -> Result<()> {
    let selected = filter_clips(catalog, options);

    if selected.is_empty() {
        writeln!(out, "No clips match the specified filters")?;
        return Ok(());
    }

    writeln!(out, "Found {} matching clips:\n", selected.len())?;
    writeln!(out, "{:<40} {:<20} {}", "TITLE", "GAME", "FILE")?;
    writeln!(out, "{}", "-".repeat(100))?;

    for clip in selected {
        writeln!(
            out,
            "{:<40} {:<20} {}",
            truncate(&clip.title, 40),
            truncate(clip.category(), 20),
            clip.file_path
        )?;
    }

    Ok(())
}

/// Shorten `s` to at most `max` characters, marking the cut with "..."
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        s.to_string()
    }
}

/// Show resolved configuration
fn show_config<W: Write>(settings: &Settings, out: &mut W) -> Result<()> {
    writeln!(out, "medal-clips configuration")?;
    writeln!(out)?;
    writeln!(
        out,
        "Config file: {}",
        settings
            .config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    )?;
    writeln!(out)?;
    writeln!(out, "Paths:")?;
    writeln!(out, "  Catalog:     {}", settings.catalog.display())?;
    writeln!(
        out,
        "  Destination: {}",
        settings
            .destination
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - pass --copy-dir)".to_string())
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{report_file_name, MAX_REPORT_ATTEMPTS};
    use chrono::TimeZone;
    use clap::CommandFactory;
    use tempfile::TempDir;

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_cli_parses_copy_flags() {
        let cli = Cli::parse_from([
            "medal-clips",
            "--catalog",
            "/tmp/clips.json",
            "copy",
            "--copy-dir",
            "/tmp/out",
            "--title",
            "ace",
            "--collection-id",
            "c1",
        ]);

        assert_eq!(cli.catalog, Some(PathBuf::from("/tmp/clips.json")));
        match cli.command {
            Some(Commands::Copy { dest, filters }) => {
                assert_eq!(dest, Some(PathBuf::from("/tmp/out")));
                let options = FilterOptions::from(filters);
                assert_eq!(options.title, "ace");
                assert_eq!(options.collection_id, "c1");
                assert!(options.path_search.is_empty());
            }
            other => panic!("Expected copy command, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_without_command_is_interactive() {
        let cli = Cli::parse_from(["medal-clips"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_list_collections_output() {
        let mut catalog = Catalog::new();
        catalog.insert(
            "a",
            Clip::new("/x/1.mp4", "One")
                .with_collection("c1", "Best Of")
                .with_collection("c2", "Funny"),
        );

        let mut buf = Vec::new();
        list_collections(&catalog, Some("best"), &mut buf).unwrap();
        let text = output(buf);
        assert!(text.contains("ID: c1, Name: Best Of"));
        assert!(!text.contains("Funny"));

        let mut buf = Vec::new();
        list_collections(&catalog, Some("speedrun"), &mut buf).unwrap();
        assert_eq!(output(buf), "No collections found.\n");
    }

    #[tokio::test]
    async fn test_copy_matching_without_matches_creates_nothing() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("out");
        let mut catalog = Catalog::new();
        catalog.insert("a", Clip::new("/x/1.mp4", "Foo"));

        let options = FilterOptions {
            title: "nothing".to_string(),
            ..Default::default()
        };

        let mut buf = Vec::new();
        copy_matching(&catalog, &options, &dest, &mut buf).await.unwrap();

        assert!(output(buf).contains("No clips match"));
        assert!(!dest.exists());
    }

    #[test]
    fn test_catalog_flag_reads_env_var() {
        let command = Cli::command();
        let catalog = command
            .get_arguments()
            .find(|arg| arg.get_id() == "catalog")
            .unwrap();

        assert_eq!(
            catalog.get_env().and_then(|name| name.to_str()),
            Some(paths::CATALOG_ENV)
        );
    }

    #[test]
    fn test_destination_is_required_without_default() {
        let settings = Settings {
            catalog: PathBuf::from("/tmp/clips.json"),
            destination: None,
            config_file: None,
        };
        let err = resolve_destination(None, &settings).unwrap_err();
        assert!(err.to_string().contains("--copy-dir is required"));

        let settings = Settings {
            destination: Some(PathBuf::from("/tmp/configured")),
            ..settings
        };
        assert_eq!(
            resolve_destination(None, &settings).unwrap(),
            PathBuf::from("/tmp/configured")
        );
        assert_eq!(
            resolve_destination(Some(PathBuf::from("/tmp/flag")), &settings).unwrap(),
            PathBuf::from("/tmp/flag")
        );
    }

    #[tokio::test]
    async fn test_unwritable_report_keeps_copies() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("clip.mp4");
        std::fs::write(&source, b"frames").unwrap();
        let clip = Clip::new(source.to_string_lossy(), "Clip");

        // Occupy every report name with a directory
        let dest = temp.path().join("out");
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        for attempt in 0..MAX_REPORT_ATTEMPTS {
            std::fs::create_dir_all(dest.join(report_file_name(&at, attempt))).unwrap();
        }

        let mut buf = Vec::new();
        copy_selected(&[&clip], &dest, &at, &mut buf).await.unwrap();

        let text = output(buf);
        assert!(text.contains("1 successes and 0 errors"));
        assert!(text.contains("Error creating log file"));
        assert_eq!(std::fs::read(dest.join("clip.mp4")).unwrap(), b"frames");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long title", 10), "a very ...");
        assert_eq!(truncate("ééééééé", 5), "éé...");
    }
}
