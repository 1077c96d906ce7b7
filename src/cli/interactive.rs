//! Interactive prompt mode, used when no command is given.
//!
//! Walks through catalog path, an optional collection search and the five
//! filters. Only when something matches does it ask for the destination
//! directory and run the same copy flow as `medal-clips copy`.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Local;

use super::{copy_selected, list_collections, load_catalog, select_clips};
use crate::config::Settings;
use crate::library::FilterOptions;

/// Run the interactive session, reading answers from `input`
pub async fn run<R: BufRead, W: Write>(
    settings: &Settings,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "=== Medal Clip Manager - Interactive Mode ===")?;

    let catalog_path = prompt(
        input,
        out,
        &format!("Catalog file path [{}]: ", settings.catalog.display()),
    )?;
    let catalog_path = if catalog_path.is_empty() {
        settings.catalog.clone()
    } else {
        PathBuf::from(catalog_path)
    };

    let catalog = load_catalog(&catalog_path).await?;

    let answer = prompt(input, out, "Do you want to search for collections first? (y/N): ")?;
    if matches!(answer.to_lowercase().as_str(), "y" | "yes") {
        let term = prompt(
            input,
            out,
            "Enter collection name to search for (leave empty to list all): ",
        )?;
        list_collections(&catalog, Some(term.as_str()), out)?;
        writeln!(out)?;
    }

    let options = FilterOptions {
        path_search: prompt(input, out, "Search text in path (press Enter to skip): ")?,
        title: prompt(input, out, "Search text in title (press Enter to skip): ")?,
        game: prompt(input, out, "Search by game name (press Enter to skip): ")?,
        collection_id: prompt(input, out, "Search by collection ID (press Enter to skip): ")?,
        collection_name: prompt(input, out, "Search by collection name (press Enter to skip): ")?,
    };

    let selected = select_clips(&catalog, &options, out)?;
    if selected.is_empty() {
        return Ok(());
    }

    let dest = match &settings.destination {
        Some(default) => {
            let answer = prompt(
                input,
                out,
                &format!("Directory to copy clips to [{}]: ", default.display()),
            )?;
            if answer.is_empty() {
                default.clone()
            } else {
                PathBuf::from(answer)
            }
        }
        None => {
            let answer = prompt(input, out, "Directory to copy clips to: ")?;
            if answer.is_empty() {
                bail!("Copy directory is required");
            }
            PathBuf::from(answer)
        }
    };

    copy_selected(&selected, &dest, &Local::now(), out).await
}

/// Print `message` and read one trimmed line; end of input reads as empty
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> Result<String> {
    write!(out, "{}", message)?;
    out.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read from stdin")?;

    Ok(line.trim().to_string())
}
