//! Batch processing command
//!
//! Converts every PNG/JPEG directly inside a folder and writes the results
//! as `<stem>.png` into a subfolder of it. A failing file is reported and
//! skipped; the remaining files are still processed.

use crate::BatchArgs;
use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, trace, warn};
use wallfit_layout::AspectClass;

pub fn run(args: BatchArgs, verbose: u8) -> Result<()> {
    let input_dir = match args.input {
        Some(dir) => dir,
        None => prompt_for_folder(io::stdin().lock(), io::stdout())?,
    };
    trace!(input = %input_dir.display(), output_name = %args.output_name, "batch::run");

    if !input_dir.is_dir() {
        bail!("Not a folder: {}", input_dir.display());
    }

    let files = collect_inputs(&input_dir)?;
    if files.is_empty() {
        warn!(input = %input_dir.display(), "No PNG/JPEG files found");
        println!("No images found in {}", input_dir.display());
        return Ok(());
    }
    info!(files = files.len(), input = %input_dir.display(), "Starting batch processing");

    if args.dry_run {
        return dry_run(&files);
    }

    let output_dir = input_dir.join(&args.output_name);
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output folder: {}", output_dir.display()))?;

    let mut written = HashSet::new();
    let mut success = 0;
    let mut failed = 0;

    for input in &files {
        let name = super::display_name(input);
        let output = output_path(input, &output_dir);

        if !written.insert(output.clone()) {
            warn!(input = %name, output = %output.display(), "Output name already used in this batch, overwriting");
        }
        if verbose > 0 {
            println!("Processing {} -> {}", input.display(), output.display());
        }

        match process_file(input, &output) {
            Ok(class) => {
                success += 1;
                info!(file = %name, %class, "Processed");
                println!("Processed: {}", name);
            }
            Err(e) => {
                failed += 1;
                let reason = format!("{:#}", e);
                error!(file = %name, error = %reason, "Failed to process");
                eprintln!("Error processing {}: {}", name, reason);
            }
        }
    }

    info!(success, failed, "Batch processing complete");
    println!("Done: {} succeeded, {} failed", success, failed);

    if failed > 0 {
        bail!("{} of {} files failed", failed, files.len());
    }
    Ok(())
}

/// Asks for the input folder on `output` and reads one line from `input`.
fn prompt_for_folder(mut input: impl BufRead, mut output: impl Write) -> Result<PathBuf> {
    write!(output, "Enter the path to the folder containing the images: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read folder path")?;
    let path = line.trim();
    if path.is_empty() {
        bail!("No folder given");
    }
    Ok(PathBuf::from(path))
}

/// Regular files directly inside `dir` with a PNG/JPEG extension, sorted by name.
fn collect_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read folder: {}", dir.display()))?;
    Ok(select_inputs(dir, entries.map(|entry| entry.map(|e| e.path()))))
}

/// Keeps supported image files; an unreadable entry is logged and skipped.
fn select_inputs(dir: &Path, entries: impl IntoIterator<Item = io::Result<PathBuf>>) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Skipping unreadable folder entry");
                continue;
            }
        };
        if path.is_file() && wallfit_io::is_supported_extension(&path) {
            files.push(path);
        } else {
            debug!(path = %path.display(), "Skipping");
        }
    }
    files.sort();
    files
}

/// `<output_dir>/<stem>.png`
fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    output_dir.join(format!("{}.png", stem))
}

fn process_file(input: &Path, output: &Path) -> Result<AspectClass> {
    let image = super::load_image(input)?;
    let class = AspectClass::classify(image.width(), image.height());
    debug!(file = %input.display(), width = image.width(), height = image.height(), %class, "Classified");

    let canvas = wallfit_layout::layout_with_class(&image, class)
        .with_context(|| format!("Layout failed for {}", input.display()))?;
    super::save_image(output, &canvas)?;
    Ok(class)
}

fn dry_run(files: &[PathBuf]) -> Result<()> {
    for input in files {
        let name = super::display_name(input);
        match super::load_image(input) {
            Ok(image) => {
                let class = AspectClass::classify(image.width(), image.height());
                println!("{}: {}x{} -> {}", name, image.width(), image.height(), class);
            }
            Err(e) => println!("{}: unreadable ({:#})", name, e),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_reads_trimmed_line() {
        let mut shown = Vec::new();
        let path = prompt_for_folder(&b"  /tmp/pictures \n"[..], &mut shown).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/pictures"));
        assert!(String::from_utf8(shown).unwrap().starts_with("Enter the path"));
    }

    #[test]
    fn test_prompt_rejects_empty() {
        assert!(prompt_for_folder(&b"\n"[..], Vec::new()).is_err());
        assert!(prompt_for_folder(&b""[..], Vec::new()).is_err());
    }

    #[test]
    fn test_output_path_uses_stem() {
        let out = output_path(Path::new("/pics/Holiday.Photo.JPG"), Path::new("/pics/result"));
        assert_eq!(out, PathBuf::from("/pics/result/Holiday.Photo.png"));
    }

    #[test]
    fn test_collect_inputs_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.JPG", "a.png", "c.jpeg", "notes.txt", "d.gif"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("result")).unwrap();
        std::fs::create_dir(dir.path().join("folder.png")).unwrap();

        let files = collect_inputs(dir.path()).unwrap();
        let names: Vec<String> = files.iter().map(|p| super::super::display_name(p)).collect();
        assert_eq!(names, vec!["a.png", "b.JPG", "c.jpeg"]);
    }

    #[test]
    fn test_unreadable_entry_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.png");
        std::fs::write(&good, b"x").unwrap();

        let entries = vec![
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
            Ok(good.clone()),
        ];
        assert_eq!(select_inputs(dir.path(), entries), vec![good]);
    }
}
