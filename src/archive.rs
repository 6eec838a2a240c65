use crate::context::Context;
use crate::error::Error;
use crate::manifest::Layout;
use crate::result::Result;
use crate::utils;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// A source file and the name it is stored under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub source: PathBuf,
    pub name: String,
}

/// Outcome of a successful build
#[derive(Debug)]
pub struct Packed {
    pub path: PathBuf,
    pub entries: usize,
}

/// Collect entries and write them to the layout's target archive.
///
/// Any failure aborts the build and leaves no archive behind.
pub fn build(ctx: &Context, layout: &Layout) -> Result<Packed> {
    let entries = collect(ctx, layout)?;
    let path = layout.output_path(&ctx.root);
    write(&entries, &path)?;
    Ok(Packed {
        path,
        entries: entries.len(),
    })
}

/// Resolve the layout against the source root into an ordered entry list.
///
/// Listed files come first in manifest order, then each directory tree
/// sorted by file name. Missing files and directories are skipped.
pub fn collect(ctx: &Context, layout: &Layout) -> Result<Vec<Entry>> {
    let output = layout.output_path(&ctx.root);
    let mut entries = Vec::new();
    let mut seen = HashSet::new();

    for file in &layout.files {
        let source = ctx.root.join(file);
        if !source.is_file() {
            if ctx.verbose {
                cliclack::log::remark(format!("Skipping missing file {}", file.display()))?;
            }
            continue;
        }
        if same_file(&source, &output) {
            return Err(Error::InvalidManifest(format!(
                "output {} would overwrite the listed file {}",
                output.display(),
                file.display()
            )));
        }
        let name = utils::archive_name(&layout.prefix, file)?;
        push(ctx, &mut entries, &mut seen, source, name)?;
    }

    for dir in &layout.dirs {
        let base = ctx.root.join(dir);
        if !base.is_dir() {
            if ctx.verbose {
                cliclack::log::remark(format!("Skipping missing directory {}", dir.display()))?;
            }
            continue;
        }

        for entry in WalkDir::new(&base).sort_by_file_name() {
            let entry = entry.map_err(|source| Error::Walk {
                path: base.clone(),
                source,
            })?;
            let source = entry.path();
            // follows symlinks; dangling links and special files drop out
            if !source.is_file() || same_file(source, &output) {
                continue;
            }

            let nested = source.strip_prefix(&base).map_err(|_| {
                Error::from(format!("{} is outside {}", source.display(), base.display()))
            })?;
            let name = utils::archive_name(&layout.prefix, &dir.join(nested))?;
            push(ctx, &mut entries, &mut seen, source.to_path_buf(), name)?;
        }
    }

    Ok(entries)
}

fn push(
    ctx: &Context,
    entries: &mut Vec<Entry>,
    seen: &mut HashSet<String>,
    source: PathBuf,
    name: String,
) -> Result<()> {
    // a file may be listed directly and also sit under a listed directory
    if !seen.insert(name.clone()) {
        return Ok(());
    }
    if ctx.verbose {
        cliclack::log::remark(format!("Adding {}", name))?;
    }
    entries.push(Entry { source, name });
    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Write entries into a fresh archive at `output`, replacing any existing file.
///
/// The parent directory must already exist. On failure the partial archive
/// is removed before the error is returned.
pub fn write(entries: &[Entry], output: &Path) -> Result<()> {
    let file = File::create(output).map_err(|e| Error::write(output, e))?;

    let result = write_entries(file, entries);
    if result.is_err() {
        let _ = fs::remove_file(output);
    }
    result
}

fn write_entries(file: File, entries: &[Entry]) -> Result<()> {
    let mut zip = ZipWriter::new(file);

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    for entry in entries {
        let mut source = File::open(&entry.source).map_err(|e| Error::read(&entry.source, e))?;
        zip.start_file(entry.name.as_str(), options)?;
        io::copy(&mut source, &mut zip).map_err(|e| Error::read(&entry.source, e))?;
    }

    zip.finish()?;
    Ok(())
}
