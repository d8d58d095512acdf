use crate::context::Context;
use crate::error::Error;
use crate::format::ArchiveFormat;
use crate::manifest::Manifest;
use crate::result::Result;
use crate::tpl::Tpl;
use crate::utils;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tar::Builder;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const STAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year][month][day]-[hour][minute][second]");

/// Outcome of a packaging run
#[derive(Debug)]
pub struct ArchiveReport {
    /// Absolute path of the created archive
    pub path: PathBuf,

    /// Number of file entries written
    pub files: usize,
}

/// Write the collected files into a new compressed archive under the
/// manifest's destination folder and report its path and entry count.
///
/// The container is finalized even for an empty file list; a zero-entry
/// archive is a legitimate output. The archive is written to a `.part`
/// sibling and renamed into place only after finalization, so the
/// reported name never refers to a torn file.
pub fn create(ctx: &Context, manifest: &Manifest, files: &[PathBuf]) -> Result<ArchiveReport> {
    utils::ensure_dir(&manifest.output_folder)?;

    let stem = resolve_stem(&manifest.filename)?;
    let archive_path = unique_path(&manifest.output_folder, &stem, manifest.format);

    if ctx.verbose {
        eprintln!(
            "Creating {} archive with {} file(s): {}",
            manifest.format,
            files.len(),
            archive_path.display()
        );
    }

    let part_path = part_path_for(&archive_path);
    let written = match manifest.format {
        ArchiveFormat::Zip => write_zip(&part_path, &ctx.root_dir, files),
        ArchiveFormat::TarGz => write_tar_gz(&part_path, &ctx.root_dir, files),
    };

    match written {
        Ok(()) => {
            fs::rename(&part_path, &archive_path)?;
            Ok(ArchiveReport {
                path: archive_path,
                files: files.len(),
            })
        }
        Err(e) => {
            let _ = fs::remove_file(&part_path);
            Err(e)
        }
    }
}

/// Remove previous release archives from the destination folder.
///
/// Only regular files matching both the resolved template's literal
/// prefix and the active format's extension are deleted; anything else in
/// the folder survives. Returns the number of files removed.
pub fn prune_stale(ctx: &Context, manifest: &Manifest) -> Result<usize> {
    if !manifest.output_folder.is_dir() {
        return Ok(0);
    }

    // Text before $TIMESTAMP identifies this project's earlier archives.
    let prefix = manifest
        .filename
        .split("$TIMESTAMP")
        .next()
        .unwrap_or_default();
    if prefix.is_empty() {
        return Ok(0);
    }
    let suffix = format!(".{}", manifest.format.extension());

    let mut removed = 0;
    for entry in fs::read_dir(&manifest.output_folder)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };

        if name.starts_with(prefix) && name.ends_with(&suffix) {
            fs::remove_file(entry.path())?;
            removed += 1;
            if ctx.verbose {
                eprintln!("Removed stale archive: {name}");
            }
        }
    }

    Ok(removed)
}

/// Resolve `$TIMESTAMP` in the filename template to the local time at
/// second granularity, falling back to UTC when the local offset cannot
/// be determined.
fn resolve_stem(template: &str) -> Result<String> {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());

    let mut tpl = Tpl::new();
    tpl.register("TIMESTAMP", now.format(STAMP_FORMAT)?);
    Ok(tpl.parse(template))
}

// Collisions within one second get a numeric suffix instead of clobbering
// the previous archive.
fn unique_path(folder: &Path, stem: &str, format: ArchiveFormat) -> PathBuf {
    let candidate = folder.join(format!("{}.{}", stem, format.extension()));
    if !candidate.exists() {
        return candidate;
    }

    let mut n = 1u32;
    loop {
        let candidate = folder.join(format!("{}-{}.{}", stem, n, format.extension()));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

fn part_path_for(archive_path: &Path) -> PathBuf {
    let mut name = archive_path.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}

fn write_zip(output: &Path, root: &Path, files: &[PathBuf]) -> Result<()> {
    let file = File::create(output)?;
    let mut zip = ZipWriter::new(file);

    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .unix_permissions(0o644);

    for path in files {
        zip.start_file(entry_name(root, path)?, options)?;
        let mut src = File::open(path)?;
        io::copy(&mut src, &mut zip)?;
    }

    zip.finish()?;
    Ok(())
}

fn write_tar_gz(output: &Path, root: &Path, files: &[PathBuf]) -> Result<()> {
    let file = File::create(output)?;
    let enc = GzEncoder::new(file, Compression::default());
    let mut tar = Builder::new(enc);

    for path in files {
        let mut src = File::open(path)?;
        tar.append_file(entry_name(root, path)?, &mut src)?;
    }

    tar.into_inner()?.finish()?;
    Ok(())
}

/// Root-relative entry name joined with forward slashes
fn entry_name(root: &Path, path: &Path) -> Result<String> {
    let rel = path.strip_prefix(root).map_err(|_| {
        Error::custom(format!(
            "{} is not under root {}",
            path.display(),
            root.display()
        ))
    })?;

    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}
