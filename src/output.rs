//! Output directory writer.
//!
//! All writes go through [`OutputWriter`], which minifies according to the
//! config, creates parent directories and counts every file it writes.

use crate::{
    config::SiteConfig,
    log,
    utils::minify::{MinifyType, minify},
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Files never copied from the assets directory.
const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Directory under the output root that receives the assets tree.
pub const ASSETS_DIR: &str = "assets";

pub struct OutputWriter<'a> {
    config: &'a SiteConfig,
    dir: &'a Path,
    written: usize,
}

impl<'a> OutputWriter<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self {
            config,
            dir: &config.build.output,
            written: 0,
        }
    }

    /// Number of files written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Remove everything in the output directory and recreate it empty.
    pub fn clean(&self) -> Result<()> {
        if self.dir.exists() {
            fs::remove_dir_all(self.dir).with_context(|| {
                format!("Failed to clear output directory: {}", self.dir.display())
            })?;
        }
        fs::create_dir_all(self.dir)
            .with_context(|| format!("Failed to create output directory: {}", self.dir.display()))
    }

    /// Write an HTML page, minified when enabled.
    pub fn write_html(&mut self, rel: impl AsRef<Path>, html: &str) -> Result<()> {
        let html = minify(MinifyType::Html(html.as_bytes()), self.config);
        self.write(rel.as_ref(), &html)
    }

    /// Write an XML document, line-trimmed when minification is enabled.
    pub fn write_xml(&mut self, rel: impl AsRef<Path>, xml: &str) -> Result<()> {
        let xml = minify(MinifyType::Xml(xml.as_bytes()), self.config);
        self.write(rel.as_ref(), &xml)
    }

    /// Write pretty-printed JSON (2-space indentation) with a trailing newline.
    pub fn write_json<T: Serialize + ?Sized>(&mut self, rel: impl AsRef<Path>, value: &T) -> Result<()> {
        let rel = rel.as_ref();
        let mut json = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize {}", rel.display()))?;
        json.push('\n');
        self.write(rel, json.as_bytes())
    }

    /// Write a plain text file verbatim.
    pub fn write_text(&mut self, rel: impl AsRef<Path>, text: &str) -> Result<()> {
        self.write(rel.as_ref(), text.as_bytes())
    }

    /// Copy the assets tree verbatim to `<output>/assets`. A missing assets
    /// directory copies nothing.
    pub fn copy_assets(&mut self, assets: &Path) -> Result<usize> {
        if !assets.is_dir() {
            return Ok(0);
        }

        let files = collect_all_files(assets)?;
        for path in &files {
            let rel = path
                .strip_prefix(assets)
                .with_context(|| format!("Asset outside assets directory: {}", path.display()))?;
            self.copy(path, &Path::new(ASSETS_DIR).join(rel))?;
        }

        log!("assets"; "copied {} files", files.len());
        Ok(files.len())
    }

    /// Copy an optional file to `rel`. Returns whether the source existed.
    pub fn copy_optional(&mut self, src: &Path, rel: impl AsRef<Path>) -> Result<bool> {
        if !src.is_file() {
            return Ok(false);
        }
        self.copy(src, rel.as_ref())?;
        Ok(true)
    }

    fn copy(&mut self, src: &Path, rel: &Path) -> Result<()> {
        let dest = self.prepare(rel)?;
        fs::copy(src, &dest).with_context(|| {
            format!("Failed to copy {} to {}", src.display(), dest.display())
        })?;
        self.written += 1;
        Ok(())
    }

    fn write(&mut self, rel: &Path, bytes: &[u8]) -> Result<()> {
        let dest = self.prepare(rel)?;
        fs::write(&dest, bytes).with_context(|| format!("Failed to write {}", dest.display()))?;
        self.written += 1;
        Ok(())
    }

    /// Absolute destination for `rel`, with parent directories created.
    fn prepare(&self, rel: &Path) -> Result<PathBuf> {
        let dest = self.dir.join(rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        Ok(dest)
    }
}

/// Collect all files from a directory recursively, sorted by path.
fn collect_all_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to read {}", dir.display()))?;
        let name = entry.file_name().to_str().unwrap_or_default();
        if entry.file_type().is_file() && !IGNORED_FILES.contains(&name) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
