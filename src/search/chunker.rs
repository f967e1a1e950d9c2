use std::fs;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

use crate::config::ChunkingConfig;
use crate::error::Result;

use super::store::Chunk;

/// Splits files into overlapping fixed-size line windows.
#[derive(Debug, Clone)]
pub struct Chunker {
    chunk_size: usize,
    stride: usize,
}

impl Chunker {
    /// Fails when `overlap >= chunk_size`, before any file is touched.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        let stride = ChunkingConfig {
            chunk_size,
            overlap,
        }
        .stride()?;
        Ok(Self { chunk_size, stride })
    }

    pub fn from_config(config: &ChunkingConfig) -> Result<Self> {
        Self::new(config.chunk_size, config.overlap)
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap(&self) -> usize {
        self.chunk_size - self.stride
    }

    /// Chunk every readable text file under `root`.
    ///
    /// Files are visited depth-first, sorted by name, so the output order is
    /// stable across runs. Unreadable or non-UTF-8 files are logged and
    /// skipped.
    pub fn chunk_directory(&self, root: &Path) -> Vec<Chunk> {
        let mut chunks = Vec::new();

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_git_dir(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!("Skipping {} due to error: {}", path.display(), e);
                    continue;
                }
            };

            let relative = relative_path(root, path);
            let file_type = file_type(&relative);
            let file_chunks = self.chunk_text(&relative, &file_type, &content);
            tracing::debug!("{}: {} chunks", relative, file_chunks.len());
            chunks.extend(file_chunks);
        }

        chunks
    }

    /// Sliding window over the lines of one file.
    pub fn chunk_text(&self, path: &str, file_type: &str, content: &str) -> Vec<Chunk> {
        let lines = split_lines(content);
        let total = lines.len();

        (0..total)
            .step_by(self.stride)
            .map(|start| {
                let end = (start + self.chunk_size).min(total);
                Chunk {
                    text: lines[start..end].join("\n"),
                    path: path.to_string(),
                    lines: (start + 1, end),
                    file_type: file_type.to_string(),
                }
            })
            .collect()
    }
}

/// Lines split on `\n` only, so `\r` stays in the text. A final newline does
/// not start an extra empty line.
fn split_lines(content: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = content.split('\n').collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

fn is_git_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_type().is_dir() && entry.file_name() == ".git"
}

/// Root-relative path with `/` separators on every platform.
fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Lowercase text after the last `.` of the file name, or empty.
pub fn file_type(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}
