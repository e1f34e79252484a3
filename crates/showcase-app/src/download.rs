//! Export downloads.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The two export buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    Preview,
    Print,
}

impl ExportKind {
    pub fn all() -> &'static [ExportKind] {
        &[ExportKind::Preview, ExportKind::Print]
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ExportKind::Preview => "canvas-preview.png",
            ExportKind::Print => "canvas-print.png",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportKind::Preview => "Preview 1x",
            ExportKind::Print => "Print 3x",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preview" => Ok(ExportKind::Preview),
            "print" => Ok(ExportKind::Print),
            other => Err(format!("unknown export kind: {other}")),
        }
    }
}

/// An encoded image offered for download.
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl Download {
    /// Write the file into `dir`, creating the directory if needed.
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf, AppError> {
        std::fs::create_dir_all(dir).map_err(|e| AppError::write(dir, e))?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes).map_err(|e| AppError::write(&path, e))?;
        log::info!(
            "Saved {} ({}x{}, {} bytes)",
            path.display(),
            self.width,
            self.height,
            self.bytes.len()
        );
        Ok(path)
    }
}
