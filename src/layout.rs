//! Filesystem layout of a conversion run
//!
//! ```text
//! content/<project>.pdf             input
//! pages/<project>/page_NN.png       rendered pages
//! content/<project>/page_NN.png     table crops (same name as the page)
//! content/<project>/<project>.pptx  deck
//! content/<project>/<project>.pdf   reconstructed PDF
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::layout::{PAGE_PREFIX, PDF_EXTENSION, PNG_EXTENSION, PPTX_EXTENSION};
use crate::error::{ConversionError, Result};
use crate::PipelineConfig;

/// Paths used while converting one PDF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// File stem of the source PDF
    pub project: String,
    /// `pages/<project>`
    pub pages_dir: PathBuf,
    /// `content/<project>`
    pub output_dir: PathBuf,
}

impl ProjectLayout {
    /// Derive the layout for `pdf_path` under the configured directories
    pub fn for_pdf(pdf_path: &Path, config: &PipelineConfig) -> Result<Self> {
        let project = project_name(pdf_path)?;
        Ok(Self {
            pages_dir: config.pages_dir.join(&project),
            output_dir: config.content_dir.join(&project),
            project,
        })
    }

    /// Create the page and output directories if missing
    pub fn ensure_dirs(&self) -> Result<()> {
        ensure_dir(&self.pages_dir)?;
        ensure_dir(&self.output_dir)
    }

    /// Where the crop of a page image is written
    pub fn crop_path(&self, page_image: &Path) -> PathBuf {
        match page_image.file_name() {
            Some(name) => self.output_dir.join(name),
            None => self.output_dir.join(page_image),
        }
    }

    pub fn pptx_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.project, PPTX_EXTENSION))
    }

    pub fn pdf_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.project, PDF_EXTENSION))
    }
}

/// Project name of a PDF: its file name without the `.pdf` extension
///
/// The name is reused for directories and the deck title, so it must be
/// non-empty UTF-8.
pub fn project_name(pdf_path: &Path) -> Result<String> {
    let stem = pdf_path
        .file_stem()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ConversionError::unsupported_path(pdf_path, "no file name"))?;

    stem.to_str().map(str::to_string).ok_or_else(|| {
        ConversionError::unsupported_path(pdf_path, "file name is not valid UTF-8")
    })
}

/// File name of a rendered page (1-based), zero padded to two digits
pub fn page_file_name(page_number: usize) -> String {
    format!("{}{:02}.{}", PAGE_PREFIX, page_number, PNG_EXTENSION)
}

/// Create a directory and its parents unless it already exists
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        log::debug!("Creating directory {}", dir.display());
        fs::create_dir_all(dir).map_err(|e| ConversionError::io(dir, e))?;
    }
    Ok(())
}

/// All `*.pdf` files directly inside `dir`, sorted by name
pub fn list_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir).map_err(|e| ConversionError::io(dir, e))? {
        let entry = entry.map_err(|e| ConversionError::io(dir, e))?;
        let path = entry.path();

        if path.is_file() && has_extension(&path, PDF_EXTENSION) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn has_extension(path: &Path, wanted: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(wanted))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_file_names() {
        assert_eq!(page_file_name(1), "page_01.png");
        assert_eq!(page_file_name(9), "page_09.png");
        assert_eq!(page_file_name(10), "page_10.png");
        assert_eq!(page_file_name(123), "page_123.png");
    }

    #[test]
    fn test_project_layout_paths() {
        let config = PipelineConfig::default();
        let layout = ProjectLayout::for_pdf(Path::new("content/Sala 1.pdf"), &config).unwrap();

        assert_eq!(layout.project, "Sala 1");
        assert_eq!(layout.pages_dir, PathBuf::from("pages/Sala 1"));
        assert_eq!(layout.output_dir, PathBuf::from("content/Sala 1"));
        assert_eq!(
            layout.crop_path(Path::new("pages/Sala 1/page_03.png")),
            PathBuf::from("content/Sala 1/page_03.png")
        );
        assert_eq!(layout.pptx_path(), PathBuf::from("content/Sala 1/Sala 1.pptx"));
        assert_eq!(layout.pdf_path(), PathBuf::from("content/Sala 1/Sala 1.pdf"));
    }

    #[test]
    fn test_project_name_requires_stem() {
        assert!(project_name(Path::new("")).is_err());
        assert_eq!(project_name(Path::new("deck.PDF")).unwrap(), "deck");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_project_name_is_recoverable() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new("content").join(OsStr::from_bytes(b"Sala\xff.pdf"));
        let err = project_name(&path).unwrap_err();

        assert!(matches!(err, ConversionError::UnsupportedPath { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_list_pdfs_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.PDF", "notes.txt", "c.pdf.bak"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("folder.pdf")).unwrap();

        let found: Vec<String> = list_pdfs(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(found, vec!["a.PDF", "b.pdf"]);
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("pages").join("deck");

        ensure_dir(&nested).unwrap();
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
