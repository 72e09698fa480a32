//! Error types for the pdf_table_slides library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdf_table_slides operations
pub type Result<T> = std::result::Result<T, ConversionError>;

/// Error types for the PDF to slide conversion pipeline
#[derive(Error, Debug)]
pub enum ConversionError {
    /// Page image could not be loaded or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Page or crop image could not be encoded or written
    #[error("Failed to write image: {message}")]
    ImageWriteError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// PDFium shared library could not be bound
    #[error("PDFium unavailable: {message}")]
    PdfiumBindError { message: String },

    /// Source PDF could not be opened or a page failed to render
    #[error("PDF rendering failed: {message}")]
    PdfRenderError { message: String },

    /// OpenCV operation failed
    #[error("OpenCV error: {operation}")]
    OpenCvError {
        operation: String,
        #[source]
        source: Option<opencv::Error>,
    },

    /// Writing the presentation or the reconstructed PDF failed
    #[error("Failed to assemble {artifact}: {message}")]
    AssemblyError { artifact: String, message: String },

    /// Configuration file could not be read, parsed or written
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// A file path that cannot be used as a project or image name
    #[error("Unsupported path {path:?}: {reason}")]
    UnsupportedPath { path: PathBuf, reason: String },

    /// Filesystem operation failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConversionError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an image write error with context
    pub fn image_write<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageWriteError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an OpenCV error with context
    pub fn opencv(operation: impl Into<String>, source: opencv::Error) -> Self {
        Self::OpenCvError {
            operation: operation.into(),
            source: Some(source),
        }
    }

    pub fn assembly(artifact: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AssemblyError {
            artifact: artifact.into(),
            message: message.into(),
        }
    }

    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    pub fn unsupported_path(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::UnsupportedPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if this error only affects the current file, so a batch can move on
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ConversionError::ImageLoadError { .. }
                | ConversionError::ImageWriteError { .. }
                | ConversionError::PdfRenderError { .. }
                | ConversionError::OpenCvError { .. }
                | ConversionError::AssemblyError { .. }
                | ConversionError::UnsupportedPath { .. }
        )
    }

    /// Get user-friendly error description for terminal display
    pub fn user_message(&self) -> String {
        match self {
            ConversionError::PdfiumBindError { .. } => concat!(
                "PDFium library not found. ",
                "Place libpdfium next to the executable or install it system-wide."
            )
            .to_string(),
            ConversionError::PdfRenderError { .. } => {
                "Could not render the PDF. The file may be damaged or empty.".to_string()
            }
            ConversionError::ImageLoadError { .. } => {
                "Could not read a rendered page image.".to_string()
            }
            ConversionError::ConfigError { .. } | ConversionError::InvalidParameter { .. } => {
                format!("Invalid configuration: {}", self)
            }
            ConversionError::Io { path, .. } => {
                format!("Could not access {}.", path.display())
            }
            ConversionError::UnsupportedPath { path, reason } => {
                format!("Skipped {}: {}.", path.display(), reason)
            }
            _ => format!("Conversion failed: {}", self),
        }
    }
}
