use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Input file [{}] was not found", path.display())]
    InputNotFound {
        path: PathBuf
    },
    #[error("Input path [{}] has no file name", path.display())]
    MissingFileName {
        path: PathBuf
    },
    #[error("Input file [{}] is {size} bytes which exceeds the limit of {limit} bytes", path.display())]
    DocumentTooLarge {
        path: PathBuf,
        size: u64,
        limit: u64
    },
    #[error("Input file [{}] declares unsupported encoding '{label}'", path.display())]
    UnsupportedEncoding {
        path: PathBuf,
        label: String
    },
    #[error("Input file [{}] is not valid {encoding} text", path.display())]
    InvalidEncoding {
        path: PathBuf,
        encoding: &'static str
    },
    #[error("Input file [{}] is not well-formed XML: {source}", path.display())]
    MalformedXml {
        path: PathBuf,
        source: roxmltree::Error
    },
    #[error("I/O error on [{}]: {source}", path.display())]
    Io {
        path: PathBuf,
        source: io::Error
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError)
}

impl ReportError {
    /// Classifies a failure to read an input file.
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();

        if source.kind() == io::ErrorKind::NotFound {
            Self::InputNotFound { path }
        } else {
            Self::Io { path, source }
        }
    }
}
