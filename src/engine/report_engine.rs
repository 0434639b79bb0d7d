use crate::engine::{Report, ReportError};
use crate::extractor::extract;
use crate::types::ReportVariant;
use encoding_rs::{Encoding, UTF_8};
use roxmltree::{Document, ParsingOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tokio::task::spawn_blocking;
use tracing::{debug, info};

const DEFAULT_NAMESPACE: &str = "http://bpc.ru/sv/SVXP/clearing";
const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 64 * 1024 * 1024;
/// How far into the file the XML declaration is looked for.
const DECLARATION_WINDOW: usize = 1024;

/// Turns uploaded clearing files into reports.
///
/// The engine only carries configuration, so one instance can serve any number of concurrent
/// `generate` calls; each call reads and parses its own document.
#[derive(Debug, Clone)]
pub struct ReportEngine {
    namespace: String,
    max_document_bytes: u64
}

impl ReportEngine {
    pub fn new() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_max_document_bytes(mut self, max_document_bytes: u64) -> Self {
        self.max_document_bytes = max_document_bytes;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn max_document_bytes(&self) -> u64 {
        self.max_document_bytes
    }

    /// Reads, parses and extracts the document at `path` on a blocking worker.
    ///
    /// # Errors
    /// Returns `ReportError` if:
    /// - The file is missing, unreadable or has no file name.
    /// - The file is larger than the configured limit.
    /// - The content is not well-formed XML.
    pub async fn generate(&self, path: impl AsRef<Path>, variant: ReportVariant) -> Result<Report, ReportError> {
        let path = path.as_ref().to_path_buf();
        let namespace = self.namespace.clone();
        let limit = self.max_document_bytes;

        spawn_blocking(move || build_report(path, &namespace, limit, variant)).await?
    }
}

impl Default for ReportEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn build_report(path: PathBuf, namespace: &str, limit: u64, variant: ReportVariant) -> Result<Report, ReportError> {
    let file_name = path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| ReportError::MissingFileName { path: path.clone() })?;

    let size = fs::metadata(&path).map_err(|error| ReportError::read(&path, error))?.len();

    if size > limit {
        return Err(ReportError::DocumentTooLarge { path, size, limit });
    }

    let bytes = fs::read(&path).map_err(|error| ReportError::read(&path, error))?;
    let content = decode(&path, &bytes)?;

    let options = ParsingOptions { allow_dtd: true, ..ParsingOptions::default() };
    let document = Document::parse_with_options(&content, options)
        .map_err(|error| ReportError::MalformedXml { path: path.clone(), source: error })?;

    debug!("Parsed [{}] ({size} bytes)", path.display());

    let records = extract(&document, namespace);

    info!("Extracted [{}] records from [{}] for variant [{variant}]", records.len(), path.display());

    Ok(Report { file_name, variant, records })
}

/// Decodes raw file bytes using the BOM, then the declared `encoding`, then UTF-8.
fn decode(path: &Path, bytes: &[u8]) -> Result<String, ReportError> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_length)) => (encoding, &bytes[bom_length..]),
        None => {
            let encoding = match declared_encoding(bytes) {
                Some(label) => Encoding::for_label(label.as_bytes())
                    .ok_or_else(|| ReportError::UnsupportedEncoding { path: path.to_path_buf(), label })?,
                None => UTF_8
            };

            (encoding, bytes)
        }
    };

    debug!("Decoding [{}] as [{}]", path.display(), encoding.name());

    encoding.decode_without_bom_handling_and_without_replacement(body)
        .map(|content| content.into_owned())
        .ok_or_else(|| ReportError::InvalidEncoding { path: path.to_path_buf(), encoding: encoding.name() })
}

/// Reads the `encoding` pseudo-attribute of a leading `<?xml ... ?>` declaration.
fn declared_encoding(bytes: &[u8]) -> Option<String> {
    let window = &bytes[..bytes.len().min(DECLARATION_WINDOW)];

    if !window.starts_with(b"<?xml") {
        return None;
    }

    let end = window.windows(2).position(|pair| pair == b"?>")?;
    let declaration = String::from_utf8_lossy(&window[..end]);
    let (_, rest) = declaration.split_once("encoding")?;
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let (label, _) = rest[1..].split_once(quote)?;

    Some(label.trim().to_string())
}
