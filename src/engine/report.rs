use std::fs;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::engine::ReportError;
use crate::models::Record;
use crate::types::ReportVariant;

/// Extracted rows of one input document, tagged with the variant they were requested for.
#[derive(Debug, Clone)]
pub struct Report {
    pub file_name: String,
    pub variant: ReportVariant,
    pub records: Vec<Record>
}

impl Report {
    /// `output_{variant}_{input file name}.csv`
    pub fn output_name(&self) -> String {
        format!("output_{}_{}.csv", self.variant, self.file_name)
    }

    /// Writes a header row followed by one row per record. Null values become empty fields.
    pub fn write_csv<W: Write>(&self, output: W) -> Result<(), ReportError> {
        let mut writer = csv::Writer::from_writer(output);

        //NOTE: serialize() only emits the header together with the first row, an empty report still needs one
        if self.records.is_empty() {
            writer.write_record(Record::COLUMNS)?;
        }

        for record in &self.records {
            writer.serialize(record)?;
        }

        writer.flush().map_err(csv::Error::from)?;

        Ok(())
    }

    /// Writes the report into `directory` under `output_name()` and returns the full path.
    /// The directory is created first if it does not exist yet.
    pub fn save(&self, directory: &Path) -> Result<PathBuf, ReportError> {
        fs::create_dir_all(directory)
            .map_err(|error| ReportError::Io { path: directory.to_path_buf(), source: error })?;

        let path = directory.join(self.output_name());
        let file = File::create(&path).map_err(|error| ReportError::Io { path: path.clone(), source: error })?;

        self.write_csv(BufWriter::new(file))?;

        info!("Wrote [{}] records to [{}]", self.records.len(), path.display());

        Ok(path)
    }
}
