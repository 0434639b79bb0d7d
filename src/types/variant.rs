use crate::types::errors::VariantError;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Which side of the clearing a report is produced for.
///
/// Both variants run the identical extraction; the tag only feeds the output file name.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ReportVariant {
    Us,
    Them
}

impl ReportVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportVariant::Us => "us",
            ReportVariant::Them => "them"
        }
    }
}

impl Display for ReportVariant {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for ReportVariant {
    type Err = VariantError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "us" => Ok(ReportVariant::Us),
            "them" => Ok(ReportVariant::Them),
            _ => Err(VariantError::Unknown(value.to_string()))
        }
    }
}
