mod errors;
mod variant;

pub use variant::ReportVariant;
