mod errors;
mod report;
mod report_engine;

pub use errors::ReportError;
pub use report::Report;
pub use report_engine::ReportEngine;
