mod clearing_extractor;

pub use clearing_extractor::extract;
