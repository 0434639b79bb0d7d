use thiserror::Error;

#[derive(Debug, Error)]
pub enum VariantError {
    #[error("Report variant error: '{0}' is not one of [us, them]")]
    Unknown(String)
}
