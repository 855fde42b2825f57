/// Result type alias for interface validation.
pub type Result<T> = std::result::Result<T, InterfaceError>;

#[derive(Debug, thiserror::Error)]
pub enum InterfaceError {
    #[error("No '{0}' present")]
    MissingField(&'static str),
}
