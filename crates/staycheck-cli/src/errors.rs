use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required `check` parameter was not supplied on the command line.
    /// All missing parameters are reported at once, before any check runs.
    #[error("missing required parameter(s): {0}")]
    MissingParameter(String),
}
