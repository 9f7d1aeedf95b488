use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not access acceptance config: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed acceptance config: {0}")]
    Parse(#[from] serde_yaml::Error),
}
