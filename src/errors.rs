use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmokeError {
    #[error("Docker is not available. Please install Docker.")]
    DockerUnavailable,

    #[error("Failed to pull image '{0}': {1}")]
    ImagePull(String, String),

    #[error("Failed to start container '{0}': {1}")]
    ContainerStart(String, String),

    #[error("Docker error: {0}")]
    Docker(String),

    #[error("Unknown suite '{0}'. Available: {}", .1.join(", "))]
    UnknownSuite(String, Vec<String>),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Invalid marker pattern '{0}': {1}")]
    InvalidMarker(String, String),

    #[error("No free port found in range {0}-{1}")]
    PortExhausted(u16, u16),

    #[error("Port {0} is already in use")]
    PortInUse(u16),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SmokeError>;
