use crate::logger::LoggerError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Failed to load configuration: {0}")]
    ConfigError(#[from] config::ConfigError),
    #[error("Failed to initialise logging: {0}")]
    LoggerError(#[from] LoggerError),
}

#[derive(Debug, thiserror::Error, PartialEq, Clone)]
pub enum ApplicationError {
    #[error("Invalid command line arguments")]
    InvalidArguments,
    #[error("Failed to set up the BPOINT gateway")]
    GatewaySetupFailed,
    #[error("BPOINT gateway call failed")]
    GatewayCallFailed,
    #[error("Failed to render the gateway result")]
    OutputFailed,
}
