use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForecastError {
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },

    #[error("invalid window: interval of {interval_minutes} minutes does not divide a day")]
    InvalidWindow { interval_minutes: u32 },
}

impl ForecastError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unknown timezone {0:?}")]
    UnknownTimezone(String),

    #[error(transparent)]
    Invalid(#[from] ForecastError),
}

pub type Result<T> = std::result::Result<T, ForecastError>;
