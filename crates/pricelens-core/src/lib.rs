use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod fields;
pub mod items;
pub mod sites;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use items::{FieldValue, FinalizedItem, MissingField, RawRecord};
pub use sites::{load_sites, SiteConfig, SitesFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read sites file {path}: {source}")]
    SitesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sites file: {0}")]
    SitesFileParse(#[from] serde_yaml::Error),

    #[error("sites file validation failed: {0}")]
    Validation(String),

    #[error("no site named \"{0}\" in the sites file")]
    UnknownSite(String),
}
