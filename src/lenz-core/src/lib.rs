pub mod config;
pub mod error;
pub mod logging;
pub mod message;
pub mod params;
pub mod paths;
pub mod photo;
pub mod redact;
pub mod secrets;

pub use config::{ApiConfig, Config, ConfigError, LogLevel, LoggingConfig, ValidationError};
pub use error::{ToolError, ToolResult};
pub use logging::{init_logging, LoggingError, LoggingGuard};
pub use message::{BlobMeta, MessageSink, ToolMessage};
pub use params::{Credentials, RandomParams, SearchParams};
pub use paths::{AppDirs, DirsError};
pub use photo::{Author, LinkSet, PhotoDetail, PhotoRecord, ProfileImage, UrlSet};

pub const APP_NAME: &str = "lenz";
pub const APP_AUTHOR: &str = "Lenz";
pub const APP_QUALIFIER: &str = "io";
