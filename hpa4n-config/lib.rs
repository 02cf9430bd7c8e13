pub use self::config::{APP_NAME, APP_VERSION, Config, Persistable};
pub use self::defaults::SessionDefaults;
pub use self::errors::ConfigError;

mod config;
mod defaults;
mod errors;
