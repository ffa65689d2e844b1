use core_config::{app_info, env_optional, server::ServerConfig, AppInfo, FromEnv};

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Token required by the admin registration endpoint; when unset,
    /// admin registration is disabled
    pub admin_token: Option<String>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let admin_token = env_optional("ADMIN_TOKEN");

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
            admin_token,
        })
    }
}
