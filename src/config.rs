use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Deployment mode. Production additionally serves the pre-built front end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnv {
    #[default]
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub port: u16,
    pub app_env: AppEnv,
    /// Backing JSON document for the car collection.
    pub data_path: PathBuf,
    /// Directory holding the built single-page app (production only).
    pub static_dir: PathBuf,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            app_env: AppEnv::Development,
            data_path: PathBuf::from("cars.json"),
            static_dir: PathBuf::from("my-react-app/build"),
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults overlaid with `PORT`, `APP_ENV`, `DATA_PATH`, `STATIC_DIR`, `LOGLEVEL`.
    pub fn from_env() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::raw().only(&[
            "port",
            "app_env",
            "data_path",
            "static_dir",
            "loglevel",
        ]))
    }

    pub fn is_production(&self) -> bool {
        self.app_env == AppEnv::Production
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
