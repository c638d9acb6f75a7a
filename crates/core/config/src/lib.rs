use config::{Config, Environment, File, FileFormat};
use once_cell::sync::Lazy;
use serde::Deserialize;

static SETTINGS: Lazy<Settings> = Lazy::new(|| {
    let mut builder = Config::builder().add_source(File::from_str(
        include_str!("../Vohala.toml"),
        FileFormat::Toml,
    ));

    if std::path::Path::new("Vohala.toml").exists() {
        builder = builder.add_source(File::new("Vohala.toml", FileFormat::Toml));
    }

    builder
        .add_source(Environment::with_prefix("VOHALA").separator("__"))
        .build()
        .expect("Failed to build configuration.")
        .try_deserialize::<Settings>()
        .expect("Failed to deserialize configuration.")
});

#[derive(Deserialize, Debug, Clone)]
pub struct Database {
    pub sqlite: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Hosts {
    pub events: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Websocket {
    pub idle_timeout_secs: u64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FeaturesLimits {
    pub message_length: usize,
    pub message_page_size: i64,
    pub notification_page_size: i64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FeaturesRatelimits {
    pub message_send: u8,
    pub message_send_per: u8,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Features {
    pub limits: FeaturesLimits,
    pub ratelimits: FeaturesRatelimits,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub database: Database,
    pub hosts: Hosts,
    pub websocket: Websocket,
    pub features: Features,
}

/// Read the current configuration snapshot
pub fn config() -> &'static Settings {
    &SETTINGS
}

pub fn init() {
    println!(":: Vohala Configuration ::\n\x1b[32m{:?}\x1b[0m", config());
}

#[cfg(test)]
mod tests {
    use crate::config;

    #[test]
    fn it_loads_embedded_defaults() {
        let settings = config();
        assert!(settings.features.limits.message_length > 0);
        assert!(settings.features.limits.message_page_size > 0);
    }
}
