use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub downstream: DownstreamConfig,
    pub queue: QueueConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub max_body_size: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DownstreamConfig {
    pub auth_url: String,
    pub log_url: String,
    pub mail_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    pub brokers: String,
    pub topic: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".into(),
            port: 8080,
            max_body_size: 1_048_576,
        }
    }
}

impl Default for DownstreamConfig {
    fn default() -> Self {
        Self {
            auth_url: "http://authentication-service/authenticate".into(),
            log_url: "http://logger-service/log".into(),
            mail_url: "http://mail-service/send".into(),
        }
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            brokers: "localhost:9092".into(),
            topic: "logs".into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            downstream: DownstreamConfig::default(),
            queue: QueueConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to compiled defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("RELAY_BIND") {
            self.server.bind = v;
        }
        if let Ok(v) = std::env::var("RELAY_PORT")
            && let Ok(port) = v.parse()
        {
            self.server.port = port;
        }
        if let Ok(v) = std::env::var("RELAY_AUTH_URL") {
            self.downstream.auth_url = v;
        }
        if let Ok(v) = std::env::var("RELAY_LOG_URL") {
            self.downstream.log_url = v;
        }
        if let Ok(v) = std::env::var("RELAY_MAIL_URL") {
            self.downstream.mail_url = v;
        }
        if let Ok(v) = std::env::var("RELAY_QUEUE_BROKERS") {
            self.queue.brokers = v;
        }
        if let Ok(v) = std::env::var("RELAY_QUEUE_TOPIC") {
            self.queue.topic = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_when_file_missing() {
        let config = Config::load(Path::new("/nonexistent/relay.toml")).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.queue.topic, "logs");
        assert_eq!(
            config.downstream.auth_url,
            "http://authentication-service/authenticate"
        );
    }

    #[test]
    fn parse_valid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relay.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(
            f,
            r#"
[server]
bind = "127.0.0.1"
port = 9000

[downstream]
auth_url = "http://auth.internal/authenticate"

[queue]
brokers = "kafka-1:9092,kafka-2:9092"
topic = "relay-logs"
"#
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.downstream.auth_url, "http://auth.internal/authenticate");
        // untouched sections keep their defaults
        assert_eq!(config.downstream.log_url, "http://logger-service/log");
        assert_eq!(config.queue.brokers, "kafka-1:9092,kafka-2:9092");
        assert_eq!(config.queue.topic, "relay-logs");
    }

    #[test]
    fn rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relay.toml");
        std::fs::write(&path, "server = not toml").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
