use serde::Deserialize;
use std::env;
use std::fs::{File, metadata};
use std::io::Read;
use serde_yaml;

pub const API_KEY_ENV: &str = "RESEND_API_KEY";

// ---------------------------------------------- Mail Config ----------------------------------------------
// Resend API
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MailConfig {
    pub api_url: String,
    pub from: String,
    pub to: Vec<String>,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    // Only used when RESEND_API_KEY is not set in the environment.
    pub api_key: Option<String>,
}

impl Default for MailConfig {
    fn default() -> Self {
        MailConfig {
            api_url: "https://api.resend.com/emails".to_string(),
            from: "No Cost Nurse <noreply@updates.nocostnurse.com>".to_string(),
            to: vec!["crafted@marloweemrys.com".to_string()],
            timeout_secs: 10,
            connect_timeout_secs: 5,
            api_key: None,
        }
    }
}

// ---------------------------------------------- Config ----------------------------------------------
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_config: String,
    pub tls_enabled: bool,
    pub server_cert_file: String,
    pub key_file: String,
    pub cors_allowed_origins: Vec<String>,
    pub mail: MailConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_config: "src/configs/log4rs.yaml".to_string(),
            tls_enabled: false,
            server_cert_file: "/etc/referral-intake/https/server.crt".to_string(),
            key_file: "/etc/referral-intake/https/server.key".to_string(),
            cors_allowed_origins: Vec::new(),
            mail: MailConfig::default(),
        }
    }
}

impl Config {
    pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
        let config_path = if metadata("/etc/referral-intake/configs.yaml").is_ok() {
            "/etc/referral-intake/configs.yaml"
        } else {
            "src/configs/configs.yaml"
        };
        let mut file = File::open(config_path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Config::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Config, Box<dyn std::error::Error>> {
        let config: Config = serde_yaml::from_str(contents)?;
        Ok(config)
    }

    // The environment wins over the config file so the secret can stay out of it.
    pub fn resend_api_key(&self) -> Result<String, Box<dyn std::error::Error>> {
        let from_env = env::var(API_KEY_ENV).ok().filter(|key| !key.trim().is_empty());
        let from_file = self.mail.api_key.clone().filter(|key| !key.trim().is_empty());
        from_env
            .or(from_file)
            .ok_or_else(|| format!("{} is not set", API_KEY_ENV).into())
    }
}
