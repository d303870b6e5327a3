// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use clap::{builder::ValueParser, Parser, ValueEnum};
use std::{collections::HashSet, fmt, path::PathBuf, sync::LazyLock};

#[cfg(not(test))]
pub static SETTINGS: LazyLock<Settings> = LazyLock::new(Settings::parse);

#[cfg(test)]
pub static SETTINGS: LazyLock<Settings> = LazyLock::new(Settings::new_for_test);

#[derive(Debug, Parser)]
#[clap(
    name = "bulkmailer",
    about = "Sends a message to a batch of recipients through an SMTP relay, immediately or at a scheduled time.",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Settings {
    /// bulkmailer log level (default: "info")
    #[clap(
        long,
        default_value = "info",
        env,
        help = "Set the log level for bulkmailer"
    )]
    pub bulkmailer_log_level: String,

    /// bulkmailer HTTP port (default: 8080)
    #[clap(
        long,
        default_value = "8080",
        env,
        help = "Set the HTTP port for bulkmailer"
    )]
    pub bulkmailer_http_port: u16,

    /// The IP address that the HTTP server binds to, in IPv4 format (e.g., 192.168.1.1).
    #[clap(
        long,
        env,
        default_value = "0.0.0.0",
        help = "The IP address that the HTTP server binds to, in IPv4 format",
        value_parser = ValueParser::new(|s: &str| {
            if s.parse::<std::net::Ipv4Addr>().is_err() {
                return Err("The bind IP address must be a valid IPv4 address.".to_string());
            }
            Ok(s.to_string())
        })
    )]
    pub bulkmailer_bind_ip: Option<String>,

    /// CORS allowed origins (default: "*")
    #[clap(
        long,
        default_value = "*",
        env,
        help = "Set the allowed CORS origins (comma-separated list, e.g., \"https://example.com, https://another.com\")",
        value_parser = ValueParser::new(|s: &str| -> Result<HashSet<String>, String> {
            let set: HashSet<String> = s.split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect();
            Ok(set)
        })
    )]
    pub bulkmailer_cors_origins: HashSet<String>,

    /// CORS max age in seconds (default: 86400)
    #[clap(
        long,
        default_value = "86400",
        env,
        help = "Set the CORS max age in seconds"
    )]
    pub bulkmailer_cors_max_age: i32,

    /// Enable ANSI logs (default: true)
    #[clap(long, default_value = "true", env, help = "Enable ANSI formatted logs")]
    pub bulkmailer_ansi_logs: bool,

    /// Enable log file output (default: false)
    /// If false, logs will be printed to stdout
    #[clap(
        long,
        default_value = "false",
        env,
        help = "Enable log file output (otherwise logs go to stdout)"
    )]
    pub bulkmailer_log_to_file: bool,

    /// Enable JSON logs (default: false)
    #[clap(
        long,
        default_value = "false",
        env,
        help = "Enable JSON formatted logs"
    )]
    pub bulkmailer_json_logs: bool,

    /// Maximum number of log files (default: 5)
    #[clap(
        long,
        default_value = "5",
        env,
        help = "Set the maximum number of server log files"
    )]
    pub bulkmailer_max_server_log_files: usize,

    #[clap(
        long,
        env,
        help = "Set the data directory for bulkmailer (database and log files)",
        value_parser = ValueParser::new(|s: &str| {
            let path = PathBuf::from(s);
            if !path.is_absolute() {
                return Err("Path must be an absolute directory path".to_string());
            }
            if !path.exists() {
                return Err(format!("Path {:?} does not exist", path));
            }
            if !path.is_dir() {
                return Err(format!("Path {:?} is not a directory", path));
            }
            Ok(s.to_string())
        })
    )]
    pub bulkmailer_root_dir: String,

    /// Keep scheduled sends in memory only. Records are lost on restart.
    #[clap(
        long,
        default_value = "false",
        env,
        help = "Keep scheduled sends in memory instead of the on-disk database"
    )]
    pub bulkmailer_memory_mode_enabled: bool,

    #[clap(
        long,
        env,
        default_value = "67108864",
        help = "Set the cache size for the scheduled send database in bytes"
    )]
    pub bulkmailer_database_cache_size: Option<usize>,

    #[clap(
        long,
        default_value = "60",
        env,
        help = "Seconds between two dispatch cycles of the scheduled send loop",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub bulkmailer_dispatch_interval_secs: u64,

    #[clap(
        long,
        default_value = "smtp.gmail.com",
        env,
        help = "Hostname of the outbound SMTP relay"
    )]
    pub bulkmailer_smtp_host: String,

    #[clap(
        long,
        default_value = "587",
        env,
        help = "Port of the outbound SMTP relay",
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub bulkmailer_smtp_port: u16,

    #[clap(
        long,
        default_value = "starttls",
        env,
        help = "Connection encryption used towards the SMTP relay"
    )]
    pub bulkmailer_smtp_encryption: RelayEncryption,

    #[clap(long, env, help = "Username for SMTP relay authentication")]
    pub bulkmailer_smtp_username: Option<String>,

    #[clap(long, env, help = "Password for SMTP relay authentication")]
    pub bulkmailer_smtp_password: Option<String>,

    #[clap(long, env, help = "Address placed in the From header of every message")]
    pub bulkmailer_sender_email: String,

    #[clap(long, env, help = "Display name placed in the From header")]
    pub bulkmailer_sender_name: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RelayEncryption {
    /// Implicit TLS, usually port 465
    #[clap(name = "ssl")]
    Ssl,
    /// Plain connection upgraded with STARTTLS, usually port 587
    #[clap(name = "starttls")]
    StartTls,
    #[clap(name = "none")]
    None,
}

impl fmt::Display for RelayEncryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayEncryption::Ssl => write!(f, "ssl"),
            RelayEncryption::StartTls => write!(f, "starttls"),
            RelayEncryption::None => write!(f, "none"),
        }
    }
}

impl Settings {
    #[cfg(test)]
    fn new_for_test() -> Self {
        Self {
            bulkmailer_log_level: "info".to_string(),
            bulkmailer_http_port: 8080,
            bulkmailer_bind_ip: Default::default(),
            bulkmailer_cors_origins: Default::default(),
            bulkmailer_cors_max_age: 86400,
            bulkmailer_ansi_logs: false,
            bulkmailer_log_to_file: false,
            bulkmailer_json_logs: false,
            bulkmailer_max_server_log_files: 5,
            bulkmailer_root_dir: std::env::temp_dir().to_string_lossy().into_owned(),
            bulkmailer_memory_mode_enabled: true,
            bulkmailer_database_cache_size: None,
            bulkmailer_dispatch_interval_secs: 60,
            bulkmailer_smtp_host: "localhost".to_string(),
            bulkmailer_smtp_port: 2525,
            bulkmailer_smtp_encryption: RelayEncryption::None,
            bulkmailer_smtp_username: None,
            bulkmailer_smtp_password: None,
            bulkmailer_sender_email: "noreply@example.com".to_string(),
            bulkmailer_sender_name: Some("Bulk Mailer".to_string()),
        }
    }
}
