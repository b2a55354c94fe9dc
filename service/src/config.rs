use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "qwen2.5-coder:3b";

#[derive(Clone, Debug, PartialEq)]
pub enum RustEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RustEnvParseError(String);

impl fmt::Display for RustEnvParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "unknown runtime environment '{}', expected development, production or staging",
            self.0
        )
    }
}

impl std::error::Error for RustEnvParseError {}

impl FromStr for RustEnv {
    type Err = RustEnvParseError;
    fn from_str(level: &str) -> Result<RustEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RustEnv::Development),
            "production" => Ok(RustEnv::Production),
            "staging" => Ok(RustEnv::Staging),
            _ => Err(RustEnvParseError(level.to_owned())),
        }
    }
}

impl fmt::Display for RustEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RustEnv::Development => write!(f, "development"),
            RustEnv::Production => write!(f, "production"),
            RustEnv::Staging => write!(f, "staging"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// A list of full CORS origin URLs that are allowed to receive server responses.
    /// When empty, any origin is allowed but credentials are not.
    #[arg(long, env = "CORS_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,

    /// Sets the SQLite database URL to connect to
    #[arg(short, long, env, default_value = "sqlite://tonish.db?mode=rwc")]
    database_url: String,

    /// Maximum number of database connections in the pool
    #[arg(long, env, default_value_t = 10)]
    pub db_max_connections: u32,

    /// Minimum number of idle database connections to maintain
    #[arg(long, env, default_value_t = 1)]
    pub db_min_connections: u32,

    /// Timeout in seconds for establishing a new database connection
    #[arg(long, env, default_value_t = 8)]
    pub db_connect_timeout_secs: u64,

    /// Timeout in seconds for acquiring a connection from the pool
    #[arg(long, env, default_value_t = 8)]
    pub db_acquire_timeout_secs: u64,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "0.0.0.0")]
    pub interface: String,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 8080)]
    pub port: u16,

    /// Secret used to sign and verify login tokens.
    #[arg(long, env, hide_env_values = true)]
    jwt_secret: Option<String>,

    /// Lifetime of a login token in seconds (default: 7 days)
    #[arg(long, env, default_value_t = 604_800)]
    pub jwt_expiry_seconds: u64,

    /// Reject task, notebook and page requests that carry no valid token
    #[arg(long, env, action = clap::ArgAction::Set, default_value_t = false)]
    pub require_auth: bool,

    /// Email of the user created at startup when it does not exist yet
    #[arg(long, env)]
    default_user_email: Option<String>,

    /// Password of the user created at startup
    #[arg(long, env, hide_env_values = true)]
    default_user_password: Option<String>,

    /// Display name of the user created at startup
    #[arg(long, env, default_value = "Default User")]
    default_user_name: String,

    /// Base URL of the Ollama server used for AI assistance
    #[arg(long, env, default_value = DEFAULT_OLLAMA_URL)]
    ollama_url: String,

    /// Model name passed to Ollama
    #[arg(long, env, default_value = DEFAULT_OLLAMA_MODEL)]
    ollama_model: String,

    /// Timeout in seconds for a single Ollama request
    #[arg(long, env, default_value_t = 120)]
    pub ollama_timeout_secs: u64,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(short, long, env, default_value_t = LevelFilter::Info)]
    pub log_level_filter: LevelFilter,

    /// Set the Rust runtime environment to use.
    #[arg(short, long, env, default_value_t = RustEnv::Development)]
    pub runtime_env: RustEnv,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    pub fn set_database_url(mut self, database_url: String) -> Self {
        self.database_url = database_url;
        self
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn set_jwt_secret(mut self, jwt_secret: String) -> Self {
        self.jwt_secret = Some(jwt_secret);
        self
    }

    pub fn jwt_secret(&self) -> Option<&str> {
        self.jwt_secret.as_deref()
    }

    /// The default user's email and password, when both are configured.
    pub fn default_user_credentials(&self) -> Option<(&str, &str)> {
        match (&self.default_user_email, &self.default_user_password) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Some((email.as_str(), password.as_str()))
            }
            _ => None,
        }
    }

    pub fn default_user_name(&self) -> &str {
        &self.default_user_name
    }

    pub fn set_ollama_url(mut self, ollama_url: String) -> Self {
        self.ollama_url = ollama_url;
        self
    }

    pub fn ollama_url(&self) -> &str {
        self.ollama_url.trim_end_matches('/')
    }

    pub fn ollama_model(&self) -> &str {
        &self.ollama_model
    }

    pub fn runtime_env(&self) -> RustEnv {
        self.runtime_env.clone()
    }

    pub fn is_production(&self) -> bool {
        self.runtime_env() == RustEnv::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["tonish"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn explicit_flags_override_defaults() {
        let config = parse(&[
            "--port",
            "9000",
            "--allowed-origins",
            "http://a.test,http://b.test",
            "--require-auth",
            "true",
            "--runtime-env",
            "PRODUCTION",
            "--log-level-filter",
            "debug",
        ]);

        assert_eq!(config.port, 9000);
        assert_eq!(
            config.allowed_origins,
            vec!["http://a.test".to_owned(), "http://b.test".to_owned()]
        );
        assert!(config.require_auth);
        assert!(config.is_production());
        assert_eq!(config.log_level_filter, LevelFilter::Debug);
    }

    #[test]
    fn unknown_runtime_env_is_rejected() {
        let result = Config::try_parse_from(["tonish", "--runtime-env", "qa"]);
        assert!(result.is_err());
    }

    #[test]
    fn default_user_needs_both_email_and_password() {
        let config = parse(&["--default-user-email", "me@example.com"]);
        assert!(config.default_user_credentials().is_none());

        let config = parse(&[
            "--default-user-email",
            "me@example.com",
            "--default-user-password",
            "pw",
        ]);
        assert_eq!(
            config.default_user_credentials(),
            Some(("me@example.com", "pw"))
        );
    }

    #[test]
    fn ollama_url_drops_trailing_slash() {
        let config = parse(&[]).set_ollama_url("http://ollama:11434/".to_owned());
        assert_eq!(config.ollama_url(), "http://ollama:11434");
    }

    #[test]
    fn rust_env_parses_case_insensitively() {
        assert_eq!("Staging".parse::<RustEnv>(), Ok(RustEnv::Staging));
        assert!("prod".parse::<RustEnv>().is_err());
    }
}
