use super::super::{
    config::{PoolConfig, optional_parsed, required},
    error::SqlResult,
};

const DEFAULT_PORT: u16 = 3306;

/// Runtime configuration describing how to connect to MySQL.
#[derive(Clone)]
pub struct MySqlConfig {
    /// Server host name or address.
    pub host: String,
    /// Server port, 3306 unless `MYSQL_PORT` says otherwise.
    pub port: u16,
    /// Account used for every pooled connection.
    pub user: String,
    /// Account password; redacted from `Debug` output.
    pub password: Option<String>,
    /// Schema holding the `scores` table.
    pub database: String,
    /// Pool size and acquire timeout.
    pub pool: PoolConfig,
}

impl MySqlConfig {
    /// Construct a configuration from explicit host, user and database name.
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            user: user.into(),
            password: None,
            database: database.into(),
            pool: PoolConfig::default(),
        }
    }

    /// Attach the account password to the configuration.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Build a configuration by reading the expected environment variables.
    pub fn from_env() -> SqlResult<Self> {
        let host = required("MYSQL_HOST")?;
        let user = required("MYSQL_USER")?;
        let database = required("MYSQL_DATABASE")?;

        let mut config = Self::new(host, user, database);
        if let Some(port) = optional_parsed("MYSQL_PORT")? {
            config.port = port;
        }
        if let Ok(password) = std::env::var("MYSQL_PASSWORD") {
            config = config.with_password(password);
        }
        config.pool = PoolConfig::from_env()?;

        Ok(config)
    }
}

impl std::fmt::Debug for MySqlConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("database", &self.database)
            .field("pool", &self.pool)
            .finish()
    }
}
