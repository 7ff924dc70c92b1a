use std::{net::IpAddr, path::PathBuf, str::FromStr, time::Duration};

use serde::Deserialize;
use tracing::Level;

use crate::store::Latency;

/// Every variable is read with this prefix, e.g. `PRESSROOM_PORT`.
pub const ENV_PREFIX: &str = "PRESSROOM_";

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("invalid environment: {0}")]
	Env(#[from] envy::Error),
	#[error("invalid log level {0:?}")]
	LogLevel(String),
	#[error("page size must be at least 1")]
	PageSize,
}

/// These can be removed when [`serde`] supports
/// literal defaults: <https://github.com/serde-rs/serde/issues/368>
fn host() -> IpAddr {
	IpAddr::from([127, 0, 0, 1])
}

fn port() -> u16 {
	3000
}

fn page_size() -> usize {
	6
}

fn fetch_delay_ms() -> u64 {
	800
}

fn mutation_delay_ms() -> u64 {
	500
}

fn log_level() -> String {
	"info".into()
}

/// Runtime configuration, read from `PRESSROOM_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	#[serde(default = "host")]
	pub host: IpAddr,
	#[serde(default = "port")]
	pub port: u16,
	/// Where the session and theme records are saved. Unset keeps them in memory.
	#[serde(default)]
	pub storage_dir: Option<PathBuf>,
	#[serde(default = "page_size")]
	pub page_size: usize,
	#[serde(default = "fetch_delay_ms")]
	pub fetch_delay_ms: u64,
	#[serde(default = "mutation_delay_ms")]
	pub mutation_delay_ms: u64,
	#[serde(default = "log_level")]
	pub log_level: String,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			host: host(),
			port: port(),
			storage_dir: None,
			page_size: page_size(),
			fetch_delay_ms: fetch_delay_ms(),
			mutation_delay_ms: mutation_delay_ms(),
			log_level: log_level(),
		}
	}
}

impl Config {
	/// Reads the configuration from the process environment.
	pub fn from_env() -> Result<Self, Error> {
		Self::from_vars(std::env::vars())
	}

	/// Reads the configuration from the given variables, ignoring those without the prefix.
	pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Result<Self, Error> {
		let config = envy::prefixed(ENV_PREFIX).from_iter::<_, Self>(vars)?;

		config.validate()?;
		Ok(config)
	}

	fn validate(&self) -> Result<(), Error> {
		if self.page_size == 0 {
			return Err(Error::PageSize);
		}

		self.level()?;
		Ok(())
	}

	pub fn level(&self) -> Result<Level, Error> {
		Level::from_str(&self.log_level).map_err(|_| Error::LogLevel(self.log_level.clone()))
	}

	pub fn latency(&self) -> Latency {
		Latency {
			fetch: Duration::from_millis(self.fetch_delay_ms),
			mutation: Duration::from_millis(self.mutation_delay_ms),
		}
	}
}
