use std::path::PathBuf;

use serde::Deserialize;
use tracing_subscriber::filter::LevelFilter;

pub mod bindable;
pub use bindable::BindableAddr;

#[derive(Deserialize)]
pub struct Config {
	pub address: BindableAddr,
	#[serde(default = "default_log_level")]
	pub log_level: LogLevel,
	#[serde(default = "default_database_url")]
	pub database_url: String,
	/// Uploaded images for all record types live in this single directory.
	#[serde(default = "default_upload_dir")]
	pub upload_dir: PathBuf,
}

fn default_database_url() -> String {
	"sqlite://staffboard.db".to_owned()
}

fn default_upload_dir() -> PathBuf {
	PathBuf::from("uploads")
}

fn deserialize_level_filter<'de, D: serde::de::Deserializer<'de>>(
	d: D,
) -> Result<LevelFilter, D::Error>
where
	D::Error: serde::de::Error,
{
	String::deserialize(d)?
		.parse()
		.map_err(serde::de::Error::custom)
}

#[derive(Clone, Copy, Deserialize)]
#[serde(from = "LogLevelSerdeHelper")]
pub struct LogLevel {
	pub internal: LevelFilter,
	pub external: LevelFilter,
}

const fn default_log_level_internal() -> LevelFilter {
	LevelFilter::INFO
}

const fn default_log_level_external() -> LevelFilter {
	LevelFilter::WARN
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LogLevelSerdeHelper {
	#[serde(deserialize_with = "deserialize_level_filter")]
	Together(LevelFilter),
	Separate {
		#[serde(
			deserialize_with = "deserialize_level_filter",
			default = "default_log_level_internal"
		)]
		internal: LevelFilter,
		#[serde(
			deserialize_with = "deserialize_level_filter",
			default = "default_log_level_external"
		)]
		external: LevelFilter,
	},
}

impl From<LogLevelSerdeHelper> for LogLevel {
	fn from(helper: LogLevelSerdeHelper) -> Self {
		match helper {
			LogLevelSerdeHelper::Together(level) => Self {
				internal: level,
				external: level,
			},
			LogLevelSerdeHelper::Separate { internal, external } => Self { internal, external },
		}
	}
}

const fn default_log_level() -> LogLevel {
	LogLevel {
		internal: default_log_level_internal(),
		external: default_log_level_external(),
	}
}

pub fn config() -> Result<Config, figment::Error> {
	use figment::providers::Format as _;

	figment::Figment::new()
		.merge(figment::providers::Toml::file("staffboard.toml"))
		.merge(figment::providers::Env::prefixed("STAFFBOARD_"))
		.extract()
}

#[cfg(test)]
mod test {
	use figment::providers::Format as _;

	use super::Config;

	#[test]
	fn minimal_config_gets_defaults() {
		let config: Config = figment::Figment::new()
			.merge(figment::providers::Toml::string(
				r#"address = "tcp://127.0.0.1:8080""#,
			))
			.extract()
			.unwrap();
		assert_eq!(config.database_url, "sqlite://staffboard.db");
		assert_eq!(config.upload_dir, std::path::Path::new("uploads"));
	}

	#[test]
	fn log_level_accepts_single_and_split_forms() {
		let config: Config = figment::Figment::new()
			.merge(figment::providers::Toml::string(
				"address = \"127.0.0.1:1234\"\nlog_level = \"debug\"",
			))
			.extract()
			.unwrap();
		assert_eq!(
			config.log_level.internal,
			tracing_subscriber::filter::LevelFilter::DEBUG
		);
		assert_eq!(config.log_level.internal, config.log_level.external);

		let config: Config = figment::Figment::new()
			.merge(figment::providers::Toml::string(
				"address = \"127.0.0.1:1234\"\n[log_level]\ninternal = \"trace\"",
			))
			.extract()
			.unwrap();
		assert_eq!(
			config.log_level.internal,
			tracing_subscriber::filter::LevelFilter::TRACE
		);
		assert_eq!(
			config.log_level.external,
			tracing_subscriber::filter::LevelFilter::WARN
		);
	}
}
