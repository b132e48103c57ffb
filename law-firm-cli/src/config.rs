use std::path::Path;
use std::str::FromStr;

use law_firm::adapters::outbound::InMemoryRecords;
use rust_decimal::Decimal;
use serde::Deserialize;
use strum::{Display, EnumString};

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    #[serde(default)]
    pub records: RecordSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    /// User the forms act as unless `--user` is given.
    pub user: String,
    pub log_filter: String,
    pub json_logs: bool,
}

/// Related records the lookups answer from.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct RecordSettings {
    #[serde(default)]
    pub clients: Vec<ClientRecord>,
    #[serde(default)]
    pub cases: Vec<CaseRecord>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ClientRecord {
    pub name: String,
    pub billing_rate: Option<Decimal>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct CaseRecord {
    pub name: String,
    pub client: Option<String>,
}

impl RecordSettings {
    pub fn into_records(self) -> InMemoryRecords {
        let records = self
            .clients
            .into_iter()
            .fold(InMemoryRecords::new(), |records, client| {
                records.with_client_rate(client.name, client.billing_rate)
            });
        self.cases.into_iter().fold(records, |records, case| {
            records.with_case_client(case.name, case.client.map(Into::into))
        })
    }
}

pub fn read_config(config_directory: &Path) -> Result<Settings, config::ConfigError> {
    let name = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".into());
    let environment = Environment::from_str(&name)
        .map_err(|_| config::ConfigError::Message(format!("Unknown APP_ENVIRONMENT '{}'", name)))?;

    load(config_directory, environment)
}

pub fn load(
    config_directory: &Path,
    environment: Environment,
) -> Result<Settings, config::ConfigError> {
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(config::File::from(config_directory.join(environment_filename)))
        .add_source(
            config::Environment::with_prefix("LAW_FIRM")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}
