use secrecy::Secret;
use serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub document_service: DocumentServiceSettings,
}

#[derive(Deserialize, Clone)]
pub struct DocumentServiceSettings {
    /// Base URL of the document service, without a trailing slash.
    pub url: String,
    /// Per-request timeout applied to delete calls.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Bearer token attached to requests when the service requires auth.
    #[serde(default)]
    pub api_token: Option<Secret<String>>,
}

fn default_request_timeout_secs() -> u64 {
    10
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("config");

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
