use std::time::Duration;

pub const DEFAULT_API_VERSION: &str = "v310";

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// FQDN or IP address of the VMstore, optionally with a `:port` suffix.
    pub device: String,
    pub api_version: String,
    pub scheme: String, // https in production, http for local fakes
    pub ssl_verify: bool,
    pub timeout: Option<Duration>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            device: "".to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            scheme: "https".to_string(),
            ssl_verify: false,
            timeout: None,
        }
    }
}

impl SessionConfig {
    pub fn new(device: &str) -> Self {
        SessionConfig {
            device: device.to_string(),
            ..Default::default()
        }
    }

    pub fn base_url(&self) -> String {
        format!("{}://{}/api/{}", self.scheme, self.device, self.api_version)
    }

    pub fn url(&self, uri: &str) -> String {
        format!("{}/{}", self.base_url(), uri)
    }
}
