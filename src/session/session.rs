use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

use reqwest::header::{CONTENT_TYPE, COOKIE};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::config::SessionConfig;
use super::filter::Filter;
use crate::error::{Error, Result};

pub const SESSION_COOKIE: &str = "JSESSIONID";
pub const CREDENTIALS_TYPE_ID: &str = "com.tintri.api.rest.vcommon.dto.rbac.RestApiCredentials";
// the version segment of the error type follows the API version, so only the suffix is matched
const ERROR_TYPE_SUFFIX: &str = ".dto.domain.beans.TintriError";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Post,
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "GET" => Ok(Method::Get),
            "PUT" => Ok(Method::Put),
            "POST" => Ok(Method::Post),
            other => Err(Error::InvalidRequestMethod(other.to_string())),
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Put => write!(f, "PUT"),
            Method::Post => write!(f, "POST"),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(m: Method) -> Self {
        match m {
            Method::Get => reqwest::Method::GET,
            Method::Put => reqwest::Method::PUT,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// An authenticated session with a VMstore appliance.
///
/// Obtained through [`VmStore::login`] and kept for the lifetime of the
/// process. Every call replays the session cookie returned at login.
pub struct VmStore {
    client: reqwest::Client,
    config: SessionConfig,
    user: String,
    session: String,
}

impl Debug for VmStore {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("VmStore")
            .field("device", &self.config.device)
            .field("user", &self.user)
            .field("api_version", &self.config.api_version)
            .field("ssl_verify", &self.config.ssl_verify)
            .finish_non_exhaustive()
    }
}

fn build_client(config: &SessionConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().danger_accept_invalid_certs(!config.ssl_verify);
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

impl VmStore {
    /// Logs into the appliance and captures the `JSESSIONID` cookie.
    ///
    /// Fails with [`Error::LoginRejected`] when the appliance refuses the
    /// credentials and with [`Error::Transport`] when it cannot be reached.
    pub async fn login(config: SessionConfig, user: &str, password: &str) -> Result<Self> {
        if !config.ssl_verify {
            warn!("[SESSION] TLS certificate validation disabled for {}", config.device);
        }
        let client = build_client(&config)?;
        let url = config.url("session/login");
        let payload = json!({
            "username": user,
            "password": password,
            "typeId": CREDENTIALS_TYPE_ID,
        });

        info!("[SESSION] Logging into {} as {}", config.device, user);
        let res = client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        let session = res
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .map(|c| c.value().to_string());

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| server_error(&v))
                .map(|e| e.to_string())
                .unwrap_or(body);
            return Err(Error::LoginRejected(format!("{}: {}", status, reason)));
        }

        let session = match session {
            Some(s) if !s.is_empty() => s,
            _ => {
                return Err(Error::LoginRejected(
                    "no session cookie in login response".to_string(),
                ))
            }
        };

        info!("[SESSION] Session established with {}", config.device);
        Ok(VmStore {
            client,
            config,
            user: user.to_string(),
            session,
        })
    }

    /// Invalidates the session cookie on the appliance.
    pub async fn logout(self) -> Result<()> {
        let url = self.config.url("session/logout");
        let res = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(COOKIE, self.cookie())
            .send()
            .await?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(Error::Status { status, body });
        }
        info!("[SESSION] Logged out of {}", self.config.device);
        Ok(())
    }

    pub fn device(&self) -> &str {
        &self.config.device
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn session_token(&self) -> &str {
        &self.session
    }

    pub fn api_version(&self) -> &str {
        &self.config.api_version
    }

    pub fn ssl_verify(&self) -> bool {
        self.config.ssl_verify
    }

    fn cookie(&self) -> String {
        format!("{}={}", SESSION_COOKIE, self.session)
    }

    /// Generic request against `/api/{version}/{uri}`.
    ///
    /// `payload` is only sent for PUT and POST. An empty response body
    /// decodes to `Value::Null`. A body carrying an error-typed object, or an
    /// array holding one, is turned into [`Error::Server`].
    pub async fn request(&self, uri: &str, method: Method, payload: Option<&Value>) -> Result<Value> {
        let url = self.config.url(uri);
        debug!("[SESSION] {} {}", method, url);

        let mut req = self
            .client
            .request(method.into(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(COOKIE, self.cookie());
        if method != Method::Get {
            if let Some(payload) = payload {
                req = req.body(serde_json::to_vec(payload)?);
            }
        }

        let res = req.send().await?;
        let status = res.status();
        let body = res.text().await?;

        let value = match parse_body(&body) {
            Ok(v) => v,
            Err(_) if !status.is_success() => return Err(Error::Status { status, body }),
            Err(e) => return Err(e),
        };

        if let Some(err) = server_error(&value) {
            warn!("[SESSION] {} {} returned {}", method, uri, err);
            return Err(err);
        }
        if !status.is_success() {
            return Err(Error::Status { status, body });
        }
        Ok(value)
    }

    async fn get(&self, uri: &str) -> Result<Value> {
        self.request(uri, Method::Get, None).await
    }

    /// Lists virtual machines, narrowed by `filter` (e.g. `name`, `isPowered`,
    /// `vcenterName`, `host`).
    pub async fn get_vms(&self, filter: &Filter) -> Result<Value> {
        self.get(&filter.apply("vm")).await
    }

    pub async fn get_vm(&self, vm_id: &str) -> Result<Value> {
        self.get(&format!("vm/{}", vm_id)).await
    }

    pub async fn get_virtual_disks(&self, filter: &Filter) -> Result<Value> {
        self.get(&filter.apply("virtualDisk")).await
    }

    /// All virtual disks on the appliance.
    pub async fn get_virtual_disk(&self) -> Result<Value> {
        self.get("virtualDisk").await
    }

    /// Pushes a QoS `MultipleSelectionRequest`. Usually reached through
    /// `VirtualMachine::update_qos`.
    pub async fn set_qos(&self, payload: &Value) -> Result<Value> {
        self.request("vm/qosConfig", Method::Put, Some(payload)).await
    }

    pub async fn get_datastores(&self) -> Result<Value> {
        self.get("datastore").await
    }

    pub async fn get_datastore(&self, datastore_uuid: &str) -> Result<Value> {
        self.get(&format!("datastore/{}", datastore_uuid)).await
    }

    pub async fn get_realtime_datastore_performance(&self, datastore_uuid: &str) -> Result<Value> {
        self.get(&format!("datastore/{}/statsRealtime", datastore_uuid))
            .await
    }

    pub async fn get_appliances(&self) -> Result<Value> {
        self.get("appliance").await
    }

    pub async fn get_appliance(&self, appliance_uuid: &str) -> Result<Value> {
        self.get(&format!("appliance/{}", appliance_uuid)).await
    }

    pub async fn get_service_groups(&self) -> Result<Value> {
        self.get("servicegroup").await
    }

    pub async fn get_service_group(&self, service_group_uuid: &str) -> Result<Value> {
        self.get(&format!("servicegroup/{}", service_group_uuid))
            .await
    }

    /// Escape hatch for resources without a dedicated helper.
    pub async fn get_view(&self, view: &str, request_method: &str, payload: Option<&Value>) -> Result<Value> {
        let method = request_method.parse::<Method>()?;
        self.request(view, method, payload).await
    }
}

fn parse_body(body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(body)?)
}

/// Scans a response body for an error-typed payload.
pub(crate) fn server_error(value: &Value) -> Option<Error> {
    match value {
        Value::Array(items) => items.iter().find_map(error_object),
        other => error_object(other),
    }
}

fn error_object(value: &Value) -> Option<Error> {
    let type_id = value.get("typeId")?.as_str()?;
    if !type_id.ends_with(ERROR_TYPE_SUFFIX) {
        return None;
    }
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let code = match value.get("code") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "".to_string(),
        Some(other) => other.to_string(),
    };
    Some(Error::Server { message, code })
}
