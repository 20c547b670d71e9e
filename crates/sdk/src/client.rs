//! Zabbix API Client Implementation

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::transport::{HttpTransport, Transport};
use crate::types::{is_auth_exempt, RequestEnvelope, LOGIN_METHOD};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

/// Zabbix API Client
///
/// Logs in lazily on the first call that needs a token and reuses the token
/// for the lifetime of the client. Every call takes `&mut self`; wrap the
/// client in a mutex to share it between tasks.
///
/// # Example
///
/// ```no_run
/// use zabbix_api::ApiClient;
/// use serde_json::json;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut client = ApiClient::new("https://example.org/zabbix", "api", "mypass")?;
/// let hosts = client.request("host.get", json!({"output": "extend"})).await?;
/// # Ok(())
/// # }
/// ```
pub struct ApiClient<T: Transport = HttpTransport> {
    config: ClientConfig,
    transport: T,
    id: u64,
    auth: Option<String>,
}

impl ApiClient<HttpTransport> {
    /// Create a client with the default 10 second timeout
    ///
    /// No network activity happens until the first request.
    pub fn new(
        endpoint: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Self::from_config(ClientConfig::new(endpoint, user, password))
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.api_url(), config.timeout)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> ApiClient<T> {
    /// Create a client over an existing transport
    ///
    /// The transport alone decides where requests go; `config.endpoint` is
    /// only reported back by [`ApiClient::endpoint`]. Use
    /// [`ApiClient::from_config`] to keep the two in step.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            id: 0,
            auth: None,
        }
    }

    /// Call `method` with `params` and return the `result` field
    ///
    /// Non-exempt methods trigger a `user.login` first if no token is held.
    /// A failed login aborts the call before it is sent.
    ///
    /// # Errors
    ///
    /// * [`ApiError::Http`] - transport failure, including timeouts
    /// * [`ApiError::Serialization`] - the reply was not a valid envelope
    /// * [`ApiError::Api`] - the server reported a non-zero error code
    /// * [`ApiError::UnexpectedLoginResult`] - login returned something other than a token
    pub async fn request(&mut self, method: &str, params: Value) -> Result<Value> {
        self.id += 1;
        let exempt = is_auth_exempt(method);

        if !exempt && self.auth.is_none() {
            self.login().await?;
            self.id += 1;
        }

        let auth = if exempt { None } else { self.auth.clone() };
        self.call(RequestEnvelope::new(method, params, self.id, auth))
            .await
    }

    /// Like [`ApiClient::request`], decoding the result into `R`
    pub async fn request_as<R: DeserializeOwned>(
        &mut self,
        method: &str,
        params: Value,
    ) -> Result<R> {
        let result = self.request(method, params).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Server API version (`apiinfo.version`, no login needed)
    pub async fn api_version(&mut self) -> Result<String> {
        self.request_as("apiinfo.version", json!({})).await
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    /// Id of the most recent request sent (0 before the first one)
    pub fn last_request_id(&self) -> u64 {
        self.id
    }

    /// Configured frontend URL
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn login(&mut self) -> Result<()> {
        let params = json!({
            "user": self.config.user,
            "password": self.config.password,
        });

        let result = self
            .call(RequestEnvelope::new(LOGIN_METHOD, params, self.id, None))
            .await?;

        match result {
            Value::String(token) => {
                info!(endpoint = %self.config.endpoint, user = %self.config.user, "Logged in");
                self.auth = Some(token);
                Ok(())
            }
            other => Err(ApiError::UnexpectedLoginResult(other)),
        }
    }

    async fn call(&self, request: RequestEnvelope) -> Result<Value> {
        debug!(
            method = %request.method,
            id = request.id,
            with_auth = request.auth.is_some(),
            "Sending API request"
        );

        let response = self.transport.send(&request).await?;

        response.into_result().map_err(|err| {
            warn!(
                method = %request.method,
                id = request.id,
                code = err.code,
                message = %err.message,
                data = %err.data,
                "API returned error"
            );
            ApiError::Api(err)
        })
    }
}
