// Transport Port - carries one envelope to the server and back
use crate::error::Result;
use crate::types::{RequestEnvelope, ResponseEnvelope};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// Transport interface (allows scripted servers in tests)
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver one request envelope and decode the reply envelope
    ///
    /// Server-reported errors are NOT interpreted here; the caller inspects
    /// `ResponseEnvelope::error`.
    async fn send(&self, request: &RequestEnvelope) -> Result<ResponseEnvelope>;
}

/// HTTP POST transport (production)
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    /// Create a transport posting to `url` with a fixed request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &RequestEnvelope) -> Result<ResponseEnvelope> {
        let body = serde_json::to_vec(request)?;

        let bytes = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?
            .bytes()
            .await?;

        Ok(serde_json::from_slice(&bytes)?)
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::error::ApiError;
    use serde_json::Value;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Scripted reply for [`MockTransport`]
    pub enum MockReply {
        /// Raw JSON body, decoded as a response envelope
        Body(Value),
        /// Fail the call without a response
        Fail(ApiError),
    }

    /// Mock Transport for testing
    ///
    /// Replies are consumed in order; every request is recorded as the JSON
    /// value that would have been sent on the wire.
    #[derive(Clone, Default)]
    pub struct MockTransport {
        replies: Arc<Mutex<VecDeque<MockReply>>>,
        sent: Arc<Mutex<Vec<Value>>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a successful `result`
        pub fn reply_result(&self, result: Value) -> &Self {
            self.reply_body(serde_json::json!({
                "jsonrpc": "2.0",
                "result": result,
                "id": 0
            }))
        }

        /// Queue a server-reported error
        pub fn reply_error(&self, code: i64, message: &str, data: &str) -> &Self {
            self.reply_body(serde_json::json!({
                "jsonrpc": "2.0",
                "error": {"code": code, "message": message, "data": data},
                "id": 0
            }))
        }

        pub fn reply_body(&self, body: Value) -> &Self {
            self.replies.lock().unwrap().push_back(MockReply::Body(body));
            self
        }

        pub fn reply_failure(&self, err: ApiError) -> &Self {
            self.replies.lock().unwrap().push_back(MockReply::Fail(err));
            self
        }

        /// Requests sent so far, in order
        pub fn sent(&self) -> Vec<Value> {
            self.sent.lock().unwrap().clone()
        }

        /// Method names sent so far, in order
        pub fn sent_methods(&self) -> Vec<String> {
            self.sent()
                .iter()
                .map(|req| req["method"].as_str().unwrap_or_default().to_string())
                .collect()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(&self, request: &RequestEnvelope) -> Result<ResponseEnvelope> {
            self.sent.lock().unwrap().push(serde_json::to_value(request)?);

            let reply = self.replies.lock().unwrap().pop_front();
            match reply {
                Some(MockReply::Body(body)) => Ok(serde_json::from_value(body)?),
                Some(MockReply::Fail(err)) => Err(err),
                None => Err(ApiError::Config(format!(
                    "no scripted reply for {}",
                    request.method
                ))),
            }
        }
    }
}
