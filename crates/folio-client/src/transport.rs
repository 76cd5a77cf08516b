//! HTTP implementation of `SubmitTransport`.
//!
//! Posts the five fields form-encoded to the intake URL.  The intake
//! endpoint answers every request with the response schema, including
//! rejections sent with a 4xx/5xx status, so a non-2xx reply is decoded
//! like any other.  Only a missing or undecodable body is a transport error.

use std::time::Duration;

use tracing::debug;

use folio_contracts::{
    error::{FolioError, FolioResult},
    response::IntakeResponse,
    submission::ContactForm,
};
use folio_core::traits::SubmitTransport;

/// Blocking HTTP transport backed by a shared `ureq::Agent`.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
    url: String,
}

impl HttpTransport {
    /// A transport with `ureq`'s default timeouts.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            url: url.into(),
        }
    }

    /// A transport that gives up after `timeout`.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl SubmitTransport for HttpTransport {
    fn submit(&self, form: &ContactForm) -> FolioResult<IntakeResponse> {
        debug!(url = %self.url, "posting contact form");

        match self.agent.post(&self.url).send_form(&form.to_pairs()) {
            Ok(response) => decode(response),
            Err(ureq::Error::Status(code, response)) => {
                decode(response).map_err(|e| FolioError::Transport {
                    reason: format!("intake endpoint answered HTTP {code}: {e}"),
                })
            }
            Err(ureq::Error::Transport(transport)) => Err(FolioError::Transport {
                reason: transport.to_string(),
            }),
        }
    }
}

fn decode(response: ureq::Response) -> FolioResult<IntakeResponse> {
    response
        .into_json::<IntakeResponse>()
        .map_err(|e| FolioError::MalformedResponse {
            reason: e.to_string(),
        })
}
