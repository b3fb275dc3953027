use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, instrument};
use url::Url;

use crate::libreg::tools::error::{Result, ToolError};

const USER_AGENT: &str = concat!("libreg-tools/", env!("CARGO_PKG_VERSION"));

/// Source of remote bytes. The sync orchestration only talks to the network
/// through this trait.
pub trait Fetch {
    /// Downloads the body behind `url`. Non-success statuses are errors.
    fn fetch(&self, url: &Url) -> Result<Vec<u8>>;
}

/// Blocking HTTP client used by the command line tool.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a client. Without a timeout a stalled server blocks the run.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(url = %url))]
    fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        let response = self.client.get(url.as_str()).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes()?;
        debug!(bytes = body.len(), "response received");
        Ok(body.to_vec())
    }
}
