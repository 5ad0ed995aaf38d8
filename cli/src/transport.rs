//! Blocking HTTP transport backed by ureq.

use book_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Transport};

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        // Statuses are interpreted by the core, so 4xx/5xx come back as data.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = %req.method, path = %req.path, "sending request");
        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => self.agent.get(&req.path).call(),
            (HttpMethod::Delete, _) => self.agent.delete(&req.path).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&req.path).send_empty(),
            (HttpMethod::Put, Some(body)) => self
                .agent
                .put(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(&req.path).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(format!("failed to read response body: {e}")))?;
        tracing::debug!(status, "response received");
        Ok(HttpResponse::new(status, body))
    }
}
