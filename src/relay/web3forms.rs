use async_trait::async_trait;
use formrelay_contact::Submission;
use serde::Serialize;

use super::{Delivery, UpstreamBody, UpstreamReply};
use crate::config::Web3FormsConfig;
use crate::error::RelayError;

/// JSON body expected by the Web3Forms submit endpoint.
#[derive(Serialize)]
struct Payload<'a> {
    access_key: &'a str,
    subject: &'a str,
    from_name: &'a str,
    name: &'a str,
    email: &'a str,
    company: &'a str,
    phone: &'a str,
    inquiry: &'a str,
    message: &'a str,
    botcheck: &'a str,
}

pub struct Web3Forms {
    client: reqwest::Client,
    endpoint: String,
    access_key: String,
    subject: String,
    from_name: String,
}

impl Web3Forms {
    /// `None` when no access key is configured.
    pub fn from_config(config: &Web3FormsConfig, client: reqwest::Client) -> Option<Self> {
        let access_key = config.access_key()?;

        Some(Self {
            client,
            endpoint: config.endpoint.clone(),
            access_key: access_key.to_owned(),
            subject: config.subject.clone(),
            from_name: config.from_name.clone(),
        })
    }
}

#[async_trait]
impl Delivery for Web3Forms {
    fn name(&self) -> &'static str {
        "web3forms"
    }

    async fn deliver(&self, submission: &Submission) -> Result<UpstreamReply, RelayError> {
        let payload = Payload {
            access_key: &self.access_key,
            subject: &self.subject,
            from_name: &self.from_name,
            name: &submission.name,
            email: &submission.email,
            company: &submission.company,
            phone: &submission.phone,
            inquiry: &submission.inquiry,
            message: &submission.message,
            botcheck: "",
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| RelayError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RelayError::UpstreamUnavailable(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Web3Forms rejected the submission");
        }

        Ok(UpstreamReply {
            ok: status.is_success(),
            body: UpstreamBody::parse(&text),
        })
    }
}
