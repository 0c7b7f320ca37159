//! Outbound message delivery.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Serialize;

use super::{ContactSubmission, RelayError};
use crate::config::ContactConfig;

/// Delivers one contact submission to a hosted mail service.
pub trait MessageRelay: Send + Sync {
    /// Sends the submission. One call is exactly one delivery attempt.
    fn send(&self, submission: &ContactSubmission) -> Result<(), RelayError>;
}

/// Template parameters, named after the fields of the mail template.
#[derive(Debug, Serialize)]
struct TemplateParams<'a> {
    name: &'a str,
    email: &'a str,
    title: &'a str,
    message: &'a str,
}

/// Request body accepted by the EmailJS send endpoint.
#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

/// Relay backed by the EmailJS REST API.
pub struct EmailJsRelay {
    client: Client,
    endpoint: String,
    service_id: String,
    template_id: String,
    public_key: String,
}

impl EmailJsRelay {
    /// Builds a relay from the contact settings.
    pub fn new(config: &ContactConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            service_id: config.service_id.clone(),
            template_id: config.template_id.clone(),
            public_key: config.public_key.clone(),
        })
    }

    fn request<'a>(&'a self, submission: &'a ContactSubmission) -> SendRequest<'a> {
        SendRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            template_params: TemplateParams {
                name: &submission.name,
                email: &submission.email,
                title: &submission.subject,
                message: &submission.message,
            },
        }
    }
}

impl MessageRelay for EmailJsRelay {
    fn send(&self, submission: &ContactSubmission) -> Result<(), RelayError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&self.request(submission))
            .send()
            .map_err(RelayError::Network)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().unwrap_or_default();
        Err(RelayError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
