use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::models::ContactRequest;

/// Notifier
///
/// Contract for the contact-email side effect. The production implementation
/// invokes the `send-contact-email` serverless function hosted alongside the
/// database; the mock records invocations for tests. Like the storage layer,
/// this seam keeps the handler testable without a network connection.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends the notification email for one validated contact submission.
    /// The payload is the submission's fields, serialized as JSON.
    async fn send_contact_email(&self, submission: &ContactRequest) -> Result<(), String>;
}

/// SupabaseFunctionsClient
///
/// Invokes the named edge function over HTTP:
/// `POST {project_url}/functions/v1/send-contact-email` with the anon API key.
pub struct SupabaseFunctionsClient {
    client: reqwest::Client,
    functions_base: String,
    anon_key: String,
}

impl SupabaseFunctionsClient {
    pub fn new(project_url: &str, anon_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            functions_base: format!("{}/functions/v1", project_url.trim_end_matches('/')),
            anon_key: anon_key.to_string(),
        }
    }
}

#[async_trait]
impl Notifier for SupabaseFunctionsClient {
    async fn send_contact_email(&self, submission: &ContactRequest) -> Result<(), String> {
        let url = format!("{}/send-contact-email", self.functions_base);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .json(submission)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!(
                "send-contact-email returned {}",
                response.status()
            ));
        }
        Ok(())
    }
}

/// MockNotifier
///
/// Records every payload it is asked to send; optionally fails on demand so
/// tests can exercise the uniform-failure path of the contact handler.
pub struct MockNotifier {
    pub should_fail: bool,
    pub sent: Mutex<Vec<ContactRequest>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            should_fail: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn new_failing() -> Self {
        Self {
            should_fail: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send_contact_email(&self, submission: &ContactRequest) -> Result<(), String> {
        if self.should_fail {
            return Err("Mock Notifier Error: Simulation requested".to_string());
        }
        self.sent.lock().unwrap().push(submission.clone());
        Ok(())
    }
}

/// NotifierState
///
/// The concrete type used to share the notifier across the application state.
pub type NotifierState = Arc<dyn Notifier>;
