//! Contact form submissions and the transport that delivers them.

use crate::{
    core::editor::require,
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Raw form fields as posted by the public page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// A validated submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl TryFrom<&ContactForm> for ContactSubmission {
    type Error = Error;

    fn try_from(form: &ContactForm) -> Result<Self> {
        let email = require(form.email.as_ref(), "Email")?;
        if !email.contains('@') {
            return Err(Error::validation("Email address is not valid"));
        }
        Ok(Self {
            name: require(form.name.as_ref(), "Name")?,
            email,
            subject: require(form.subject.as_ref(), "Subject")?,
            message: require(form.message.as_ref(), "Message")?,
        })
    }
}

/// Where submissions go.
pub trait ContactTransport: Send + Sync {
    /// Hands one submission over for delivery.
    fn deliver(&self, submission: &ContactSubmission) -> Result<()>;
}

/// Records submissions in the application log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogContactTransport;

impl ContactTransport for LogContactTransport {
    fn deliver(&self, submission: &ContactSubmission) -> Result<()> {
        info!(
            name = %submission.name,
            email = %submission.email,
            subject = %submission.subject,
            message_len = submission.message.len(),
            "Contact form submission received"
        );
        Ok(())
    }
}

/// Validates a posted form and delivers it.
pub fn submit(transport: &dyn ContactTransport, form: &ContactForm) -> Result<ContactSubmission> {
    let submission = ContactSubmission::try_from(form)?;
    transport.deliver(&submission)?;
    Ok(submission)
}
