use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use validator::Validate;

use crate::{Error, MAX_EMAIL_CHARS, MAX_FIELD_CHARS, sanitize_opt};

static RE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Which fields a deployment insists on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormPolicy {
    pub require_inquiry: bool,
    /// `0` turns the length check off.
    pub min_message_len: usize,
}

impl Default for FormPolicy {
    fn default() -> Self {
        Self {
            require_inquiry: true,
            min_message_len: 10,
        }
    }
}

/// Raw contact form payload as posted by the website.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub inquiry: Option<String>,
    pub message: Option<String>,
    pub botcheck: Option<String>,
    #[serde(rename = "h-captcha-response")]
    pub h_captcha_response: Option<String>,
    #[serde(rename = "hcaptchaToken")]
    pub hcaptcha_token: Option<String>,
    #[serde(rename = "g-recaptcha-response")]
    pub g_recaptcha_response: Option<String>,
    #[serde(rename = "recaptchaToken")]
    pub recaptcha_token: Option<String>,
}

/// A sanitized submission, ready to be relayed.
///
/// Presence and length are settled by sanitizing and the missing-field
/// check; `validate` only covers the email shape.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct Submission {
    pub name: String,
    #[validate(regex(path = *RE_EMAIL))]
    pub email: String,
    pub company: String,
    pub phone: String,
    pub inquiry: String,
    pub message: String,
}

impl ContactForm {
    /// First non-empty CAPTCHA token, whichever widget produced it.
    pub fn captcha_token(&self) -> Option<&str> {
        [
            &self.h_captcha_response,
            &self.hcaptcha_token,
            &self.g_recaptcha_response,
            &self.recaptcha_token,
        ]
        .into_iter()
        .filter_map(|token| token.as_deref())
        .map(str::trim)
        .find(|token| !token.is_empty())
    }

    pub fn is_spam(&self) -> bool {
        self.botcheck
            .as_deref()
            .is_some_and(|value| !value.trim().is_empty())
    }

    pub fn into_submission(self, policy: &FormPolicy) -> crate::Result<Submission> {
        if self.is_spam() {
            return Err(Error::SpamDetected);
        }

        let submission = Submission {
            name: sanitize_opt(self.name.as_deref(), MAX_FIELD_CHARS),
            email: sanitize_opt(self.email.as_deref(), MAX_EMAIL_CHARS),
            company: sanitize_opt(self.company.as_deref(), MAX_FIELD_CHARS),
            phone: sanitize_opt(self.phone.as_deref(), MAX_FIELD_CHARS),
            inquiry: sanitize_opt(self.inquiry.as_deref(), MAX_FIELD_CHARS),
            message: sanitize_opt(self.message.as_deref(), MAX_FIELD_CHARS),
        };

        let missing = submission.missing_fields(policy);
        if !missing.is_empty() {
            return Err(Error::MissingFields(missing));
        }

        submission.validate().map_err(|_| Error::InvalidEmail)?;

        if submission.message.chars().count() < policy.min_message_len {
            return Err(Error::MessageTooShort(policy.min_message_len));
        }

        Ok(submission)
    }
}

impl Submission {
    fn missing_fields(&self, policy: &FormPolicy) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push("name");
        }
        if self.email.is_empty() {
            missing.push("email");
        }
        if policy.require_inquiry && self.inquiry.is_empty() {
            missing.push("inquiry");
        }
        if self.message.is_empty() {
            missing.push("message");
        }
        missing
    }
}
