//! Verifies and forwards contact form submissions to the delivery backend

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use formrelay_contact::{ContactForm, FormPolicy, Submission};

use crate::config::{Config, DeliveryProvider};
use crate::error::RelayError;

mod captcha;
mod reply;
mod smtp;
mod web3forms;

pub use captcha::{CaptchaProvider, CaptchaVerifier, Verification};
pub use reply::{UpstreamBody, UpstreamReply};
pub use smtp::Smtp;
pub use web3forms::Web3Forms;

/// A backend able to hand a sanitized submission to a human.
#[async_trait]
pub trait Delivery: Send + Sync {
    fn name(&self) -> &'static str;

    async fn deliver(&self, submission: &Submission) -> Result<UpstreamReply, RelayError>;
}

pub struct Relay {
    policy: FormPolicy,
    verifiers: Vec<CaptchaVerifier>,
    delivery: Option<Arc<dyn Delivery>>,
    missing_setting: &'static str,
    expose_diagnostics: bool,
}

impl Relay {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.relay.timeout_secs))
            .build()?;

        let mut verifiers = Vec::new();
        if let Some(secret) = config.captcha.hcaptcha_secret() {
            verifiers.push(CaptchaVerifier::new(
                CaptchaProvider::HCaptcha,
                secret,
                &config.captcha.hcaptcha_verify_url,
                client.clone(),
            ));
        }
        if let Some(secret) = config.captcha.recaptcha_secret() {
            verifiers.push(CaptchaVerifier::new(
                CaptchaProvider::ReCaptcha,
                secret,
                &config.captcha.recaptcha_verify_url,
                client.clone(),
            ));
        }

        let provider = config.relay.provider;
        let (delivery, missing_setting): (Option<Arc<dyn Delivery>>, _) = match provider {
            DeliveryProvider::Web3forms => (
                Web3Forms::from_config(&config.web3forms, client)
                    .map(|d| Arc::new(d) as Arc<dyn Delivery>),
                "web3forms.access_key",
            ),
            DeliveryProvider::Smtp => (
                Smtp::from_config(&config.smtp)?.map(|d| Arc::new(d) as Arc<dyn Delivery>),
                "smtp.host/smtp.to",
            ),
        };

        if delivery.is_none() {
            tracing::warn!(
                provider = %provider,
                missing = missing_setting,
                "Delivery backend is not configured; submissions will be refused"
            );
        }

        Ok(Self {
            policy: config.form.clone(),
            verifiers,
            delivery,
            missing_setting,
            expose_diagnostics: !config.is_production(),
        })
    }

    /// Builds a relay around an explicit backend.
    pub fn new(policy: FormPolicy, delivery: Arc<dyn Delivery>) -> Self {
        Self {
            policy,
            verifiers: Vec::new(),
            delivery: Some(delivery),
            missing_setting: "",
            expose_diagnostics: false,
        }
    }

    pub fn with_verifier(mut self, verifier: CaptchaVerifier) -> Self {
        self.verifiers.push(verifier);
        self
    }

    pub fn captcha_providers(&self) -> Vec<CaptchaProvider> {
        self.verifiers.iter().map(CaptchaVerifier::provider).collect()
    }

    pub fn delivery_name(&self) -> Option<&'static str> {
        self.delivery.as_ref().map(|d| d.name())
    }

    pub fn policy(&self) -> &FormPolicy {
        &self.policy
    }

    /// Validates, verifies and forwards one submission.
    ///
    /// At most one verification call per configured CAPTCHA provider and one
    /// delivery call are made; nothing is retried.
    pub async fn submit(&self, form: ContactForm) -> Result<UpstreamReply, RelayError> {
        let token = form.captcha_token().map(str::to_owned);
        let submission = form.into_submission(&self.policy)?;

        let Some(delivery) = self.delivery.as_ref() else {
            return Err(RelayError::ServerNotConfigured(self.missing_setting));
        };

        if !self.verifiers.is_empty() {
            let Some(token) = token else {
                return Err(RelayError::CaptchaTokenMissing);
            };

            for verifier in &self.verifiers {
                let verification = verifier.verify(&token).await?;
                if !verification.success {
                    return Err(RelayError::CaptchaVerificationFailed {
                        detail: self
                            .expose_diagnostics
                            .then(|| verification.raw.to_string()),
                    });
                }
            }
        }

        let reply = delivery.deliver(&submission).await?;

        tracing::info!(
            provider = delivery.name(),
            inquiry = %submission.inquiry,
            success = reply.is_success(),
            "Contact form submission relayed"
        );

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingDelivery {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Delivery for CountingDelivery {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn deliver(&self, _submission: &Submission) -> Result<UpstreamReply, RelayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(UpstreamReply::delivered("ok"))
        }
    }

    fn form() -> ContactForm {
        ContactForm {
            name: Some("Jane".to_string()),
            email: Some("jane@example.com".to_string()),
            inquiry: Some("Support".to_string()),
            message: Some("Please call me back tomorrow.".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_delivery() {
        let delivery = Arc::new(CountingDelivery::default());
        let relay = Relay::new(FormPolicy::default(), delivery.clone());

        let result = relay
            .submit(ContactForm {
                message: None,
                ..form()
            })
            .await;

        assert!(matches!(result, Err(RelayError::Invalid(_))));
        assert_eq!(delivery.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_every_submission_is_delivered() {
        let delivery = Arc::new(CountingDelivery::default());
        let relay = Relay::new(FormPolicy::default(), delivery.clone());

        assert!(relay.submit(form()).await.unwrap().is_success());
        assert!(relay.submit(form()).await.unwrap().is_success());
        assert_eq!(delivery.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_missing_access_key_is_not_configured() {
        let relay = Relay::from_config(&Config::default()).unwrap();

        assert_eq!(relay.delivery_name(), None);
        assert!(matches!(
            relay.submit(form()).await,
            Err(RelayError::ServerNotConfigured("web3forms.access_key"))
        ));
    }

    #[tokio::test]
    async fn test_captcha_required_once_secret_is_configured() {
        let mut config = Config::default();
        config.web3forms.access_key = Some("key".to_string());
        config.captcha.recaptcha_secret = Some("secret".to_string());
        let relay = Relay::from_config(&config).unwrap();

        assert_eq!(relay.captcha_providers(), vec![CaptchaProvider::ReCaptcha]);
        assert!(matches!(
            relay.submit(form()).await,
            Err(RelayError::CaptchaTokenMissing)
        ));
    }
}
