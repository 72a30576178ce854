use anyhow::Context;
use serde_json::Value;

/// CAPTCHA services a deployment can verify tokens against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum CaptchaProvider {
    #[strum(serialize = "hcaptcha")]
    HCaptcha,
    #[strum(serialize = "recaptcha")]
    ReCaptcha,
}

/// Outcome of a site-verify call.
#[derive(Debug, Clone)]
pub struct Verification {
    pub success: bool,
    pub raw: Value,
}

#[derive(Clone)]
pub struct CaptchaVerifier {
    provider: CaptchaProvider,
    secret: String,
    verify_url: String,
    client: reqwest::Client,
}

impl CaptchaVerifier {
    pub fn new(
        provider: CaptchaProvider,
        secret: impl Into<String>,
        verify_url: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            provider,
            secret: secret.into(),
            verify_url: verify_url.into(),
            client,
        }
    }

    pub fn provider(&self) -> CaptchaProvider {
        self.provider
    }

    /// Posts `secret` and `response` form-encoded and reads the `success` flag.
    pub async fn verify(&self, token: &str) -> anyhow::Result<Verification> {
        let raw: Value = self
            .client
            .post(&self.verify_url)
            .form(&[("secret", self.secret.as_str()), ("response", token)])
            .send()
            .await
            .with_context(|| format!("{} verification request failed", self.provider))?
            .json()
            .await
            .with_context(|| format!("{} verification response is not JSON", self.provider))?;

        let success = raw.get("success").and_then(Value::as_bool).unwrap_or(false);

        tracing::debug!(provider = %self.provider, success, "Captcha token verified");

        Ok(Verification { success, raw })
    }
}

impl std::fmt::Debug for CaptchaVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptchaVerifier")
            .field("provider", &self.provider)
            .field("verify_url", &self.verify_url)
            .finish_non_exhaustive()
    }
}
