use anyhow::Result;
use formrelay::{Config, relay::Relay};

/// Builds the relay exactly as `serve` would and reports the effective policy.
pub fn check(config: Config) -> Result<()> {
    let relay = Relay::from_config(&config)?;

    let captcha = relay
        .captcha_providers()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();

    tracing::info!(
        environment = %config.environment,
        provider = %config.relay.provider,
        delivery_ready = relay.delivery_name().is_some(),
        captcha = ?captcha,
        require_inquiry = relay.policy().require_inquiry,
        min_message_len = relay.policy().min_message_len,
        submit_path = %config.server.submit_path,
        "Configuration is valid"
    );

    if relay.delivery_name().is_none() {
        anyhow::bail!(
            "delivery backend '{}' is missing required settings",
            config.relay.provider
        );
    }

    Ok(())
}
