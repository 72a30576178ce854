use std::collections::HashMap;

use formrelay::Config;
use formrelay::config::DeliveryProvider;
use temp_dir::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> anyhow::Result<String> {
    let path = dir.child("formrelay.toml");
    std::fs::write(&path, contents)?;
    Ok(path.to_string_lossy().into_owned())
}

#[test]
fn test_file_values_are_loaded() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = write_config(
        &dir,
        r#"
environment = "production"

[server]
port = 4000
submit_path = "/contact"

[form]
require_inquiry = false
min_message_len = 3

[relay]
provider = "smtp"
timeout_secs = 5

[smtp]
host = "mail.example.com"
to = "inbox@example.com"
subject = "Website enquiry"
"#,
    )?;

    let config = Config::load_from(Some(path), HashMap::new())?;

    assert!(config.is_production());
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 4000);
    assert_eq!(config.server.submit_path, "/contact");
    assert!(!config.form.require_inquiry);
    assert_eq!(config.form.min_message_len, 3);
    assert_eq!(config.relay.provider, DeliveryProvider::Smtp);
    assert_eq!(config.relay.timeout_secs, 5);
    assert_eq!(config.smtp.host(), Some("mail.example.com"));
    assert_eq!(config.smtp.port, 587);
    assert_eq!(config.smtp.subject, "Website enquiry");
    assert_eq!(config.web3forms.subject, "New Contact Form Submission");
    assert!(config.validate().is_ok());

    Ok(())
}

#[test]
fn test_environment_overrides_file() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = write_config(
        &dir,
        r#"
[server]
port = 4000

[web3forms]
access_key = "from-file"
"#,
    )?;

    let vars = HashMap::from([
        ("FORMRELAY__SERVER__PORT".to_string(), "5000".to_string()),
        ("WEB3FORMS_ACCESS_KEY".to_string(), "from-env".to_string()),
    ]);
    let config = Config::load_from(Some(path), vars)?;

    assert_eq!(config.server.port, 5000);
    assert_eq!(config.web3forms.access_key(), Some("from-env"));

    Ok(())
}

#[test]
fn test_config_path_variable_is_honoured() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = write_config(&dir, "[server]\nport = 4100\n")?;

    let vars = HashMap::from([("CONFIG_PATH".to_string(), path)]);
    let config = Config::load_from(None, vars)?;

    assert_eq!(config.server.port, 4100);

    Ok(())
}

#[test]
fn test_shipped_default_file_matches_builtin_defaults() -> anyhow::Result<()> {
    let config = Config::load_from(Some("config/default.toml".to_string()), HashMap::new())?;
    let builtin = Config::default();

    assert_eq!(config.server.port, builtin.server.port);
    assert_eq!(config.server.submit_path, builtin.server.submit_path);
    assert_eq!(config.relay.timeout_secs, builtin.relay.timeout_secs);
    assert_eq!(config.web3forms.endpoint, builtin.web3forms.endpoint);
    assert_eq!(config.web3forms.access_key(), None);

    Ok(())
}

#[test]
fn test_app_builds_without_any_provider_configured() {
    assert!(formrelay::create_app(Config::default()).is_ok());
}
