//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("email.base_url", crate::delivery::emailjs::EMAILJS_DEFAULT_BASE_URL)?
        .set_default("email.timeout_secs", 30)?
        .set_default("contact.recipient_name", "Portfolio Owner")
}
