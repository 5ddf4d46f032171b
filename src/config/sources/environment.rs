//! Environment source: FOLIO_<SECTION>__<KEY>, plus EMAILJS_* aliases for credentials.

use crate::config::FolioConfig;
use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;
use std::collections::HashMap;

pub const ENV_PREFIX: &str = "FOLIO";

/// Alias variables and the email key each one fills
pub const EMAIL_ALIASES: [(&str, &str); 3] = [
    ("EMAILJS_SERVICE_ID", "service_id"),
    ("EMAILJS_TEMPLATE_ID", "template_id"),
    ("EMAILJS_PUBLIC_KEY", "public_key"),
];

/// Add `FOLIO_` variables from the given environment as the highest-precedence source.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    env: &HashMap<String, String>,
) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .source(Some(env.clone())),
    )
}

/// Fill credentials still unset after merging from the EMAILJS_* aliases.
pub fn apply_aliases(config: &mut FolioConfig, env: &HashMap<String, String>) {
    for (var, key) in EMAIL_ALIASES {
        let Some(value) = env.get(var).filter(|v| !v.is_empty()) else {
            continue;
        };
        let slot = match key {
            "service_id" => &mut config.email.service_id,
            "template_id" => &mut config.email.template_id,
            _ => &mut config.email.public_key,
        };
        if slot.is_none() {
            *slot = Some(value.clone());
        }
    }
}
