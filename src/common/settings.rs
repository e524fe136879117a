use loco_rs::app::AppContext;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Settings {
    pub photos_per_page: u64,
    pub mail_subject_prefix: String,
    pub admin_email: String,
    pub admin_username: String,
    pub admin_password: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            photos_per_page: 12,
            mail_subject_prefix: "[Albumy] ".to_string(),
            admin_email: "admin@example.com".to_string(),
            admin_username: "admin".to_string(),
            admin_password: "changeme".to_string(),
        }
    }
}

impl Settings {
    /// Loads and deserializes the `settings` section from the Loco app's
    /// configuration file into a strongly-typed `Settings` struct.
    ///
    /// # Errors
    ///
    /// This function will return an error if the `settings` section in the
    /// configuration file does not match the expected structure.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value.clone())
    }

    /// Reads the `settings` section out of the app context, falling back to
    /// defaults when the section is missing or malformed.
    #[must_use]
    pub fn from_context(ctx: &AppContext) -> Self {
        ctx.config
            .settings
            .as_ref()
            .and_then(|value| Self::from_json(value).ok())
            .unwrap_or_default()
    }
}
