use crate::error::{CoreError, Result};
use crate::template::SubstitutionMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

pub const CLIENT_NAME: &str = "{{CLIENT_NAME}}";
pub const CLIENT_EMAIL: &str = "{{CLIENT_EMAIL}}";
pub const CLIENT_PHONE: &str = "{{CLIENT_PHONE}}";
pub const CLIENT_COMPANY: &str = "{{CLIENT_COMPANY}}";
pub const CLIENT_ADDRESS: &str = "{{CLIENT_ADDRESS}}";
pub const CLIENT_WEBSITE: &str = "{{CLIENT_WEBSITE}}";
pub const BUSINESS_NAME: &str = "{{BUSINESS_NAME}}";
pub const BUSINESS_TYPE: &str = "{{BUSINESS_TYPE}}";
pub const SERVICE_AREA: &str = "{{SERVICE_AREA}}";

/// Client intake record used to personalize a template workflow
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClientData {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_area: Option<String>,
    /// Additional literal token → value pairs, e.g. `"{{APPOINTMENT_URL}}"`
    #[serde(default)]
    pub custom_fields: BTreeMap<String, String>,
}

impl ClientData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_custom_field(mut self, token: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_fields.insert(token.into(), value.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("client name is required".to_string()));
        }
        Ok(())
    }

    /// Build the substitution map for this client.
    ///
    /// Fixed tokens come first and always reflect the typed fields (missing
    /// values render as empty strings). Custom fields follow in key order; a
    /// custom field naming a fixed token is ignored.
    pub fn substitution_map(&self) -> SubstitutionMap {
        let text = |field: &Option<String>| field.clone().unwrap_or_default();
        let business_name = self
            .business_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.name)
            .to_string();

        let mut map = SubstitutionMap::new();
        map.insert(CLIENT_NAME, self.name.clone());
        map.insert(CLIENT_EMAIL, text(&self.email));
        map.insert(CLIENT_PHONE, text(&self.phone));
        map.insert(CLIENT_COMPANY, text(&self.company));
        map.insert(CLIENT_ADDRESS, text(&self.address));
        map.insert(CLIENT_WEBSITE, text(&self.website));
        map.insert(BUSINESS_NAME, business_name);
        map.insert(BUSINESS_TYPE, text(&self.business_type));
        map.insert(SERVICE_AREA, text(&self.service_area));

        for (token, value) in &self.custom_fields {
            if map.contains(token) {
                debug!(token = %token, "Ignoring custom field that shadows a fixed token");
                continue;
            }
            map.insert(token.clone(), value.clone());
        }

        map
    }
}
