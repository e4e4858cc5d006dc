//! Configuration fields the host settings form renders

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    /// Rendered masked
    Password,
    Checkbox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConfigField {
    pub name: &'static str,
    pub label: &'static str,
    pub section: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const SERVER: &str = "Server settings";
const MISC: &str = "Miscellaneous settings";

/// Declared in form order
pub const CONFIG_FIELDS: &[ConfigField] = &[
    ConfigField {
        name: "api_base_url",
        label: "API URL",
        section: SERVER,
        kind: FieldKind::Text,
        required: true,
    },
    ConfigField {
        name: "api_user",
        label: "API user",
        section: SERVER,
        kind: FieldKind::Text,
        required: true,
    },
    ConfigField {
        name: "api_key",
        label: "API key",
        section: SERVER,
        kind: FieldKind::Password,
        required: true,
    },
    ConfigField {
        name: "help_enabled",
        label: "Enable help link",
        section: MISC,
        kind: FieldKind::Checkbox,
        required: false,
    },
    ConfigField {
        name: "help_url",
        label: "Help link URL",
        section: MISC,
        kind: FieldKind::Text,
        required: false,
    },
];

pub fn option_names() -> Vec<&'static str> {
    CONFIG_FIELDS.iter().map(|f| f.name).collect()
}
