//! Raw message payloads and message roles.

use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::STANDARD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::{Deserialize, Serialize};

use crate::RenderError;

/// Decoder matching the browser's `atob`: padding optional, stray trailing
/// bits ignored.
const FORGIVING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Who authored a chat message.
///
/// Derived from the class tokens on the message element.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    #[default]
    Assistant,
    System,
}

impl Role {
    /// Pick a role from a whitespace separated class list.
    ///
    /// `user` wins over everything else, then `system`. Any other element is
    /// treated as assistant output and goes through Markdown.
    pub fn from_class_list(classes: &str) -> Self {
        Self::from_classes(classes.split_ascii_whitespace())
    }

    pub fn from_classes<'a>(classes: impl IntoIterator<Item = &'a str>) -> Self {
        let mut role = Role::Assistant;
        for class in classes {
            match class {
                "user" => return Role::User,
                "system" => role = Role::System,
                _ => {}
            }
        }
        role
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }

    /// Whether content from this role is rendered through Markdown.
    pub fn is_markdown(&self) -> bool {
        !matches!(self, Role::User)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base64 text as it sits in the `.raw` slot of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPayload<'a>(&'a str);

impl<'a> RawPayload<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// Decode the payload into message text.
    ///
    /// ASCII whitespace anywhere in the payload is ignored, so template
    /// indentation and wrapped lines decode fine.
    pub fn decode(&self) -> Result<String, RenderError> {
        let compact: String = self
            .0
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        let bytes = FORGIVING.decode(compact)?;
        Ok(String::from_utf8(bytes)?)
    }
}

/// Decode a base64 raw slot into message text.
pub fn decode_raw(raw: &str) -> Result<String, RenderError> {
    RawPayload::new(raw).decode()
}

/// Encode message text the way the server embeds it.
pub fn encode_raw(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}
