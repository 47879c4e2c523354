//! Renderer settings.
//!
//! Deserialized from whatever object the page hands to `mount`, so every
//! field falls back to its default when missing.

use markdown_weaver::Options;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RendererConfig {
    /// Render `$...$` / `$$...$$` code spans as MathML
    pub math: bool,
    pub think: ThinkConfig,
    pub markdown: MarkdownConfig,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            math: true,
            think: ThinkConfig::default(),
            markdown: MarkdownConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThinkConfig {
    /// Split `<think>` blocks out of assistant messages
    pub enabled: bool,
    /// Class on the container wrapped around each think block
    pub class: String,
}

impl Default for ThinkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            class: "think".to_owned(),
        }
    }
}

/// Markdown extensions. Defaults follow GitHub flavoured Markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkdownConfig {
    pub tables: bool,
    pub footnotes: bool,
    pub strikethrough: bool,
    pub gfm: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            gfm: true,
        }
    }
}

impl MarkdownConfig {
    pub fn options(&self) -> Options {
        let mut options = Options::empty();
        if self.tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            options.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.gfm {
            options.insert(Options::ENABLE_GFM);
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config: RendererConfig =
            serde_json::from_str(r#"{ "think": { "class": "reasoning" } }"#).unwrap();
        assert!(config.math);
        assert!(config.think.enabled);
        assert_eq!(config.think.class, "reasoning");
        assert_eq!(config.markdown, MarkdownConfig::default());
    }

    #[test]
    fn options_follow_flags() {
        let config = MarkdownConfig {
            tables: true,
            footnotes: false,
            strikethrough: false,
            gfm: false,
        };
        let options = config.options();
        assert!(options.contains(Options::ENABLE_TABLES));
        assert!(!options.contains(Options::ENABLE_FOOTNOTES));
    }
}
