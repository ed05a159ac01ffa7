//! Dialogue configuration (paragon.toml / paragon.json)
//!
//! ```toml
//! [translations.assets]
//! Alice = "アリス"
//!
//! [translations.emotions]
//! Happy = "笑"
//!
//! [avatar]
//! name = "Corrin"
//! gender = "female"
//!
//! [quick]
//! wrap = true
//! width = 28
//! avatar_alias = { name = "Corrin", asset = "username" }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Pretty (author-facing) name to game identifier, in file order.
pub type TranslationTable = IndexMap<String, String>;

fn default_width() -> usize {
    30
}

fn default_position1() -> i32 {
    3
}

fn default_position2() -> i32 {
    7
}

/// Everything the converters, quick-script generator and previewer can be tuned with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueConfig {
    #[serde(default)]
    pub translations: Translations,
    #[serde(default)]
    pub avatar: AvatarConfig,
    #[serde(default)]
    pub quick: QuickScriptConfig,
}

impl DialogueConfig {
    /// Parse a TOML config.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Parse a JSON config.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Asset and emotion name tables used by `translate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translations {
    #[serde(default)]
    pub assets: TranslationTable,
    #[serde(default)]
    pub emotions: TranslationTable,
}

impl Translations {
    /// Swap keys and values in both tables, for the game to pretty direction.
    ///
    /// When two pretty names map to the same game identifier the later entry wins.
    #[must_use]
    pub fn inverted(&self) -> Self {
        Self {
            assets: invert(&self.assets),
            emotions: invert(&self.emotions),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty() && self.emotions.is_empty()
    }

    /// Asset and emotion tables as passed to the converters, `None` when no
    /// translations are configured.
    #[must_use]
    pub fn tables(&self) -> (Option<&TranslationTable>, Option<&TranslationTable>) {
        if self.is_empty() {
            (None, None)
        } else {
            (Some(&self.assets), Some(&self.emotions))
        }
    }
}

fn invert(table: &TranslationTable) -> TranslationTable {
    table.iter().map(|(k, v)| (v.clone(), k.clone())).collect()
}

/// Gender used to pick the branch of `$G(m,f)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

/// The player avatar as seen by the previewer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub gender: Gender,
}

/// Maps the avatar's display name in a transcript to the asset the game loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarAlias {
    pub name: String,
    pub asset: String,
}

/// Quick-script defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickScriptConfig {
    #[serde(default)]
    pub avatar_alias: Option<AvatarAlias>,
    #[serde(default)]
    pub wrap: bool,
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_position1")]
    pub position1: i32,
    #[serde(default = "default_position2")]
    pub position2: i32,
}

impl Default for QuickScriptConfig {
    fn default() -> Self {
        Self {
            avatar_alias: None,
            wrap: false,
            width: default_width(),
            position1: default_position1(),
            position2: default_position2(),
        }
    }
}
