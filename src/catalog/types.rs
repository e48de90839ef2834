//! Catalog records as served by the PokéAPI.
//!
//! Every struct tolerates missing fields: the remote schema grows over time and
//! a record with a field we do not know about (or lacking one we do) must still
//! load.

use serde::{Deserialize, Serialize};

/// Learn method that qualifies a move as a level-up move
pub const LEVEL_UP_METHOD: &str = "level-up";

/// Fallback for abilities and moves without an English effect entry
pub const NO_EFFECT_TEXT: &str = "No effect text available.";

/// A `{name, url}` reference to another API resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

impl NamedResource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// One page of the listing endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Listing {
    pub count: usize,
    pub results: Vec<NamedResource>,
}

/// One creature record. `id` and `name` are required; everything else
/// defaults when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u32,
    pub name: String,
    /// Decimetres
    #[serde(default)]
    pub height: u32,
    /// Hectograms
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub moves: Vec<MoveEntry>,
    #[serde(default)]
    pub sprites: Sprites,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub type_ref: NamedResource,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatEntry {
    pub base_stat: u32,
    pub effort: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilitySlot {
    pub ability: NamedResource,
    pub is_hidden: bool,
    pub slot: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveEntry {
    #[serde(rename = "move")]
    pub move_ref: NamedResource,
    pub version_group_details: Vec<VersionGroupDetail>,
}

impl MoveEntry {
    /// Whether any game version teaches this move by leveling up
    pub fn is_level_up(&self) -> bool {
        self.version_group_details
            .iter()
            .any(|v| v.move_learn_method.name == LEVEL_UP_METHOD)
    }

    /// Lowest positive level across all version groups
    pub fn min_level(&self) -> Option<u32> {
        self.version_group_details
            .iter()
            .map(|v| v.level_learned_at)
            .filter(|&level| level > 0)
            .min()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionGroupDetail {
    pub level_learned_at: u32,
    pub move_learn_method: NamedResource,
    pub version_group: NamedResource,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sprites {
    pub front_default: Option<String>,
    pub other: OtherSprites,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork")]
    pub official_artwork: Artwork,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Artwork {
    pub front_default: Option<String>,
}

impl CatalogItem {
    /// Category tag names in slot order
    pub fn type_names(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.type_ref.name.as_str()).collect()
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.types.iter().any(|t| t.type_ref.name == name)
    }

    /// Official artwork, falling back to the default sprite
    pub fn image_url(&self) -> Option<&str> {
        self.sprites
            .other
            .official_artwork
            .front_default
            .as_deref()
            .or(self.sprites.front_default.as_deref())
    }

    /// `#0025` style identifier
    pub fn display_id(&self) -> String {
        format!("#{:04}", self.id)
    }

    pub fn height_m(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }
}

/// A localized effect description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectEntry {
    pub effect: String,
    pub short_effect: String,
    pub language: NamedResource,
}

fn english_short_effect(entries: &[EffectEntry]) -> Option<&str> {
    entries
        .iter()
        .find(|entry| entry.language.name == "en")
        .map(|entry| entry.short_effect.as_str())
        .filter(|text| !text.is_empty())
}

/// Ability sub-resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityInfo {
    pub name: String,
    pub effect_entries: Vec<EffectEntry>,
}

impl AbilityInfo {
    pub fn short_effect(&self) -> Option<&str> {
        english_short_effect(&self.effect_entries)
    }
}

/// Move sub-resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveInfo {
    pub name: String,
    pub power: Option<u32>,
    pub accuracy: Option<u32>,
    pub pp: Option<u32>,
    #[serde(rename = "type")]
    pub type_ref: Option<NamedResource>,
    pub damage_class: Option<NamedResource>,
    pub effect_entries: Vec<EffectEntry>,
}

impl MoveInfo {
    pub fn short_effect(&self) -> Option<&str> {
        english_short_effect(&self.effect_entries)
    }
}
