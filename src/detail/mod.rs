//! Detail Assembler.
//!
//! Builds the [`DetailRecord`] for one item: its level-up moves, capped and
//! ordered, plus the ability and move sub-resources resolved from the remote
//! source. A sub-resource that fails to load is recorded as absent and the
//! rest of the record is still assembled.

pub mod describe;
pub mod moves;

use std::collections::{BTreeSet, HashMap};

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::{AbilityInfo, CatalogItem, MoveInfo, NO_EFFECT_TEXT};
use crate::error::Result;
use crate::remote::CatalogSource;

pub use describe::{MoveColumn, PLACEHOLDER, describe_damage_class};
pub use moves::{LevelUpMove, level_up_moves};

/// Sub-resources resolved while one detail view is open, keyed by url.
///
/// Failed lookups are cached as `None` too. A fresh cache belongs to each
/// newly opened view.
#[derive(Debug, Default)]
pub struct DetailCache {
    abilities: HashMap<String, Option<AbilityInfo>>,
    moves: HashMap<String, Option<MoveInfo>>,
}

impl DetailCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.abilities.len() + self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedAbility {
    pub name: String,
    pub hidden: bool,
    pub info: Option<AbilityInfo>,
}

impl ResolvedAbility {
    pub fn effect(&self) -> &str {
        self.info
            .as_ref()
            .and_then(AbilityInfo::short_effect)
            .unwrap_or(NO_EFFECT_TEXT)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedMove {
    pub name: String,
    pub level: Option<u32>,
    pub info: Option<MoveInfo>,
}

impl ResolvedMove {
    pub fn power(&self) -> Option<u32> {
        self.info.as_ref().and_then(|m| m.power)
    }

    pub fn accuracy(&self) -> Option<u32> {
        self.info.as_ref().and_then(|m| m.accuracy)
    }

    pub fn pp(&self) -> Option<u32> {
        self.info.as_ref().and_then(|m| m.pp)
    }

    pub fn type_name(&self) -> Option<&str> {
        self.info
            .as_ref()
            .and_then(|m| m.type_ref.as_ref())
            .map(|t| t.name.as_str())
    }

    pub fn damage_class(&self) -> Option<&str> {
        self.info
            .as_ref()
            .and_then(|m| m.damage_class.as_ref())
            .map(|c| c.name.as_str())
    }

    pub fn effect(&self) -> &str {
        self.info
            .as_ref()
            .and_then(MoveInfo::short_effect)
            .unwrap_or(NO_EFFECT_TEXT)
    }

    /// Display text for one column, [`PLACEHOLDER`] when absent
    pub fn cell(&self, column: MoveColumn) -> String {
        let value = match column {
            MoveColumn::Level => self.level.map(|v| v.to_string()),
            MoveColumn::Power => self.power().map(|v| v.to_string()),
            MoveColumn::Accuracy => self.accuracy().map(|v| v.to_string()),
            MoveColumn::Pp => self.pp().map(|v| v.to_string()),
            MoveColumn::Type => self.type_name().map(str::to_string),
            MoveColumn::DamageClass => self.damage_class().map(str::to_string),
        };
        value.unwrap_or_else(|| PLACEHOLDER.to_string())
    }
}

/// Everything the detail view shows for one item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRecord {
    pub item: CatalogItem,
    pub abilities: Vec<ResolvedAbility>,
    pub moves: Vec<ResolvedMove>,
}

impl DetailRecord {
    pub fn name(&self) -> &str {
        &self.item.name
    }
}

fn settle<T>(kind: &str, url: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(kind, %url, %error, "sub-resource fetch failed");
            None
        }
    }
}

/// Assemble the detail record for `item`.
///
/// Abilities are fetched as one concurrent batch, then the first
/// `moves_limit` level-up moves as a second batch. Urls already in `cache`
/// are not requested again.
pub async fn assemble<S: CatalogSource>(
    source: &S,
    item: &CatalogItem,
    moves_limit: usize,
    cache: &mut DetailCache,
) -> DetailRecord {
    let missing: BTreeSet<&str> = item
        .abilities
        .iter()
        .map(|slot| slot.ability.url.as_str())
        .filter(|url| !cache.abilities.contains_key(*url))
        .collect();
    debug!(item = %item.name, count = missing.len(), "fetching abilities");
    let fetched = join_all(
        missing
            .into_iter()
            .map(|url| async move { (url, source.fetch_ability(url).await) }),
    )
    .await;
    for (url, result) in fetched {
        cache
            .abilities
            .insert(url.to_string(), settle("ability", url, result));
    }

    let mut selected = level_up_moves(item);
    selected.truncate(moves_limit);

    let missing: BTreeSet<&str> = selected
        .iter()
        .map(|m| m.url.as_str())
        .filter(|url| !cache.moves.contains_key(*url))
        .collect();
    debug!(item = %item.name, count = missing.len(), "fetching moves");
    let fetched = join_all(
        missing
            .into_iter()
            .map(|url| async move { (url, source.fetch_move(url).await) }),
    )
    .await;
    for (url, result) in fetched {
        cache.moves.insert(url.to_string(), settle("move", url, result));
    }

    let abilities = item
        .abilities
        .iter()
        .map(|slot| {
            let info = cache.abilities.get(&slot.ability.url).cloned().flatten();
            ResolvedAbility {
                name: info
                    .as_ref()
                    .map(|i| i.name.clone())
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| slot.ability.name.clone()),
                hidden: slot.is_hidden,
                info,
            }
        })
        .collect();

    let moves = selected
        .into_iter()
        .map(|m| {
            let info = cache.moves.get(&m.url).cloned().flatten();
            ResolvedMove {
                name: info
                    .as_ref()
                    .map(|i| i.name.clone())
                    .filter(|n| !n.is_empty())
                    .unwrap_or(m.name),
                level: m.level,
                info,
            }
        })
        .collect();

    DetailRecord {
        item: item.clone(),
        abilities,
        moves,
    }
}
