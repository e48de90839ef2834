use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;

use crate::catalog::CatalogItem;

/// A move the item learns by leveling up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelUpMove {
    pub name: String,
    pub url: String,
    /// Lowest positive level across versions; `None` sorts after every level
    pub level: Option<u32>,
}

fn by_level_then_name(a: &LevelUpMove, b: &LevelUpMove) -> Ordering {
    let level = match (a.level, b.level) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    level.then_with(|| a.name.cmp(&b.name))
}

/// Level-up moves of `item`, ascending by level with ties broken by name.
///
/// A move listed more than once keeps only its first (lowest) position.
/// The list is not capped here.
pub fn level_up_moves(item: &CatalogItem) -> Vec<LevelUpMove> {
    let mut moves: Vec<LevelUpMove> = item
        .moves
        .iter()
        .filter(|entry| entry.is_level_up())
        .map(|entry| LevelUpMove {
            name: entry.move_ref.name.clone(),
            url: entry.move_ref.url.clone(),
            level: entry.min_level(),
        })
        .collect();

    moves.sort_by(by_level_then_name);

    let mut seen = HashSet::new();
    moves.retain(|m| seen.insert(m.name.clone()));
    moves
}
