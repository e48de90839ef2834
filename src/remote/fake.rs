//! Record builders for unit tests, addressed like [`MemorySource`] urls.

use super::MemorySource;
use crate::catalog::{
    AbilitySlot, CatalogItem, MoveEntry, NamedResource, TypeSlot, VersionGroupDetail,
};

/// Build an item with the given category tags
pub fn item(id: u32, name: &str, types: &[&str]) -> CatalogItem {
    CatalogItem {
        id,
        name: name.to_string(),
        types: types
            .iter()
            .enumerate()
            .map(|(slot, name)| TypeSlot {
                slot: slot as u8 + 1,
                type_ref: NamedResource::new(*name, format!("{}type/{name}/", MemorySource::BASE)),
            })
            .collect(),
        ..Default::default()
    }
}

/// A move entry learned by `method` at each of `levels`
pub fn move_entry(name: &str, method: &str, levels: &[u32]) -> MoveEntry {
    MoveEntry {
        move_ref: NamedResource::new(name, MemorySource::move_url(name)),
        version_group_details: levels
            .iter()
            .map(|&level| VersionGroupDetail {
                level_learned_at: level,
                move_learn_method: NamedResource::new(method, ""),
                version_group: NamedResource::default(),
            })
            .collect(),
    }
}

pub fn ability_slot(name: &str, is_hidden: bool) -> AbilitySlot {
    AbilitySlot {
        ability: NamedResource::new(name, MemorySource::ability_url(name)),
        is_hidden,
        slot: 1,
    }
}
