//! Catalog data model, reference data and the session store.

pub mod generation;
pub mod store;
pub mod types;

pub use generation::{ELEMENT_TYPES, Generation};
pub use store::CatalogStore;
pub use types::{
    AbilityInfo, AbilitySlot, Artwork, CatalogItem, EffectEntry, LEVEL_UP_METHOD, Listing,
    MoveEntry, MoveInfo, NO_EFFECT_TEXT, NamedResource, OtherSprites, Sprites, StatEntry, TypeSlot,
    VersionGroupDetail,
};
