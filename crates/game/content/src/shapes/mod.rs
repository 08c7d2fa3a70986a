//! Table shapes. Generated by `cargo xtask gen-shapes`; do not edit.

mod dialogue_data;
mod item_data;
mod localization_data;
mod monster_data;

pub use dialogue_data::DialogueData;
pub use item_data::ItemData;
pub use localization_data::LocalizationData;
pub use monster_data::MonsterData;
