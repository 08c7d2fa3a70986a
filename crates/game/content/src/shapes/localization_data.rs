//! `Localization` table shape. Generated by `cargo xtask gen-shapes`; do not edit.

game_tables::table_row! {
    /// Row of the `Localization` table.
    pub struct LocalizationData {
        pub key: String,
        pub ko: String,
        pub en: String,
    }
}
