//! `Item` table shape. Generated by `cargo xtask gen-shapes`; do not edit.

game_tables::table_row! {
    /// Row of the `Item` table.
    pub struct ItemData {
        pub id: i32,
        pub name: String,
        pub price: i32,
        pub stackable: bool,
        pub weight: f32,
    }
}
