//! `Monster` table shape. Generated by `cargo xtask gen-shapes`; do not edit.

game_tables::table_row! {
    /// Row of the `Monster` table.
    pub struct MonsterData {
        pub id: i32,
        pub name: String,
        pub hp: i32,
        pub speed: f32,
        pub is_boss: bool,
        pub element: i32,
    }
}
