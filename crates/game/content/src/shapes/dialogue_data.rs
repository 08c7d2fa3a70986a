//! `Dialogue` table shape. Generated by `cargo xtask gen-shapes`; do not edit.

game_tables::table_row! {
    /// Row of the `Dialogue` table.
    pub struct DialogueData keyed_by "dialogue_id" {
        pub dialogue_id: String,
        pub speaker: String,
        pub portrait: String,
        pub text: String,
        pub next_id: String,
    }
}
