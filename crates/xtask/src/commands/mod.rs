//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod check_tables;
mod gen_shapes;
mod schema;

pub use check_tables::CheckTables;
pub use gen_shapes::GenShapes;
pub use schema::ShowSchema;
