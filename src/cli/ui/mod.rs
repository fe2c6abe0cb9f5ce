pub mod formatting;
pub mod prompts;
pub mod table_renderer;

pub use formatting::Formatter;
pub use table_renderer::{Alignment, Table, TableColumn};
