pub mod parser;

pub use parser::{load_csv, ImdbCsvSource};
