//! Raw extract ingestion for the racing warehouse.

pub mod cell;
pub mod csv_table;
pub mod error;
pub mod raw;

pub use cell::{cell_f64, cell_i64, cell_text, parse_id};
pub use csv_table::{CsvTable, read_csv_table};
pub use error::{IngestError, Result};
pub use raw::{IngestOptions, RawTables, load_raw_tables, read_source_table, source_frame};
