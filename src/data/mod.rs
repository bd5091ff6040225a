mod loader;

pub use loader::{
    ColumnLayout, DEFAULT_DATA_FILE, LoadPolicy, LoadReport, LoaderConfig, RejectedLine,
    load_records_from_path, load_records_from_reader,
};
