//! Data module - CSV loading, cleaning, and partitioning

mod loader;
mod processor;

pub use loader::{DataLoader, LoaderError};
pub use processor::{DataProcessor, Partitions, ProcessorError};

/// Feature columns projected into the X blocks, in emission order.
pub const FEATURE_COLUMNS: [&str; 10] = [
    "year", "month", "day", "hour", "DEWP", "TEMP", "PRES", "Iws", "Is", "Ir",
];

/// Label column projected into the Y blocks.
pub const LABEL_COLUMN: &str = "pm2.5";
