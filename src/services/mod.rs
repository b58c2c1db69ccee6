// Service exports
pub mod dataset;

pub use dataset::{
    parse_dataset, DatasetError, DatasetService, DatasetSnapshot, IngestStats, RecordError,
};
