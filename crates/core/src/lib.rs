pub mod config;
pub mod dataset;
pub mod error;
pub mod record;
pub mod schema;

pub use config::Config;
pub use dataset::Dataset;
pub use error::*;
pub use record::Record;
