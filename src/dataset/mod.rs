mod dataset;
mod error;
mod loader;
mod writer;

pub use dataset::{Dataset, normalize};
pub use error::{DataErr, Result};
pub use loader::{read_dataset, read_dataset_from, read_features, read_features_from};
pub use writer::{write_predictions, write_predictions_to};
