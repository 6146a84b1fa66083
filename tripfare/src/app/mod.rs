mod app_error;
mod host_descriptor;
mod pipeline;
mod preprocess_config;
mod tripfare_app;

pub use app_error::AppError;
pub use host_descriptor::HostDescriptor;
pub use pipeline::{run_preprocess, PreprocessSummary};
pub use preprocess_config::PreprocessConfig;
pub use tripfare_app::{TripfareApp, TripfareOperation};
