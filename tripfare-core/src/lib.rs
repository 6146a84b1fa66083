pub mod clean;
pub mod enrich;
pub mod model;
pub mod projection;
pub mod split;
pub mod util;
pub mod zone;

mod error;

pub use error::PreprocessError;
