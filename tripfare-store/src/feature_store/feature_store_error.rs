#[derive(thiserror::Error, Debug)]
pub enum FeatureStoreError {
    #[error("failure building request for feature group '{feature_group}': {message}")]
    Request {
        feature_group: String,
        message: String,
    },
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("request to {url} returned status {status}: {body}")]
    Rejected {
        url: String,
        status: u16,
        body: String,
    },
}
