use futures::{future::BoxFuture, FutureExt};
use serde::Serialize;

use super::{FeatureRecord, FeatureStore, FeatureStoreError, FeatureValue};
use crate::{ingest::IngestConfig, IngestError};

pub const REGION_HEADER: &str = "x-feature-store-region";

/// feature store client over the runtime record API. request signing is not
/// performed here, a pre-issued bearer token is attached when configured.
#[derive(Clone, Debug)]
pub struct HttpFeatureStore {
    client: reqwest::Client,
    endpoint: String,
    region: Option<String>,
    auth_token: Option<String>,
}

#[derive(Serialize)]
struct PutRecordBody<'a> {
    #[serde(rename = "Record")]
    record: &'a [FeatureValue],
}

impl HttpFeatureStore {
    pub fn new(
        endpoint: &str,
        region: Option<String>,
        auth_token: Option<String>,
    ) -> Result<HttpFeatureStore, IngestError> {
        let endpoint = endpoint.trim().trim_end_matches('/');
        if endpoint.is_empty() {
            return Err(IngestError::InvalidConfiguration(String::from(
                "feature store endpoint is empty",
            )));
        }
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| IngestError::Client(e.to_string()))?;
        Ok(HttpFeatureStore {
            client,
            endpoint: endpoint.to_string(),
            region,
            auth_token,
        })
    }

    pub fn url(&self, feature_group: &str) -> String {
        format!("{}/FeatureGroup/{}", self.endpoint, feature_group)
    }

    /// builds the PUT request for a single record without sending it
    pub fn build_request(
        &self,
        feature_group: &str,
        record: &FeatureRecord,
    ) -> Result<reqwest::Request, FeatureStoreError> {
        let mut builder = self
            .client
            .put(self.url(feature_group))
            .json(&PutRecordBody { record: &record.0 });
        if let Some(token) = &self.auth_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(region) = &self.region {
            builder = builder.header(REGION_HEADER, region);
        }
        builder.build().map_err(|e| FeatureStoreError::Request {
            feature_group: feature_group.to_string(),
            message: e.to_string(),
        })
    }
}

impl TryFrom<&IngestConfig> for HttpFeatureStore {
    type Error = IngestError;

    fn try_from(config: &IngestConfig) -> Result<Self, Self::Error> {
        let endpoint = config.endpoint.as_deref().ok_or_else(|| {
            IngestError::InvalidConfiguration(String::from(
                "a feature group is configured but no feature store endpoint was provided",
            ))
        })?;
        HttpFeatureStore::new(endpoint, config.region.clone(), config.auth_token.clone())
    }
}

impl FeatureStore for HttpFeatureStore {
    fn put_record<'a>(
        &'a self,
        feature_group: &'a str,
        record: &'a FeatureRecord,
    ) -> BoxFuture<'a, Result<(), FeatureStoreError>> {
        async move {
            let request = self.build_request(feature_group, record)?;
            let url = request.url().to_string();
            let response =
                self.client
                    .execute(request)
                    .await
                    .map_err(|e| FeatureStoreError::Transport {
                        url: url.clone(),
                        message: e.to_string(),
                    })?;
            let status = response.status();
            if status.is_success() {
                Ok(())
            } else {
                let body = response.text().await.unwrap_or_default();
                Err(FeatureStoreError::Rejected {
                    url,
                    status: status.as_u16(),
                    body,
                })
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn record() -> FeatureRecord {
        FeatureRecord(vec![
            FeatureValue::new("fare_amount", 9.5),
            FeatureValue::new("FS_ID", 1000),
        ])
    }

    #[test]
    fn test_build_request() {
        let store = HttpFeatureStore::new(
            "https://featurestore.example.com/",
            Some(String::from("us-east-1")),
            Some(String::from("secret")),
        )
        .unwrap();
        let request = store.build_request("nyc-taxi-fares", &record()).unwrap();

        assert_eq!(request.method(), reqwest::Method::PUT);
        assert_eq!(
            request.url().as_str(),
            "https://featurestore.example.com/FeatureGroup/nyc-taxi-fares"
        );
        assert_eq!(
            request.headers().get(reqwest::header::AUTHORIZATION).unwrap(),
            "Bearer secret"
        );
        assert_eq!(request.headers().get(REGION_HEADER).unwrap(), "us-east-1");

        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        let json: serde_json::Value = serde_json::from_slice(body).unwrap();
        assert_eq!(json["Record"][0]["FeatureName"], "fare_amount");
        assert_eq!(json["Record"][0]["ValueAsString"], "9.5");
        assert_eq!(json["Record"][1]["ValueAsString"], "1000");
    }

    #[test]
    fn test_optional_headers_omitted() {
        let store = HttpFeatureStore::new("http://localhost:8080", None, None).unwrap();
        let request = store.build_request("fares", &record()).unwrap();
        assert!(request.headers().get(reqwest::header::AUTHORIZATION).is_none());
        assert!(request.headers().get(REGION_HEADER).is_none());
    }

    #[test]
    fn test_missing_endpoint() {
        let config = IngestConfig {
            feature_group_name: Some(String::from("fares")),
            endpoint: None,
            ..IngestConfig::default()
        };
        let result = HttpFeatureStore::try_from(&config);
        assert!(matches!(result, Err(IngestError::InvalidConfiguration(_))));
        assert!(matches!(
            HttpFeatureStore::new("  ", None, None),
            Err(IngestError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_put_record_accepted() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("PUT", "/FeatureGroup/fares")
            .match_header("authorization", "Bearer secret")
            .match_body(mockito::Matcher::Regex(String::from(
                r#""FeatureName":"FS_ID","ValueAsString":"1000""#,
            )))
            .with_status(200)
            .create();
        let store =
            HttpFeatureStore::new(&server.url(), None, Some(String::from("secret"))).unwrap();

        let runtime = tokio::runtime::Runtime::new().unwrap();
        let result = runtime.block_on(store.put_record("fares", &record()));

        assert!(result.is_ok(), "{result:?}");
        mock.assert();
    }

    #[test]
    fn test_put_record_rejected() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("PUT", "/FeatureGroup/fares")
            .with_status(500)
            .with_body("ValidationError")
            .create();
        let store = HttpFeatureStore::new(&server.url(), None, None).unwrap();

        let runtime = tokio::runtime::Runtime::new().unwrap();
        let result = runtime.block_on(store.put_record("fares", &record()));

        match result {
            Err(FeatureStoreError::Rejected { status, body, .. }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "ValidationError");
            }
            other => panic!("expected rejection, found {other:?}"),
        }
    }

    #[test]
    #[ignore = "requires a running feature store at TRIPFARE_TEST_ENDPOINT"]
    fn test_put_record_against_live_store() {
        let endpoint = std::env::var("TRIPFARE_TEST_ENDPOINT").unwrap();
        let store = HttpFeatureStore::new(&endpoint, None, None).unwrap();
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime
            .block_on(store.put_record("tripfare-test", &record()))
            .unwrap();
    }
}
