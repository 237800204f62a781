use tracing::debug;

pub mod errors;
pub use errors::{GatewayError, GatewayErrorKind};

mod query;
pub use query::SearchQuery;

type Result<T, E = GatewayError> = std::result::Result<T, E>;

/// Client for the workshop.codes json api.
#[derive(Debug, Clone)]
pub struct Workshop {
    client: reqwest::Client,
    base: reqwest::Url,
}

impl Workshop {
    pub const HOST: &'static str = "https://workshop.codes";

    fn host() -> reqwest::Url {
        #[allow(clippy::unwrap_used)]
        reqwest::Url::parse(Self::HOST).unwrap()
    }

    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base(client, Self::host())
    }

    pub(crate) fn with_base(client: reqwest::Client, base: reqwest::Url) -> Self {
        Self { client, base }
    }

    /// Sends a single GET for `query` and returns the decoded body as-is.
    ///
    /// A 2xx body that isn't json comes back as a json string.
    #[tracing::instrument(skip_all, fields(path = %query.path()))]
    pub async fn fetch(&self, query: &SearchQuery) -> Result<serde_json::Value> {
        let url = query.url(&self.base).map_err(|err| {
            debug!(method = "GET", path = %query.path(), base = %self.base, "failed request");
            GatewayError::malformed(err)
        })?;

        let request = self.client.get(url.clone()).build().map_err(|err| {
            Self::log_failed(&url);
            GatewayError::malformed(err)
        })?;

        let response = self.client.execute(request).await.map_err(|err| {
            Self::log_failed(&url);

            if err.is_builder() {
                GatewayError::malformed(err)
            } else {
                GatewayError::no_response(&Self::describe(&url), &err)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            Self::log_failed(&url);
            return Err(GatewayError::bad_status(status, &Self::request_path(&url)));
        }

        let text = response.text().await.map_err(|err| {
            Self::log_failed(&url);
            GatewayError::no_response(&Self::describe(&url), &err)
        })?;

        debug!(%status, bytes = text.len(), "workshop.codes responded");

        Ok(serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)))
    }

    fn log_failed(url: &reqwest::Url) {
        debug!(method = "GET", %url, "failed request");
    }

    fn describe(url: &reqwest::Url) -> String {
        format!("GET {url}")
    }

    fn request_path(url: &reqwest::Url) -> String {
        match url.query() {
            Some(query) => format!("{}?{query}", url.path()),
            None => url.path().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tracing_test::traced_test;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn workshop(base: &str) -> Workshop {
        let base = reqwest::Url::parse(base).expect("mock server url should be valid");
        Workshop::with_base(reqwest::Client::new(), base)
    }

    #[test]
    fn host_is_valid() {
        assert_eq!(Workshop::host().as_str(), "https://workshop.codes/");
    }

    #[tokio::test]
    async fn returns_body_unchanged() {
        let server = MockServer::start().await;
        let body = json!([{ "title": "Heal Bot" }, { "title": "Parkour" }]);

        Mock::given(method("GET"))
            .and(path("/search.json"))
            .and(query_param("search", "heal"))
            .and(query_param("overwatch_2", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let query = SearchQuery::new("search.json")
            .param("search", Some("heal"))
            .param("overwatch_2", Some(true));

        let value = workshop(&server.uri())
            .fetch(&query)
            .await
            .expect("fetch should succeed");

        assert_eq!(value, body);
    }

    #[tokio::test]
    async fn non_json_body_is_a_string() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let value = workshop(&server.uri())
            .fetch(&SearchQuery::new("/search.json"))
            .await
            .expect("fetch should succeed");

        assert_eq!(value, json!("<html>maintenance</html>"));
    }

    #[tokio::test]
    #[traced_test]
    async fn bad_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = workshop(&server.uri())
            .fetch(&SearchQuery::new("/wiki/search/ana.json"))
            .await
            .expect_err("503 should be an error");

        assert_eq!(err.kind(), GatewayErrorKind::BadStatus);
        assert!(err.message().contains("503"));
        assert!(err.message().contains("/wiki/search/ana.json"));
        assert!(logs_contain("failed request"));
    }

    #[tokio::test]
    async fn no_response() {
        // nothing listens on a port once its listener is dropped
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("binding should not fail");
        let addr = listener.local_addr().expect("listener should have an address");
        drop(listener);

        let err = workshop(&format!("http://{addr}"))
            .fetch(&SearchQuery::new("/search.json").param("search", Some("ana")))
            .await
            .expect_err("closed port should be an error");

        assert_eq!(err.kind(), GatewayErrorKind::NoResponse);
        assert!(err.message().contains("/search.json"));
    }
}
