//! HTTP sample source
//!
//! Endpoint: `GET {base_url}/simulate_eeg`
//! Returns: `{"amplitude": number, "feedback": string}`

use {
    super::source::{FetchError, SampleSource},
    crate::sample::Reading,
    async_trait::async_trait,
    std::time::Duration,
};

pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        // The simulation service is usually local; never route it through a system proxy
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()?;

        Ok(Self {
            client,
            url: endpoint_url(base_url),
        })
    }
}

#[async_trait]
impl SampleSource for HttpSource {
    async fn fetch(&self) -> Result<Reading, FetchError> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Transport(format!(
                "simulate_eeg returned {}",
                response.status()
            )));
        }

        // Read the body first so a malformed payload is reported as a decode error
        let body = response.text().await?;
        let reading: Reading = serde_json::from_str(&body)?;

        Ok(reading)
    }

    fn source_type(&self) -> &'static str {
        "HTTP"
    }
}

fn endpoint_url(base_url: &str) -> String {
    format!("{}/simulate_eeg", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_joins_cleanly() {
        assert_eq!(
            endpoint_url("http://127.0.0.1:5000"),
            "http://127.0.0.1:5000/simulate_eeg"
        );
        assert_eq!(
            endpoint_url("http://localhost:5000/"),
            "http://localhost:5000/simulate_eeg"
        );
    }

    #[tokio::test]
    #[ignore] // Run only against a live simulation backend
    async fn test_fetch_live_backend() {
        let source = HttpSource::new("http://127.0.0.1:5000", Duration::from_secs(10)).unwrap();
        let reading = source.fetch().await;
        assert!(reading.is_ok());
    }
}
