use crate::{
    attestation::SerializedCredential, config::Config, network::Network, options::OptionsFormat,
};
use anyhow::{Context, bail};
use reqwest::{
    Response, StatusCode,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde_derive::Deserialize;
use tracing::{debug, warn};

/// Error body the relying party responds with when it fails to process a request.
#[derive(Deserialize)]
struct RelyingPartyErrorBody {
    message: String,
}

/// API to work with the relying party registration endpoints.
pub struct RelyingPartyApi<'a> {
    network: &'a Network,
    config: &'a Config,
}

impl<'a> RelyingPartyApi<'a> {
    /// Creates relying party API.
    pub fn new(network: &'a Network, config: &'a Config) -> Self {
        Self { network, config }
    }

    /// Fetches creation options in the configured format and returns the raw response body.
    pub async fn fetch_options(&self) -> anyhow::Result<Vec<u8>> {
        let format = self.config.options_format;
        let url = &self.config.options_url;
        let response = self
            .network
            .http_client
            .get(url.as_str())
            .header(ACCEPT, format.content_type())
            .send()
            .await
            .with_context(|| format!("Cannot fetch {format} creation options ({url})."))?;

        let status = response.status();
        debug!(
            http.status = status.as_u16(),
            options.format = %format,
            "Received creation options response."
        );
        if !status.is_success() {
            bail!(
                "Failed to fetch {format} creation options ({url}), status {status}: {}",
                read_error_message(response).await
            );
        }

        let content_format = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(OptionsFormat::from_content_type);
        if let Some(content_format) = content_format.filter(|content_format| *content_format != format)
        {
            warn!(
                options.format = %format,
                "Relying party responded with {content_format} creation options, decoding them as {format}."
            );
        }

        Ok(response
            .bytes()
            .await
            .with_context(|| format!("Cannot read {format} creation options ({url})."))?
            .to_vec())
    }

    /// Submits the attested credential. Only `200 OK` means the relying party accepted it.
    pub async fn submit_credential(&self, credential: &SerializedCredential) -> anyhow::Result<()> {
        let url = &self.config.submission_url;
        let body = serde_json::to_string(credential)
            .with_context(|| format!("Cannot serialize credential ({}).", credential.id))?;

        let response = self
            .network
            .http_client
            .post(url.as_str())
            .header(CONTENT_TYPE, "text/plain")
            .body(body)
            .send()
            .await
            .with_context(|| format!("Cannot submit credential ({}) to {url}.", credential.id))?;

        let status = response.status();
        debug!(
            http.status = status.as_u16(),
            credential.id = %credential.id,
            "Received credential submission response."
        );
        if status != StatusCode::OK {
            bail!(
                "Failed to submit credential ({}) to {url}, status {status}: {}",
                credential.id,
                read_error_message(response).await
            );
        }

        Ok(())
    }
}

/// Extracts the message from the relying party error body, falls back to the raw body text.
async fn read_error_message(response: Response) -> String {
    let text = match response.text().await {
        Ok(text) => text,
        Err(err) => return format!("<unreadable body: {err}>"),
    };

    serde_json::from_str::<RelyingPartyErrorBody>(&text)
        .map(|body| body.message)
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use crate::{
        attestation::SerializedCredential,
        authenticator::tests::mock_credential,
        config::{Config, RawConfig, RelyingPartyConfig},
        network::{RelyingPartyApi, tests::mock_network},
        options::OptionsFormat,
    };
    use httpmock::MockServer;
    use serde_json::json;
    use url::Url;

    fn mock_config(server: &MockServer, options_format: OptionsFormat) -> anyhow::Result<Config> {
        Config::try_from(RawConfig {
            options_format,
            relying_party: RelyingPartyConfig {
                url: Url::parse(&server.base_url())?,
                ..Default::default()
            },
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn fetches_json_options() -> anyhow::Result<()> {
        let server = MockServer::start();
        let config = mock_config(&server, OptionsFormat::Json)?;
        let network = mock_network()?;

        let options_mock = server.mock(|when, then| {
            when.method(httpmock::Method::GET)
                .path("/attestation/json")
                .header("accept", "application/json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({ "challenge": "QQ", "user": { "id": "Qg" } }));
        });

        let body = RelyingPartyApi::new(&network, &config)
            .fetch_options()
            .await?;
        options_mock.assert();
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(&body)?,
            json!({ "challenge": "QQ", "user": { "id": "Qg" } })
        );

        Ok(())
    }

    #[tokio::test]
    async fn fetches_msgpack_options() -> anyhow::Result<()> {
        let server = MockServer::start();
        let config = mock_config(&server, OptionsFormat::MessagePack)?;
        let network = mock_network()?;

        let options_mock = server.mock(|when, then| {
            when.method(httpmock::Method::GET)
                .path("/attestation")
                .header("accept", "application/x-msgpack");
            then.status(200)
                .header("Content-Type", "application/x-msgpack")
                .body(vec![0x80u8]);
        });

        let body = RelyingPartyApi::new(&network, &config)
            .fetch_options()
            .await?;
        options_mock.assert();
        assert_eq!(body, vec![0x80]);

        Ok(())
    }

    #[tokio::test]
    async fn fetches_options_with_mismatched_content_type() -> anyhow::Result<()> {
        let server = MockServer::start();
        let config = mock_config(&server, OptionsFormat::MessagePack)?;
        let network = mock_network()?;

        let options_mock = server.mock(|when, then| {
            when.method(httpmock::Method::GET)
                .path("/attestation")
                .header("accept", "application/x-msgpack");
            then.status(200)
                .header("Content-Type", "application/json")
                .body(vec![0x80u8]);
        });

        // The body is returned untouched and left to the configured decoder.
        let body = RelyingPartyApi::new(&network, &config)
            .fetch_options()
            .await?;
        options_mock.assert();
        assert_eq!(body, vec![0x80]);
        assert!(config.options_format.decode(&body).is_err());

        Ok(())
    }

    #[tokio::test]
    async fn fails_to_fetch_redirected_options() -> anyhow::Result<()> {
        let server = MockServer::start();
        let config = mock_config(&server, OptionsFormat::Json)?;
        let network = mock_network()?;

        let options_mock = server.mock(|when, then| {
            when.method(httpmock::Method::GET).path("/attestation/json");
            then.status(301).header("Location", "/login");
        });
        let login_mock = server.mock(|when, then| {
            when.path("/login");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({ "challenge": "QQ", "user": { "id": "Qg" } }));
        });

        let err = RelyingPartyApi::new(&network, &config)
            .fetch_options()
            .await
            .unwrap_err();
        options_mock.assert_calls(1);
        login_mock.assert_calls(0);
        assert!(err.to_string().contains("status 301 Moved Permanently"));

        Ok(())
    }

    #[tokio::test]
    async fn fails_to_fetch_options_with_relying_party_error() -> anyhow::Result<()> {
        let server = MockServer::start();
        let config = mock_config(&server, OptionsFormat::Json)?;
        let network = mock_network()?;

        let options_mock = server.mock(|when, then| {
            when.method(httpmock::Method::GET).path("/attestation/json");
            then.status(500)
                .header("Content-Type", "application/json")
                .json_body(json!({ "message": "Session store is unavailable." }));
        });

        let err = RelyingPartyApi::new(&network, &config)
            .fetch_options()
            .await
            .unwrap_err();
        options_mock.assert_calls(1);
        assert_eq!(
            err.to_string(),
            format!(
                "Failed to fetch json creation options ({}), status 500 Internal Server Error: Session store is unavailable.",
                server.url("/attestation/json")
            )
        );

        Ok(())
    }

    #[tokio::test]
    async fn submits_credential() -> anyhow::Result<()> {
        let server = MockServer::start();
        let config = mock_config(&server, OptionsFormat::Json)?;
        let network = mock_network()?;

        let submission_mock = server.mock(|when, then| {
            when.method(httpmock::Method::POST)
                .path("/attestation")
                .header("content-type", "text/plain")
                .json_body(json!({
                    "id": "AAEC",
                    "rawId": "AAEC",
                    "type": "public-key",
                    "clientExtensionResults": {},
                    "response": { "attestationObject": "_w", "clientDataJSON": "AA" }
                }));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({}));
        });

        RelyingPartyApi::new(&network, &config)
            .submit_credential(&SerializedCredential::from(&mock_credential()))
            .await?;
        submission_mock.assert();

        Ok(())
    }

    #[tokio::test]
    async fn fails_to_submit_credential_without_ok_status() -> anyhow::Result<()> {
        let server = MockServer::start();
        let config = mock_config(&server, OptionsFormat::Json)?;
        let network = mock_network()?;

        let submission_mock = server.mock(|when, then| {
            when.method(httpmock::Method::POST).path("/attestation");
            then.status(201).body("created");
        });

        let err = RelyingPartyApi::new(&network, &config)
            .submit_credential(&SerializedCredential::from(&mock_credential()))
            .await
            .unwrap_err();
        submission_mock.assert_calls(1);
        assert!(err.to_string().contains("status 201 Created: created"));

        Ok(())
    }
}
