use crate::{
    authenticator::{AttestationResponse, Authenticator, AuthenticatorError, Credential},
    buffers::{DecodeError, EncodedBuffer},
    config::AuthenticatorConfig,
    options::{CreationOptions, RawCreationOptions},
};
use futures::future::BoxFuture;
use serde_derive::Deserialize;
use serde_json::{Map, Value};
use std::process::Stdio;
use tokio::{io::AsyncWriteExt, process::Command};
use tracing::debug;

/// Authenticator reached through an external program. The program reads creation options as
/// JSON from stdin and writes either the registration response or the platform error to stdout.
#[derive(Clone, Debug)]
pub struct CommandAuthenticator {
    config: AuthenticatorConfig,
}

impl CommandAuthenticator {
    pub fn new(config: AuthenticatorConfig) -> Self {
        Self { config }
    }

    async fn run(&self, options: CreationOptions) -> Result<Credential, AuthenticatorError> {
        let input = serde_json::to_vec(&RawCreationOptions::from(&options)).map_err(|err| {
            AuthenticatorError::unknown(format!("Cannot serialize creation options: {err}"))
        })?;

        debug!(
            authenticator.command = %self.config.command,
            "Spawning authenticator command."
        );
        let mut child = Command::new(&self.config.command)
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| {
                AuthenticatorError::unknown(format!(
                    "Cannot spawn authenticator command `{}`: {err}",
                    self.config.command
                ))
            })?;

        // Stdin is closed once written so that the program sees the end of input.
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&input).await.map_err(|err| {
                AuthenticatorError::unknown(format!(
                    "Cannot pass creation options to authenticator command: {err}"
                ))
            })?;
        }

        let output = child.wait_with_output().await.map_err(|err| {
            AuthenticatorError::unknown(format!("Authenticator command failed: {err}"))
        })?;
        if !output.status.success() {
            return Err(AuthenticatorError::unknown(format!(
                "Authenticator command exited with {}.",
                output.status
            )));
        }

        match serde_json::from_slice::<CommandOutput>(&output.stdout) {
            Ok(CommandOutput::Rejected { error }) => Err(error),
            Ok(CommandOutput::Created(response)) => Credential::try_from(response).map_err(|err| {
                AuthenticatorError::unknown(format!("Authenticator returned a malformed credential: {err}"))
            }),
            Err(err) => Err(AuthenticatorError::unknown(format!(
                "Cannot parse authenticator command output: {err}"
            ))),
        }
    }
}

impl Authenticator for CommandAuthenticator {
    fn create(
        &self,
        options: CreationOptions,
    ) -> BoxFuture<'_, Result<Credential, AuthenticatorError>> {
        Box::pin(self.run(options))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CommandOutput {
    Rejected { error: AuthenticatorError },
    Created(RegistrationResponse),
}

/// Registration response in its JSON form, all binary values are base64url text.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistrationResponse {
    id: String,
    raw_id: EncodedBuffer,
    #[serde(rename = "type")]
    credential_type: String,
    response: AuthenticatorAttestationResponse,
    #[serde(default)]
    client_extension_results: Map<String, Value>,
    #[serde(default)]
    authenticator_attachment: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthenticatorAttestationResponse {
    #[serde(rename = "clientDataJSON")]
    client_data_json: EncodedBuffer,
    attestation_object: EncodedBuffer,
    #[serde(default)]
    transports: Vec<String>,
    #[serde(default)]
    authenticator_data: Option<EncodedBuffer>,
    #[serde(default)]
    public_key: Option<EncodedBuffer>,
    #[serde(default)]
    public_key_algorithm: Option<i64>,
}

impl TryFrom<RegistrationResponse> for Credential {
    type Error = DecodeError;

    fn try_from(value: RegistrationResponse) -> Result<Self, Self::Error> {
        let response = value.response;
        Ok(Credential {
            id: value.id,
            raw_id: value.raw_id.decode()?,
            credential_type: value.credential_type,
            response: AttestationResponse {
                attestation_object: response.attestation_object.decode()?,
                client_data_json: response.client_data_json.decode()?,
                transports: response.transports,
                authenticator_data: response
                    .authenticator_data
                    .map(|data| data.decode())
                    .transpose()?,
                public_key: response.public_key.map(|key| key.decode()).transpose()?,
                public_key_algorithm: response.public_key_algorithm,
            },
            client_extension_results: value.client_extension_results,
            authenticator_attachment: value.authenticator_attachment,
        })
    }
}
