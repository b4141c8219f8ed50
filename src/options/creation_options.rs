use crate::{
    buffers::RawBuffer,
    options::{OptionsError, RawCreationOptions},
};
use serde_derive::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Relying party the credential is scoped to.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct RelyingPartyEntity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

/// User account the credential is created for.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserEntity {
    pub id: RawBuffer,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
}

/// Credential type and COSE algorithm the relying party accepts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CredentialParameters {
    #[serde(rename = "type")]
    pub credential_type: String,
    pub alg: i64,
}

/// Credential that the authenticator must refuse to re-register.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CredentialDescriptor<B = RawBuffer> {
    #[serde(rename = "type", default = "default_credential_type")]
    pub credential_type: String,
    pub id: B,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transports: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatorSelection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authenticator_attachment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_resident_key: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resident_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_verification: Option<String>,
}

/// Fully typed credential creation options, ready to be handed to the authenticator. Every
/// binary field is a [`RawBuffer`] regardless of the wire format the options arrived in.
#[derive(Debug, Clone, PartialEq)]
pub struct CreationOptions {
    pub rp: Option<RelyingPartyEntity>,
    pub user: UserEntity,
    pub challenge: RawBuffer,
    pub pub_key_cred_params: Vec<CredentialParameters>,
    pub timeout: Option<u64>,
    pub exclude_credentials: Option<Vec<CredentialDescriptor>>,
    pub authenticator_selection: Option<AuthenticatorSelection>,
    pub hints: Option<Vec<String>>,
    pub attestation: Option<String>,
    pub attestation_formats: Option<Vec<String>>,
    pub extensions: Option<Map<String, Value>>,
}

impl CreationOptions {
    /// Decodes options from a MessagePack map where binary fields are stored as raw bytes.
    pub fn from_msgpack(body: &[u8]) -> Result<Self, OptionsError> {
        rmp_serde::from_slice::<RawCreationOptions<RawBuffer>>(body)?.try_into()
    }

    /// Decodes options from a JSON object where binary fields are base64url strings.
    pub fn from_json(body: &[u8]) -> Result<Self, OptionsError> {
        serde_json::from_slice::<RawCreationOptions>(body)?.try_into()
    }
}

fn default_credential_type() -> String {
    "public-key".to_string()
}
