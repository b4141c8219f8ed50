use crate::buffers::RawBuffer;
use serde_json::{Map, Value};

/// Public key credential created by the authenticator. Built once per attempt and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Credential {
    /// Credential ID as base64url text, as reported by the authenticator.
    pub id: String,
    pub raw_id: RawBuffer,
    pub credential_type: String,
    pub response: AttestationResponse,
    pub client_extension_results: Map<String, Value>,
    pub authenticator_attachment: Option<String>,
}

/// Authenticator's attestation response. Besides the attestation object and client data it
/// carries convenience values the platform derives from them, those never leave the client.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttestationResponse {
    pub attestation_object: RawBuffer,
    pub client_data_json: RawBuffer,
    pub transports: Vec<String>,
    pub authenticator_data: Option<RawBuffer>,
    pub public_key: Option<RawBuffer>,
    pub public_key_algorithm: Option<i64>,
}
