use crate::{authenticator::Credential, buffers::EncodedBuffer};
use serde_derive::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wire form of a newly created credential that is submitted to the relying party. Carries only
/// the fields the relying party verifies, every binary value is base64url text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SerializedCredential {
    pub id: String,
    pub raw_id: EncodedBuffer,
    #[serde(rename = "type")]
    pub credential_type: String,
    pub client_extension_results: Map<String, Value>,
    pub response: SerializedAttestationResponse,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SerializedAttestationResponse {
    pub attestation_object: EncodedBuffer,
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: EncodedBuffer,
}

impl From<&Credential> for SerializedCredential {
    fn from(credential: &Credential) -> Self {
        Self {
            id: credential.id.clone(),
            raw_id: EncodedBuffer::from(&credential.raw_id),
            credential_type: credential.credential_type.clone(),
            client_extension_results: credential.client_extension_results.clone(),
            response: SerializedAttestationResponse {
                attestation_object: EncodedBuffer::from(&credential.response.attestation_object),
                client_data_json: EncodedBuffer::from(&credential.response.client_data_json),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        attestation::SerializedCredential,
        authenticator::{AttestationResponse, Credential},
        buffers::RawBuffer,
    };
    use insta::assert_json_snapshot;
    use serde_json::{Map, json};

    fn credential() -> Credential {
        Credential {
            id: "AAEC".to_string(),
            raw_id: RawBuffer::from([0, 1, 2]),
            credential_type: "public-key".to_string(),
            response: AttestationResponse {
                attestation_object: RawBuffer::from([255]),
                client_data_json: RawBuffer::from([0]),
                transports: vec!["usb".to_string(), "nfc".to_string()],
                authenticator_data: Some(RawBuffer::from([1, 2, 3, 4])),
                public_key: Some(RawBuffer::from([5, 6])),
                public_key_algorithm: Some(-7),
            },
            client_extension_results: Map::new(),
            authenticator_attachment: Some("cross-platform".to_string()),
        }
    }

    #[test]
    fn serializes_only_verified_fields() -> anyhow::Result<()> {
        assert_json_snapshot!(SerializedCredential::from(&credential()), @r###"
        {
          "id": "AAEC",
          "rawId": "AAEC",
          "type": "public-key",
          "clientExtensionResults": {},
          "response": {
            "attestationObject": "_w",
            "clientDataJSON": "AA"
          }
        }
        "###);

        Ok(())
    }

    #[test]
    fn copies_extension_results_verbatim() -> anyhow::Result<()> {
        let mut credential = credential();
        credential.client_extension_results = json!({
            "credProps": { "rk": true },
            "largeBlob": { "supported": false }
        })
        .as_object()
        .cloned()
        .unwrap_or_default();

        let serialized = serde_json::to_value(SerializedCredential::from(&credential))?;
        assert_eq!(
            serialized["clientExtensionResults"],
            json!({ "credProps": { "rk": true }, "largeBlob": { "supported": false } })
        );

        // Four top-level values and the response with its two buffers.
        assert_eq!(
            serialized.as_object().map(|fields| fields.len()),
            Some(5)
        );
        assert_eq!(
            serialized["response"].as_object().map(|fields| fields.len()),
            Some(2)
        );

        Ok(())
    }
}
