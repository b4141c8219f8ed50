use crate::{
    buffers::{EncodedBuffer, RawBuffer},
    options::{
        AuthenticatorSelection, BinaryField, CreationOptions, CredentialDescriptor,
        CredentialParameters, OptionsError, RelyingPartyEntity, UserEntity,
    },
};
use serde_derive::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Creation options exactly as they travel over the wire. Binary fields use the representation
/// of the wire format (`B`) and required fields may still be missing.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawCreationOptions<B = EncodedBuffer> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rp: Option<RelyingPartyEntity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<RawUserEntity<B>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<B>,
    #[serde(default)]
    pub pub_key_cred_params: Vec<CredentialParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_credentials: Option<Vec<CredentialDescriptor<B>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authenticator_selection: Option<AuthenticatorSelection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attestation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attestation_formats: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RawUserEntity<B = EncodedBuffer> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<B>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
}

impl<B: BinaryField> TryFrom<RawCreationOptions<B>> for CreationOptions {
    type Error = OptionsError;

    fn try_from(raw: RawCreationOptions<B>) -> Result<Self, Self::Error> {
        let challenge = raw
            .challenge
            .ok_or(OptionsError::MissingField("challenge"))
            .and_then(|challenge| decode_field("challenge", challenge))?;

        let (user_id, user_name, user_display_name) = match raw.user {
            Some(RawUserEntity {
                id: Some(id),
                name,
                display_name,
            }) => (decode_field("user.id", id)?, name, display_name),
            _ => return Err(OptionsError::MissingField("user.id")),
        };

        // Every entry is decoded into a sequence of the same length as the input.
        let exclude_credentials = raw
            .exclude_credentials
            .map(|descriptors| {
                descriptors
                    .into_iter()
                    .enumerate()
                    .map(|(index, descriptor)| {
                        Ok(CredentialDescriptor {
                            credential_type: descriptor.credential_type,
                            id: decode_field(
                                &format!("excludeCredentials[{index}].id"),
                                descriptor.id,
                            )?,
                            transports: descriptor.transports,
                        })
                    })
                    .collect::<Result<Vec<_>, OptionsError>>()
            })
            .transpose()?;

        Ok(CreationOptions {
            rp: raw.rp,
            user: UserEntity {
                id: user_id,
                name: user_name,
                display_name: user_display_name,
            },
            challenge,
            pub_key_cred_params: raw.pub_key_cred_params,
            timeout: raw.timeout,
            exclude_credentials,
            authenticator_selection: raw.authenticator_selection,
            hints: raw.hints,
            attestation: raw.attestation,
            attestation_formats: raw.attestation_formats,
            extensions: raw.extensions,
        })
    }
}

impl From<&CreationOptions> for RawCreationOptions<EncodedBuffer> {
    fn from(options: &CreationOptions) -> Self {
        Self {
            rp: options.rp.clone(),
            user: Some(RawUserEntity {
                id: Some(EncodedBuffer::from(&options.user.id)),
                name: options.user.name.clone(),
                display_name: options.user.display_name.clone(),
            }),
            challenge: Some(EncodedBuffer::from(&options.challenge)),
            pub_key_cred_params: options.pub_key_cred_params.clone(),
            timeout: options.timeout,
            exclude_credentials: options.exclude_credentials.as_ref().map(|descriptors| {
                descriptors
                    .iter()
                    .map(|descriptor| CredentialDescriptor {
                        credential_type: descriptor.credential_type.clone(),
                        id: EncodedBuffer::from(&descriptor.id),
                        transports: descriptor.transports.clone(),
                    })
                    .collect()
            }),
            authenticator_selection: options.authenticator_selection.clone(),
            hints: options.hints.clone(),
            attestation: options.attestation.clone(),
            attestation_formats: options.attestation_formats.clone(),
            extensions: options.extensions.clone(),
        }
    }
}

fn decode_field<B: BinaryField>(field: &str, value: B) -> Result<RawBuffer, OptionsError> {
    value
        .into_raw_buffer()
        .map_err(|source| OptionsError::Decode {
            field: field.to_string(),
            source,
        })
}
