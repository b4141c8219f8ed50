mod binary_field;
mod creation_options;
mod options_error;
mod options_format;
mod raw_creation_options;

pub use self::{
    binary_field::BinaryField,
    creation_options::{
        AuthenticatorSelection, CreationOptions, CredentialDescriptor, CredentialParameters,
        RelyingPartyEntity, UserEntity,
    },
    options_error::OptionsError,
    options_format::OptionsFormat,
    raw_creation_options::RawCreationOptions,
};
#[cfg(test)]
pub use self::raw_creation_options::RawUserEntity;
