mod serialized_credential;

pub use self::serialized_credential::SerializedCredential;
