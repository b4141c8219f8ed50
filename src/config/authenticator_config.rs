use serde_derive::{Deserialize, Serialize};

/// Configuration of the external program that implements the authenticator.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatorConfig {
    /// Program to run for every credential creation request.
    #[serde(default = "default_command")]
    pub command: String,
    /// Arguments passed to the program.
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for AuthenticatorConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            args: vec![],
        }
    }
}

fn default_command() -> String {
    "passkey-authenticator".to_string()
}
