use secrecy::SecretString;

/// Default realm announced in the `WWW-Authenticate` challenge
pub const DEFAULT_REALM: &str = "OpenVoice Studio";

/// HTTP Basic authentication credentials
#[derive(Debug, Clone)]
pub struct BasicAuthConfig {
    /// Expected username
    pub username: String,
    /// Expected password
    pub password: SecretString,
    /// Realm sent with 401 challenges
    pub realm: String,
    /// Paths that skip authentication
    pub public_paths: Vec<String>,
}

impl BasicAuthConfig {
    /// Credentials with the default realm and public paths
    pub fn new(username: impl Into<String>, password: impl Into<SecretString>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            realm: DEFAULT_REALM.to_string(),
            public_paths: default_public_paths(),
        }
    }
}

fn default_public_paths() -> Vec<String> {
    vec![crate::HEALTH_PATH.to_string()]
}
