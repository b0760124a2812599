use std::fmt;

use crate::domain::enums::Environment;

/// API key pair bound to one exchange environment. Immutable after construction.
#[derive(Clone)]
pub struct Credentials {
    key: String,
    secret: String,
    environment: Environment,
}

impl Credentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>, environment: Environment) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
            environment,
        }
    }

    pub fn testnet(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self::new(key, secret, Environment::Testnet)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }
}

// The secret never reaches logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"***")
            .field("environment", &self.environment)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::testnet("my-key", "super-secret");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("my-key"));
        assert!(!printed.contains("super-secret"));
        assert_eq!(creds.secret(), "super-secret");
        assert_eq!(creds.environment(), Environment::Testnet);
    }
}
