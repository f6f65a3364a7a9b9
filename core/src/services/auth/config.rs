//! Configuration for the authentication service

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// bcrypt work factor used when hashing new passwords
    pub bcrypt_cost: u32,
    /// Whether to allow registration of new users
    pub allow_registration: bool,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
            allow_registration: true,
        }
    }
}

impl AuthServiceConfig {
    /// Sets the bcrypt cost
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Enables or disables signup
    pub fn with_registration(mut self, allow: bool) -> Self {
        self.allow_registration = allow;
        self
    }
}
