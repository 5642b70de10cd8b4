use serde::{Deserialize, Serialize};

/// JWT payload carried by every authenticated request.
///
/// `sub` is the user id and `admin` mirrors the account flag at issue time;
/// role changes only take effect once the token expires and is reissued.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    /// Expiry as a unix timestamp (seconds).
    pub exp: usize,
    pub admin: bool,
}

/// Extractor wrapper around verified [`Claims`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);
