use jsonwebtoken::{DecodingKey, Validation, decode, errors::Error};
use serde::{Deserialize, Serialize};

/// Claims of an admin token minted by the external identity provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Admin email address.
    pub sub: String,
    /// Expiration timestamp.
    pub exp: usize,
}

/// Verify and decode an admin token.
pub fn verify(token: &str, secret: &str) -> Result<Claims, Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}
