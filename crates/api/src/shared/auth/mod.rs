mod route_guards;

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
pub use route_guards::{create_user_if_not_exists, protect_route};
use serde::{Deserialize, Serialize};

/// Claims of the bearer token identifying a `User`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the external id of the `User`
    pub sub: String,
    /// Expiration time (as UTC timestamp in seconds)
    pub exp: usize,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

pub fn parse_authtoken_header(token_header_value: &str) -> &str {
    let token = token_header_value.trim();
    token
        .strip_prefix("Bearer ")
        .or_else(|| token.strip_prefix("bearer "))
        .unwrap_or(token)
        .trim()
}

/// Verifies the HS256 signature and expiration of the token
pub fn decode_token(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let claims = decode::<Claims>(token, &decoding_key, &Validation::new(Algorithm::HS256))?.claims;
    if claims.sub.trim().is_empty() {
        return Err(jsonwebtoken::errors::ErrorKind::InvalidSubject.into());
    }

    Ok(claims)
}

#[cfg(test)]
pub mod test_helpers {
    use super::Claims;
    use jsonwebtoken::{encode, EncodingKey, Header};

    pub fn get_token(secret: &str, sub: &str, expired: bool) -> String {
        let exp = if expired {
            100 // year 1970
        } else {
            5609418990 // year 2147
        };
        let claims = Claims {
            sub: sub.into(),
            exp,
            name: Some("Priya".into()),
            email: Some("priya@example.com".into()),
            picture: None,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }
}
