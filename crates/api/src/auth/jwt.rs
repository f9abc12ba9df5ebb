//! Bearer-token verification for lesson plan callers.
//!
//! Tokens are HS256 JWTs issued by the identity provider that fronts this
//! service. Only `sub` and `role` drive authorization; `jti` is carried
//! through for log correlation. [`generate_access_token`] mints tokens for
//! local tooling and tests.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use lessonplans_core::roles::can_manage_lesson_plans;
use lessonplans_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims every access token must carry.
///
/// A token missing any of these fails to decode.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Caller's user id.
    pub sub: DbId,
    /// Caller's role name, e.g. `"instructor"`.
    pub role: String,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    /// Issue time, seconds since the Unix epoch.
    pub iat: i64,
    /// Token id.
    pub jti: String,
}

impl Claims {
    /// Fresh claims for `user_id` valid for `lifetime_mins` from now.
    pub fn new(user_id: DbId, role: &str, lifetime_mins: i64) -> Self {
        let iat = chrono::Utc::now().timestamp();
        Self {
            sub: user_id,
            role: role.to_string(),
            exp: iat + lifetime_mins * 60,
            iat,
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Whether the caller may manage lesson plans.
    pub fn can_manage_lesson_plans(&self) -> bool {
        can_manage_lesson_plans(&self.role)
    }
}

/// Signing settings shared by token issue and verification.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret.
    pub secret: String,
    /// Lifetime of minted tokens in minutes.
    pub access_token_expiry_mins: i64,
}

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;

impl JwtConfig {
    /// Load from the environment.
    ///
    /// | Env Var                  | Required | Default |
    /// |--------------------------|----------|---------|
    /// | `JWT_SECRET`             | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS` | no       | `15`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is unset or empty, or the expiry is not an integer.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        assert!(!secret.is_empty(), "JWT_SECRET must be set and non-empty");

        let access_token_expiry_mins = match std::env::var("JWT_ACCESS_EXPIRY_MINS") {
            Ok(raw) => raw
                .parse()
                .unwrap_or_else(|_| panic!("JWT_ACCESS_EXPIRY_MINS must be an integer, got '{raw}'")),
            Err(_) => DEFAULT_ACCESS_EXPIRY_MINS,
        };

        Self {
            secret,
            access_token_expiry_mins,
        }
    }

    fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.secret.as_bytes())
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.secret.as_bytes())
    }
}

/// HS256 only; `exp` and `sub` must be present.
fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp", "sub"]);
    validation
}

/// Sign a token for `user_id` with `role`.
pub fn generate_access_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims::new(user_id, role, config.access_token_expiry_mins);
    encode(&Header::new(Algorithm::HS256), &claims, &config.encoding_key())
}

/// Verify signature and expiry and decode the [`Claims`].
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(token, &config.decoding_key(), &validation()).map(|data| data.claims)
}
