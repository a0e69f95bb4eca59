//! Authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, NaiveDate, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    config::Config,
    constants::MIN_PARTICIPANT_AGE,
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    models::User,
    utils::time::age_in_years,
};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub name: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Register a new user.
    ///
    /// Both policy checkboxes are mandatory. Supplying a date of birth at
    /// registration completes age verification in the same step; a date of
    /// birth below the minimum participation age is refused outright.
    pub async fn register(
        pool: &PgPool,
        name: &str,
        email: &str,
        password: &str,
        date_of_birth: Option<NaiveDate>,
        accepted_terms: bool,
        accepted_privacy: bool,
    ) -> AppResult<User> {
        if !accepted_terms || !accepted_privacy {
            return Err(AppError::Validation(
                "Terms of service and privacy policy must both be accepted".to_string(),
            ));
        }

        if let Some(dob) = date_of_birth {
            Self::ensure_minimum_age(dob, Utc::now().date_naive())?;
        }

        if UserRepository::find_by_email(pool, email).await?.is_some() {
            return Err(AppError::AlreadyExists("Email already registered".to_string()));
        }

        let password_hash = Self::hash_password(password)?;

        let user = UserRepository::create(
            pool,
            name,
            email,
            &password_hash,
            date_of_birth,
            accepted_terms,
            accepted_privacy,
        )
        .await?;

        let user = match date_of_birth {
            Some(dob) => UserRepository::verify_age(pool, &user.id, dob).await?,
            None => user,
        };

        Ok(user)
    }

    /// Login with email and password
    pub async fn login(
        pool: &PgPool,
        mut redis: ConnectionManager,
        config: &Config,
        email: &str,
        password: &str,
    ) -> AppResult<(User, String, String, i64)> {
        let user = UserRepository::find_by_email(pool, email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        let (access_token, expires_in) = Self::generate_access_token(&user, config)?;
        let refresh_token = Self::generate_refresh_token();

        let key = format!("refresh_token:{}:{}", user.id, refresh_token);
        let expiry = config.jwt.refresh_token_expiry_days * 24 * 60 * 60;
        redis.set_ex::<_, _, ()>(&key, "1", expiry as u64).await?;

        Ok((user, access_token, refresh_token, expires_in))
    }

    /// Refresh access token
    pub async fn refresh_token(
        pool: &PgPool,
        mut redis: ConnectionManager,
        config: &Config,
        refresh_token: &str,
    ) -> AppResult<(String, String, i64)> {
        let pattern = format!("refresh_token:*:{}", refresh_token);
        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(&pattern)
            .query_async(&mut redis)
            .await?;

        if keys.is_empty() {
            return Err(AppError::InvalidToken);
        }

        let key = &keys[0];
        let parts: Vec<&str> = key.split(':').collect();
        if parts.len() != 3 {
            return Err(AppError::InvalidToken);
        }

        let user_id = Uuid::parse_str(parts[1]).map_err(|_| AppError::InvalidToken)?;

        let user = UserRepository::find_by_id(pool, &user_id)
            .await?
            .ok_or(AppError::InvalidToken)?;

        // Rotate: the old refresh token dies with this exchange
        redis.del::<_, ()>(key).await?;

        let (access_token, expires_in) = Self::generate_access_token(&user, config)?;
        let new_refresh_token = Self::generate_refresh_token();

        let new_key = format!("refresh_token:{}:{}", user.id, new_refresh_token);
        let expiry = config.jwt.refresh_token_expiry_days * 24 * 60 * 60;
        redis.set_ex::<_, _, ()>(&new_key, "1", expiry as u64).await?;

        Ok((access_token, new_refresh_token, expires_in))
    }

    /// Logout (invalidate refresh tokens)
    pub async fn logout(
        mut redis: ConnectionManager,
        user_id: &Uuid,
        all_sessions: bool,
    ) -> AppResult<()> {
        if all_sessions {
            let pattern = format!("refresh_token:{}:*", user_id);
            let keys: Vec<String> = redis::cmd("KEYS")
                .arg(&pattern)
                .query_async(&mut redis)
                .await?;

            for key in keys {
                redis.del::<_, ()>(&key).await?;
            }
        }

        Ok(())
    }

    /// Complete age verification by recording a date of birth.
    ///
    /// The verified flag is only ever set for a computed age of at least
    /// MIN_PARTICIPANT_AGE; younger dates of birth are refused and leave
    /// the account unverified.
    pub async fn verify_age(
        pool: &PgPool,
        user_id: &Uuid,
        date_of_birth: NaiveDate,
    ) -> AppResult<User> {
        Self::ensure_minimum_age(date_of_birth, Utc::now().date_naive())?;
        UserRepository::verify_age(pool, user_id, date_of_birth).await
    }

    /// Reject a date of birth below the minimum participation age
    fn ensure_minimum_age(date_of_birth: NaiveDate, today: NaiveDate) -> AppResult<()> {
        if age_in_years(date_of_birth, today) < MIN_PARTICIPANT_AGE {
            return Err(AppError::AgeVerificationRequired);
        }
        Ok(())
    }

    /// Get user by ID
    pub async fn get_user_by_id(pool: &PgPool, user_id: &Uuid) -> AppResult<Option<User>> {
        UserRepository::find_by_id(pool, user_id).await
    }

    /// Verify JWT token and extract claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Hash password using Argon2
    fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(hash)
    }

    /// Verify password against hash
    fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Generate access token
    fn generate_access_token(user: &User, config: &Config) -> AppResult<(String, i64)> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(config.jwt.expiry_hours);
        let expires_in = config.jwt.expiry_hours * 3600;

        let claims = Claims {
            sub: user.id.to_string(),
            name: user.name.clone(),
            role: user.role.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))?;

        Ok((token, expires_in))
    }

    /// Generate refresh token
    fn generate_refresh_token() -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{self, seed};

    #[test]
    fn test_minimum_age_boundary() {
        let today = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();

        // 15th birthday today passes
        let on_birthday = NaiveDate::from_ymd_opt(2011, 6, 15).unwrap();
        assert!(AuthService::ensure_minimum_age(on_birthday, today).is_ok());

        // One day short fails
        let day_short = NaiveDate::from_ymd_opt(2011, 6, 16).unwrap();
        assert!(matches!(
            AuthService::ensure_minimum_age(day_short, today),
            Err(AppError::AgeVerificationRequired)
        ));
    }

    #[tokio::test]
    async fn test_register_rejects_underage_date_of_birth() {
        let pool = test_utils::test_pool().await;
        let email = format!("kid-{}@example.com", Uuid::new_v4());

        let result = AuthService::register(
            &pool,
            "Kid",
            &email,
            "Password123",
            Some(seed::dob_years_ago(10)),
            true,
            true,
        )
        .await;
        assert!(matches!(result, Err(AppError::AgeVerificationRequired)));

        // No account row is left behind
        assert!(UserRepository::find_by_email(&pool, &email)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_register_with_adult_dob_completes_age_verification() {
        let pool = test_utils::test_pool().await;
        let email = format!("adult-{}@example.com", Uuid::new_v4());

        let user = AuthService::register(
            &pool,
            "Adult",
            &email,
            "Password123",
            Some(seed::dob_years_ago(20)),
            true,
            true,
        )
        .await
        .unwrap();

        assert!(user.is_age_verified);
        assert!(user.date_of_birth.is_some());
    }

    #[tokio::test]
    async fn test_verify_age_refuses_underage_and_leaves_flag_unset() {
        let pool = test_utils::test_pool().await;
        let email = format!("later-{}@example.com", Uuid::new_v4());

        let user = AuthService::register(&pool, "Later", &email, "Password123", None, true, true)
            .await
            .unwrap();
        assert!(!user.is_age_verified);

        let result = AuthService::verify_age(&pool, &user.id, seed::dob_years_ago(14)).await;
        assert!(matches!(result, Err(AppError::AgeVerificationRequired)));

        let unchanged = UserRepository::find_by_id(&pool, &user.id)
            .await
            .unwrap()
            .unwrap();
        assert!(!unchanged.is_age_verified);

        let verified = AuthService::verify_age(&pool, &user.id, seed::dob_years_ago(18))
            .await
            .unwrap();
        assert!(verified.is_age_verified);
    }
}
