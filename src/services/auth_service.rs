use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::{OsRng, RngCore};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
    TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit,
    dto::auth::{Claims, CurrentUser, LoginResponse, RegisterInput, VerifyOutcome},
    entity::{
        employees::{Column as EmployeeCol, Entity as Employees},
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
        verified_emails::{ActiveModel as TokenActive, Column as TokenCol, Entity as VerifiedEmails},
    },
    error::{AppError, AppResult},
    mailer::{Email, verification_email_body, verification_link},
    services::employee_service::employee_from_entity,
    state::AppState,
};

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const NOT_VERIFIED: &str = "Please verification email, check youre email to activate user";
pub const NOT_ACTIVE: &str = "Account Not Activation, Please Contact your Adminsitrator";
pub const REGISTERED: &str = "Register Success, Please Check youre email to activation account";

const REFRESH_TOKEN_DAYS: i64 = 30;

pub async fn register_user(state: &AppState, input: RegisterInput) -> AppResult<UserModel> {
    let RegisterInput { email, password, .. } = input;

    let exist = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .count(&state.orm)
        .await?;
    if exist > 0 {
        return Err(AppError::BadRequest("Email already exist".into()));
    }

    let password_hash = hash_password(&password)?;
    let token = generate_token();

    let txn = state.orm.begin().await?;
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        password_hash: Set(password_hash),
        is_verified: Set(false),
        is_active: Set(false),
        refresh_token: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;

    TokenActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.id),
        token: Set(token.clone()),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    let link = verification_link(&state.config.base_url, &token);
    let email = Email {
        from: state.config.email_from.clone(),
        to: user.email.clone(),
        subject: "Verification User".to_string(),
        html: verification_email_body(&link),
    };
    if let Err(err) = state.mailer.send(email).await {
        tracing::warn!(error = %err, user_id = %user.id, "verification mail failed");
    }

    audit::record(
        &state.pool,
        Some(user.id),
        "user_register",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(user)
}

/// Check credentials and, when email verification is on, the account flags.
///
/// Every failure is reported as `BadRequest`; JSON callers turn it into 401.
pub async fn authenticate(state: &AppState, email: &str, password: &str) -> AppResult<UserModel> {
    let user = Users::find()
        .filter(UserCol::Email.eq(email))
        .one(&state.orm)
        .await?;

    let user = match user {
        Some(u) => u,
        None => return Err(AppError::BadRequest(INVALID_CREDENTIALS.into())),
    };

    if !verify_password(password, &user.password_hash)? {
        return Err(AppError::BadRequest(INVALID_CREDENTIALS.into()));
    }

    if state.config.email_verification {
        if !user.is_verified {
            return Err(AppError::BadRequest(NOT_VERIFIED.into()));
        }
        if !user.is_active {
            return Err(AppError::BadRequest(NOT_ACTIVE.into()));
        }
    }

    audit::record(
        &state.pool,
        Some(user.id),
        "user_login",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(user)
}

/// Sign a refresh token for the user and store it on the account.
pub async fn issue_refresh_token(state: &AppState, user: UserModel) -> AppResult<LoginResponse> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::days(REFRESH_TOKEN_DAYS))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        exp: usize::try_from(expiration.timestamp())
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?,
    };

    let refresh_token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.config.jwt_refresh_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;

    let user_id = user.id;
    let email = user.email.clone();
    let mut active: UserActive = user.into();
    active.refresh_token = Set(Some(refresh_token.clone()));
    active.updated_at = Set(Utc::now().into());
    active.update(&state.orm).await?;

    Ok(LoginResponse {
        user_id,
        email,
        refresh_token,
    })
}

pub async fn verify_email(state: &AppState, token: &str) -> AppResult<VerifyOutcome> {
    let record = VerifiedEmails::find()
        .filter(TokenCol::Token.eq(token))
        .one(&state.orm)
        .await?;
    let record = match record {
        Some(r) => r,
        None => return Ok(VerifyOutcome::InvalidToken),
    };

    let user = Users::find_by_id(record.user_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: UserActive = user.into();
    active.is_verified = Set(true);
    active.updated_at = Set(Utc::now().into());
    let user = active.update(&state.orm).await?;

    let has_employee = Employees::find()
        .filter(EmployeeCol::UserId.eq(user.id))
        .count(&state.orm)
        .await?
        > 0;

    audit::record(
        &state.pool,
        Some(user.id),
        "email_verified",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(VerifyOutcome::Verified {
        user_id: user.id,
        has_employee,
    })
}

/// Look up the session user. `None` means the session points at a user that
/// no longer exists.
pub async fn get_user(state: &AppState, user_id: Uuid) -> AppResult<Option<CurrentUser>> {
    let found = Users::find_by_id(user_id)
        .find_also_related(Employees)
        .one(&state.orm)
        .await?;

    Ok(found.map(|(user, employee)| CurrentUser {
        user_id: user.id,
        email: user.email.clone(),
        employee: employee.map(|e| employee_from_entity(e, Some(&user))),
    }))
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// 32 random bytes, hex encoded.
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
