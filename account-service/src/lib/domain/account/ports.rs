use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::errors::EmailDeliveryError;
use crate::domain::account::emails::EmailMessage;
use crate::domain::account::models::AccessTokenResult;
use crate::domain::account::models::LoginResult;
use crate::domain::account::models::PublicUser;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::User;
use crate::domain::account::models::UserId;

/// Port for the account credential lifecycle.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register an account, or refresh an unverified one with the same email.
    ///
    /// # Errors
    /// * `EmailAlreadyActive` - An active account already uses this email
    async fn register(&self, command: RegisterCommand) -> Result<PublicUser, AccountError>;

    /// Send a fresh verification token to an inactive account.
    ///
    /// # Errors
    /// * `AccountNotFound` - No account with this email
    /// * `AlreadyActive` - Account is already verified
    async fn resend_verification(&self, email: &str) -> Result<(), AccountError>;

    /// Exchange email and password for an access/refresh pair.
    ///
    /// # Errors
    /// * `AccountNotFound` - No account with this email
    /// * `InvalidCredentials` - Password does not match
    /// * `AccountInactive` - Password matches but the email is not verified
    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AccountError>;

    /// Mint a new access token from a refresh token. Never reads storage.
    ///
    /// # Errors
    /// * `InvalidCredential` - Token is corrupt, forged or expired
    /// * `WrongCredentialKind` - Token is not a refresh token
    async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<AccessTokenResult, AccountError>;

    /// Redeem a one-time token and activate the account.
    ///
    /// # Errors
    /// * `InvalidCredential` / `WrongCredentialKind` - Token rejected
    /// * `AccountNotFound` - Token subject no longer exists
    async fn verify_email(&self, one_time_token: &str) -> Result<PublicUser, AccountError>;

    /// Rotate the password of the authenticated, active user.
    ///
    /// # Errors
    /// * `InvalidCredential` / `WrongCredentialKind` - Token rejected
    /// * `AccountNotFound` / `AccountInactive` - User cannot be resolved
    /// * `IncorrectOldPassword` - Current password does not match
    async fn change_password(
        &self,
        access_token: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AccountError>;

    /// Email a password reset token.
    ///
    /// # Errors
    /// * `AccountNotFound` - No account with this email
    async fn forgot_password(&self, email: &str) -> Result<(), AccountError>;

    /// Set a new password using a one-time token. No old-password check.
    ///
    /// # Errors
    /// * `InvalidCredential` / `WrongCredentialKind` - Token rejected
    /// * `AccountNotFound` - Token subject no longer exists
    async fn reset_password(
        &self,
        one_time_token: &str,
        new_password: &str,
    ) -> Result<(), AccountError>;

    /// Resolve the user behind an access token.
    ///
    /// # Errors
    /// * `InvalidCredential` / `WrongCredentialKind` - Token rejected
    /// * `AccountNotFound` - Token subject no longer exists
    async fn current_user(&self, access_token: &str) -> Result<User, AccountError>;

    /// Resolve the user behind an access token and require it to be active.
    ///
    /// # Errors
    /// * Same as `current_user`, plus `AccountInactive`
    async fn current_active_user(&self, access_token: &str) -> Result<User, AccountError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already stored
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, AccountError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountError>;

    /// Retrieve user by exact email.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError>;

    /// Overwrite an existing user row.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email is already stored
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, AccountError>;
}

/// Outbound email delivery.
#[async_trait]
pub trait EmailSender: Send + Sync + 'static {
    /// Deliver one message.
    ///
    /// # Errors
    /// * `Address` - Sender or recipient address is unusable
    /// * `Build` - Message could not be assembled
    /// * `Transport` - Delivery failed
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailDeliveryError>;
}
