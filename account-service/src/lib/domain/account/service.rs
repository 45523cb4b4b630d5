use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenKind;

use crate::account::errors::AccountError;
use crate::account::ports::AccountServicePort;
use crate::account::ports::EmailSender;
use crate::account::ports::UserRepository;
use crate::domain::account::emails::EmailMessage;
use crate::domain::account::models::AccessTokenResult;
use crate::domain::account::models::LoginResult;
use crate::domain::account::models::PublicUser;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::User;
use crate::domain::account::models::UserId;
use crate::domain::account::models::BEARER;

/// Domain service implementation for the account lifecycle.
///
/// Concrete implementation of AccountServicePort with dependency injection.
pub struct AccountService<UR, ES>
where
    UR: UserRepository,
    ES: EmailSender,
{
    repository: Arc<UR>,
    email_sender: Arc<ES>,
    authenticator: Arc<Authenticator>,
}

impl<UR, ES> AccountService<UR, ES>
where
    UR: UserRepository,
    ES: EmailSender,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `email_sender` - Outbound email implementation
    /// * `authenticator` - Password hashing and token handling
    ///
    /// # Returns
    /// Configured account service instance
    pub fn new(
        repository: Arc<UR>,
        email_sender: Arc<ES>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            repository,
            email_sender,
            authenticator,
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<User, AccountError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or(AccountError::AccountNotFound)
    }

    async fn find_by_subject(&self, id: UserId) -> Result<User, AccountError> {
        self.repository
            .find_by_id(&id)
            .await?
            .ok_or(AccountError::AccountNotFound)
    }

    /// Guard the token for `kind` and resolve its subject.
    async fn redeem(&self, token: &str, kind: TokenKind) -> Result<User, AccountError> {
        let claims = self.authenticator.validate_token(token, kind)?;
        self.find_by_subject(UserId::from(claims.sub)).await
    }

    // Delivery failures never fail the calling operation.
    async fn dispatch(&self, message: EmailMessage) {
        if let Err(e) = self.email_sender.send(&message).await {
            tracing::error!(
                "Failed to send {} email to {}: {}",
                message.template.name(),
                message.to,
                e
            );
        }
    }

    async fn send_verification(&self, user: &User) -> Result<(), AccountError> {
        let token = self
            .authenticator
            .issue_token(user.id.0, TokenKind::OneTime)?;
        self.dispatch(EmailMessage::verification(&user.email, &token))
            .await;
        Ok(())
    }
}

#[async_trait]
impl<UR, ES> AccountServicePort for AccountService<UR, ES>
where
    UR: UserRepository,
    ES: EmailSender,
{
    async fn register(&self, command: RegisterCommand) -> Result<PublicUser, AccountError> {
        let existing = self.repository.find_by_email(command.email.as_str()).await?;
        if existing.as_ref().is_some_and(|user| user.is_active) {
            return Err(AccountError::EmailAlreadyActive);
        }

        let password_hash = self.authenticator.hash_password(&command.password)?;
        let user = match existing {
            Some(mut user) => {
                tracing::debug!("Re-registering unverified account {}", user.id);
                user.password_hash = password_hash;
                self.repository.update(user).await?
            }
            None => {
                let user = User::new_inactive(command.email, password_hash);
                self.repository.create(user).await?
            }
        };

        self.send_verification(&user).await?;
        tracing::info!("Registered account {}", user.id);

        Ok(PublicUser::from(&user))
    }

    async fn resend_verification(&self, email: &str) -> Result<(), AccountError> {
        let user = self.find_by_email(email).await?;
        if user.is_active {
            return Err(AccountError::AlreadyActive);
        }

        self.send_verification(&user).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AccountError> {
        let user = self.find_by_email(email).await?;

        if !self
            .authenticator
            .verify_password(password, &user.password_hash)?
        {
            tracing::warn!("Rejected password for account {}", user.id);
            return Err(AccountError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(AccountError::AccountInactive);
        }

        let access_token = self
            .authenticator
            .issue_token(user.id.0, TokenKind::Access)?;
        let refresh_token = self
            .authenticator
            .issue_token(user.id.0, TokenKind::Refresh)?;
        tracing::info!("Account {} logged in", user.id);

        Ok(LoginResult {
            access_token,
            refresh_token,
            token_type: BEARER,
            user_id: user.id.0,
        })
    }

    async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<AccessTokenResult, AccountError> {
        let claims = self
            .authenticator
            .validate_token(refresh_token, TokenKind::Refresh)?;
        let access_token = self
            .authenticator
            .issue_token(claims.sub, TokenKind::Access)?;

        Ok(AccessTokenResult {
            access_token,
            token_type: BEARER,
        })
    }

    async fn verify_email(&self, one_time_token: &str) -> Result<PublicUser, AccountError> {
        let mut user = self.redeem(one_time_token, TokenKind::OneTime).await?;

        if !user.is_active {
            user.is_active = true;
            user = self.repository.update(user).await?;
            tracing::info!("Verified email for account {}", user.id);
        }

        Ok(PublicUser::from(&user))
    }

    async fn change_password(
        &self,
        access_token: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AccountError> {
        let mut user = self.current_active_user(access_token).await?;

        if !self
            .authenticator
            .verify_password(old_password, &user.password_hash)?
        {
            return Err(AccountError::IncorrectOldPassword);
        }

        user.password_hash = self.authenticator.hash_password(new_password)?;
        let user = self.repository.update(user).await?;
        tracing::info!("Password changed for account {}", user.id);

        Ok(())
    }

    async fn forgot_password(&self, email: &str) -> Result<(), AccountError> {
        let user = self.find_by_email(email).await?;
        let token = self
            .authenticator
            .issue_token(user.id.0, TokenKind::OneTime)?;

        self.dispatch(EmailMessage::password_reset(&user.email, &token))
            .await;

        Ok(())
    }

    async fn reset_password(
        &self,
        one_time_token: &str,
        new_password: &str,
    ) -> Result<(), AccountError> {
        let mut user = self.redeem(one_time_token, TokenKind::OneTime).await?;

        user.password_hash = self.authenticator.hash_password(new_password)?;
        let user = self.repository.update(user).await?;
        tracing::info!("Password reset for account {}", user.id);

        Ok(())
    }

    async fn current_user(&self, access_token: &str) -> Result<User, AccountError> {
        self.redeem(access_token, TokenKind::Access).await
    }

    async fn current_active_user(&self, access_token: &str) -> Result<User, AccountError> {
        let user = self.current_user(access_token).await?;
        if !user.is_active {
            return Err(AccountError::AccountInactive);
        }
        Ok(user)
    }
}
