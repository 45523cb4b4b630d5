//! Wiring of the account service from a loaded [`Config`].

use std::sync::Arc;

use anyhow::Context;

use crate::config::Config;
use crate::domain::account::ports::UserRepository;
use crate::domain::account::service::AccountService;
use crate::outbound::email::ConfiguredEmailSender;
use crate::outbound::repositories::PostgresUserRepository;

/// Account service backed by Postgres and the configured email sender.
pub type PostgresAccountService = AccountService<PostgresUserRepository, ConfiguredEmailSender>;

/// Build the service around an existing repository.
///
/// # Errors
/// Fails if the token lifetimes are out of range or the SMTP settings are unusable
pub fn assemble<UR>(
    repository: Arc<UR>,
    config: &Config,
) -> anyhow::Result<AccountService<UR, ConfiguredEmailSender>>
where
    UR: UserRepository,
{
    let authenticator = Arc::new(
        config
            .tokens
            .authenticator()
            .context("Invalid token configuration")?,
    );
    let email_sender = Arc::new(
        ConfiguredEmailSender::from_config(&config.email)
            .context("Invalid email configuration")?,
    );

    Ok(AccountService::new(repository, email_sender, authenticator))
}

/// Connect to Postgres, run migrations and build the service.
///
/// # Errors
/// Fails on connection, migration or configuration errors
pub async fn connect(config: &Config) -> anyhow::Result<PostgresAccountService> {
    let repository = Arc::new(PostgresUserRepository::connect(&config.database).await?);
    let service = assemble(repository, config)?;

    tracing::info!(service = "account-service", "Account service ready");
    Ok(service)
}
