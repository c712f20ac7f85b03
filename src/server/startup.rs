use std::sync::Arc;

use crate::server::{
    config::Config,
    error::AppError,
    service::identity::{IdentityVerifier, UserInfoVerifier},
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client used to reach the identity provider.
///
/// Redirects are disabled so a token is never forwarded to a host other than the
/// configured provider.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Creates the verifier resolving bearer tokens through the provider's userinfo endpoint.
///
/// # Returns
/// - `Ok(Arc<dyn IdentityVerifier>)` - Verifier ready to be placed in `AppState`
/// - `Err(AppError::ConfigErr)` - `AUTH_DOMAIN` does not form a valid URL
pub fn setup_identity_verifier(
    config: &Config,
    http_client: reqwest::Client,
) -> Result<Arc<dyn IdentityVerifier>, AppError> {
    let verifier = UserInfoVerifier::for_domain(http_client, &config.auth_domain)?;
    tracing::info!("Verifying bearer tokens against {}", verifier.userinfo_url());

    Ok(Arc::new(verifier))
}
