//! Authentication service — admin login orchestration.

use orghub_core::error::OrgResult;
use orghub_core::repository::AdminRepository;

use crate::config::AuthConfig;
use crate::token;

/// Input for the login flow.
#[derive(Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Successful login result.
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed JWT access token.
    pub access_token: String,
    /// Always `bearer`.
    pub token_type: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

/// Authentication service.
///
/// Generic over the credential store so that the auth layer has no
/// dependency on the database crate.
pub struct AuthService<A: AdminRepository> {
    admins: A,
    config: AuthConfig,
}

impl<A: AdminRepository> AuthService<A> {
    pub fn new(admins: A, config: AuthConfig) -> Self {
        Self { admins, config }
    }

    /// Authenticate an admin with email + password and issue an
    /// access token bound to their organization.
    ///
    /// Credential verification is delegated to the store, which fails
    /// uniformly regardless of which factor was wrong.
    pub async fn login(&self, input: LoginInput) -> OrgResult<LoginOutput> {
        let admin = self
            .admins
            .authenticate(&input.email, &input.password)
            .await?;

        let access_token = token::issue_access_token(
            admin.id,
            &admin.email,
            admin.organization_id,
            &self.config,
        )?;

        Ok(LoginOutput {
            access_token,
            token_type: "bearer".into(),
            expires_in: self.config.token_lifetime_secs,
        })
    }
}
