// ABOUTME: Registration, login and logout flows layered on the auth emulator.
// ABOUTME: Handles last-login stamping, the loggedInUser entry, toasts, and role redirects.

use serde_json::json;
use supermall_core::{Role, UserRecord};
use supermall_store::{SessionUser, SignUpProfile};

use crate::context::{AppError, MallContext};
use crate::dispatch::{Toast, ToastKind};

/// The storage entry holding the signed-in user's full record, read by the
/// dashboard pages.
const LOGGED_IN_KEY: &str = "loggedInUser";

/// Where the UI should navigate after an auth flow completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    AdminDashboard,
    UserDashboard,
    Landing,
}

impl Redirect {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Redirect::AdminDashboard,
            Role::User => Redirect::UserDashboard,
        }
    }

    /// The page the original markup navigates to.
    pub fn page(&self) -> &'static str {
        match self {
            Redirect::AdminDashboard => "sampleDataView.html",
            Redirect::UserDashboard => "user-dashboard.html",
            Redirect::Landing => "index.html",
        }
    }
}

/// Result of a successful register or login.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub user: SessionUser,
    pub toast: Toast,
    pub redirect: Redirect,
}

/// Drives the auth flows against the context's emulator.
#[derive(Clone)]
pub struct AuthManager {
    ctx: MallContext,
}

impl AuthManager {
    pub fn new(ctx: MallContext) -> Self {
        Self { ctx }
    }

    /// Make sure the default admin account exists. Run at startup.
    pub async fn ensure_admin_user(&self) -> Result<(), AppError> {
        let inserted = self
            .ctx
            .auth
            .seed_user(UserRecord {
                uid: "admin_001".to_string(),
                email: "admin@supermall.com".to_string(),
                password: "admin123".to_string(),
                shop_number: "ADMIN".to_string(),
                name: "Super Admin".to_string(),
                role: Role::Admin,
                created_at: chrono::Utc::now(),
                last_login: None,
            })
            .await?;
        if inserted {
            self.ctx.logger.info("default admin user created", json!({}));
        }
        Ok(())
    }

    /// Register a new account and sign it in.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        profile: SignUpProfile,
    ) -> Result<AuthOutcome, AppError> {
        let user = match self.ctx.auth.sign_up(email, password, profile).await {
            Ok(user) => user,
            Err(e) => {
                self.ctx.logger.error(
                    "registration failed",
                    json!({ "email": email, "error": e.to_string() }),
                );
                return Err(e.into());
            }
        };

        self.store_logged_in(&user).await?;
        Ok(AuthOutcome {
            toast: Toast::new(
                ToastKind::Success,
                format!("Welcome to Super Mall, {}!", user.name),
            ),
            redirect: Redirect::for_role(user.role),
            user,
        })
    }

    /// Sign in by email or shop number and stamp the login time.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<AuthOutcome, AppError> {
        let user = match self.ctx.auth.sign_in(identifier, password).await {
            Ok(user) => user,
            Err(e) => {
                self.ctx.logger.error(
                    "login failed",
                    json!({ "identifier": identifier, "error": e.to_string() }),
                );
                return Err(e.into());
            }
        };

        self.ctx.auth.record_login(&user.uid).await?;
        self.store_logged_in(&user).await?;

        let display = if user.name.is_empty() {
            user.email.clone()
        } else {
            user.name.clone()
        };
        Ok(AuthOutcome {
            toast: Toast::new(ToastKind::Success, format!("Welcome back, {display}!")),
            redirect: Redirect::for_role(user.role),
            user,
        })
    }

    /// Sign out, clear the stored record, and send the UI back to the
    /// landing page.
    pub async fn logout(&self) -> Result<(Toast, Redirect), AppError> {
        self.ctx.auth.sign_out().await;
        self.ctx.storage.remove_item(LOGGED_IN_KEY)?;
        self.ctx.logger.info("user logged out successfully", json!({}));
        Ok((
            Toast::new(ToastKind::Info, "Logged out successfully"),
            Redirect::Landing,
        ))
    }

    /// The full stored record behind the current session, if any.
    pub async fn current_user_record(&self) -> Option<UserRecord> {
        let session = self.ctx.auth.current_user().await?;
        self.ctx.auth.find_by_uid(&session.uid).await
    }

    async fn store_logged_in(&self, user: &SessionUser) -> Result<(), AppError> {
        if let Some(record) = self.ctx.auth.find_by_uid(&user.uid).await {
            let serialized = serde_json::to_string(&record)?;
            self.ctx.storage.set_item(LOGGED_IN_KEY, &serialized)?;
        }
        Ok(())
    }
}
