//! Login, logout and whoami.
//!
//! ```bash
//! # Sign in with the store's public demo account
//! storedeck login --demo
//!
//! # Sign in, falling back to an offline demo session if the API refuses
//! storedeck login -u alice -p secret --demo-fallback
//! ```

use serde_json::json;
use storedeck_admin::api::LoginCredentials;
use storedeck_admin::session::{self, DEMO_PASSWORD, DEMO_USERNAME, StoredSession};
use storedeck_admin::SessionError;
use tracing::warn;

use super::{CliError, Context, print_json};

/// Username stored by the demo fallback when none was typed.
const FALLBACK_USERNAME: &str = "demo_user";

/// Arguments of `storedeck login`.
#[derive(clap::Args)]
pub struct LoginArgs {
    /// Account username
    #[arg(short, long, required_unless_present = "demo")]
    pub username: Option<String>,

    /// Account password
    #[arg(
        short,
        long,
        env = "STOREDECK_PASSWORD",
        hide_env_values = true,
        required_unless_present = "demo"
    )]
    pub password: Option<String>,

    /// Use the store API's public demo account
    #[arg(long, conflicts_with_all = ["username", "password"])]
    pub demo: bool,

    /// Store an offline demo session if the API login fails
    #[arg(long)]
    pub demo_fallback: bool,
}

pub async fn login(ctx: &Context, args: LoginArgs) -> Result<(), CliError> {
    let credentials = if args.demo {
        LoginCredentials::new(DEMO_USERNAME, DEMO_PASSWORD)
    } else {
        LoginCredentials::new(
            args.username.unwrap_or_default(),
            args.password.unwrap_or_default(),
        )
    };

    let session = match session::login(&ctx.client, &ctx.store, &credentials).await {
        Ok(session) => session,
        Err(SessionError::Api(err)) if args.demo_fallback => {
            warn!(error = %err, "Login failed, storing demo session");
            let username = if credentials.username.is_empty() {
                FALLBACK_USERNAME.to_owned()
            } else {
                credentials.username
            };
            let session = StoredSession::demo(username);
            ctx.store.save(session.clone()).await?;
            session
        }
        Err(err) => return Err(err.into()),
    };

    print_json(&json!({ "username": session.username, "logged_in": true }))
}

pub async fn logout(ctx: &Context) -> Result<(), CliError> {
    session::logout(&ctx.store).await?;
    print_json(&json!({ "logged_in": false }))
}

pub fn whoami(ctx: &Context) -> Result<(), CliError> {
    let value = ctx.store.current().map_or_else(
        || json!({ "logged_in": false }),
        |session| json!({ "username": session.username, "logged_in": true }),
    );
    print_json(&value)
}
