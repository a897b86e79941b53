//! User commands.

use clap::Subcommand;
use serde_json::Value;
use storedeck_core::{NewUser, UserId};

use super::{CliError, Context, parse_data, print_response};

#[derive(Subcommand)]
pub enum UserAction {
    /// List all users
    List,
    /// Show one user
    Get { id: UserId },
    /// Register a user from a JSON object
    Create {
        #[arg(long)]
        data: String,
    },
    /// Replace fields of a user
    Update {
        id: UserId,
        #[arg(long)]
        data: String,
    },
    /// Delete a user
    Delete { id: UserId },
}

pub async fn run(ctx: &Context, action: UserAction) -> Result<(), CliError> {
    let users = ctx.client.users();

    let response = match action {
        UserAction::List => users.list().await?,
        UserAction::Get { id } => users.get(id).await?,
        UserAction::Create { data } => {
            let user: NewUser = parse_data(&data)?;
            users.create(&user).await?
        }
        UserAction::Update { id, data } => {
            let patch: Value = parse_data(&data)?;
            users.update(id, &patch).await?
        }
        UserAction::Delete { id } => users.delete(id).await?,
    };

    print_response(&response)
}
