//! # User Commands
//!
//! Staff roster management. No credentials anywhere; the role label is
//! informational.

use anyhow::Result;
use clap::Subcommand;

use lumen_core::validation::validate_user_name;
use lumen_core::Role;
use lumen_db::Database;

#[derive(Subcommand)]
pub enum UserCommand {
    /// Add a staff member.
    Add {
        /// Display name.
        name: String,

        /// Role: admin or cashier.
        #[arg(long, default_value = "cashier")]
        role: String,
    },

    /// List the roster.
    List,

    /// Remove a staff member.
    Remove {
        /// User ID.
        id: String,
    },
}

pub async fn run(db: &Database, command: UserCommand) -> Result<()> {
    match command {
        UserCommand::Add { name, role } => {
            validate_user_name(&name)?;
            let role: Role = role.parse().map_err(anyhow::Error::msg)?;

            let user = db.users().insert(&name, role).await?;
            println!("Added {} ({}) as {}", user.name, user.id, user.role);
        }

        UserCommand::List => {
            let users = db.users().list().await?;
            if users.is_empty() {
                println!("No users.");
                return Ok(());
            }

            for user in &users {
                println!("{:<36}  {:<30} {}", user.id, user.name, user.role);
            }
        }

        UserCommand::Remove { id } => {
            db.users().delete(&id).await?;
            println!("Removed user {id}");
        }
    }

    Ok(())
}
