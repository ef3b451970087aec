//! User Service Library
//!
//! This crate provides storage for user records behind the
//! [`UserRepository`](repository::UserRepository) contract, in memory or in
//! a SQL database, plus a thin [`UserService`](service::UserService) layer
//! that callers build on.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use common::{AppError, AppResult};
use domain::{PageRequest, UserDetails, UserId};

use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::repository::SqlUserStore;
use crate::service::{UserManager, UserService};

/// One call into the user service, as issued from the command line.
#[derive(Debug, Clone)]
pub enum Command {
    Create(UserDetails),
    Get(UserId),
    Find(String),
    List(PageRequest),
    Update(UserId, UserDetails),
    Delete(UserId),
    Ping,
}

/// Connect to the configured database and wire a service over it.
pub async fn connect(config: &UserServiceConfig) -> AppResult<(Database, UserManager)> {
    let db = Database::connect(&config.database).await?;
    let user_repo = Arc::new(SqlUserStore::new(db.get_connection()));
    let user_service = UserManager::new(user_repo);
    Ok((db, user_service))
}

/// Run one command against the configured database, printing the result.
pub async fn run_command(config: UserServiceConfig, command: Command) -> AppResult<()> {
    let (db, user_service) = connect(&config).await?;

    if let Command::Ping = command {
        db.ping().await?;
        info!("Database reachable");
        return Ok(());
    }

    if let Some(output) = execute(&user_service, command).await? {
        let rendered = serde_json::to_string_pretty(&output)
            .map_err(|e| AppError::internal(e.to_string()))?;
        println!("{}", rendered);
    }

    Ok(())
}

/// Execute a command through the service and return its JSON rendering.
///
/// Lookups that find nothing render as `null`; `delete` and `ping` render
/// nothing.
pub async fn execute(service: &dyn UserService, command: Command) -> AppResult<Option<Value>> {
    let output = match command {
        Command::Create(details) => Some(to_json(service.create_user(details).await?)?),
        Command::Get(id) => Some(to_json(service.get_user(id).await?)?),
        Command::Find(identity_number) => Some(to_json(
            service.find_by_identity_number(&identity_number).await?,
        )?),
        Command::List(request) => Some(to_json(service.list_users(request).await?)?),
        Command::Update(id, details) => Some(to_json(service.update_user(id, details).await?)?),
        Command::Delete(id) => {
            service.delete_user(id).await?;
            None
        }
        Command::Ping => None,
    };

    Ok(output)
}

/// One-line description of a failed command, e.g. `CONFLICT: Identity
/// number already exists`. Internal details stay out of it.
pub fn failure_report(err: &AppError) -> String {
    format!("{}: {}", err.code(), err.user_message())
}

/// Process exit status for a failed command: 2 when the request itself was
/// rejected, 1 when the store failed.
pub fn exit_code(err: &AppError) -> u8 {
    if err.is_client_error() {
        2
    } else {
        1
    }
}

fn to_json(value: impl serde::Serialize) -> AppResult<Value> {
    serde_json::to_value(value).map_err(|e| AppError::internal(e.to_string()))
}
