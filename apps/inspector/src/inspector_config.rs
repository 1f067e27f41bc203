use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Prints the effective permissions of a user or role as JSON.
#[derive(Debug, Parser)]
#[command(name = "tasklane-access-inspector", version)]
pub struct InspectorConfig {
    /// Grant catalog JSON document.
    #[arg(long, env = "ACCESS_CATALOG_PATH")]
    pub catalog_path: PathBuf,

    /// Snapshot JSON document with grants, roles and users.
    #[arg(long, env = "ACCESS_SNAPSHOT_PATH")]
    pub snapshot_path: PathBuf,

    #[command(subcommand)]
    pub target: InspectTarget,
}

/// Subject whose effective permissions are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum InspectTarget {
    /// Resolve through the user's assigned role
    User {
        /// User id
        id: Uuid,
    },
    /// Resolve a role directly
    Role {
        /// Role id
        id: Uuid,
    },
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .init();
}
