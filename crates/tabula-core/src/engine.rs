use std::fmt;

use serde::{Deserialize, Serialize};

/// Target database engine selector.
///
/// Chosen once in [`crate::CheckpointOptions`]; every dialect decision
/// downstream keys off this value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    #[default]
    Postgres,
    MySql,
    SqlServer,
    Oracle,
    Sqlite,
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Engine::Postgres => "postgres",
            Engine::MySql => "mysql",
            Engine::SqlServer => "sqlserver",
            Engine::Oracle => "oracle",
            Engine::Sqlite => "sqlite",
        };
        f.write_str(name)
    }
}
