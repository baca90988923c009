use std::time::Duration;

use tabula_core::{Engine, FkEdge, TableId};

use crate::dialect::Dialect;

/// MySQL/MariaDB family.
///
/// Foreign-key checks can only be toggled session-wide, so every edge
/// renders the same `SET FOREIGN_KEY_CHECKS` pair and the generator keeps
/// one of each.
pub struct MySql;

impl Dialect for MySql {
    fn engine(&self) -> Engine {
        Engine::MySql
    }

    fn quote(&self, ident: &str) -> String {
        format!("`{}`", ident.replace('`', "``"))
    }

    fn table_query(&self) -> &'static str {
        "select table_schema, table_name
from information_schema.tables
where table_type = 'BASE TABLE'
  and table_schema not in ('mysql', 'information_schema', 'performance_schema', 'sys')
order by table_schema, table_name"
    }

    fn relationship_query(&self) -> &'static str {
        "select rc.constraint_schema, rc.table_name, rc.unique_constraint_schema, rc.referenced_table_name, rc.constraint_name
from information_schema.referential_constraints rc
where rc.constraint_schema not in ('mysql', 'information_schema', 'performance_schema', 'sys')
order by rc.constraint_name, rc.constraint_schema, rc.table_name"
    }

    fn render_truncate(&self, table: &TableId) -> Option<String> {
        Some(format!("TRUNCATE TABLE {}", self.quote_table(table)))
    }

    fn render_constraint_toggle(&self, _edge: &FkEdge, enable: bool) -> String {
        if enable {
            "SET FOREIGN_KEY_CHECKS = 1".to_string()
        } else {
            "SET FOREIGN_KEY_CHECKS = 0".to_string()
        }
    }

    fn render_timeout(&self, timeout: Duration) -> Option<String> {
        Some(format!(
            "SET SESSION innodb_lock_wait_timeout = {}",
            timeout.as_secs().max(1)
        ))
    }
}
