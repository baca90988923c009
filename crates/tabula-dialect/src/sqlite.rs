use std::time::Duration;

use tabula_core::{Engine, FkEdge};

use crate::dialect::Dialect;

/// SQLite family. Everything lives in the implicit `main` schema.
///
/// Suspension renders as `PRAGMA defer_foreign_keys`, which postpones FK
/// checks to commit time within the surrounding transaction; once every
/// in-scope table is empty the commit check passes. The pragma lists one
/// row per FK column, so composite keys surface as duplicate edges and are
/// deduplicated during graph construction.
pub struct Sqlite;

impl Dialect for Sqlite {
    fn engine(&self) -> Engine {
        Engine::Sqlite
    }

    fn quote(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }

    fn table_query(&self) -> &'static str {
        "select 'main', name
from sqlite_master
where type = 'table'
  and name not like 'sqlite_%'
order by name"
    }

    fn relationship_query(&self) -> &'static str {
        "select 'main', m.name, 'main', f.\"table\", m.name || '_fk_' || f.id
from sqlite_master m
join pragma_foreign_key_list(m.name) f
where m.type = 'table'
  and m.name not like 'sqlite_%'
order by m.name, f.id"
    }

    fn render_constraint_toggle(&self, _edge: &FkEdge, enable: bool) -> String {
        if enable {
            "PRAGMA defer_foreign_keys = OFF".to_string()
        } else {
            "PRAGMA defer_foreign_keys = ON".to_string()
        }
    }

    fn render_timeout(&self, timeout: Duration) -> Option<String> {
        Some(format!("PRAGMA busy_timeout = {}", timeout.as_millis()))
    }
}
