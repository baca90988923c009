use std::time::Duration;

use tabula_core::{Engine, FkEdge, TableId};

use crate::dialect::Dialect;

/// PostgreSQL family.
///
/// Postgres has no per-constraint disable short of dropping the constraint,
/// so suspension renders as `DISABLE TRIGGER ALL` on the referencing table
/// (FK enforcement rides on internal triggers); the generator collapses the
/// duplicates this produces for tables with several cyclic constraints.
pub struct Postgres;

impl Dialect for Postgres {
    fn engine(&self) -> Engine {
        Engine::Postgres
    }

    fn quote(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }

    fn table_query(&self) -> &'static str {
        r#"select n.nspname::text, c.relname::text
from pg_class c
join pg_namespace n on n.oid = c.relnamespace
where c.relkind in ('r', 'p')
  and not c.relispartition
  and n.nspname <> 'information_schema'
  and n.nspname not like 'pg\_%'
order by n.nspname, c.relname"#
    }

    fn relationship_query(&self) -> &'static str {
        r#"select src_ns.nspname::text, src.relname::text, ref_ns.nspname::text, ref.relname::text, con.conname::text
from pg_constraint con
join pg_class src on src.oid = con.conrelid
join pg_namespace src_ns on src_ns.oid = src.relnamespace
join pg_class ref on ref.oid = con.confrelid
join pg_namespace ref_ns on ref_ns.oid = ref.relnamespace
where con.contype = 'f'
  and src_ns.nspname <> 'information_schema'
  and src_ns.nspname not like 'pg\_%'
order by con.conname, src_ns.nspname, src.relname"#
    }

    fn render_truncate(&self, table: &TableId) -> Option<String> {
        Some(format!(
            "TRUNCATE TABLE {} RESTART IDENTITY",
            self.quote_table(table)
        ))
    }

    fn render_constraint_toggle(&self, edge: &FkEdge, enable: bool) -> String {
        let verb = if enable { "ENABLE" } else { "DISABLE" };
        format!(
            "ALTER TABLE {} {verb} TRIGGER ALL",
            self.quote_table(&edge.referencing)
        )
    }

    fn render_timeout(&self, timeout: Duration) -> Option<String> {
        Some(format!("SET statement_timeout = {}", timeout.as_millis()))
    }
}
