use std::time::Duration;

use tabula_core::{Engine, FkEdge, TableId};

use crate::catalog::TemporalTable;
use crate::dialect::Dialect;

/// SQL Server family.
///
/// History tables of system-versioned pairs (`temporal_type = 1`) are left
/// out of discovery; they cannot be deleted from while versioning is on and
/// are handled by the temporal branch of the generator instead.
pub struct SqlServer;

impl Dialect for SqlServer {
    fn engine(&self) -> Engine {
        Engine::SqlServer
    }

    fn quote(&self, ident: &str) -> String {
        format!("[{}]", ident.replace(']', "]]"))
    }

    fn table_query(&self) -> &'static str {
        "select s.name, t.name
from sys.tables t
join sys.schemas s on s.schema_id = t.schema_id
where t.is_ms_shipped = 0
  and t.temporal_type <> 1
order by s.name, t.name"
    }

    fn relationship_query(&self) -> &'static str {
        "select fs.name, ft.name, rs.name, rt.name, fk.name
from sys.foreign_keys fk
join sys.tables ft on ft.object_id = fk.parent_object_id
join sys.schemas fs on fs.schema_id = ft.schema_id
join sys.tables rt on rt.object_id = fk.referenced_object_id
join sys.schemas rs on rs.schema_id = rt.schema_id
where fk.is_ms_shipped = 0
order by fk.name, fs.name, ft.name"
    }

    fn temporal_table_query(&self) -> Option<&'static str> {
        Some(
            "select s.name, t.name, hs.name, ht.name
from sys.tables t
join sys.schemas s on s.schema_id = t.schema_id
join sys.tables ht on ht.object_id = t.history_table_id
join sys.schemas hs on hs.schema_id = ht.schema_id
where t.temporal_type = 2
order by s.name, t.name",
        )
    }

    fn render_truncate(&self, table: &TableId) -> Option<String> {
        Some(format!("TRUNCATE TABLE {}", self.quote_table(table)))
    }

    fn render_constraint_toggle(&self, edge: &FkEdge, enable: bool) -> String {
        let table = self.quote_table(&edge.referencing);
        let constraint = self.quote(&edge.constraint);
        if enable {
            format!("ALTER TABLE {table} WITH CHECK CHECK CONSTRAINT {constraint}")
        } else {
            format!("ALTER TABLE {table} NOCHECK CONSTRAINT {constraint}")
        }
    }

    fn render_timeout(&self, timeout: Duration) -> Option<String> {
        Some(format!("SET LOCK_TIMEOUT {}", timeout.as_millis()))
    }

    fn render_versioning_toggle(&self, temporal: &TemporalTable, on: bool) -> Option<String> {
        let table = self.quote_table(&temporal.table);
        if on {
            let history = self.quote_table(&temporal.history);
            Some(format!(
                "ALTER TABLE {table} SET (SYSTEM_VERSIONING = ON (HISTORY_TABLE = {history}))"
            ))
        } else {
            Some(format!("ALTER TABLE {table} SET (SYSTEM_VERSIONING = OFF)"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_with_brackets() {
        assert_eq!(SqlServer.quote("Foo"), "[Foo]");
        assert_eq!(SqlServer.quote("we]ird"), "[we]]ird]");
    }

    #[test]
    fn toggle_uses_with_check_on_enable() {
        let edge = FkEdge::new(
            "FK_Baz_Foo",
            TableId::new("dbo", "Baz"),
            TableId::new("dbo", "Foo"),
        );
        assert_eq!(
            SqlServer.render_constraint_toggle(&edge, false),
            "ALTER TABLE [dbo].[Baz] NOCHECK CONSTRAINT [FK_Baz_Foo]"
        );
        assert_eq!(
            SqlServer.render_constraint_toggle(&edge, true),
            "ALTER TABLE [dbo].[Baz] WITH CHECK CHECK CONSTRAINT [FK_Baz_Foo]"
        );
    }

    #[test]
    fn versioning_toggles_name_the_history_table() {
        let temporal = TemporalTable {
            table: TableId::new("dbo", "Orders"),
            history: TableId::new("dbo", "OrdersHistory"),
        };
        assert_eq!(
            SqlServer.render_versioning_toggle(&temporal, false).unwrap(),
            "ALTER TABLE [dbo].[Orders] SET (SYSTEM_VERSIONING = OFF)"
        );
        assert_eq!(
            SqlServer.render_versioning_toggle(&temporal, true).unwrap(),
            "ALTER TABLE [dbo].[Orders] SET (SYSTEM_VERSIONING = ON (HISTORY_TABLE = [dbo].[OrdersHistory]))"
        );
    }
}
