use tabula_core::{Engine, FkEdge, TableId};

use crate::dialect::Dialect;

/// Oracle family. Unquoted identifiers fold to uppercase, so configured
/// names are compared uppercased. Built-in accounts (SYS, SYSTEM, the XDB
/// and APEX machinery) are denied in the catalog queries; naming one in
/// `schemas_to_include` does not resurrect it.
pub struct Oracle;

impl Dialect for Oracle {
    fn engine(&self) -> Engine {
        Engine::Oracle
    }

    fn normalize(&self, ident: &str) -> String {
        ident.to_ascii_uppercase()
    }

    fn quote(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }

    fn table_query(&self) -> &'static str {
        "select owner, table_name
from all_tables
where owner not in ('SYS', 'SYSTEM', 'SYSMAN', 'OUTLN', 'XDB', 'CTXSYS', 'MDSYS', 'DBSNMP', 'ORDSYS', 'ORDDATA', 'LBACSYS', 'WMSYS', 'APPQOSSYS', 'AUDSYS', 'GSMADMIN_INTERNAL', 'OJVMSYS', 'DVSYS', 'OLAPSYS')
  and temporary = 'N'
  and nested = 'NO'
  and secondary = 'N'
order by owner, table_name"
    }

    fn relationship_query(&self) -> &'static str {
        "select a.owner, a.table_name, b.owner, b.table_name, a.constraint_name
from all_constraints a
join all_constraints b on b.owner = a.r_owner and b.constraint_name = a.r_constraint_name
where a.constraint_type = 'R'
  and a.owner not in ('SYS', 'SYSTEM', 'SYSMAN', 'OUTLN', 'XDB', 'CTXSYS', 'MDSYS', 'DBSNMP', 'ORDSYS', 'ORDDATA', 'LBACSYS', 'WMSYS', 'APPQOSSYS', 'AUDSYS', 'GSMADMIN_INTERNAL', 'OJVMSYS', 'DVSYS', 'OLAPSYS')
order by a.constraint_name, a.owner, a.table_name"
    }

    fn render_truncate(&self, table: &TableId) -> Option<String> {
        Some(format!("TRUNCATE TABLE {}", self.quote_table(table)))
    }

    fn render_constraint_toggle(&self, edge: &FkEdge, enable: bool) -> String {
        let verb = if enable { "ENABLE" } else { "DISABLE" };
        format!(
            "ALTER TABLE {} {verb} CONSTRAINT {}",
            self.quote_table(&edge.referencing),
            self.quote(&edge.constraint)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_to_uppercase() {
        assert_eq!(Oracle.normalize("foo"), "FOO");
    }

    #[test]
    fn toggle_names_the_constraint() {
        let edge = FkEdge::new(
            "FK_BAZ_FOO",
            TableId::new("APP", "BAZ"),
            TableId::new("APP", "FOO"),
        );
        assert_eq!(
            Oracle.render_constraint_toggle(&edge, false),
            "ALTER TABLE \"APP\".\"BAZ\" DISABLE CONSTRAINT \"FK_BAZ_FOO\""
        );
        assert_eq!(
            Oracle.render_constraint_toggle(&edge, true),
            "ALTER TABLE \"APP\".\"BAZ\" ENABLE CONSTRAINT \"FK_BAZ_FOO\""
        );
    }

    #[test]
    fn table_query_denies_system_owners() {
        assert!(Oracle.table_query().contains("'SYS'"));
        assert!(Oracle.table_query().contains("temporary = 'N'"));
    }
}
