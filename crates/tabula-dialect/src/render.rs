use std::collections::BTreeSet;

use tabula_core::{Action, CheckpointOptions, DependencyGraph, DeletionPlan};

use crate::catalog::TemporalTable;
use crate::dialect::Dialect;

/// Render a deletion plan into executable statements, in execution order.
///
/// Layout: optional session timeout, versioning off for in-scope temporal
/// tables, the plan's actions, deletes for the history tables, versioning
/// back on. Constraint-toggle statements are deduplicated by exact text
/// (first occurrence kept) so session-wide and per-table toggles collapse
/// instead of repeating per edge.
pub fn render_statements(
    dialect: &dyn Dialect,
    graph: &DependencyGraph,
    plan: &DeletionPlan,
    temporal: &[TemporalTable],
    options: &CheckpointOptions,
) -> Vec<String> {
    let mut statements = Vec::new();

    if let Some(timeout) = options.command_timeout {
        statements.extend(dialect.render_timeout(timeout));
    }

    let temporal_in_scope: Vec<&TemporalTable> = temporal
        .iter()
        .filter(|t| graph.contains(&t.table))
        .collect();

    for t in &temporal_in_scope {
        statements.extend(dialect.render_versioning_toggle(t, false));
    }

    let mut seen_toggles = BTreeSet::new();
    for action in &plan.actions {
        match action {
            Action::DeleteAllRows(table) => {
                let truncate = options.prefer_truncate && !graph.is_referenced(table);
                let sql = if truncate {
                    dialect
                        .render_truncate(table)
                        .unwrap_or_else(|| dialect.render_delete(table))
                } else {
                    dialect.render_delete(table)
                };
                statements.push(sql);
            }
            Action::DisableConstraint(edge) => {
                let sql = dialect.render_constraint_toggle(edge, false);
                if seen_toggles.insert(sql.clone()) {
                    statements.push(sql);
                }
            }
            Action::EnableConstraint(edge) => {
                let sql = dialect.render_constraint_toggle(edge, true);
                if seen_toggles.insert(sql.clone()) {
                    statements.push(sql);
                }
            }
        }
    }

    for t in &temporal_in_scope {
        statements.push(dialect.render_delete(&t.history));
    }
    for t in &temporal_in_scope {
        statements.extend(dialect.render_versioning_toggle(t, true));
    }

    statements
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tabula_core::{CheckpointOptions, DependencyGraph, Engine, FkEdge, TableId, build_plan};

    use super::*;
    use crate::dialect::dialect_for;

    fn table(name: &str) -> TableId {
        TableId::new("public", name)
    }

    fn rendered(
        engine: Engine,
        tables: &[&str],
        fks: &[(&str, &str, &str)],
        options: &CheckpointOptions,
    ) -> Vec<String> {
        let dialect = dialect_for(engine);
        let graph = DependencyGraph::build(
            tables.iter().map(|name| table(name)).collect(),
            fks.iter()
                .map(|(c, from, to)| FkEdge::new(*c, table(from), table(to)))
                .collect(),
            options,
            |s| dialect.normalize(s),
        );
        let plan = build_plan(&graph, dialect.supports_constraint_suspension()).unwrap();
        render_statements(dialect, &graph, &plan, &[], options)
    }

    #[test]
    fn referencing_delete_precedes_referenced_delete() {
        let statements = rendered(
            Engine::Postgres,
            &["foo", "baz"],
            &[("fk_baz_foo", "baz", "foo")],
            &CheckpointOptions::default(),
        );
        let baz = statements
            .iter()
            .position(|s| s == "DELETE FROM \"public\".\"baz\"")
            .unwrap();
        let foo = statements
            .iter()
            .position(|s| s == "DELETE FROM \"public\".\"foo\"")
            .unwrap();
        assert!(baz < foo);
    }

    #[test]
    fn mysql_cycle_collapses_to_one_toggle_pair() {
        let statements = rendered(
            Engine::MySql,
            &["parent", "child"],
            &[
                ("fk_pc", "parent", "child"),
                ("fk_cp", "child", "parent"),
            ],
            &CheckpointOptions::default(),
        );
        assert_eq!(statements[0], "SET FOREIGN_KEY_CHECKS = 0");
        assert_eq!(statements.last().unwrap(), "SET FOREIGN_KEY_CHECKS = 1");
        assert_eq!(
            statements
                .iter()
                .filter(|s| s.starts_with("SET FOREIGN_KEY_CHECKS"))
                .count(),
            2
        );
    }

    #[test]
    fn timeout_statement_comes_first() {
        let options = CheckpointOptions {
            command_timeout: Some(Duration::from_secs(2)),
            ..CheckpointOptions::default()
        };
        let statements = rendered(Engine::Postgres, &["foo"], &[], &options);
        assert_eq!(statements[0], "SET statement_timeout = 2000");
    }

    #[test]
    fn truncate_is_opt_in_and_skips_referenced_tables() {
        let options = CheckpointOptions {
            prefer_truncate: true,
            ..CheckpointOptions::default()
        };
        let statements = rendered(
            Engine::Postgres,
            &["foo", "baz"],
            &[("fk_baz_foo", "baz", "foo")],
            &options,
        );
        assert!(statements.contains(&"TRUNCATE TABLE \"public\".\"baz\" RESTART IDENTITY".to_string()));
        assert!(statements.contains(&"DELETE FROM \"public\".\"foo\"".to_string()));
    }

    #[test]
    fn temporal_tables_wrap_the_plan() {
        let dialect = dialect_for(Engine::SqlServer);
        let options = CheckpointOptions::for_engine(Engine::SqlServer);
        let graph = DependencyGraph::build(
            vec![TableId::new("dbo", "Orders")],
            Vec::new(),
            &options,
            |s| dialect.normalize(s),
        );
        let plan = build_plan(&graph, true).unwrap();
        let temporal = vec![TemporalTable {
            table: TableId::new("dbo", "Orders"),
            history: TableId::new("dbo", "OrdersHistory"),
        }];
        let statements = render_statements(dialect, &graph, &plan, &temporal, &options);
        assert_eq!(
            statements,
            vec![
                "ALTER TABLE [dbo].[Orders] SET (SYSTEM_VERSIONING = OFF)".to_string(),
                "DELETE FROM [dbo].[Orders]".to_string(),
                "DELETE FROM [dbo].[OrdersHistory]".to_string(),
                "ALTER TABLE [dbo].[Orders] SET (SYSTEM_VERSIONING = ON (HISTORY_TABLE = [dbo].[OrdersHistory]))"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn out_of_scope_temporal_tables_are_untouched() {
        let dialect = dialect_for(Engine::SqlServer);
        let options = CheckpointOptions {
            tables_to_ignore: vec!["Orders".to_string()],
            ..CheckpointOptions::for_engine(Engine::SqlServer)
        };
        let graph = DependencyGraph::build(
            vec![TableId::new("dbo", "Orders"), TableId::new("dbo", "Other")],
            Vec::new(),
            &options,
            |s| dialect.normalize(s),
        );
        let plan = build_plan(&graph, true).unwrap();
        let temporal = vec![TemporalTable {
            table: TableId::new("dbo", "Orders"),
            history: TableId::new("dbo", "OrdersHistory"),
        }];
        let statements = render_statements(dialect, &graph, &plan, &temporal, &options);
        assert_eq!(statements, vec!["DELETE FROM [dbo].[Other]".to_string()]);
    }
}
