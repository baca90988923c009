use tabula_core::{CheckpointOptions, DependencyGraph, Error, Result, TableId, build_plan};
use tabula_dialect::{Catalog, Dialect, dialect_for, map_relationships, map_tables, map_temporal_tables, render_statements};

use crate::client::DatabaseClient;

/// Where the most recent reset got to.
///
/// Transitions are strictly sequential; `Failed` is reachable from any point
/// after catalog discovery starts and always leaves whatever statements were
/// rendered so far available through [`Checkpoint::delete_sql`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetState {
    Idle,
    CatalogLoaded,
    GraphBuilt,
    Planned,
    Rendered,
    Executing,
    Succeeded,
    Failed,
}

/// Reusable reset engine bound to one target engine and scope.
///
/// One `reset` call drives one connection sequentially through discovery,
/// planning, and execution; there is no internal parallelism and no hidden
/// caching (catalog reuse is the `reuse_catalog` opt-in).
#[derive(Debug)]
pub struct Checkpoint {
    options: CheckpointOptions,
    catalog: Option<Catalog>,
    delete_sql: Vec<String>,
    state: ResetState,
}

impl Checkpoint {
    pub fn new(options: CheckpointOptions) -> Self {
        Self {
            options,
            catalog: None,
            delete_sql: Vec::new(),
            state: ResetState::Idle,
        }
    }

    pub fn options(&self) -> &CheckpointOptions {
        &self.options
    }

    pub fn state(&self) -> ResetState {
        self.state
    }

    /// Statements rendered by the most recent reset, in execution order,
    /// verbatim. Populated on failure too, for diagnostics.
    pub fn delete_sql(&self) -> &[String] {
        &self.delete_sql
    }

    /// Tables discovered by the most recent catalog read, before filtering.
    /// Lets callers tell "filter matched nothing" apart from "no tables".
    pub fn discovered_tables(&self) -> &[TableId] {
        self.catalog
            .as_ref()
            .map(|catalog| catalog.tables.as_slice())
            .unwrap_or_default()
    }

    /// Drop the cached catalog so the next reset re-discovers.
    pub fn invalidate_catalog(&mut self) {
        self.catalog = None;
    }

    /// Empty every in-scope table behind `client`.
    pub async fn reset(&mut self, client: &mut dyn DatabaseClient) -> Result<()> {
        self.state = ResetState::Idle;
        self.delete_sql.clear();

        let dialect = dialect_for(self.options.engine);
        self.options.validate(|s| dialect.normalize(s))?;

        match self.run(client, dialect).await {
            Ok(()) => {
                self.state = ResetState::Succeeded;
                tracing::info!(
                    event = "reset_finished",
                    engine = %self.options.engine,
                    statements = self.delete_sql.len(),
                );
                Ok(())
            }
            Err(err) => {
                self.state = ResetState::Failed;
                tracing::warn!(event = "reset_failed", engine = %self.options.engine, error = %err);
                Err(err)
            }
        }
    }

    async fn run(
        &mut self,
        client: &mut dyn DatabaseClient,
        dialect: &'static dyn Dialect,
    ) -> Result<()> {
        let reuse = self.options.reuse_catalog && self.catalog.is_some();
        if !reuse {
            self.catalog = Some(load_catalog(client, dialect, self.options.check_temporal_tables).await?);
        }
        // The Option is always filled by this point.
        let catalog = self.catalog.clone().unwrap_or_default();
        self.state = ResetState::CatalogLoaded;
        tracing::debug!(
            event = "catalog_loaded",
            reused = reuse,
            tables = catalog.tables.len(),
            foreign_keys = catalog.foreign_keys.len(),
        );

        let graph = DependencyGraph::build(
            catalog.tables,
            catalog.foreign_keys,
            &self.options,
            |s| dialect.normalize(s),
        );
        self.state = ResetState::GraphBuilt;

        let plan = build_plan(&graph, dialect.supports_constraint_suspension())?;
        self.state = ResetState::Planned;
        tracing::debug!(
            event = "plan_built",
            tables = plan.tables().len(),
            cyclic = graph.has_cycles(),
        );

        self.delete_sql =
            render_statements(dialect, &graph, &plan, &catalog.temporal_tables, &self.options);
        self.state = ResetState::Rendered;

        self.state = ResetState::Executing;
        execute_all(client, &self.delete_sql).await
    }
}

async fn load_catalog(
    client: &mut dyn DatabaseClient,
    dialect: &'static dyn Dialect,
    check_temporal: bool,
) -> Result<Catalog> {
    let tables = map_tables(client.query_rows(dialect.table_query()).await?)?;
    let foreign_keys = map_relationships(client.query_rows(dialect.relationship_query()).await?)?;
    let temporal_tables = match dialect.temporal_table_query() {
        Some(sql) if check_temporal => map_temporal_tables(client.query_rows(sql).await?)?,
        _ => Vec::new(),
    };
    Ok(Catalog {
        tables,
        foreign_keys,
        temporal_tables,
    })
}

/// Run the rendered statements front to back, inside one transaction when
/// the client supports it. The first failure aborts; rollback is attempted
/// and its own failure is reported separately from the original cause.
async fn execute_all(client: &mut dyn DatabaseClient, statements: &[String]) -> Result<()> {
    let transactional = client.supports_transactions();
    if transactional {
        client.begin().await?;
    }

    for statement in statements {
        if let Err(err) = client.execute(statement).await {
            let cause = Error::Execution {
                statement: statement.clone(),
                cause: err.to_string(),
            };
            if transactional {
                if let Err(rollback) = client.rollback().await {
                    return Err(Error::RollbackFailed {
                        cause: cause.to_string(),
                        rollback: rollback.to_string(),
                    });
                }
            }
            return Err(cause);
        }
    }

    if transactional {
        client.commit().await?;
    }
    Ok(())
}
