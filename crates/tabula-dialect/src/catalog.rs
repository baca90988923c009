use serde::{Deserialize, Serialize};

use tabula_core::{Error, FkEdge, Result, TableId};

/// Raw row shape returned by the connection capability.
pub type Row = Vec<Option<String>>;

/// One catalog snapshot: everything discovered, before filtering.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub tables: Vec<TableId>,
    pub foreign_keys: Vec<FkEdge>,
    pub temporal_tables: Vec<TemporalTable>,
}

/// A system-versioned table and the history table the engine maintains for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalTable {
    pub table: TableId,
    pub history: TableId,
}

/// Map rows of a [`Dialect::table_query`](crate::Dialect::table_query).
pub fn map_tables(rows: Vec<Row>) -> Result<Vec<TableId>> {
    rows.into_iter()
        .map(|row| {
            let mut cols = row.into_iter();
            let schema = required(cols.next(), "schema")?;
            let name = required(cols.next(), "table name")?;
            Ok(TableId::new(schema, name))
        })
        .collect()
}

/// Map rows of a [`Dialect::relationship_query`](crate::Dialect::relationship_query).
pub fn map_relationships(rows: Vec<Row>) -> Result<Vec<FkEdge>> {
    rows.into_iter()
        .map(|row| {
            let mut cols = row.into_iter();
            let referencing_schema = required(cols.next(), "referencing schema")?;
            let referencing_table = required(cols.next(), "referencing table")?;
            let referenced_schema = required(cols.next(), "referenced schema")?;
            let referenced_table = required(cols.next(), "referenced table")?;
            let constraint = required(cols.next(), "constraint name")?;
            Ok(FkEdge::new(
                constraint,
                TableId::new(referencing_schema, referencing_table),
                TableId::new(referenced_schema, referenced_table),
            ))
        })
        .collect()
}

/// Map rows of a [`Dialect::temporal_table_query`](crate::Dialect::temporal_table_query).
pub fn map_temporal_tables(rows: Vec<Row>) -> Result<Vec<TemporalTable>> {
    rows.into_iter()
        .map(|row| {
            let mut cols = row.into_iter();
            let schema = required(cols.next(), "schema")?;
            let name = required(cols.next(), "table name")?;
            let history_schema = required(cols.next(), "history schema")?;
            let history_name = required(cols.next(), "history table name")?;
            Ok(TemporalTable {
                table: TableId::new(schema, name),
                history: TableId::new(history_schema, history_name),
            })
        })
        .collect()
}

fn required(value: Option<Option<String>>, what: &str) -> Result<String> {
    value
        .flatten()
        .ok_or_else(|| Error::Catalog(format!("missing {what} column")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_table_rows() {
        let rows = vec![vec![Some("public".to_string()), Some("foo".to_string())]];
        assert_eq!(map_tables(rows).unwrap(), vec![TableId::new("public", "foo")]);
    }

    #[test]
    fn short_row_is_a_catalog_error() {
        let rows = vec![vec![Some("public".to_string())]];
        assert!(matches!(map_tables(rows), Err(Error::Catalog(_))));
    }

    #[test]
    fn null_column_is_a_catalog_error() {
        let rows = vec![vec![
            Some("public".to_string()),
            Some("baz".to_string()),
            None,
            Some("foo".to_string()),
            Some("fk".to_string()),
        ]];
        assert!(matches!(map_relationships(rows), Err(Error::Catalog(_))));
    }

    #[test]
    fn maps_relationship_rows() {
        let rows = vec![vec![
            Some("public".to_string()),
            Some("baz".to_string()),
            Some("public".to_string()),
            Some("foo".to_string()),
            Some("fk_baz_foo".to_string()),
        ]];
        let edges = map_relationships(rows).unwrap();
        assert_eq!(
            edges,
            vec![FkEdge::new(
                "fk_baz_foo",
                TableId::new("public", "baz"),
                TableId::new("public", "foo"),
            )]
        );
    }
}
