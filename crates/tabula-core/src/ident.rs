use std::fmt;

use serde::{Deserialize, Serialize};

/// Schema-qualified table identifier, as discovered in the catalog.
///
/// Names are stored exactly as the catalog reports them; case folding for
/// comparisons is the dialect's job.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TableId {
    pub schema: String,
    pub name: String,
}

impl TableId {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.name)
    }
}

/// One named foreign-key relationship between two tables.
///
/// `referencing` holds the FK column(s); `referenced` is the target of the
/// constraint. Self-references (`referencing == referenced`) are valid, as
/// are multiple constraints between the same pair of tables.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FkEdge {
    pub constraint: String,
    pub referencing: TableId,
    pub referenced: TableId,
}

impl FkEdge {
    pub fn new(constraint: impl Into<String>, referencing: TableId, referenced: TableId) -> Self {
        Self {
            constraint: constraint.into(),
            referencing,
            referenced,
        }
    }
}
