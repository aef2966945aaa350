use super::{Expr, TableRef};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// One step of a JSON path accessor chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    Key(String),
    Index(i64),
}

/// A column reference.
///
/// Equality and hashing are structural over the owning table's identity, the
/// column name and the JSON path. The projection alias is not part of the
/// identity, so fields can be used as map keys.
#[derive(Debug, Clone)]
pub struct Field {
    table: Option<Arc<TableRef>>,
    column: String,
    alias: Option<String>,
    path: Vec<PathStep>,
}

impl Field {
    /// An unqualified column, rendered without a table prefix and never scope-checked.
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            table: None,
            column: column.into(),
            alias: None,
            path: Vec::new(),
        }
    }

    pub(crate) fn with_table(table: Arc<TableRef>, column: impl Into<String>) -> Self {
        Self {
            table: Some(table),
            column: column.into(),
            alias: None,
            path: Vec::new(),
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// Identity of the owning table (alias or name).
    pub fn table_identity(&self) -> Option<&str> {
        self.table.as_deref().map(TableRef::identity)
    }

    pub fn alias_name(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn path(&self) -> &[PathStep] {
        &self.path
    }

    /// A copy with a projection alias.
    pub fn alias(&self, alias: impl Into<String>) -> Field {
        Field {
            alias: Some(alias.into()),
            ..self.clone()
        }
    }

    /// A derived field reading a JSON object key.
    pub fn get(&self, key: impl Into<String>) -> Field {
        let mut derived = self.clone();
        derived.path.push(PathStep::Key(key.into()));
        derived.alias = None;
        derived
    }

    /// A derived field reading a JSON array element.
    pub fn at(&self, index: i64) -> Field {
        let mut derived = self.clone();
        derived.path.push(PathStep::Index(index));
        derived.alias = None;
        derived
    }

    /// `CAST(<field> AS <ty>)`
    pub fn cast(&self, ty: impl Into<String>) -> Expr {
        Expr::from(self).cast(ty)
    }
}

super::impl_compare_methods!(Field);

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.table_identity() == other.table_identity()
            && self.column == other.column
            && self.path == other.path
    }
}

impl Eq for Field {}

impl Hash for Field {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.table_identity().hash(state);
        self.column.hash(state);
        self.path.hash(state);
    }
}

/// A column name in SET, INSERT column lists and conflict targets.
///
/// Built from a `&str` or a [`Field`]; the table qualifier is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnName(pub(crate) String);

impl ColumnName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColumnName {
    fn from(s: &str) -> Self {
        ColumnName(s.to_string())
    }
}

impl From<String> for ColumnName {
    fn from(s: String) -> Self {
        ColumnName(s)
    }
}

impl From<Field> for ColumnName {
    fn from(f: Field) -> Self {
        ColumnName(f.column)
    }
}

impl From<&Field> for ColumnName {
    fn from(f: &Field) -> Self {
        ColumnName(f.column.clone())
    }
}

/// Shorthand for [`Field::new`].
pub fn col(column: impl Into<String>) -> Field {
    Field::new(column)
}
