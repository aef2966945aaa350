use super::{Expr, Field};
use crate::error::SqlResult;
use crate::ident::Ident;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, PoisonError};

/// Name, schema and alias of a table, shared by every [`Field`] created from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct TableRef {
    pub(crate) name: String,
    /// Qualifier segments before the name, outermost first (`[db, schema]`).
    pub(crate) schema: Vec<String>,
    pub(crate) alias: Option<String>,
}

impl TableRef {
    pub(crate) fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: Vec::new(),
            alias: None,
        }
    }

    /// Last segment of `parts` is the name, the rest the qualifier path.
    pub(crate) fn from_parts(parts: &[String]) -> Self {
        match parts.split_last() {
            Some((name, qualifier)) => Self {
                name: name.clone(),
                schema: qualifier.to_vec(),
                alias: None,
            },
            None => Self::named(""),
        }
    }

    /// The name fields must be qualified with: the alias if present, else the table name.
    pub(crate) fn identity(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// A table reference with a memoizing column accessor registry.
///
/// Two `Table` values with different aliases may denote the same physical
/// table (self-join). Fields are scoped by [`Table::identity`].
///
/// ```ignore
/// let users = Table::new("users");
/// let u = users.alias("u");
/// assert_eq!(u.col("id"), u.col("id"));
/// assert_ne!(users.col("id"), u.col("id"));
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    reference: Arc<TableRef>,
    columns: Arc<Mutex<BTreeMap<String, Field>>>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_ref(TableRef::named(name))
    }

    /// Parse a dotted name such as `public.users`, `db.public.users` or
    /// `"Sales"."Orders"`. Every segment is kept and quoted separately.
    pub fn qualified(path: &str) -> SqlResult<Self> {
        let ident = Ident::parse(path)?;
        Ok(Self::from_parts(ident.parts()))
    }

    /// Table from already-parsed identifier segments.
    pub(crate) fn from_parts(parts: &[String]) -> Self {
        Self::from_ref(TableRef::from_parts(parts))
    }

    fn from_ref(reference: TableRef) -> Self {
        Self {
            reference: Arc::new(reference),
            columns: Arc::default(),
        }
    }

    /// A copy of this table in another schema (a single segment).
    pub fn schema(&self, schema: impl Into<String>) -> Table {
        Self::from_ref(TableRef {
            schema: vec![schema.into()],
            ..(*self.reference).clone()
        })
    }

    /// A copy of this table under an alias. The original is unchanged.
    pub fn alias(&self, alias: impl Into<String>) -> Table {
        Self::from_ref(TableRef {
            alias: Some(alias.into()),
            ..(*self.reference).clone()
        })
    }

    pub fn name(&self) -> &str {
        &self.reference.name
    }

    /// The innermost qualifier segment, usually the schema.
    pub fn schema_name(&self) -> Option<&str> {
        self.reference.schema.last().map(String::as_str)
    }

    /// All qualifier segments, outermost first.
    pub fn schema_path(&self) -> &[String] {
        &self.reference.schema
    }

    pub fn alias_name(&self) -> Option<&str> {
        self.reference.alias.as_deref()
    }

    /// Alias if present, else the table name.
    pub fn identity(&self) -> &str {
        self.reference.identity()
    }

    /// Column accessor. Repeated calls return equal fields.
    pub fn col(&self, name: &str) -> Field {
        let mut registry = self.columns.lock().unwrap_or_else(PoisonError::into_inner);
        registry
            .entry(name.to_string())
            .or_insert_with(|| Field::with_table(self.reference.clone(), name))
            .clone()
    }

    /// `"t".*`
    pub fn star(&self) -> Expr {
        Expr::Star(Some(self.clone()))
    }

    /// Columns accessed through [`Table::col`] so far, sorted by name.
    pub fn known_columns(&self) -> Vec<String> {
        let registry = self.columns.lock().unwrap_or_else(PoisonError::into_inner);
        registry.keys().cloned().collect()
    }

    pub(crate) fn reference(&self) -> &TableRef {
        &self.reference
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.reference == other.reference
    }
}

impl Eq for Table {}

impl Hash for Table {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.reference.hash(state);
    }
}

impl From<&Table> for Table {
    fn from(t: &Table) -> Self {
        t.clone()
    }
}

impl From<&str> for Table {
    fn from(name: &str) -> Self {
        Table::new(name)
    }
}
