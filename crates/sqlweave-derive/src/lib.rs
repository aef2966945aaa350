//! Derive macros for sqlweave
//!
//! Provides `#[derive(Schema)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod schema;
mod sql_ident;

/// Derive the `Schema` trait for a struct.
///
/// # Example
///
/// ```ignore
/// use sqlweave::Schema;
///
/// #[derive(Schema)]
/// #[sql(table = "users", schema = "app")]
/// struct User {
///     #[sql(id)]
///     id: i64,
///     #[sql(unique, varchar = 255)]
///     email: String,
///     #[sql(column = "display_name")]
///     name: Option<String>,
///     #[sql(skip)]
///     cached: Vec<String>,
/// }
///
/// let users = User::table();
/// let f = User::fields(&users);
/// ```
///
/// # Generated
///
/// - `UserFields` - a struct with one `sqlweave::Field` per column
/// - `impl Schema for User` - table name, field accessors and column definitions
///
/// # Attributes
///
/// - `#[sql(table = "name")]` - Table name (defaults to the snake_case struct name)
/// - `#[sql(schema = "name")]` - Schema qualifier
/// - `#[sql(id)]` - Mark field as (part of) the primary key
/// - `#[sql(column = "name")]` - Map field to a different column name
/// - `#[sql(unique)]` - Add a UNIQUE constraint
/// - `#[sql(varchar = N)]` - Use `VARCHAR(N)` instead of the type's default
/// - `#[sql(sql_type = "...")]` - Use a verbatim column type
/// - `#[sql(skip)]` - Not a column
#[proc_macro_derive(Schema, attributes(sql))]
pub fn derive_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    schema::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
