//! Attribute parsing for the Schema derive macro.
//!
//! Handles struct-level and field-level `#[sql(...)]` attributes.

use crate::sql_ident::{parse_sql_ident, parse_sql_ident_with_span};
use syn::{DeriveInput, Result};

/// Struct-level options.
pub(super) struct StructAttr {
    pub table: Option<String>,
    pub schema: Option<String>,
}

impl syn::parse::Parse for StructAttr {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut table = None;
        let mut schema = None;

        while !input.is_empty() {
            let ident: syn::Ident = input.parse()?;
            let _: syn::Token![=] = input.parse()?;
            let value: syn::LitStr = input.parse()?;

            if ident == "table" {
                table = Some(parse_sql_ident(&value, "table")?);
            } else if ident == "schema" {
                schema = Some(parse_sql_ident(&value, "schema")?);
            } else {
                return Err(syn::Error::new(
                    ident.span(),
                    format!("unknown struct attribute `{ident}`"),
                ));
            }

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }

        Ok(StructAttr { table, schema })
    }
}

/// Column type override.
pub(super) enum TypeOverride {
    Varchar(u32),
    Custom(String),
}

/// Field-level options.
#[derive(Default)]
pub(super) struct FieldAttr {
    pub is_id: bool,
    pub unique: bool,
    pub skip: bool,
    pub column: Option<String>,
    pub sql_type: Option<TypeOverride>,
}

impl FieldAttr {
    fn merge(&mut self, other: FieldAttr) {
        self.is_id |= other.is_id;
        self.unique |= other.unique;
        self.skip |= other.skip;
        if other.column.is_some() {
            self.column = other.column;
        }
        if other.sql_type.is_some() {
            self.sql_type = other.sql_type;
        }
    }
}

impl syn::parse::Parse for FieldAttr {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut attr = FieldAttr::default();

        // Comma-separated flags or key = value pairs
        while !input.is_empty() {
            let ident: syn::Ident = input.parse()?;

            if ident == "id" {
                attr.is_id = true;
            } else if ident == "unique" {
                attr.unique = true;
            } else if ident == "skip" {
                attr.skip = true;
            } else {
                let _: syn::Token![=] = input.parse()?;
                if ident == "column" {
                    let value: syn::LitStr = input.parse()?;
                    attr.column = Some(parse_sql_ident(&value, "column")?);
                } else if ident == "varchar" {
                    let value: syn::LitInt = input.parse()?;
                    attr.sql_type = Some(TypeOverride::Varchar(value.base10_parse()?));
                } else if ident == "sql_type" {
                    let value: syn::LitStr = input.parse()?;
                    let ty = value.value();
                    if ty.trim().is_empty() {
                        return Err(syn::Error::new(value.span(), "sql_type must not be empty"));
                    }
                    attr.sql_type = Some(TypeOverride::Custom(ty));
                } else {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown field attribute `{ident}`"),
                    ));
                }
            }

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }

        Ok(attr)
    }
}

/// Collect the struct-level `#[sql(...)]` attributes.
pub(super) fn get_struct_attr(input: &DeriveInput) -> Result<StructAttr> {
    let mut out = StructAttr {
        table: None,
        schema: None,
    };
    for attr in &input.attrs {
        if attr.path().is_ident("sql") {
            let parsed = attr.parse_args::<StructAttr>()?;
            if parsed.table.is_some() {
                out.table = parsed.table;
            }
            if parsed.schema.is_some() {
                out.schema = parsed.schema;
            }
        }
    }
    Ok(out)
}

/// Collect the field-level `#[sql(...)]` attributes.
pub(super) fn get_field_attr(field: &syn::Field) -> Result<FieldAttr> {
    let mut out = FieldAttr::default();
    for attr in &field.attrs {
        if attr.path().is_ident("sql") {
            out.merge(attr.parse_args::<FieldAttr>()?);
        }
    }
    Ok(out)
}

/// Column name for a field: the `column` override or the field's own name.
pub(super) fn column_name(field: &syn::Field, attr: &FieldAttr) -> Result<String> {
    use syn::ext::IdentExt;

    if let Some(column) = &attr.column {
        return Ok(column.clone());
    }
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
    parse_sql_ident_with_span(&ident.unraw().to_string(), ident.span(), "column")
}
