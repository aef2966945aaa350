//! Schema derive macro implementation.

mod attrs;

use attrs::{TypeOverride, column_name, get_field_attr, get_struct_attr};
use heck::ToSnakeCase;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, Result};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let vis = &input.vis;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Schema can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Schema can only be derived for structs",
            ));
        }
    };

    let struct_attr = get_struct_attr(&input)?;
    let table_name = struct_attr
        .table
        .unwrap_or_else(|| name.to_string().to_snake_case());
    let schema_name = match &struct_attr.schema {
        Some(s) => quote! { ::core::option::Option::Some(#s) },
        None => quote! { ::core::option::Option::None },
    };

    let fields_name = format_ident!("{}Fields", name);
    let mut accessor_decls = Vec::new();
    let mut accessor_inits = Vec::new();
    let mut column_defs = Vec::new();
    let mut seen = Vec::<String>::new();

    for field in fields {
        let attr = get_field_attr(field)?;
        if attr.skip {
            continue;
        }
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let column = column_name(field, &attr)?;
        if seen.contains(&column) {
            return Err(syn::Error::new_spanned(
                field,
                format!("duplicate column `{column}`"),
            ));
        }
        seen.push(column.clone());
        let ty = &field.ty;

        accessor_decls.push(quote! {
            pub #ident: ::sqlweave::Field
        });
        accessor_inits.push(quote! {
            #ident: table.col(#column)
        });

        let sql_type = match &attr.sql_type {
            Some(TypeOverride::Varchar(n)) => quote! { ::sqlweave::SqlType::Varchar(#n) },
            Some(TypeOverride::Custom(s)) => {
                quote! { ::sqlweave::SqlType::Custom(::std::string::String::from(#s)) }
            }
            None => quote! { <#ty as ::sqlweave::SqlTyped>::sql_type() },
        };
        let primary_key = if attr.is_id {
            quote! { let def = def.primary_key(); }
        } else {
            quote! {}
        };
        let unique = if attr.unique {
            quote! { let def = def.unique(); }
        } else {
            quote! {}
        };

        column_defs.push(quote! {
            {
                let mut def = ::sqlweave::ColumnDef::new(#column, #sql_type);
                def.nullable = <#ty as ::sqlweave::SqlTyped>::NULLABLE;
                #primary_key
                #unique
                def
            }
        });
    }

    if column_defs.is_empty() {
        return Err(syn::Error::new_spanned(
            &input,
            "Schema requires at least one column",
        ));
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let fields_doc = format!("Column accessors for [`{name}`].");

    Ok(quote! {
        #[doc = #fields_doc]
        #[derive(Debug, Clone)]
        #vis struct #fields_name {
            #(#accessor_decls,)*
        }

        impl #impl_generics ::sqlweave::schema::Schema for #name #ty_generics #where_clause {
            const TABLE_NAME: &'static str = #table_name;
            const SCHEMA_NAME: ::core::option::Option<&'static str> = #schema_name;

            type Fields = #fields_name;

            fn fields(table: &::sqlweave::Table) -> Self::Fields {
                #fields_name {
                    #(#accessor_inits,)*
                }
            }

            fn column_defs() -> ::std::vec::Vec<::sqlweave::ColumnDef> {
                ::std::vec![
                    #(#column_defs,)*
                ]
            }
        }
    })
}
