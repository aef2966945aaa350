//! [`Driver`] for `tokio_postgres::Client`.

use super::{Driver, Row};
use crate::dialect::Vendor;
use crate::error::{SqlError, SqlResult};
use crate::value::Value;
use bytes::BytesMut;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::error::Error;
use std::sync::Arc;
use tokio_postgres::types::{IsNull, ToSql, Type};

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(b) => b.to_sql(ty, out),
            Value::Int(i) => match *ty {
                Type::INT2 => i16::try_from(*i)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(*i)?.to_sql(ty, out),
                Type::FLOAT8 => (*i as f64).to_sql(ty, out),
                _ => i.to_sql(ty, out),
            },
            Value::Float(f) => match *ty {
                Type::FLOAT4 => (*f as f32).to_sql(ty, out),
                _ => f.to_sql(ty, out),
            },
            Value::Text(s) => s.to_sql(ty, out),
            Value::Bytes(b) => b.to_sql(ty, out),
            Value::Date(d) => d.to_sql(ty, out),
            Value::Timestamp(ts) => ts.to_sql(ty, out),
            Value::TimestampTz(ts) => ts.to_sql(ty, out),
            Value::Uuid(u) => u.to_sql(ty, out),
            Value::Json(j) => j.to_sql(ty, out),
        }
    }

    // The server picks the parameter type; mismatches surface from the inner impls.
    fn accepts(_ty: &Type) -> bool {
        true
    }

    tokio_postgres::types::to_sql_checked!();
}

fn params_ref(params: &[Value]) -> Vec<&(dyn ToSql + Sync)> {
    params.iter().map(|p| p as &(dyn ToSql + Sync)).collect()
}

/// Decode one cell by its column type.
fn decode_cell(row: &tokio_postgres::Row, index: usize) -> SqlResult<Value> {
    let column = &row.columns()[index];
    let err = |e: tokio_postgres::Error| SqlError::decode(column.name(), e.to_string());

    let value = match *column.type_() {
        Type::BOOL => row.try_get::<_, Option<bool>>(index).map_err(err)?.map(Value::Bool),
        Type::INT2 => row
            .try_get::<_, Option<i16>>(index)
            .map_err(err)?
            .map(|v| Value::Int(v.into())),
        Type::INT4 => row
            .try_get::<_, Option<i32>>(index)
            .map_err(err)?
            .map(|v| Value::Int(v.into())),
        Type::INT8 => row.try_get::<_, Option<i64>>(index).map_err(err)?.map(Value::Int),
        Type::FLOAT4 => row
            .try_get::<_, Option<f32>>(index)
            .map_err(err)?
            .map(|v| Value::Float(v.into())),
        Type::FLOAT8 => row.try_get::<_, Option<f64>>(index).map_err(err)?.map(Value::Float),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => row
            .try_get::<_, Option<String>>(index)
            .map_err(err)?
            .map(Value::Text),
        Type::BYTEA => row
            .try_get::<_, Option<Vec<u8>>>(index)
            .map_err(err)?
            .map(Value::Bytes),
        Type::DATE => row
            .try_get::<_, Option<NaiveDate>>(index)
            .map_err(err)?
            .map(Value::Date),
        Type::TIMESTAMP => row
            .try_get::<_, Option<NaiveDateTime>>(index)
            .map_err(err)?
            .map(Value::Timestamp),
        Type::TIMESTAMPTZ => row
            .try_get::<_, Option<DateTime<Utc>>>(index)
            .map_err(err)?
            .map(Value::TimestampTz),
        Type::UUID => row
            .try_get::<_, Option<uuid::Uuid>>(index)
            .map_err(err)?
            .map(Value::Uuid),
        Type::JSON | Type::JSONB => row
            .try_get::<_, Option<serde_json::Value>>(index)
            .map_err(err)?
            .map(Value::Json),
        ref other => {
            return Err(SqlError::decode(
                column.name(),
                format!("unsupported column type {other}"),
            ));
        }
    };
    Ok(value.unwrap_or(Value::Null))
}

fn decode_rows(rows: Vec<tokio_postgres::Row>) -> SqlResult<Vec<Row>> {
    let Some(first) = rows.first() else {
        return Ok(Vec::new());
    };
    let columns: Arc<[String]> = first
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();

    rows.iter()
        .map(|row| {
            let values = (0..row.len())
                .map(|i| decode_cell(row, i))
                .collect::<SqlResult<Vec<_>>>()?;
            Ok(Row::new(columns.clone(), values))
        })
        .collect()
}

impl Driver for tokio_postgres::Client {
    fn vendor(&self) -> Vendor {
        Vendor::Postgres
    }

    async fn query(&self, sql: &str, params: &[Value]) -> SqlResult<Vec<Row>> {
        let rows = tokio_postgres::Client::query(self, sql, &params_ref(params)).await?;
        decode_rows(rows)
    }

    async fn execute(&self, sql: &str, params: &[Value]) -> SqlResult<u64> {
        Ok(tokio_postgres::Client::execute(self, sql, &params_ref(params)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_binds_as_null() {
        let mut buf = BytesMut::new();
        let is_null = Value::Null.to_sql(&Type::INT8, &mut buf).unwrap();
        assert!(matches!(is_null, IsNull::Yes));
        assert!(buf.is_empty());
    }

    #[test]
    fn int_narrows_to_column_type() {
        let mut buf = BytesMut::new();
        Value::Int(7).to_sql(&Type::INT4, &mut buf).unwrap();
        assert_eq!(&buf[..], &7i32.to_be_bytes());

        let mut buf = BytesMut::new();
        assert!(Value::Int(i64::MAX).to_sql(&Type::INT2, &mut buf).is_err());
    }
}
