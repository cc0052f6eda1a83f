// ABOUTME: Dynamic partial-update builder over a fixed field allow-list
// ABOUTME: Only allow-listed column names ever reach the SQL text; values are bound

use serde_json::{Map, Value};
use sqlx::{QueryBuilder, Sqlite};

/// One updatable column: the external (camelCase) request name, the internal
/// column name, and whether values are stored JSON-encoded.
///
/// Both spellings are accepted in the input map, so clients sending
/// `tasksCompleted` and clients sending `tasks_completed` update the same
/// column.
pub struct AllowedField {
    pub external: &'static str,
    pub column: &'static str,
    pub json: bool,
}

impl AllowedField {
    pub const fn plain(external: &'static str, column: &'static str) -> Self {
        Self {
            external,
            column,
            json: false,
        }
    }

    pub const fn json(external: &'static str, column: &'static str) -> Self {
        Self {
            external,
            column,
            json: true,
        }
    }
}

/// Build `UPDATE <table> SET ...` containing only the allow-listed columns
/// present in `input`, in allow-list order, each value bound as a parameter.
/// The touch column is appended as the final assignment and the statement is
/// scoped to `id`.
///
/// Returns `Ok(None)` when no allow-listed field is present in the input, in
/// which case no statement should be executed.
pub fn build_partial_update(
    table: &str,
    allowed: &[AllowedField],
    input: &Map<String, Value>,
    touch_column: &str,
    id: i64,
) -> Result<Option<QueryBuilder<'static, Sqlite>>, serde_json::Error> {
    let mut builder: QueryBuilder<'static, Sqlite> =
        QueryBuilder::new(format!("UPDATE {} SET ", table));
    let mut wrote = false;

    for field in allowed {
        let value = input
            .get(field.external)
            .or_else(|| input.get(field.column));
        let Some(value) = value else {
            continue;
        };

        if wrote {
            builder.push(", ");
        }
        builder.push(field.column);
        builder.push(" = ");
        push_value(&mut builder, value, field.json)?;
        wrote = true;
    }

    if !wrote {
        return Ok(None);
    }

    builder.push(", ");
    builder.push(touch_column);
    builder.push(" = datetime('now')");
    builder.push(" WHERE id = ");
    builder.push_bind(id);

    Ok(Some(builder))
}

fn push_value(
    builder: &mut QueryBuilder<'static, Sqlite>,
    value: &Value,
    json: bool,
) -> Result<(), serde_json::Error> {
    if json {
        // JSON columns store the encoded text regardless of input shape so
        // the read path can decode uniformly
        builder.push_bind(serde_json::to_string(value)?);
        return Ok(());
    }

    match value {
        Value::Null => {
            builder.push_bind(None::<String>);
        }
        Value::Bool(b) => {
            builder.push_bind(*b);
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                builder.push_bind(i);
            } else {
                builder.push_bind(n.as_f64().unwrap_or(0.0));
            }
        }
        Value::String(s) => {
            builder.push_bind(s.clone());
        }
        Value::Array(_) | Value::Object(_) => {
            builder.push_bind(serde_json::to_string(value)?);
        }
    }

    Ok(())
}
