//! Postgres-backed ledger loader.
//!
//! Reads the whole ledger inside one `REPEATABLE READ, READ ONLY`
//! transaction, so the returned snapshot reflects a single committed state.
//!
//! ## Expected tables
//!
//! | Table | Columns read |
//! |-------|--------------|
//! | `materials` | `id uuid`, `code`, `name`, `item_type`, `category`, `form`, `unit` (text), `opening_stock`, `safety_stock`, `monthly_forecast`, `unit_price` (double precision), `vendor_id uuid`, `has_coa`, `is_active` (bool), `regulatory_status` (text), `created_at` (ordering) |
//! | `receipts` | `material_id uuid`, `quantity double precision`, `received_at timestamptz` |
//! | `consumptions` | `material_id uuid`, `quantity double precision`, `consumed_at timestamptz` |
//! | `purchase_orders` | `status text` |
//!
//! Enum columns hold the snake_case names the domain types serialize to.
//!
//! ## Error Mapping
//!
//! | SQLx Error | LedgerError |
//! |------------|-------------|
//! | `PoolClosed`, `PoolTimedOut`, `Io`, `Tls` | `Unavailable` |
//! | `ColumnDecode`, `ColumnNotFound`, `Decode` | `Decode` |
//! | anything else | `Query` |

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgRow};
use sqlx::{Postgres, Row, Transaction};
use tracing::{Span, instrument};

use zencore_core::{MaterialId, VendorId};
use zencore_materials::{Category, Form, Material};
use zencore_stock::{LedgerError, LedgerMovement};

use super::snapshot::LedgerSnapshot;
use super::source::SnapshotSource;

const MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct PostgresLedgerLoader {
    pool: Arc<PgPool>,
}

impl PostgresLedgerLoader {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Build a loader whose pool connects on first use.
    ///
    /// The URL is validated first (`Query` on failure). The pool spawns its
    /// maintenance tasks immediately, so a Tokio runtime must be current;
    /// without one this returns `Unavailable`.
    pub fn connect_lazy(database_url: &str) -> Result<Self, LedgerError> {
        let options =
            PgConnectOptions::from_str(database_url).map_err(|e| map_sqlx_error("connect", e))?;
        if let Err(e) = tokio::runtime::Handle::try_current() {
            return Err(LedgerError::Unavailable(format!(
                "no tokio runtime for postgres pool: {e}"
            )));
        }
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_lazy_with(options);
        Ok(Self::new(pool))
    }

    /// Load a consistent snapshot of materials, movements and the pending
    /// purchase-order count.
    #[instrument(
        skip(self),
        fields(materials, receipts, consumptions, pending_purchase_orders),
        err
    )]
    pub async fn load(&self) -> Result<LedgerSnapshot, LedgerError> {
        let span = Span::current();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("set_transaction", e))?;

        let materials = load_materials(&mut tx).await?;
        let receipts = load_movements(
            &mut tx,
            "receipts",
            "SELECT material_id, quantity, received_at AS occurred_at FROM receipts",
        )
        .await?;
        let consumptions = load_movements(
            &mut tx,
            "consumptions",
            "SELECT material_id, quantity, consumed_at AS occurred_at FROM consumptions",
        )
        .await?;

        let pending: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM purchase_orders WHERE status = 'pending'")
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error("count_pending_purchase_orders", e))?;
        let pending = usize::try_from(pending)
            .map_err(|_| LedgerError::Decode(format!("negative purchase order count: {pending}")))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit", e))?;

        let snapshot = LedgerSnapshot::new(materials, receipts, consumptions, pending);
        span.record("materials", snapshot.materials().len());
        span.record("receipts", snapshot.receipt_count());
        span.record("consumptions", snapshot.consumption_count());
        span.record("pending_purchase_orders", pending);

        Ok(snapshot)
    }
}

#[async_trait]
impl SnapshotSource for PostgresLedgerLoader {
    async fn load(&self) -> Result<LedgerSnapshot, LedgerError> {
        PostgresLedgerLoader::load(self).await
    }
}

async fn load_materials(tx: &mut Transaction<'_, Postgres>) -> Result<Vec<Material>, LedgerError> {
    let rows = sqlx::query(
        r#"
        SELECT
            id,
            code,
            name,
            item_type,
            category,
            form,
            unit,
            opening_stock,
            safety_stock,
            monthly_forecast,
            unit_price,
            vendor_id,
            has_coa,
            regulatory_status,
            is_active
        FROM materials
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .fetch_all(&mut **tx)
    .await
    .map_err(|e| map_sqlx_error("load_materials", e))?;

    rows.iter().map(material_from_row).collect()
}

async fn load_movements(
    tx: &mut Transaction<'_, Postgres>,
    stream: &str,
    sql: &str,
) -> Result<Vec<LedgerMovement>, LedgerError> {
    let rows = sqlx::query(sql)
        .fetch_all(&mut **tx)
        .await
        .map_err(|e| map_sqlx_error(stream, e))?;

    rows.iter()
        .map(|row| -> Result<LedgerMovement, LedgerError> {
            Ok(LedgerMovement {
                material_id: MaterialId::from_uuid(row.try_get("material_id").map_err(decode)?),
                quantity: row.try_get("quantity").map_err(decode)?,
                occurred_at: row
                    .try_get::<DateTime<Utc>, _>("occurred_at")
                    .map_err(decode)?,
            })
        })
        .collect()
}

fn material_from_row(row: &PgRow) -> Result<Material, LedgerError> {
    let vendor_id: Option<uuid::Uuid> = row.try_get("vendor_id").map_err(decode)?;
    let category: Option<String> = row.try_get("category").map_err(decode)?;
    let form: Option<String> = row.try_get("form").map_err(decode)?;

    Ok(Material {
        id: MaterialId::from_uuid(row.try_get("id").map_err(decode)?),
        code: row.try_get("code").map_err(decode)?,
        name: row.try_get("name").map_err(decode)?,
        item_type: parse_column(row, "item_type")?,
        category: category.as_deref().map(parse_text::<Category>).transpose()?,
        form: form.as_deref().map(parse_text::<Form>).transpose()?,
        unit: row.try_get("unit").map_err(decode)?,
        opening_stock: row.try_get("opening_stock").map_err(decode)?,
        safety_stock: row.try_get("safety_stock").map_err(decode)?,
        monthly_forecast: row.try_get("monthly_forecast").map_err(decode)?,
        unit_price: row.try_get("unit_price").map_err(decode)?,
        vendor_id: vendor_id.map(VendorId::from_uuid),
        has_coa: row.try_get("has_coa").map_err(decode)?,
        regulatory_status: parse_column(row, "regulatory_status")?,
        is_active: row.try_get("is_active").map_err(decode)?,
    })
}

fn parse_column<T>(row: &PgRow, column: &str) -> Result<T, LedgerError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let text: String = row.try_get(column).map_err(decode)?;
    parse_text(&text)
}

fn parse_text<T>(text: &str) -> Result<T, LedgerError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    text.parse().map_err(|e: T::Err| LedgerError::Decode(e.to_string()))
}

fn decode(err: sqlx::Error) -> LedgerError {
    LedgerError::Decode(err.to_string())
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> LedgerError {
    match err {
        sqlx::Error::PoolClosed => {
            LedgerError::Unavailable(format!("connection pool closed in {operation}"))
        }
        sqlx::Error::PoolTimedOut => {
            LedgerError::Unavailable(format!("connection pool timed out in {operation}"))
        }
        sqlx::Error::Io(e) => LedgerError::Unavailable(format!("io error in {operation}: {e}")),
        sqlx::Error::Tls(e) => LedgerError::Unavailable(format!("tls error in {operation}: {e}")),
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::Decode(_) => decode(err),
        sqlx::Error::Database(db_err) => {
            LedgerError::Query(format!("database error in {operation}: {}", db_err.message()))
        }
        _ => LedgerError::Query(format!("sqlx error in {operation}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zencore_materials::ItemType;

    #[test]
    fn pool_failures_are_unavailable() {
        assert!(matches!(
            map_sqlx_error("load_materials", sqlx::Error::PoolTimedOut),
            LedgerError::Unavailable(msg) if msg.contains("load_materials")
        ));
        assert!(matches!(
            map_sqlx_error("commit", sqlx::Error::PoolClosed),
            LedgerError::Unavailable(_)
        ));
    }

    #[test]
    fn decode_failures_are_decode_errors() {
        let err = map_sqlx_error("receipts", sqlx::Error::ColumnNotFound("quantity".to_string()));
        assert!(matches!(err, LedgerError::Decode(msg) if msg.contains("quantity")));
    }

    #[test]
    fn other_failures_are_query_errors() {
        assert!(matches!(
            map_sqlx_error("consumptions", sqlx::Error::RowNotFound),
            LedgerError::Query(_)
        ));
    }

    #[test]
    fn stored_enum_text_parses_or_fails_decode() {
        assert_eq!(parse_text::<ItemType>("material").unwrap(), ItemType::Material);
        assert_eq!(parse_text::<Category>("aroma").unwrap(), Category::Aroma);
        assert!(matches!(
            parse_text::<Category>("widgets"),
            Err(LedgerError::Decode(msg)) if msg.contains("widgets")
        ));
    }

    #[test]
    fn lazy_pool_rejects_malformed_url() {
        assert!(matches!(
            PostgresLedgerLoader::connect_lazy("not a url"),
            Err(LedgerError::Query(msg)) if msg.contains("connect")
        ));
    }

    #[test]
    fn lazy_pool_needs_a_runtime() {
        match PostgresLedgerLoader::connect_lazy("postgres://stock@localhost/zencore") {
            Err(LedgerError::Unavailable(msg)) if msg.contains("tokio runtime") => {}
            other => panic!("expected unavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn lazy_pool_builds_inside_a_runtime() {
        assert!(PostgresLedgerLoader::connect_lazy("postgres://stock@localhost/zencore").is_ok());
    }
}
