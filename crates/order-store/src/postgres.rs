use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{Money, OrderId};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::error::Result;
use crate::order::{NewOrder, Order};
use crate::read::ReadStore;
use crate::summary::OrderSummary;
use crate::write::WriteStore;

/// PostgreSQL-backed write store implementation.
///
/// Ids come from the `orders` table's identity column; each operation runs
/// on its own pooled connection and commits independently.
#[derive(Clone)]
pub struct PostgresWriteStore {
    pool: PgPool,
}

impl PostgresWriteStore {
    /// Creates a new PostgreSQL write store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the write-side database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations/write").run(&self.pool).await
    }

    fn row_to_order(row: PgRow) -> Result<Order> {
        Ok(Order {
            id: OrderId::new(row.try_get("id")?),
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            status: row.try_get("status")?,
            total_cost: Money::from_cents(row.try_get("total_cost_cents")?),
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        })
    }
}

#[async_trait]
impl WriteStore for PostgresWriteStore {
    async fn add_order(&self, order: NewOrder) -> Result<Order> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO orders (first_name, last_name, status, total_cost_cents, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&order.first_name)
        .bind(&order.last_name)
        .bind(&order.status)
        .bind(order.total_cost.cents())
        .bind(order.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(order.into_order(OrderId::new(id)))
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, status, total_cost_cents, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_order).transpose()
    }
}

/// PostgreSQL-backed read store implementation.
#[derive(Clone)]
pub struct PostgresReadStore {
    pool: PgPool,
}

impl PostgresReadStore {
    /// Creates a new PostgreSQL read store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the read-side database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations/read").run(&self.pool).await
    }

    fn row_to_summary(row: PgRow) -> Result<OrderSummary> {
        Ok(OrderSummary {
            id: OrderId::new(row.try_get("id")?),
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            status: row.try_get("status")?,
            total_cost: Money::from_cents(row.try_get("total_cost_cents")?),
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        })
    }
}

#[async_trait]
impl ReadStore for PostgresReadStore {
    async fn upsert_summary(&self, summary: OrderSummary) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO order_summaries (id, first_name, last_name, status, total_cost_cents, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                status = EXCLUDED.status,
                total_cost_cents = EXCLUDED.total_cost_cents,
                created_at = EXCLUDED.created_at
            "#,
        )
        .bind(summary.id.as_i64())
        .bind(&summary.first_name)
        .bind(&summary.last_name)
        .bind(&summary.status)
        .bind(summary.total_cost.cents())
        .bind(summary.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<OrderSummary>> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, status, total_cost_cents, created_at
            FROM order_summaries
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_summary).transpose()
    }

    async fn list_all(&self) -> Result<Vec<OrderSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT id, first_name, last_name, status, total_cost_cents, created_at
            FROM order_summaries
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_summary).collect()
    }
}
