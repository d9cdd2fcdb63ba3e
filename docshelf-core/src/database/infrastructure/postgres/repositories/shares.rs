use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::database::ports::shares::LibrarySharesRepository;
use crate::error::Result;
use crate::query::{Page, Pagination, ShareListFilter};
use crate::types::{LibraryID, LibraryShare, LibraryShareID, ShareStatus};

const SHARE_COLUMNS: &str = "id, library_id, doc_id, uid, share_name, share_code, is_protected, \
     access_count, create_time, expire_time, status";

#[derive(Clone, Debug)]
pub struct PostgresLibrarySharesRepository {
    pool: PgPool,
}

impl PostgresLibrarySharesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Append the WHERE clause shared by the count and page queries.
fn push_share_filters(
    builder: &mut QueryBuilder<'_, Postgres>,
    library_id: LibraryID,
    filter: &ShareListFilter,
) {
    builder.push(" WHERE library_id = ").push_bind(library_id);

    if let Some(pattern) = filter.like_pattern() {
        builder
            .push(" AND share_name LIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\'");
    }
    if let Some(start) = filter.created_from() {
        builder.push(" AND create_time >= ").push_bind(start);
    }
    if let Some(end) = filter.created_until() {
        builder.push(" AND create_time <= ").push_bind(end);
    }
}

#[async_trait]
impl LibrarySharesRepository for PostgresLibrarySharesRepository {
    async fn get_share(&self, share_id: LibraryShareID) -> Result<Option<LibraryShare>> {
        let sql = format!("SELECT {SHARE_COLUMNS} FROM library_shares WHERE id = $1");
        let share = sqlx::query_as::<_, LibraryShare>(&sql)
            .bind(share_id)
            .fetch_optional(self.pool())
            .await?;

        Ok(share)
    }

    async fn list_shares(
        &self,
        library_id: LibraryID,
        filter: &ShareListFilter,
        pagination: &Pagination,
    ) -> Result<Page<LibraryShare>> {
        let mut count: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM library_shares");
        push_share_filters(&mut count, library_id, filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(self.pool())
            .await?;

        let order = pagination.order_or_default();
        let mut select: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        select.push(SHARE_COLUMNS).push(" FROM library_shares");
        push_share_filters(&mut select, library_id, filter);
        // Columns and directions come from closed enums, never from input.
        select
            .push(" ORDER BY ")
            .push(order.field.column())
            .push(" ")
            .push(order.direction.as_sql());
        if order.field.column() != "id" {
            select.push(", id ").push(order.direction.as_sql());
        }
        select
            .push(" LIMIT ")
            .push_bind(pagination.limit() as i64)
            .push(" OFFSET ")
            .push_bind(pagination.offset() as i64);

        let items = select
            .build_query_as::<LibraryShare>()
            .fetch_all(self.pool())
            .await?;

        Ok(Page::new(items, pagination, total.max(0) as u64))
    }

    async fn modify_share_status(
        &self,
        share_id: LibraryShareID,
        status: ShareStatus,
    ) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE library_shares SET status = $1 WHERE id = $2 AND status <> $1",
        )
        .bind(status.code())
        .bind(share_id)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected())
    }

    async fn remove_share(&self, share_id: LibraryShareID) -> Result<u64> {
        let result = sqlx::query("DELETE FROM library_shares WHERE id = $1")
            .bind(share_id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected())
    }
}
