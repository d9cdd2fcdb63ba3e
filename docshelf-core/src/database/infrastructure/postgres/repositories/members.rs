use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use tracing::debug;

use super::MEMBER_COLUMNS;
use crate::application::{
    MemberInvite, MemberLibrarySort, MemberRoleModify, MemberStatusModify,
    MemberUninvite,
};
use crate::database::ports::members::LibraryMembersRepository;
use crate::error::{LibraryError, Result};
use crate::types::{
    LibraryGroupID, LibraryID, LibraryMember, LibraryMemberSummary, MemberStatus,
    UserID,
};

/// PostgreSQL-backed membership mutations; each write runs in its own
/// transaction and locks the rows it resolves.
#[derive(Clone, Debug)]
pub struct PostgresLibraryMembersRepository {
    pool: PgPool,
}

impl PostgresLibraryMembersRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>> {
        self.pool()
            .begin()
            .await
            .map_err(|e| LibraryError::Internal(format!("Failed to start transaction: {}", e)))
    }

    async fn commit(tx: Transaction<'static, Postgres>) -> Result<()> {
        tx.commit()
            .await
            .map_err(|e| LibraryError::Internal(format!("Failed to commit transaction: {}", e)))
    }

    /// Resolve and lock one membership row.
    async fn lock_member(
        tx: &mut Transaction<'static, Postgres>,
        library_id: LibraryID,
        uid: UserID,
    ) -> Result<LibraryMember> {
        let sql = format!(
            "SELECT {MEMBER_COLUMNS} FROM library_members \
             WHERE library_id = $1 AND uid = $2 FOR UPDATE"
        );
        sqlx::query_as::<_, LibraryMember>(&sql)
            .bind(library_id)
            .bind(uid)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| missing_member(library_id, uid))
    }
}

fn missing_member(library_id: LibraryID, uid: UserID) -> LibraryError {
    LibraryError::NotFound(format!("member {uid} of library {library_id}"))
}

fn map_unique_violation(err: sqlx::Error) -> LibraryError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            LibraryError::Conflict("user is already a member of the library".to_string())
        }
        _ => LibraryError::Database(err),
    }
}

#[async_trait]
impl LibraryMembersRepository for PostgresLibraryMembersRepository {
    async fn list_members(&self, library_id: LibraryID) -> Result<Vec<LibraryMemberSummary>> {
        let members = sqlx::query_as::<_, LibraryMemberSummary>(
            r#"
            SELECT id, library_id, uid, urole, status, apply_time, create_time, update_time
            FROM library_members
            WHERE library_id = $1
            ORDER BY id
            "#,
        )
        .bind(library_id)
        .fetch_all(self.pool())
        .await?;

        Ok(members)
    }

    async fn invite_members(
        &self,
        invite: &MemberInvite,
        now: i64,
    ) -> Result<Vec<LibraryMember>> {
        if invite.member_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.begin().await?;

        let ids: Vec<i64> = invite.member_ids.iter().map(UserID::as_i64).collect();
        let existing: Vec<UserID> = sqlx::query_scalar(
            r#"
            SELECT uid FROM library_members
            WHERE library_id = $1 AND uid = ANY($2)
            FOR UPDATE
            "#,
        )
        .bind(invite.library_id)
        .bind(&ids)
        .fetch_all(&mut *tx)
        .await?;

        if let Some(uid) = existing.first() {
            // Dropping the transaction rolls it back.
            return Err(LibraryError::Conflict(format!(
                "user {uid} is already a member of library {}",
                invite.library_id
            )));
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO library_members \
             (library_id, uid, group_id, urole, status, sort, apply_time, create_time, update_time) ",
        );
        builder.push_values(&invite.member_ids, |mut row, uid| {
            row.push_bind(invite.library_id)
                .push_bind(*uid)
                .push_bind(LibraryGroupID::UNGROUPED)
                .push_bind(MemberInvite::DEFAULT_ROLE.code())
                .push_bind(MemberStatus::Normal.code())
                .push_bind(0.0_f64)
                .push_bind(0_i64)
                .push_bind(now)
                .push_bind(now);
        });
        builder.push(" RETURNING ");
        builder.push(MEMBER_COLUMNS);

        let invited = builder
            .build_query_as::<LibraryMember>()
            .fetch_all(&mut *tx)
            .await
            .map_err(map_unique_violation)?;

        Self::commit(tx).await?;
        debug!(library_id = %invite.library_id, count = invited.len(), "membership rows inserted");
        Ok(invited)
    }

    async fn uninvite_member(&self, uninvite: &MemberUninvite) -> Result<LibraryMember> {
        let mut tx = self.begin().await?;
        Self::lock_member(&mut tx, uninvite.library_id, uninvite.uid).await?;

        let sql = format!(
            "DELETE FROM library_members WHERE library_id = $1 AND uid = $2 \
             RETURNING {MEMBER_COLUMNS}"
        );
        let removed = sqlx::query_as::<_, LibraryMember>(&sql)
            .bind(uninvite.library_id)
            .bind(uninvite.uid)
            .fetch_one(&mut *tx)
            .await?;

        Self::commit(tx).await?;
        Ok(removed)
    }

    async fn modify_member_status(
        &self,
        modify: &MemberStatusModify,
        now: i64,
    ) -> Result<LibraryMember> {
        let mut tx = self.begin().await?;
        let member = Self::lock_member(&mut tx, modify.library_id, modify.uid).await?;

        let sql = format!(
            "UPDATE library_members SET status = $1, update_time = $2 WHERE id = $3 \
             RETURNING {MEMBER_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, LibraryMember>(&sql)
            .bind(modify.status)
            .bind(now)
            .bind(member.id)
            .fetch_one(&mut *tx)
            .await?;

        Self::commit(tx).await?;
        Ok(updated)
    }

    async fn modify_member_role(
        &self,
        modify: &MemberRoleModify,
        now: i64,
    ) -> Result<LibraryMember> {
        let mut tx = self.begin().await?;
        let member = Self::lock_member(&mut tx, modify.library_id, modify.uid).await?;

        let sql = format!(
            "UPDATE library_members SET urole = $1, update_time = $2 WHERE id = $3 \
             RETURNING {MEMBER_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, LibraryMember>(&sql)
            .bind(modify.role.code())
            .bind(now)
            .bind(member.id)
            .fetch_one(&mut *tx)
            .await?;

        Self::commit(tx).await?;
        Ok(updated)
    }

    async fn sort_member_library(
        &self,
        sort: &MemberLibrarySort,
        now: i64,
    ) -> Result<LibraryMember> {
        let mut tx = self.begin().await?;
        let member = Self::lock_member(&mut tx, sort.library_id, sort.uid).await?;

        let position = match sort.sort {
            Some(position) => position,
            None => {
                sqlx::query_scalar::<_, f64>(
                    r#"
                    SELECT COALESCE(MAX(sort), 0) + 1
                    FROM library_members
                    WHERE uid = $1 AND group_id = $2 AND id <> $3
                    "#,
                )
                .bind(sort.uid)
                .bind(sort.group_id)
                .bind(member.id)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        let sql = format!(
            "UPDATE library_members SET group_id = $1, sort = $2, update_time = $3 WHERE id = $4 \
             RETURNING {MEMBER_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, LibraryMember>(&sql)
            .bind(sort.group_id)
            .bind(position)
            .bind(now)
            .bind(member.id)
            .fetch_one(&mut *tx)
            .await?;

        Self::commit(tx).await?;
        Ok(updated)
    }
}
