use async_trait::async_trait;
use sqlx::PgPool;

use super::MEMBER_COLUMNS;
use crate::database::ports::libraries::LibraryRepository;
use crate::error::Result;
use crate::types::{Library, LibraryGroup, LibraryGroupID, LibraryID, LibraryMember, UserID};

/// PostgreSQL-backed reads of libraries, memberships and groups.
#[derive(Clone, Debug)]
pub struct PostgresLibraryRepository {
    pool: PgPool,
}

impl PostgresLibraryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl LibraryRepository for PostgresLibraryRepository {
    async fn get_library(&self, library_id: LibraryID) -> Result<Option<Library>> {
        let library = sqlx::query_as::<_, Library>(
            r#"
            SELECT id, uid, team_id, name, description, create_time, update_time, cover
            FROM libraries
            WHERE id = $1
            "#,
        )
        .bind(library_id)
        .fetch_optional(self.pool())
        .await?;

        Ok(library)
    }

    async fn get_member(
        &self,
        library_id: LibraryID,
        uid: UserID,
    ) -> Result<Option<LibraryMember>> {
        let sql = format!(
            "SELECT {MEMBER_COLUMNS} FROM library_members WHERE library_id = $1 AND uid = $2"
        );
        let member = sqlx::query_as::<_, LibraryMember>(&sql)
            .bind(library_id)
            .bind(uid)
            .fetch_optional(self.pool())
            .await?;

        Ok(member)
    }

    async fn get_group(&self, group_id: LibraryGroupID) -> Result<Option<LibraryGroup>> {
        let group = sqlx::query_as::<_, LibraryGroup>(
            r#"
            SELECT id, uid, name, sort, create_time
            FROM library_groups
            WHERE id = $1
            "#,
        )
        .bind(group_id)
        .fetch_optional(self.pool())
        .await?;

        Ok(group)
    }
}
