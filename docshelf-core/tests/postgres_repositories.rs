//! Repository tests against a live PostgreSQL. Run with
//! `--features postgres-tests` and `DATABASE_URL` pointing at a server the
//! test user may create databases on.
#![cfg(feature = "postgres-tests")]

use docshelf_core::application::{
    MemberInvite, MemberLibrarySort, MemberStatusModify, MemberUninvite,
};
use docshelf_core::database::infrastructure::postgres::{
    PostgresLibraryMembersRepository, PostgresLibraryRepository,
    PostgresLibrarySharesRepository,
};
use docshelf_core::database::ports::{
    libraries::LibraryRepository, members::LibraryMembersRepository,
    shares::LibrarySharesRepository,
};
use docshelf_core::query::{PageParams, Pagination, ShareListFilter};
use docshelf_core::{
    LibraryError, LibraryGroupID, LibraryID, LibraryRole, LibraryShareID, MemberStatus,
    ShareStatus, UserID,
};
use sqlx::PgPool;

const LIBRARY: LibraryID = LibraryID(1);
const DAY: i64 = 1_700_006_400;

async fn seed_library(pool: &PgPool) -> sqlx::Result<()> {
    sqlx::query(
        "INSERT INTO libraries (id, uid, team_id, name, description, cover, create_time, update_time) \
         VALUES ($1, 100, 0, 'Handbook', '', '', 0, 0)",
    )
    .bind(LIBRARY)
    .execute(pool)
    .await?;
    Ok(())
}

async fn seed_share(pool: &PgPool, name: &str, create_time: i64) -> sqlx::Result<LibraryShareID> {
    sqlx::query_scalar(
        "INSERT INTO library_shares \
         (library_id, doc_id, uid, share_name, share_code, is_protected, access_count, create_time, expire_time) \
         VALUES ($1, 1, 100, $2, md5($2), false, 0, $3, 0) RETURNING id",
    )
    .bind(LIBRARY)
    .bind(name)
    .bind(create_time)
    .fetch_one(pool)
    .await
}

fn invite(ids: &[i64]) -> MemberInvite {
    MemberInvite {
        library_id: LIBRARY,
        member_ids: ids.iter().copied().map(UserID).collect(),
    }
}

#[sqlx::test(migrator = "docshelf_core::MIGRATOR")]
async fn invite_inserts_batch_with_default_role(pool: PgPool) -> sqlx::Result<()> {
    seed_library(&pool).await?;
    let members = PostgresLibraryMembersRepository::new(pool.clone());

    let invited = members.invite_members(&invite(&[2, 3]), 42).await.unwrap();
    assert_eq!(invited.len(), 2);
    assert!(invited.iter().all(|m| m.role() == Some(LibraryRole::Reader)));
    assert!(invited.iter().all(|m| m.member_status() == Some(MemberStatus::Normal)));
    assert!(invited.iter().all(|m| m.create_time == 42 && m.group_id.is_ungrouped()));

    let listed = members.list_members(LIBRARY).await.unwrap();
    assert_eq!(listed.len(), 2);
    Ok(())
}

#[sqlx::test(migrator = "docshelf_core::MIGRATOR")]
async fn invite_rolls_back_whole_batch_on_existing_member(pool: PgPool) -> sqlx::Result<()> {
    seed_library(&pool).await?;
    let members = PostgresLibraryMembersRepository::new(pool.clone());
    members.invite_members(&invite(&[3]), 1).await.unwrap();

    let err = members.invite_members(&invite(&[2, 3, 4]), 2).await.unwrap_err();
    assert!(matches!(err, LibraryError::Conflict(_)));

    let uids: Vec<i64> = members
        .list_members(LIBRARY)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.uid.as_i64())
        .collect();
    assert_eq!(uids, vec![3]);
    Ok(())
}

#[sqlx::test(migrator = "docshelf_core::MIGRATOR")]
async fn missing_member_is_not_found(pool: PgPool) -> sqlx::Result<()> {
    seed_library(&pool).await?;
    let members = PostgresLibraryMembersRepository::new(pool.clone());

    let err = members
        .uninvite_member(&MemberUninvite {
            library_id: LIBRARY,
            uid: UserID(9),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, LibraryError::NotFound(_)));

    let err = members
        .modify_member_status(
            &MemberStatusModify {
                library_id: LIBRARY,
                uid: UserID(9),
                status: 2,
            },
            5,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LibraryError::NotFound(_)));
    Ok(())
}

#[sqlx::test(migrator = "docshelf_core::MIGRATOR")]
async fn sort_sentinel_appends_after_group_maximum(pool: PgPool) -> sqlx::Result<()> {
    seed_library(&pool).await?;
    sqlx::query(
        "INSERT INTO libraries (id, uid, team_id, name, description, cover, create_time, update_time) \
         VALUES (2, 100, 0, 'Archive', '', '', 0, 0)",
    )
    .execute(&pool)
    .await?;
    let group: LibraryGroupID = sqlx::query_scalar(
        "INSERT INTO library_groups (uid, name, sort, create_time) VALUES (7, 'pinned', 0, 0) RETURNING id",
    )
    .fetch_one(&pool)
    .await?;

    let members = PostgresLibraryMembersRepository::new(pool.clone());
    members.invite_members(&invite(&[7]), 1).await.unwrap();
    members
        .invite_members(
            &MemberInvite {
                library_id: LibraryID(2),
                member_ids: vec![UserID(7)],
            },
            1,
        )
        .await
        .unwrap();

    let first = members
        .sort_member_library(
            &MemberLibrarySort {
                library_id: LibraryID(2),
                uid: UserID(7),
                group_id: group,
                sort: None,
            },
            3,
        )
        .await
        .unwrap();
    assert_eq!(first.sort, 1.0);

    let second = members
        .sort_member_library(
            &MemberLibrarySort {
                library_id: LIBRARY,
                uid: UserID(7),
                group_id: group,
                sort: None,
            },
            4,
        )
        .await
        .unwrap();
    assert_eq!(second.group_id, group);
    assert_eq!(second.sort, 2.0);

    let libraries = PostgresLibraryRepository::new(pool.clone());
    let stored = libraries.get_member(LIBRARY, UserID(7)).await.unwrap().unwrap();
    assert_eq!(stored.sort, 2.0);
    assert_eq!(libraries.get_group(group).await.unwrap().unwrap().uid, UserID(7));
    Ok(())
}

#[sqlx::test(migrator = "docshelf_core::MIGRATOR")]
async fn share_list_filters_escape_wildcards_and_cover_end_day(pool: PgPool) -> sqlx::Result<()> {
    seed_library(&pool).await?;
    seed_share(&pool, "100% done", DAY).await?;
    seed_share(&pool, "1000 done", DAY + 86_399).await?;
    seed_share(&pool, "100% later", DAY + 86_400).await?;

    let shares = PostgresLibrarySharesRepository::new(pool.clone());
    let filter = ShareListFilter {
        search_key: "0%".to_string(),
        search_create_start: DAY,
        search_create_end: DAY,
    };
    let page = shares
        .list_shares(LIBRARY, &filter, &Pagination::default())
        .await
        .unwrap();

    let names: Vec<_> = page.items.iter().map(|s| s.share_name.as_str()).collect();
    assert_eq!(names, vec!["100% done"]);
    assert_eq!(page.total, 1);
    Ok(())
}

#[sqlx::test(migrator = "docshelf_core::MIGRATOR")]
async fn share_list_orders_and_pages(pool: PgPool) -> sqlx::Result<()> {
    seed_library(&pool).await?;
    for (name, offset) in [("a", 30), ("b", 10), ("c", 20)] {
        seed_share(&pool, name, DAY + offset).await?;
    }
    let shares = PostgresLibrarySharesRepository::new(pool.clone());

    let page = shares
        .list_shares(LIBRARY, &ShareListFilter::default(), &Pagination::default())
        .await
        .unwrap();
    let names: Vec<_> = page.items.iter().map(|s| s.share_name.as_str()).collect();
    assert_eq!(names, vec!["c", "b", "a"]);

    let params = PageParams {
        page: Some(1),
        page_size: Some(2),
        sort_by: Some("create_time".to_string()),
        sort_order: Some("asc".to_string()),
    };
    let page = shares
        .list_shares(
            LIBRARY,
            &ShareListFilter::default(),
            &Pagination::from_params(&params, 20),
        )
        .await
        .unwrap();
    let names: Vec<_> = page.items.iter().map(|s| s.share_name.as_str()).collect();
    assert_eq!(names, vec!["b", "c"]);
    assert_eq!(page.total, 3);
    Ok(())
}

#[sqlx::test(migrator = "docshelf_core::MIGRATOR")]
async fn share_status_and_removal_report_affected_rows(pool: PgPool) -> sqlx::Result<()> {
    seed_library(&pool).await?;
    let id = seed_share(&pool, "handbook", DAY).await?;
    let shares = PostgresLibrarySharesRepository::new(pool.clone());

    assert_eq!(shares.modify_share_status(id, ShareStatus::Inactive).await.unwrap(), 1);
    let share = shares.get_share(id).await.unwrap().unwrap();
    assert_eq!(share.status, ShareStatus::Inactive.code());
    // Writing the current status again changes nothing.
    assert_eq!(shares.modify_share_status(id, ShareStatus::Inactive).await.unwrap(), 0);

    assert_eq!(shares.remove_share(id).await.unwrap(), 1);
    assert_eq!(shares.remove_share(id).await.unwrap(), 0);
    assert_eq!(shares.modify_share_status(id, ShareStatus::Active).await.unwrap(), 0);
    Ok(())
}
