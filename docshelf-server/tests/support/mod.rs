#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use docshelf_core::{
    Library, LibraryID, LibraryRole, MemberStatus, UserID, application::LibraryUnitOfWork,
    testing::InMemoryStore, unix_now,
};
use docshelf_server::{
    AppState, auth::token::TokenSigner, create_app, infra::config::Config, routes::v1,
};

pub const TOKEN_KEY: &str = "integration-test-key";

pub const LIBRARY: LibraryID = LibraryID(10);
pub const OWNER: UserID = UserID(1);
pub const ADMIN: UserID = UserID(2);
pub const EDITOR: UserID = UserID(3);
pub const READER: UserID = UserID(4);
pub const DISABLED: UserID = UserID(5);
pub const PENDING: UserID = UserID(6);
pub const OUTSIDER: UserID = UserID(99);

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<InMemoryStore>,
    signer: TokenSigner,
}

impl TestApp {
    pub fn token(&self, uid: UserID) -> String {
        self.signer.issue(uid, unix_now() + 3600)
    }
}

pub fn library(id: LibraryID, owner: UserID) -> Library {
    Library {
        id,
        uid: owner,
        team_id: 0,
        name: format!("library {id}"),
        description: "shared handbook".to_string(),
        create_time: 1_700_000_000,
        update_time: 1_700_000_000,
        cover: String::new(),
    }
}

/// App over an in-memory store seeded with [`LIBRARY`], its owner (no
/// membership row) and one member per role/status.
pub fn build_test_app() -> TestApp {
    let store = Arc::new(InMemoryStore::new());
    store.insert_library(library(LIBRARY, OWNER));
    for (uid, role, status) in [
        (ADMIN, LibraryRole::Admin, MemberStatus::Normal),
        (EDITOR, LibraryRole::Editor, MemberStatus::Normal),
        (READER, LibraryRole::Reader, MemberStatus::Normal),
        (DISABLED, LibraryRole::Admin, MemberStatus::Disabled),
        (PENDING, LibraryRole::Admin, MemberStatus::Pending),
    ] {
        store.insert_member(LIBRARY, uid, role, status);
    }

    let config = Config {
        auth_token_key: TOKEN_KEY.to_string(),
        ..Config::default()
    };
    let state = AppState::new(LibraryUnitOfWork::from_shared(store.clone()), None, config)
        .expect("test state");
    let server = TestServer::new(create_app(state)).expect("test server");

    TestApp {
        server,
        store,
        signer: TokenSigner::new(TOKEN_KEY).expect("signer"),
    }
}

pub fn library_path(path: &str, library_id: LibraryID) -> String {
    format!("/api/v1{}", v1::with_param(path, "library_id", library_id))
}

pub fn share_path(path: &str, share_id: impl std::fmt::Display) -> String {
    format!("/api/v1{}", v1::with_param(path, "library_share_id", share_id))
}
