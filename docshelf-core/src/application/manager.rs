use crate::api_types::LibraryManagerInfo;
use crate::database::ports::libraries::LibraryRepository;
use crate::database::ports::members::LibraryMembersRepository;
use crate::error::Result;
use crate::types::{Library, LibraryID, LibraryMemberSummary, UserID};

/// Library record plus the caller's own membership. A caller without a
/// membership row (the owner may have none) gets `library_member: None`.
pub async fn library_manager_info(
    libraries: &dyn LibraryRepository,
    library: &Library,
    caller: UserID,
) -> Result<LibraryManagerInfo> {
    let member = libraries.get_member(library.id, caller).await?;

    Ok(LibraryManagerInfo {
        library_info: library.clone(),
        library_member: member.as_ref().map(|m| m.to_info()),
    })
}

pub async fn member_collection(
    members: &dyn LibraryMembersRepository,
    library_id: LibraryID,
) -> Result<Vec<LibraryMemberSummary>> {
    members.list_members(library_id).await
}
