pub mod extract;
pub mod manager_handlers;
pub mod member_handlers;
pub mod middleware;
pub mod share_handlers;
