// Library management types

pub mod ids;
pub mod library;
pub mod member;
pub mod prelude;
pub mod share;

pub use ids::*;
pub use library::*;
pub use member::*;
pub use share::*;
