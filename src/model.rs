pub mod id;
pub mod kudos;
pub mod session;
pub mod user;

pub use id::Id;
pub use kudos::KudosEntry;
pub use session::Session;
pub use user::User;
