pub mod absence_request;
pub mod group;
pub mod session;

pub use absence_request::*;
pub use group::Group;
pub use session::Session;
