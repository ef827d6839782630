pub mod list;
pub mod logging;
pub mod response;
pub mod slug;
