pub mod chat;
pub mod pests;
pub mod system;
pub mod weather;
