pub mod extract;
pub mod layout;
