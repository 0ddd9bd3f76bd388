pub mod layout;
pub mod history;
