pub mod change;
pub mod commit_info;
pub mod ticket;
pub mod validation;
