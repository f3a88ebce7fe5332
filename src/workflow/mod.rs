pub mod commit;
pub mod generate;
pub mod ticket;
