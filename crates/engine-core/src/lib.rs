pub mod connection;
pub mod cursor;
