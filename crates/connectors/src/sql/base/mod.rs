pub mod adapter;
pub mod capabilities;
pub mod error;
pub mod requests;
