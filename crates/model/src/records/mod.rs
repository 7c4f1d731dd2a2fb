pub mod batch;
pub mod description;
pub mod result;
pub mod row;
