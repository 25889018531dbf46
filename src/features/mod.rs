pub mod courts;
pub mod records;
