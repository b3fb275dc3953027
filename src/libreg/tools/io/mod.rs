pub mod csv_write;
pub mod excel_read;
pub mod hash_store;
pub mod http;
pub mod page;
