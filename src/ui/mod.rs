pub mod columns;
pub mod panels;
pub mod table;
