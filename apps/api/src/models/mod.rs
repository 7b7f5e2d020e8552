pub mod draft;
pub mod lead;
