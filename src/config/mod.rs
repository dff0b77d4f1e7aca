//----------------------------------------
// config mod
//----------------------------------------
pub mod error;
pub mod types;
