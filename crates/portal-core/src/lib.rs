#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod error;
pub mod ident;
pub mod loader;
pub mod search;
pub mod traits;
pub mod types;
