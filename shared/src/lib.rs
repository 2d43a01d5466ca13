pub mod challenge;
pub mod config;
pub mod errors;
pub mod models;
pub mod naming;
pub mod services;
pub mod utils;

pub use challenge::*;
pub use config::*;
pub use errors::*;
pub use models::*;
pub use naming::*;
pub use services::*;
pub use utils::*;
