pub mod exotel_service;
pub mod fallback_service;
pub mod parameter_service;
pub mod sms_service;
pub mod sns_service;

#[cfg(test)]
pub(crate) mod mock_sms_service;

pub use exotel_service::*;
pub use fallback_service::*;
pub use parameter_service::*;
pub use sms_service::*;
pub use sns_service::*;
