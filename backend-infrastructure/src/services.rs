pub mod clock_service;
pub mod code_service;
pub mod fee_service;
pub mod health_service;
pub mod sweep_service;

pub use clock_service::*;
pub use code_service::*;
pub use fee_service::*;
pub use health_service::*;
pub use sweep_service::*;
