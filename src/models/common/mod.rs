pub mod error_code;
pub mod outcome;
pub mod response;

pub use error_code::ErrorCode;
pub use outcome::{PageOutcome, RedirectTarget};
pub use response::{ApiResponse, RedirectResponse};
