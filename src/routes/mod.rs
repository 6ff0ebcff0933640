pub mod ask;
pub mod health;
pub mod login;
pub mod signup;
pub mod upload;
pub mod validation;

pub use ask::ask;
pub use health::health_check;
pub use login::{login, logout};
pub use signup::signup;
pub use upload::upload;
pub use validation::{ist_timestamp, validate_pdf_upload};
