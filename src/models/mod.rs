pub mod upload;
pub mod user;

pub use upload::UploadRecord;
pub use user::User;
