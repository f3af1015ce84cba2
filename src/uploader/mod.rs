mod error;
mod interfaces;
mod prepare;
mod upload;
mod validation;

#[cfg(test)]
mod test_server;

pub use error::UploadError;
pub use interfaces::*;
pub use prepare::prepare_upload_request;
pub use upload::UploadClient;
