mod interfaces;
mod repository;
mod resolve;

#[cfg(test)]
pub(crate) mod test_repository;

pub use interfaces::*;
pub use repository::LocalRepository;
pub use resolve::{resolve_git_metadata, resolve_with_repository};
