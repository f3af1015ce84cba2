mod find_repository_root;
mod get_pr_number;

pub use find_repository_root::find_repository_root;
pub use get_pr_number::get_pr_number_from_env;
