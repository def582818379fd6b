//! Git clone and repository file walking.

mod clone;
mod walk;

pub use clone::clone_repository;
pub use walk::{walk_repo_files, FileRead, RepoFile};
