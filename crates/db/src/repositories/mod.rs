//! Repositories: zero-sized structs whose async methods take the pool.

pub mod application_repo;
pub mod job_repo;
pub mod job_search_repo;

pub use application_repo::ApplicationRepo;
pub use job_repo::JobRepo;
pub use job_search_repo::JobSearchRepo;
