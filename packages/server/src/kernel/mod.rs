// Infrastructure shared by all domains: dependency container and background tasks

pub mod deps;
pub mod scheduled_tasks;

pub use deps::ServerDeps;
pub use scheduled_tasks::start_scheduler;
