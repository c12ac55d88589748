pub mod core;
pub mod github;
pub mod reports;

// Short path for the shared types
pub use core::types;

// Re-export the entry points callers actually use
pub use core::gate::{MutationEligibility, mutation_eligibility};
pub use core::locator::locate_reports;
pub use core::main_shared::run_main;
pub use core::pipeline::run_pipeline;
