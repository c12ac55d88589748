pub mod cli;
pub mod gate;
pub mod locator;
pub mod logging;
pub mod main_shared;
pub mod pipeline;
pub mod types;
