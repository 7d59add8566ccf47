pub mod classifier;
pub mod dispatcher;
pub mod events;
pub mod executor;
pub mod filter;
pub mod inspector;
pub mod progress;
pub mod scanner;
