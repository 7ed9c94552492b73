pub mod cli;
pub mod config;
pub mod interpreter;
pub mod session;

// Re-export the pieces an embedder needs
pub use config::Config;
pub use interpreter::{BasicError, BasicResult, EvalState, Program};
pub use session::{Outcome, Session};
