//! UI-agnostic core of the math agent: configuration, the solver client,
//! PDF reports and per-session state.

pub mod ai;
pub mod config;
pub mod error;
pub mod report;
pub mod session;
pub mod solver;

// Re-export main types for convenience
pub use ai::{GeminiClient, TextGenerator};
pub use config::Config;
pub use error::{ConfigError, ReportError, SessionError, SolveError};
pub use report::{render, sanitize, Report};
pub use session::{Notice, Phase, Session};
pub use solver::{build_prompt, Solver, PROMPT_TEMPLATE};
