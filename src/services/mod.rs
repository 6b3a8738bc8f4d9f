pub mod llm;
pub mod optimizer;
pub mod prompt;
pub mod server;
pub mod session;
pub mod wizard;
