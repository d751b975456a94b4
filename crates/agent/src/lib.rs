//! Agent runtime - tool surface and crew orchestration for database work.
//!
//! This crate provides the pieces the driver wires together:
//! - **Tools** (`tools`, `postgres`) - the `Tool` contract (name, input
//!   schema, execute) plus the two PostgreSQL tools built on `pgcrew-db`
//! - **LLM** (`llm`) - pluggable `LlmClient` trait with an OpenAI-compatible
//!   HTTP implementation
//! - **Crew** (`crew`) - agent/task/crew types and the sequential run loop
//!
//! # Safety Principle
//!
//! The LLM only chooses which tool to call and with what input. Statement
//! execution, result decoding, and error folding are deterministic code in
//! `pgcrew-db`; failures there come back as data, never as agent state.

pub mod crew;
pub mod llm;
pub mod postgres;
pub mod tools;

pub use crew::{Agent, Crew, Process, Task};
pub use llm::{LlmClient, OpenAiClient};
pub use postgres::{QueryTool, TableInfoTool};
pub use tools::{Tool, ToolRegistry};
