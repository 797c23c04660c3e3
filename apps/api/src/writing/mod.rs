// The content pipeline: prompt building, generation + humanization,
// quality estimation, orchestration, and the advisory chat side-channel.
// All LLM calls go through llm_client — no direct provider calls here.

pub mod chat;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod quality;
