//! Deterministic letter-triage pipeline.
//!
//! One inbound business letter flows through:
//! 1. `normalize` — whitespace/line-ending canonicalization
//! 2. `classify` — ordered keyword cascade → one category
//! 3. `extract` — pattern matching → sparse fact map
//! 4. `urgency` — marker cascade → High/Medium/Low
//! 5. `priority` — directory + category + urgency + amount → scored result
//! 6. `pipeline` — orchestration plus the generation collaborator calls
//!
//! Stages 1–5 are pure and side-effect-free; the company `directory` is
//! immutable shared configuration.

pub mod classify;
pub mod directory;
pub mod extract;
pub mod normalize;
pub mod pipeline;
pub mod priority;
pub mod types;
pub mod urgency;
