// Letter-picross layout pipeline.
// tokenizer → packer (width selection) → cells → shifter → assembler.
// Everything except `handlers` is pure and synchronous; handlers run builds
// inside tokio::task::spawn_blocking.

pub mod assembler;
pub mod cells;
pub mod clock;
pub mod errors;
pub mod handlers;
pub mod packer;
pub mod shifter;
pub mod tokenizer;
pub mod validation;

// Re-export the public API consumed by routes and state.
pub use assembler::{BuildLimits, PuzzleBuilder};
pub use clock::{RandomIdGenerator, SystemClock};
