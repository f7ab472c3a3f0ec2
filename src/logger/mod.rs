//! Append-only activity logging.

pub mod jsonl;
