//! Live adapters that talk to real provider APIs.

pub mod openai;
