//! Domain layer for SpeechGate
//!
//! Contains the value objects, request entities and validation rules for
//! speech synthesis and recognition. This layer performs no I/O and defines
//! the ubiquitous language shared by every other crate.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
