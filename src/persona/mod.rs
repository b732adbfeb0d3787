#[allow(clippy::module_inception)]
pub mod persona;
pub mod response;

pub use persona::{Persona, PersonaConfig, PersonaMode, UTILITY_REPLY};
pub use response::synthesize;
