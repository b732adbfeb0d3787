pub mod token;

pub use token::{Qualification, Token, TokenQualifier, MAX_FIELD_INTENSITY};
