mod error;
mod form;
mod sanitize;

pub use error::*;
pub use form::*;
pub use sanitize::*;
