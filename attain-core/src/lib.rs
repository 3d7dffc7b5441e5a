pub mod validation;

pub use validation::{ValidationError, ValidationKind};

pub type CoreResult<T> = Result<T, ValidationError>;
