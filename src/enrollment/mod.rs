mod assembler;
mod error;
mod settings;

pub use assembler::ProfileAssembler;
pub use error::EnrollmentError;
pub use settings::EnrollmentSettings;
