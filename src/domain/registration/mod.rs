//! Signup flow: session state and the create-account gate's errors

mod error;
mod session;

pub use error::{RegistrationError, SignupField};
pub use session::{CreateAccountRequest, RegistrationSession, SignupStep};
