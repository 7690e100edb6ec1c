//! Consumers of submitted forms

mod print;
mod traits;

pub use print::PrintOnExit;
pub use traits::SubmissionReceiver;

#[cfg(test)]
pub use traits::MockSubmissionReceiver;
