//! Loan application form and decision types.

pub mod coerce;
pub mod model;

pub use coerce::coerce_number;
pub use model::{LoanApplication, LoanApplicationDraft, LoanDecision, LoanField, LoanPrediction};
