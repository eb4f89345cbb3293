//! Loan domain models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::coerce::coerce_number;
use crate::error::{FinpanelError, Result};

/// The eleven fields of the loan application form, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LoanField {
    Gender,
    Married,
    Dependents,
    Education,
    SelfEmployed,
    ApplicantIncome,
    CoapplicantIncome,
    LoanAmount,
    LoanAmountTerm,
    CreditHistory,
    PropertyArea,
}

impl LoanField {
    pub const ALL: [LoanField; 11] = [
        LoanField::Gender,
        LoanField::Married,
        LoanField::Dependents,
        LoanField::Education,
        LoanField::SelfEmployed,
        LoanField::ApplicantIncome,
        LoanField::CoapplicantIncome,
        LoanField::LoanAmount,
        LoanField::LoanAmountTerm,
        LoanField::CreditHistory,
        LoanField::PropertyArea,
    ];

    /// Field name on the wire.
    pub fn wire_name(&self) -> &'static str {
        match self {
            LoanField::Gender => "Gender",
            LoanField::Married => "Married",
            LoanField::Dependents => "Dependents",
            LoanField::Education => "Education",
            LoanField::SelfEmployed => "Self_Employed",
            LoanField::ApplicantIncome => "ApplicantIncome",
            LoanField::CoapplicantIncome => "CoapplicantIncome",
            LoanField::LoanAmount => "LoanAmount",
            LoanField::LoanAmountTerm => "Loan_Amount_Term",
            LoanField::CreditHistory => "Credit_History",
            LoanField::PropertyArea => "Property_Area",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoanField::Gender => "Gender",
            LoanField::Married => "Married",
            LoanField::Dependents => "Dependents",
            LoanField::Education => "Education",
            LoanField::SelfEmployed => "Self Employed",
            LoanField::ApplicantIncome => "Applicant Income",
            LoanField::CoapplicantIncome => "Coapplicant Income",
            LoanField::LoanAmount => "Loan Amount",
            LoanField::LoanAmountTerm => "Loan Amount Term",
            LoanField::CreditHistory => "Credit History",
            LoanField::PropertyArea => "Property Area",
        }
    }

    /// Fields coerced from text to a number at submit time.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            LoanField::ApplicantIncome
                | LoanField::CoapplicantIncome
                | LoanField::LoanAmount
                | LoanField::LoanAmountTerm
                | LoanField::CreditHistory
        )
    }

    /// `(value, label)` pairs for select fields; `None` for free entry.
    pub fn options(&self) -> Option<&'static [(&'static str, &'static str)]> {
        match self {
            LoanField::Gender => Some(&[("Male", "Male"), ("Female", "Female")]),
            LoanField::Married | LoanField::SelfEmployed => Some(&[("Yes", "Yes"), ("No", "No")]),
            LoanField::Education => Some(&[
                ("Graduate", "Graduate"),
                ("Not Graduate", "Not Graduate"),
            ]),
            LoanField::CreditHistory => Some(&[("1", "1 (Good)"), ("0", "0 (Bad)")]),
            LoanField::PropertyArea => Some(&[
                ("Urban", "Urban"),
                ("Rural", "Rural"),
                ("Semiurban", "Semiurban"),
            ]),
            _ => None,
        }
    }

    fn default_value(&self) -> &'static str {
        match self {
            LoanField::Gender => "Male",
            LoanField::Married => "Yes",
            LoanField::Dependents => "0",
            LoanField::Education => "Graduate",
            LoanField::SelfEmployed => "No",
            LoanField::CreditHistory => "1",
            LoanField::PropertyArea => "Urban",
            _ => "",
        }
    }
}

impl fmt::Display for LoanField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for LoanField {
    type Err = FinpanelError;

    /// Accepts the wire name, the label, or either with `_`/`-`/spaces ignored.
    fn from_str(s: &str) -> Result<Self> {
        let key = squash(s);
        LoanField::ALL
            .into_iter()
            .find(|field| squash(field.wire_name()) == key || squash(field.label()) == key)
            .ok_or_else(|| FinpanelError::invalid_input(format!("Unknown loan field: {}", s)))
    }
}

fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// The loan form while it is being edited. Every field is held as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanApplicationDraft {
    values: [String; 11],
}

impl Default for LoanApplicationDraft {
    fn default() -> Self {
        Self {
            values: LoanField::ALL.map(|field| field.default_value().to_string()),
        }
    }
}

impl LoanApplicationDraft {
    pub fn new() -> Self {
        Self::default()
    }

    fn index(field: LoanField) -> usize {
        LoanField::ALL
            .iter()
            .position(|candidate| *candidate == field)
            .unwrap_or_default()
    }

    pub fn get(&self, field: LoanField) -> &str {
        &self.values[Self::index(field)]
    }

    /// Updates one field.
    ///
    /// Select fields only hold one of their options (matched on value or
    /// label, case-insensitively). Free-entry fields take any text; numeric
    /// ones are not checked until submit.
    pub fn set(&mut self, field: LoanField, value: &str) -> Result<()> {
        let stored = match field.options() {
            Some(options) => options
                .iter()
                .find(|(option, label)| {
                    option.eq_ignore_ascii_case(value.trim()) || label.eq_ignore_ascii_case(value.trim())
                })
                .map(|(option, _)| option.to_string())
                .ok_or_else(|| {
                    let allowed: Vec<&str> = options.iter().map(|(option, _)| *option).collect();
                    FinpanelError::invalid_input(format!(
                        "{} must be one of: {}",
                        field.label(),
                        allowed.join(", ")
                    ))
                })?,
            None => value.to_string(),
        };

        self.values[Self::index(field)] = stored;
        Ok(())
    }

    pub fn fields(&self) -> impl Iterator<Item = (LoanField, &str)> {
        LoanField::ALL
            .into_iter()
            .zip(self.values.iter().map(String::as_str))
    }

    /// Snapshots the draft, coercing the five numeric fields.
    pub fn to_application(&self) -> LoanApplication {
        let number = |field| coerce_number(self.get(field));
        LoanApplication {
            gender: self.get(LoanField::Gender).to_string(),
            married: self.get(LoanField::Married).to_string(),
            dependents: self.get(LoanField::Dependents).to_string(),
            education: self.get(LoanField::Education).to_string(),
            self_employed: self.get(LoanField::SelfEmployed).to_string(),
            applicant_income: number(LoanField::ApplicantIncome),
            coapplicant_income: number(LoanField::CoapplicantIncome),
            loan_amount: number(LoanField::LoanAmount),
            loan_amount_term: number(LoanField::LoanAmountTerm),
            credit_history: number(LoanField::CreditHistory),
            property_area: self.get(LoanField::PropertyArea).to_string(),
        }
    }
}

/// The submitted loan application, as sent to the backend.
///
/// Non-numeric input coerces to `NaN`, which serializes as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Married")]
    pub married: String,
    #[serde(rename = "Dependents")]
    pub dependents: String,
    #[serde(rename = "Education")]
    pub education: String,
    #[serde(rename = "Self_Employed")]
    pub self_employed: String,
    #[serde(rename = "ApplicantIncome")]
    pub applicant_income: f64,
    #[serde(rename = "CoapplicantIncome")]
    pub coapplicant_income: f64,
    #[serde(rename = "LoanAmount")]
    pub loan_amount: f64,
    #[serde(rename = "Loan_Amount_Term")]
    pub loan_amount_term: f64,
    #[serde(rename = "Credit_History")]
    pub credit_history: f64,
    #[serde(rename = "Property_Area")]
    pub property_area: String,
}

impl LoanApplication {
    /// Names of numeric fields whose input did not coerce to a number.
    pub fn non_numeric_fields(&self) -> Vec<LoanField> {
        [
            (LoanField::ApplicantIncome, self.applicant_income),
            (LoanField::CoapplicantIncome, self.coapplicant_income),
            (LoanField::LoanAmount, self.loan_amount),
            (LoanField::LoanAmountTerm, self.loan_amount_term),
            (LoanField::CreditHistory, self.credit_history),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_nan())
        .map(|(field, _)| field)
        .collect()
    }
}

/// Response body of the loan endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanPrediction {
    #[serde(rename = "Loan_Approval_Prediction", default)]
    pub code: Option<String>,
}

impl LoanPrediction {
    pub fn decision(&self) -> Result<LoanDecision> {
        LoanDecision::from_code(self.code.as_deref().unwrap_or_default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanDecision {
    Approved,
    Rejected,
}

impl LoanDecision {
    /// Maps the two-valued prediction code; anything else is an invalid response.
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "Y" => Ok(LoanDecision::Approved),
            "N" => Ok(LoanDecision::Rejected),
            other => Err(FinpanelError::invalid_response(format!(
                "unexpected loan prediction code {:?}",
                other
            ))),
        }
    }
}
