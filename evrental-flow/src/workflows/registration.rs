use evrental_data::{RegistrationFields, var::VarKind};
use crate::{Error, FlowDefinition};
use crate::guard::{RequireMatch, RequireRegistration};
use super::{BACK, REJECT};

pub mod names {
  pub const FLOW: &str = "registration";

  pub const FORM: &str = "form";
  pub const VERIFICATION: &str = "verification";
  pub const PENDING: &str = "pending";
  pub const APPROVED: &str = "approved";
  pub const REJECTED: &str = "rejected";

  pub const SUBMIT: &str = "submit";
  pub const VERIFY: &str = "verify";
  pub const APPROVE: &str = "approve";

  pub const VERIFICATION_CODE: &str = "verificationCode";
  pub const EXPECTED_CODE: &str = "expectedCode";
  pub const REJECTION_REASON: &str = "rejectionReason";
}

use names::*;

/// `form -> verification -> pending -> approved | rejected`
pub fn registration() -> Result<FlowDefinition, Error> {
  FlowDefinition::builder(FLOW)
    .var(RegistrationFields::USERNAME, VarKind::String)
    .var(RegistrationFields::EMAIL, VarKind::String)
    .var(RegistrationFields::PASSWORD, VarKind::String)
    .var(RegistrationFields::CONFIRM_PASSWORD, VarKind::String)
    .var(RegistrationFields::CONTACT_NUMBER, VarKind::String)
    .var(VERIFICATION_CODE, VarKind::String)
    .var(EXPECTED_CODE, VarKind::String)
    .var(REJECTION_REASON, VarKind::String)
    .state(FORM)
    .state(VERIFICATION)
    .state(PENDING)
    .terminal_state(APPROVED)
    .terminal_state(REJECTED)
    .guarded_edge(FORM, SUBMIT, VERIFICATION, RequireRegistration)
    .edge(VERIFICATION, BACK, FORM)
    .guarded_edge(VERIFICATION, VERIFY, PENDING, RequireMatch::new(VERIFICATION_CODE, EXPECTED_CODE))
    .edge(PENDING, APPROVE, APPROVED)
    .edge(PENDING, REJECT, REJECTED)
    .build()
}
