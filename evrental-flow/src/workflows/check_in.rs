use evrental_data::var::VarKind;
use crate::{Error, FlowDefinition};
use crate::guard::{RequireTrue, RequireVars};
use super::{BACK, NEXT, REJECT};

pub mod names {
  pub const FLOW: &str = "checkIn";

  pub const BOOKING: &str = "booking";
  pub const DOCUMENTS: &str = "documents";
  pub const INSPECTION: &str = "inspection";
  pub const CONTRACT: &str = "contract";
  pub const COMPLETE: &str = "complete";

  pub const BOOKING_ID: &str = "bookingId";
  pub const DOCUMENT_VERIFIED: &str = "documentVerified";
  pub const REJECTION_REASON: &str = "rejectionReason";
  pub const BATTERY_LEVEL: &str = "batteryLevel";
  pub const EXTERIOR_CONDITION: &str = "exteriorCondition";
  pub const INTERIOR_CONDITION: &str = "interiorCondition";
  pub const TIRES_CONDITION: &str = "tiresCondition";
  pub const DAMAGES: &str = "damages";
  pub const NOTES: &str = "notes";
  pub const CONTRACT_SIGNED: &str = "contractSigned";
}

use names::*;

/// `booking -> documents -> inspection -> contract -> complete`. Documents can be rejected
/// with a reason, which keeps the flow in `documents`.
pub fn check_in() -> Result<FlowDefinition, Error> {
  FlowDefinition::builder(FLOW)
    .var(BOOKING_ID, VarKind::String)
    .var(DOCUMENT_VERIFIED, VarKind::Boolean)
    .var(REJECTION_REASON, VarKind::String)
    .var(BATTERY_LEVEL, VarKind::Float)
    .var(EXTERIOR_CONDITION, VarKind::String)
    .var(INTERIOR_CONDITION, VarKind::String)
    .var(TIRES_CONDITION, VarKind::String)
    .var(DAMAGES, VarKind::String)
    .var(NOTES, VarKind::String)
    .var(CONTRACT_SIGNED, VarKind::Boolean)
    .state(BOOKING)
    .state(DOCUMENTS)
    .state(INSPECTION)
    .state(CONTRACT)
    .terminal_state(COMPLETE)
    .guarded_edge(BOOKING, NEXT, DOCUMENTS, RequireVars::new([BOOKING_ID]))
    .edge(DOCUMENTS, BACK, BOOKING)
    .guarded_edge(DOCUMENTS, REJECT, DOCUMENTS, RequireVars::new([REJECTION_REASON]))
    .guarded_edge(DOCUMENTS, NEXT, INSPECTION, RequireTrue::new([DOCUMENT_VERIFIED]))
    .edge(INSPECTION, BACK, DOCUMENTS)
    .edge(INSPECTION, NEXT, CONTRACT)
    .edge(CONTRACT, BACK, INSPECTION)
    .guarded_edge(CONTRACT, NEXT, COMPLETE, RequireTrue::new([DOCUMENT_VERIFIED, CONTRACT_SIGNED]))
    .build()
}
