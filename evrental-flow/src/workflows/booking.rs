use evrental_data::var::VarKind;
use crate::{Error, FlowDefinition, Guard};
use crate::guard::{AllOf, RequireBefore, RequireNonZero, RequireVars};
use super::BACK;

pub mod names {
  pub const FLOW: &str = "booking";

  pub const STATIONS: &str = "stations";
  pub const VEHICLES: &str = "vehicles";
  pub const DETAILS: &str = "details";
  pub const CONFIRMATION: &str = "confirmation";

  pub const SELECT_STATION: &str = "selectStation";
  pub const SELECT_VEHICLE: &str = "selectVehicle";
  pub const CONFIRM: &str = "confirm";

  pub const STATION_ID: &str = "stationId";
  pub const AVAILABLE_VEHICLES: &str = "availableVehicles";
  pub const VEHICLE_ID: &str = "vehicleId";
  pub const START_DATE: &str = "startDate";
  pub const END_DATE: &str = "endDate";
  pub const BOOKING_ID: &str = "bookingId";
  pub const TOTAL_COST: &str = "totalCost";

  pub const NO_VEHICLES: &str = "No vehicles available at this station. Please select another station.";
}

use names::*;

/// `stations -> vehicles -> details -> confirmation`, with `back` from `vehicles` and `details`
pub fn booking() -> Result<FlowDefinition, Error> {
  FlowDefinition::builder(FLOW)
    .var(STATION_ID, VarKind::String)
    .var(AVAILABLE_VEHICLES, VarKind::Float)
    .var(VEHICLE_ID, VarKind::String)
    .var(START_DATE, VarKind::DateTime)
    .var(END_DATE, VarKind::DateTime)
    .var(BOOKING_ID, VarKind::String)
    .var(TOTAL_COST, VarKind::Float)
    .state(STATIONS)
    .state(VEHICLES)
    .state(DETAILS)
    .terminal_state(CONFIRMATION)
    .guarded_edge(STATIONS, SELECT_STATION, VEHICLES, AllOf::new(vec![
      RequireVars::new([STATION_ID]).boxed(),
      RequireNonZero::new(AVAILABLE_VEHICLES, NO_VEHICLES).boxed(),
    ]))
    .edge(VEHICLES, BACK, STATIONS)
    .guarded_edge(VEHICLES, SELECT_VEHICLE, DETAILS, RequireVars::new([VEHICLE_ID]))
    .edge(DETAILS, BACK, VEHICLES)
    .guarded_edge(DETAILS, CONFIRM, CONFIRMATION, AllOf::new(vec![
      RequireVars::new([STATION_ID, VEHICLE_ID]).boxed(),
      RequireBefore::new(START_DATE, END_DATE).boxed(),
    ]))
    .build()
}


#[cfg(test)]
mod tests {
  use std::sync::Arc;
  use chrono::{Duration, TimeZone, Utc};
  use evrental_data::StateData;
  use evrental_test_util::test_id;
  use crate::{Error, Flow, FlowId, GuardFailure};
  use super::booking;
  use super::names::*;

  fn new_flow() -> Flow {
    Flow::new(test_id!(FlowId), Arc::new(booking().unwrap()))
  }

  #[test]
  fn happy_path() {
    let mut flow = new_flow();
    assert_eq!(flow.current_state(), STATIONS);

    flow.transition(SELECT_STATION, StateData::new().with(STATION_ID, "1")).unwrap();
    assert_eq!(flow.current_state(), VEHICLES);

    flow.transition(SELECT_VEHICLE, StateData::new().with(VEHICLE_ID, "5")).unwrap();
    assert_eq!(flow.current_state(), DETAILS);

    let t0 = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
    let t1 = t0 + Duration::hours(24);
    let confirmed = flow.transition(CONFIRM, StateData::new().with(START_DATE, t0).with(END_DATE, t1)).unwrap();
    assert!(confirmed.terminal);
    assert_eq!(flow.current_state(), CONFIRMATION);
    assert!(flow.is_terminal());

    for trigger in [SELECT_STATION, SELECT_VEHICLE, CONFIRM, "back"] {
      assert!(matches!(flow.transition(trigger, StateData::new()), Err(Error::InvalidTransition { .. })));
    }
    assert_eq!(flow.current_state(), CONFIRMATION);
  }

  #[test]
  fn station_without_vehicles() {
    let mut flow = new_flow();
    let err = flow.transition(SELECT_STATION, StateData::new().with(STATION_ID, "3").with(AVAILABLE_VEHICLES, 0.0)).unwrap_err();
    assert_eq!(err, Error::GuardFailed {
      state: STATIONS.to_owned(),
      trigger: SELECT_STATION.to_owned(),
      failure: GuardFailure::Rejected(NO_VEHICLES.to_owned()),
    });
    assert_eq!(err.to_string(), NO_VEHICLES);
    assert_eq!(flow.current_state(), STATIONS);
    assert!(flow.data().is_empty());

    flow.transition(SELECT_STATION, StateData::new().with(STATION_ID, "1").with(AVAILABLE_VEHICLES, 4.0)).unwrap();
    assert_eq!(flow.current_state(), VEHICLES);
  }

  #[test]
  fn confirm_needs_ordered_dates() {
    let mut flow = new_flow();
    flow.transition(SELECT_STATION, StateData::new().with(STATION_ID, "1")).unwrap();
    flow.transition(SELECT_VEHICLE, StateData::new().with(VEHICLE_ID, "5")).unwrap();

    let t0 = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
    let err = flow.transition(CONFIRM, StateData::new().with(START_DATE, t0).with(END_DATE, t0 - Duration::hours(1))).unwrap_err();
    assert_eq!(err.to_string(), "startDate must be before endDate");
    assert_eq!(flow.current_state(), DETAILS);
    assert!(!flow.data().contains(START_DATE));
  }

  #[test]
  fn back_to_stations() {
    let mut flow = new_flow();
    flow.transition(SELECT_STATION, StateData::new().with(STATION_ID, "1")).unwrap();
    flow.transition(SELECT_VEHICLE, StateData::new().with(VEHICLE_ID, "5")).unwrap();
    flow.transition("back", StateData::new()).unwrap();
    flow.transition("back", StateData::new()).unwrap();
    assert_eq!(flow.current_state(), STATIONS);
    assert!(matches!(flow.transition("back", StateData::new()), Err(Error::InvalidTransition { .. })));
  }
}
