//! Walks a booking through station, vehicle and dates, with the confirmation
//! submitted through a `FlowDriver` as the UI would.
//!
//! Run with `RUST_LOG=debug cargo run --example booking` to see the flow events.

use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use evrental::data::StateData;
use evrental::flow::{Flow, FlowDriver, FlowId, SubmitError, workflows};
use evrental::flow::workflows::booking::names::*;
use tracing_subscriber::EnvFilter;

// stands in for the booking API
async fn create_booking(vehicle_id: &str) -> Result<StateData, String> {
  tokio::time::sleep(Duration::from_millis(200)).await;
  Ok(StateData::new()
    .with(BOOKING_ID, format!("BK-{}-{}", vehicle_id, Utc::now().timestamp() % 10_000))
    .with(TOTAL_COST, 24.0 * 4.5))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let mut flow = Flow::new(FlowId::new(1), Arc::new(workflows::booking()?));

  // a station with nothing to rent is refused with a message for the user
  let empty = StateData::new().with(STATION_ID, "3").with(AVAILABLE_VEHICLES, 0.0);
  if let Err(err) = flow.transition(SELECT_STATION, empty) {
    println!("station 3: {}", err);
  }

  flow.transition(SELECT_STATION, StateData::new().with(STATION_ID, "1").with(AVAILABLE_VEHICLES, 4.0))?;
  flow.transition(SELECT_VEHICLE, StateData::new().with(VEHICLE_ID, "5"))?;
  println!("now at {}, can confirm: {}", flow.current_state(), flow.can_transition(CONFIRM));

  let start = Utc::now() + chrono::Duration::hours(1);
  let dates = StateData::new().with(START_DATE, start).with(END_DATE, start + chrono::Duration::hours(24));

  // dates first, then the network call behind the driver
  let driver = FlowDriver::new(flow);
  let transition = driver.submit(CONFIRM, async move {
    let mut patch = create_booking("5").await?;
    patch.merge_from(dates);
    Ok::<_, String>(patch)
  }).await;

  match transition {
    Ok(transition) => println!("{} -> {} (terminal: {})", transition.from, transition.to, transition.terminal),
    Err(SubmitError::Work(err)) => println!("booking failed, please try again: {}", err),
    Err(SubmitError::Flow(err)) => println!("cannot confirm: {}", err),
  }

  let flow = driver.into_flow();
  println!("booking id: {}", flow.data().get_str(BOOKING_ID).unwrap_or("-"));
  Ok(())
}
