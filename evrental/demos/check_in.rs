//! A staff member checks a renter in. The staff session is restored from the token store,
//! so no server is needed.
//!
//! Run with `RUST_LOG=debug cargo run --example check_in`.

use std::sync::Arc;
use evrental::data::StateData;
use evrental::flow::{Error, Flow, FlowId, workflows};
use evrental::flow::workflows::{BACK, NEXT, REJECT};
use evrental::flow::workflows::check_in::names::*;
use evrental::session::{AuthConfig, Capability, HttpTransport, MemoryTokenStore, SessionManager, TokenStore};
use evrental::session::store::{ACCESS_TOKEN_KEY, CURRENT_USER_KEY};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let store = Arc::new(MemoryTokenStore::new());
  store.set(ACCESS_TOKEN_KEY, "demo-access-token");
  store.set(CURRENT_USER_KEY, &serde_json::json!({
    "id": 7,
    "username": "lan.staff",
    "email": "lan@evrental.vn",
    "role": "staff",
  }).to_string());

  let config = AuthConfig::load()?;
  let transport = HttpTransport::new(config.clone())?;
  let manager = SessionManager::new(config, Arc::new(transport), store);
  let staff = manager.require(Capability::PerformCheckIn)?;
  println!("checking in as {} ({})", staff.username, staff.role);

  let mut flow = Flow::new(FlowId::new(1), Arc::new(workflows::check_in()?));
  flow.transition(NEXT, StateData::new().with(BOOKING_ID, "BK-1042"))?;

  // the first licence photo is unreadable
  flow.transition(REJECT, StateData::new().with(REJECTION_REASON, "licence photo is blurry"))?;
  match flow.transition(NEXT, StateData::new()) {
    Err(Error::GuardFailed { failure, .. }) => println!("cannot continue: {}", failure),
    other => println!("unexpected: {:?}", other),
  }

  flow.transition(NEXT, StateData::new().with(DOCUMENT_VERIFIED, true))?;
  flow.transition(NEXT, StateData::new()
    .with(BATTERY_LEVEL, 85.0)
    .with(EXTERIOR_CONDITION, "good")
    .with(INTERIOR_CONDITION, "excellent")
    .with(TIRES_CONDITION, "good")
    .with(DAMAGES, "scratch on rear bumper"))?;

  // go back to add a note, then forward again
  flow.transition(BACK, StateData::new())?;
  flow.transition(NEXT, StateData::new().with(NOTES, "customer informed about scratch"))?;

  let done = flow.transition(NEXT, StateData::new().with(CONTRACT_SIGNED, true))?;
  println!("{} -> {} (terminal: {})", done.from, done.to, done.terminal);
  println!("snapshot: {}", serde_json::to_string_pretty(&flow.snapshot())?);
  Ok(())
}
