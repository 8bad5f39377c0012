use evrental_base::{generate_id_type, ObjectStoreContent};
use evrental_data::StateData;
use crate::{Guard, GuardFailure};

generate_id_type!(StateId);

/// A named state of a flow and the transitions leaving it
#[derive(Debug)]
pub struct State {
  id: StateId,
  name: String,
  terminal: bool,
  edges: Vec<Edge>,
}

impl ObjectStoreContent for State {
  type IdType = StateId;

  fn new_id(id_val: u32) -> Self::IdType {
    StateId::new(id_val)
  }

  fn id(&self) -> &Self::IdType {
    &self.id
  }
}

impl State {
  pub fn new<STR: Into<String>>(id: StateId, name: STR, terminal: bool) -> Self {
    State {
      id,
      name: name.into(),
      terminal,
      edges: Vec::new(),
    }
  }

  pub fn id(&self) -> &StateId {
    &self.id
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// A terminal state ends the flow and has no outgoing edges
  pub fn is_terminal(&self) -> bool {
    self.terminal
  }

  pub fn edges(&self) -> &[Edge] {
    &self.edges
  }

  pub fn edge(&self, trigger: &str) -> Option<&Edge> {
    self.edges.iter().find(|edge| edge.trigger == trigger)
  }

  pub fn triggers(&self) -> impl Iterator<Item = &str> {
    self.edges.iter().map(|edge| edge.trigger.as_str())
  }

  pub(crate) fn push_edge(&mut self, edge: Edge) {
    self.edges.push(edge);
  }
}

/// A transition out of a [`State`], optionally gated by a [`Guard`]
#[derive(Debug)]
pub struct Edge {
  trigger: String,
  target: StateId,
  guard: Option<Box<dyn Guard>>,
}

impl Edge {
  pub fn new<STR: Into<String>>(trigger: STR, target: StateId, guard: Option<Box<dyn Guard>>) -> Self {
    Edge {
      trigger: trigger.into(),
      target,
      guard,
    }
  }

  pub fn trigger(&self) -> &str {
    &self.trigger
  }

  pub fn target(&self) -> &StateId {
    &self.target
  }

  pub fn guard(&self) -> Option<&dyn Guard> {
    self.guard.as_deref()
  }

  /// Run the guard, if any, against `data`
  pub fn check(&self, data: &StateData) -> Result<(), GuardFailure> {
    match &self.guard {
      Some(guard) => guard.check(data),
      None => Ok(()),
    }
  }

  /// Run the guard, if any, for a transition merging `patch` into `committed`
  pub fn check_patch(&self, committed: &StateData, patch: &StateData) -> Result<(), GuardFailure> {
    match &self.guard {
      Some(guard) => guard.check_patch(committed, patch),
      None => Ok(()),
    }
  }
}
