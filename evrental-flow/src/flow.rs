use std::sync::Arc;
use tracing::{event, Level};
use evrental_base::{generate_id_type, IdError};
use evrental_data::StateData;
use crate::{Edge, Error, FlowDefinition, FlowSnapshot, State, StateId};

generate_id_type!(FlowId);

/// The outcome of a successful [`Flow::transition`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize))]
pub struct Transition {
  pub from: String,
  pub to: String,
  pub trigger: String,
  pub terminal: bool,
}

/// One running instance of a [`FlowDefinition`].
///
/// The current state is always a state of the definition and only changes through
/// [`transition`](Flow::transition) and [`reset`](Flow::reset). A transition either applies
/// completely or leaves the flow untouched.
///
/// # Examples
/// ```
/// # use std::sync::Arc;
/// # use evrental_data::StateData;
/// # use evrental_flow::{Flow, FlowId, workflows};
/// let mut flow = Flow::new(FlowId::new(0), Arc::new(workflows::booking().unwrap()));
/// assert_eq!(flow.current_state(), "stations");
///
/// flow.transition("selectStation", StateData::new().with("stationId", "1")).unwrap();
/// assert_eq!(flow.current_state(), "vehicles");
/// assert!(flow.transition("confirm", StateData::new()).is_err());
/// assert_eq!(flow.current_state(), "vehicles");
/// ```
#[derive(Debug, Clone)]
pub struct Flow {
  id: FlowId,
  definition: Arc<FlowDefinition>,
  current: StateId,
  data: StateData,
}

impl Flow {
  /// Start a flow in the definition's initial state with no data
  pub fn new(id: FlowId, definition: Arc<FlowDefinition>) -> Self {
    let current = *definition.initial();
    Flow {
      id,
      definition,
      current,
      data: StateData::new(),
    }
  }

  pub fn id(&self) -> &FlowId {
    &self.id
  }

  pub fn definition(&self) -> &Arc<FlowDefinition> {
    &self.definition
  }

  pub fn current_state(&self) -> &str {
    self.definition.state_name(&self.current)
  }

  pub fn state_id(&self) -> &StateId {
    &self.current
  }

  pub fn state(&self) -> Result<&State, Error> {
    self.definition.state(&self.current)
  }

  /// All data accumulated so far
  pub fn data(&self) -> &StateData {
    &self.data
  }

  pub fn is_terminal(&self) -> bool {
    self.state().map(State::is_terminal).unwrap_or(false)
  }

  /// Triggers declared from the current state, whether or not their guards pass
  pub fn triggers(&self) -> Vec<&str> {
    match self.state() {
      Ok(state) => state.triggers().collect(),
      Err(_) => Vec::new(),
    }
  }

  fn find_edge(&self, trigger: &str) -> Result<&Edge, Error> {
    self.state()?
      .edge(trigger)
      .ok_or_else(|| Error::InvalidTransition {
        state: self.current_state().to_owned(),
        trigger: trigger.to_owned(),
      })
  }

  /// Fails with `InvalidTransition` when `trigger` has no edge from the current state. Guards are not run.
  pub fn check_trigger(&self, trigger: &str) -> Result<(), Error> {
    self.find_edge(trigger).map(|_edge| ())
  }

  /// The edge `trigger` would take, or why it cannot be taken with the current data
  pub fn check_transition(&self, trigger: &str) -> Result<&Edge, Error> {
    let edge = self.find_edge(trigger)?;
    edge.check(&self.data).map_err(|failure| Error::GuardFailed {
      state: self.current_state().to_owned(),
      trigger: trigger.to_owned(),
      failure,
    })?;
    Ok(edge)
  }

  pub fn can_transition(&self, trigger: &str) -> bool {
    self.check_transition(trigger).is_ok()
  }

  /// Merge `patch` into the flow data and follow the `trigger` edge if its guard passes.
  ///
  /// On any error the state and data are left as they were.
  pub fn transition(&mut self, trigger: &str, patch: StateData) -> Result<Transition, Error> {
    let definition = Arc::clone(&self.definition);
    let from = definition.state(&self.current)?;
    let edge = self.find_edge(trigger)?;

    patch.validate_against(definition.vars()).map_err(Error::InvalidData)?;
    if let Err(failure) = edge.check_patch(&self.data, &patch) {
      event!(Level::DEBUG, flow = definition.name(), state = from.name(), trigger, %failure, "transition blocked by guard");
      return Err(Error::GuardFailed {
        state: from.name().to_owned(),
        trigger: trigger.to_owned(),
        failure,
      });
    }

    let to = definition.state(edge.target())?;
    self.current = *to.id();
    self.data.merge_from(patch);

    event!(Level::DEBUG, flow = definition.name(), from = from.name(), to = to.name(), trigger, "flow transition");
    Ok(Transition {
      from: from.name().to_owned(),
      to: to.name().to_owned(),
      trigger: trigger.to_owned(),
      terminal: to.is_terminal(),
    })
  }

  /// Back to the initial state with no data
  pub fn reset(&mut self) {
    self.current = *self.definition.initial();
    self.data.clear();
    event!(Level::DEBUG, flow = self.definition.name(), "flow reset");
  }

  pub fn snapshot(&self) -> FlowSnapshot {
    FlowSnapshot {
      definition: self.definition.name().to_owned(),
      state: self.current_state().to_owned(),
      data: self.data.clone(),
    }
  }

  /// Rebuild a flow from a [`FlowSnapshot`] taken from a flow of the same definition
  pub fn restore(id: FlowId, definition: Arc<FlowDefinition>, snapshot: FlowSnapshot) -> Result<Self, Error> {
    if snapshot.definition != definition.name() {
      return Err(Error::DefinitionMismatch {
        expected: definition.name().to_owned(),
        found: snapshot.definition,
      });
    }
    let current = *definition.states()
      .id_from_name(&snapshot.state)
      .ok_or_else(|| IdError::<StateId>::NoSuchName(snapshot.state.clone()))?;
    snapshot.data.validate_against(definition.vars()).map_err(Error::InvalidData)?;

    Ok(Flow {
      id,
      definition,
      current,
      data: snapshot.data,
    })
  }
}
