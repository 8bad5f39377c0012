use evrental_base::{IdError, ObjectStore};
use evrental_data::var::{Var, VarId, VarKind};
use crate::{Edge, Error, Guard, State, StateId};

/// The declared shape of a workflow: its states, the edges between them and the data it may hold.
///
/// Definitions are immutable once built and are shared between flows as `Arc<FlowDefinition>`.
///
/// # Examples
/// ```
/// # use evrental_data::var::VarKind;
/// # use evrental_flow::{FlowDefinition, guard::RequireVars};
/// let definition = FlowDefinition::builder("pickup")
///   .var("vehicleId", VarKind::String)
///   .state("choose")
///   .terminal_state("done")
///   .guarded_edge("choose", "next", "done", RequireVars::new(["vehicleId"]))
///   .build()
///   .unwrap();
/// assert_eq!(definition.state_name(definition.initial()), "choose");
/// ```
#[derive(Debug)]
pub struct FlowDefinition {
  name: String,
  states: ObjectStore<State, StateId>,
  vars: ObjectStore<Var, VarId>,
  initial: StateId,
}

impl FlowDefinition {
  pub fn builder<STR: Into<String>>(name: STR) -> FlowDefinitionBuilder {
    FlowDefinitionBuilder::new(name)
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn initial(&self) -> &StateId {
    &self.initial
  }

  pub fn states(&self) -> &ObjectStore<State, StateId> {
    &self.states
  }

  pub fn vars(&self) -> &ObjectStore<Var, VarId> {
    &self.vars
  }

  pub fn state(&self, state_id: &StateId) -> Result<&State, Error> {
    Ok(self.states.try_get(state_id)?)
  }

  pub fn state_by_name(&self, name: &str) -> Result<&State, Error> {
    Ok(self.states.try_get_by_name(name)?)
  }

  /// Name of a state of this definition, empty for an id from another definition
  pub fn state_name(&self, state_id: &StateId) -> &str {
    self.states.get(state_id).map(State::name).unwrap_or_default()
  }

  /// Every trigger used anywhere in the definition, without repeats
  pub fn all_triggers(&self) -> Vec<&str> {
    let mut triggers: Vec<&str> = self.states.iter().flat_map(State::triggers).collect();
    triggers.sort_unstable();
    triggers.dedup();
    triggers
  }
}

struct PendingEdge {
  from: String,
  trigger: String,
  to: String,
  guard: Option<Box<dyn Guard>>,
}

/// Collects declarations for a [`FlowDefinition`]. Names are resolved in [`build`](FlowDefinitionBuilder::build),
/// so edges may mention states declared after them.
pub struct FlowDefinitionBuilder {
  name: String,
  vars: Vec<(String, VarKind)>,
  states: Vec<(String, bool)>,
  edges: Vec<PendingEdge>,
  initial: Option<String>,
}

impl FlowDefinitionBuilder {
  pub fn new<STR: Into<String>>(name: STR) -> Self {
    FlowDefinitionBuilder {
      name: name.into(),
      vars: Vec::new(),
      states: Vec::new(),
      edges: Vec::new(),
      initial: None,
    }
  }

  pub fn var<STR: Into<String>>(mut self, name: STR, kind: VarKind) -> Self {
    self.vars.push((name.into(), kind));
    self
  }

  pub fn state<STR: Into<String>>(mut self, name: STR) -> Self {
    self.states.push((name.into(), false));
    self
  }

  pub fn terminal_state<STR: Into<String>>(mut self, name: STR) -> Self {
    self.states.push((name.into(), true));
    self
  }

  /// Start somewhere other than the first declared state
  pub fn initial<STR: Into<String>>(mut self, name: STR) -> Self {
    self.initial = Some(name.into());
    self
  }

  pub fn edge<F, T, TO>(self, from: F, trigger: T, to: TO) -> Self
    where F: Into<String>, T: Into<String>, TO: Into<String>
  {
    self.push_edge(from.into(), trigger.into(), to.into(), None)
  }

  pub fn guarded_edge<F, T, TO, G>(self, from: F, trigger: T, to: TO, guard: G) -> Self
    where F: Into<String>, T: Into<String>, TO: Into<String>, G: Guard + 'static
  {
    self.push_edge(from.into(), trigger.into(), to.into(), Some(guard.boxed()))
  }

  fn push_edge(mut self, from: String, trigger: String, to: String, guard: Option<Box<dyn Guard>>) -> Self {
    self.edges.push(PendingEdge { from, trigger, to, guard });
    self
  }

  pub fn build(self) -> Result<FlowDefinition, Error> {
    let initial_name = match self.initial {
      Some(name) => name,
      None => self.states.first().map(|(name, _)| name.clone()).ok_or(Error::NoStates)?,
    };

    let mut vars = ObjectStore::with_capacity(self.vars.len());
    for (name, kind) in self.vars {
      vars.insert_new_named(name, |id| Ok(Var::new(id, kind)))?;
    }

    let mut states = ObjectStore::with_capacity(self.states.len());
    for (name, terminal) in self.states {
      let state_name = name.clone();
      states.insert_new_named(name, |id| Ok(State::new(id, state_name, terminal)))?;
    }

    for edge in self.edges {
      let target = lookup(&states, &edge.to)?;
      let from = lookup(&states, &edge.from)?;
      let state = states.get_mut(&from).ok_or(IdError::IdMissing(from))?;
      if state.is_terminal() {
        return Err(Error::TerminalEdge { state: edge.from, trigger: edge.trigger });
      }
      if state.edge(&edge.trigger).is_some() {
        return Err(Error::DuplicateTrigger { state: edge.from, trigger: edge.trigger });
      }
      state.push_edge(Edge::new(edge.trigger, target, edge.guard));
    }

    Ok(FlowDefinition {
      name: self.name,
      initial: lookup(&states, &initial_name)?,
      states,
      vars,
    })
  }
}

fn lookup(states: &ObjectStore<State, StateId>, name: &str) -> Result<StateId, IdError<StateId>> {
  states.id_from_name(name)
    .copied()
    .ok_or_else(|| IdError::NoSuchName(name.to_owned()))
}
