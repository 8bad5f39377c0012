//! Declarative multi-step flows for the EV rental client core
//!
//! A [`FlowDefinition`] declares the states of a workflow, the triggers that move between
//! them and the [`Guard`]s that gate each move. A [`Flow`] is one running instance of a
//! definition, accumulating step data as it goes. [`FlowDriver`] runs network-backed
//! transitions with one submission at a time.
//!
//! The shipped workflows live in [`workflows`].

mod errors;
pub use errors::Error;

mod state;
pub use state::{State, StateId, Edge};

pub mod guard;
pub use guard::{Guard, GuardFailure};

mod definition;
pub use definition::{FlowDefinition, FlowDefinitionBuilder};

mod flow;
pub use flow::{Flow, FlowId, Transition};

mod snapshot;
pub use snapshot::FlowSnapshot;

mod driver;
pub use driver::{FlowDriver, SubmitError};

pub mod workflows;
