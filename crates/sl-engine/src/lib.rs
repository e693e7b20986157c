//! sl-engine: the system router.
//!
//! Compiles the project record into runtime types, sequences the drainage
//! network topologically and propagates hydrographs node by node.

pub mod compile;
pub mod error;
pub mod results;
pub mod router;

pub use error::{EngineError, EngineResult};
pub use results::{NodeResult, PondSummary, SimulationOutcome};
pub use router::{run_all_events, run_simulation};
