//! Domain models.
//!
//! Plain value objects exchanged with the engine. Every type is
//! serde-serializable with camelCase field names, which is the wire
//! contract the API and UI layers consume.
//!
//! | Model | Role |
//! |-------|------|
//! | `Task`, `Resource` | Scheduler input |
//! | `ScheduleEntry`, `ScheduleResult` | Scheduler output |
//! | `ExpertEstimate`, `HistoricalProject`, `ProjectProfile` | Estimator input |
//! | `Project` | Persistence-layer record |
//! | `DecisionNode` | Decision tree |

mod decision;
mod estimate;
mod project;
mod resource;
mod schedule;
mod task;

pub use decision::{DecisionNode, NodeType};
pub use estimate::{ExpertEstimate, HistoricalProject, ProjectProfile};
pub use project::Project;
pub use resource::Resource;
pub use schedule::{ScheduleEntry, ScheduleResult};
pub use task::{ResourceRequirement, Task};
