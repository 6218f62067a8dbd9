//! Domain types for the task lifecycle.

mod action;
mod error;
mod history;
mod ids;
mod status;
mod task;
mod transition;

pub use action::{ActionKind, PersistedTaskActionData, TaskAction};
pub use error::{
    ParseActionKindError, ParseTaskFieldError, ParseTaskStatusError, TaskDomainError,
};
pub use history::{PersistedTaskHistoryData, TaskField, TaskHistoryEntry};
pub use ids::{ComplexityId, PriorityId, TaskActionId, TaskHistoryId, TaskId, WorkcenterId};
pub use status::TaskStatus;
pub use task::{FieldChange, PersistedTaskData, Task, TaskDraft, TaskEdits};
pub use transition::{
    NotificationNote, NotificationRecipient, TRANSITIONS, TaskEvent, TaskEventKind,
    TransitionGuard, TransitionOutcome, TransitionRule, rule_for,
};
