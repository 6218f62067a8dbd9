//! Task aggregate root and edit/transition behaviour.

use super::{
    ComplexityId, PriorityId, TaskDomainError, TaskEvent, TaskField, TaskId, TaskStatus,
    TransitionOutcome, WorkcenterId,
    transition::{NotificationNote, NotificationRecipient, rule_for},
};
use crate::access::domain::{AccessDenied, Actor, UserId};
use crate::receive::domain::ReceiveId;
use crate::sequence::domain::ReferenceNumber;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: Option<String>,
    priority_id: Option<PriorityId>,
    complexity_id: Option<ComplexityId>,
    workcenter_id: Option<WorkcenterId>,
    receive_id: Option<ReceiveId>,
}

impl TaskDraft {
    /// Creates a draft with a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is empty
    /// after trimming.
    pub fn new(title: impl Into<String>) -> Result<Self, TaskDomainError> {
        Ok(Self {
            title: validate_title(title.into())?,
            description: None,
            priority_id: None,
            complexity_id: None,
            workcenter_id: None,
            receive_id: None,
        })
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority reference.
    #[must_use]
    pub const fn with_priority(mut self, priority_id: PriorityId) -> Self {
        self.priority_id = Some(priority_id);
        self
    }

    /// Sets the complexity reference.
    #[must_use]
    pub const fn with_complexity(mut self, complexity_id: ComplexityId) -> Self {
        self.complexity_id = Some(complexity_id);
        self
    }

    /// Sets the workcenter reference.
    #[must_use]
    pub const fn with_workcenter(mut self, workcenter_id: WorkcenterId) -> Self {
        self.workcenter_id = Some(workcenter_id);
        self
    }

    /// Links the task to the originating receive. The link is fixed for the
    /// task's lifetime.
    #[must_use]
    pub const fn with_receive(mut self, receive_id: ReceiveId) -> Self {
        self.receive_id = Some(receive_id);
        self
    }
}

/// Requested non-status field edits. An unset field is left untouched; a
/// set field is overwritten, with `None` clearing optional fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskEdits {
    title: Option<String>,
    description: Option<Option<String>>,
    priority_id: Option<Option<PriorityId>>,
    complexity_id: Option<Option<ComplexityId>>,
    workcenter_id: Option<Option<WorkcenterId>>,
}

impl TaskEdits {
    /// Creates an empty edit request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a title change.
    #[must_use]
    pub fn set_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Requests a description change; `None` clears it.
    #[must_use]
    pub fn set_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Requests a priority change; `None` clears it.
    #[must_use]
    pub const fn set_priority(mut self, priority_id: Option<PriorityId>) -> Self {
        self.priority_id = Some(priority_id);
        self
    }

    /// Requests a complexity change; `None` clears it.
    #[must_use]
    pub const fn set_complexity(mut self, complexity_id: Option<ComplexityId>) -> Self {
        self.complexity_id = Some(complexity_id);
        self
    }

    /// Requests a workcenter change; `None` clears it.
    #[must_use]
    pub const fn set_workcenter(mut self, workcenter_id: Option<WorkcenterId>) -> Self {
        self.workcenter_id = Some(workcenter_id);
        self
    }
}

/// One applied field change, input to the history log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    /// The edited field.
    pub field: TaskField,
    /// The previous value, rendered for the history log.
    pub old_value: Option<String>,
    /// The replacement value, rendered for the history log.
    pub new_value: Option<String>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    record_number: ReferenceNumber,
    title: String,
    description: Option<String>,
    priority_id: Option<PriorityId>,
    complexity_id: Option<ComplexityId>,
    workcenter_id: Option<WorkcenterId>,
    status: TaskStatus,
    assigned_to: Option<UserId>,
    created_by: UserId,
    receive_id: Option<ReceiveId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted record number.
    pub record_number: ReferenceNumber,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted priority reference, if any.
    pub priority_id: Option<PriorityId>,
    /// Persisted complexity reference, if any.
    pub complexity_id: Option<ComplexityId>,
    /// Persisted workcenter reference, if any.
    pub workcenter_id: Option<WorkcenterId>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted assignee, if any.
    pub assigned_to: Option<UserId>,
    /// Persisted creator.
    pub created_by: UserId,
    /// Persisted originating receive, if any.
    pub receive_id: Option<ReceiveId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in `Active` status.
    ///
    /// The record number is issued exactly once, here; it survives every
    /// later transition including revert.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::Denied`] when the actor may not create
    /// tasks.
    pub fn create(
        actor: &Actor,
        record_number: ReferenceNumber,
        draft: TaskDraft,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        AccessDenied::require(actor.can_create_tasks())?;
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            record_number,
            title: draft.title,
            description: draft.description,
            priority_id: draft.priority_id,
            complexity_id: draft.complexity_id,
            workcenter_id: draft.workcenter_id,
            status: TaskStatus::Active,
            assigned_to: None,
            created_by: actor.user_id(),
            receive_id: draft.receive_id,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            record_number: data.record_number,
            title: data.title,
            description: data.description,
            priority_id: data.priority_id,
            complexity_id: data.complexity_id,
            workcenter_id: data.workcenter_id,
            status: data.status,
            assigned_to: data.assigned_to,
            created_by: data.created_by,
            receive_id: data.receive_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the immutable record number.
    #[must_use]
    pub const fn record_number(&self) -> ReferenceNumber {
        self.record_number
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the priority reference, if any.
    #[must_use]
    pub const fn priority_id(&self) -> Option<PriorityId> {
        self.priority_id
    }

    /// Returns the complexity reference, if any.
    #[must_use]
    pub const fn complexity_id(&self) -> Option<ComplexityId> {
        self.complexity_id
    }

    /// Returns the workcenter reference, if any.
    #[must_use]
    pub const fn workcenter_id(&self) -> Option<WorkcenterId> {
        self.workcenter_id
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the current assignee, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<UserId> {
        self.assigned_to
    }

    /// Returns the creator.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the originating receive, if any.
    #[must_use]
    pub const fn receive_id(&self) -> Option<ReceiveId> {
        self.receive_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a lifecycle event per the transition table.
    ///
    /// The guard is evaluated before the status precondition, so an
    /// unauthorized caller always sees a denial rather than a state hint.
    /// On success the aggregate holds the new status and assignee, and the
    /// returned outcome names the actions to append and the notification to
    /// dispatch.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::Denied`] when the rule's guard rejects
    /// the actor, or [`TaskDomainError::InvalidTransition`] when the task
    /// is not in the rule's required prior status. Either way the aggregate
    /// is unchanged.
    pub fn apply(
        &mut self,
        event: &TaskEvent,
        actor: &Actor,
        clock: &impl Clock,
    ) -> Result<TransitionOutcome, TaskDomainError> {
        let rule = rule_for(event.kind());
        AccessDenied::require(rule.guard().allows(actor, self.created_by, self.assigned_to))?;
        if self.status != rule.from() {
            return Err(TaskDomainError::InvalidTransition {
                task_id: self.id,
                from: self.status,
                event: event.kind(),
            });
        }

        if let Some(assignee) = event.assignee() {
            self.assigned_to = Some(assignee);
        }
        self.status = rule.to();
        self.touch(clock);

        let notify = rule.notification().and_then(|(recipient, kind)| {
            let user = match recipient {
                NotificationRecipient::Assignee => self.assigned_to,
                NotificationRecipient::Creator => Some(self.created_by),
            };
            user.map(|recipient_id| NotificationNote {
                recipient: recipient_id,
                kind,
            })
        });

        Ok(TransitionOutcome {
            actions: rule.actions(),
            notify,
        })
    }

    /// Applies non-status field edits and returns the per-field diffs.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::Denied`] when the actor's role is below
    /// the edit ceiling, [`TaskDomainError::EmptyTitle`] when a requested
    /// title is empty, or [`TaskDomainError::NoFieldsChanged`] when the
    /// request leaves every field as it was. The aggregate is unchanged on
    /// any error.
    pub fn apply_edit(
        &mut self,
        actor: &Actor,
        edits: TaskEdits,
        clock: &impl Clock,
    ) -> Result<Vec<FieldChange>, TaskDomainError> {
        AccessDenied::require(actor.role().can_edit_task())?;

        let new_title = edits.title.map(validate_title).transpose()?;
        let mut changes = Vec::new();

        if let Some(title) = new_title
            && title != self.title
        {
            changes.push(FieldChange {
                field: TaskField::Title,
                old_value: Some(self.title.clone()),
                new_value: Some(title.clone()),
            });
            self.title = title;
        }
        if let Some(description) = edits.description
            && description != self.description
        {
            changes.push(FieldChange {
                field: TaskField::Description,
                old_value: self.description.clone(),
                new_value: description.clone(),
            });
            self.description = description;
        }
        if let Some(priority_id) = edits.priority_id
            && priority_id != self.priority_id
        {
            changes.push(FieldChange {
                field: TaskField::Priority,
                old_value: self.priority_id.map(|id| id.to_string()),
                new_value: priority_id.map(|id| id.to_string()),
            });
            self.priority_id = priority_id;
        }
        if let Some(complexity_id) = edits.complexity_id
            && complexity_id != self.complexity_id
        {
            changes.push(FieldChange {
                field: TaskField::Complexity,
                old_value: self.complexity_id.map(|id| id.to_string()),
                new_value: complexity_id.map(|id| id.to_string()),
            });
            self.complexity_id = complexity_id;
        }
        if let Some(workcenter_id) = edits.workcenter_id
            && workcenter_id != self.workcenter_id
        {
            changes.push(FieldChange {
                field: TaskField::Workcenter,
                old_value: self.workcenter_id.map(|id| id.to_string()),
                new_value: workcenter_id.map(|id| id.to_string()),
            });
            self.workcenter_id = workcenter_id;
        }

        if changes.is_empty() {
            return Err(TaskDomainError::NoFieldsChanged(self.id));
        }
        self.touch(clock);
        Ok(changes)
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Trims and validates a task title.
fn validate_title(title: String) -> Result<String, TaskDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}
