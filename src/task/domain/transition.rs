//! The explicit task transition table.
//!
//! Every legal status move is one row here: event, required prior status,
//! resulting status, recorded actions, authorization guard, and the user a
//! notification goes to. Call sites consult [`rule_for`] rather than
//! re-derive any of this.

use super::{ActionKind, TaskStatus};
use crate::access::domain::{Actor, UserId};
use crate::notification::domain::NotificationKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A lifecycle event requested against a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskEvent {
    /// Assign an unstarted task to a user.
    Assign {
        /// The user receiving the task.
        assignee: UserId,
    },
    /// Forward an in-progress task to another user.
    Forward {
        /// The user receiving the task.
        assignee: UserId,
    },
    /// Submit the task as complete.
    Submit,
    /// Acknowledge a submitted completion, closing the task.
    Acknowledge,
    /// Reject a submitted completion back into progress.
    Reject,
    /// Revert a closed task back into progress.
    Revert,
}

impl TaskEvent {
    /// Returns the payload-free event kind.
    #[must_use]
    pub const fn kind(&self) -> TaskEventKind {
        match self {
            Self::Assign { .. } => TaskEventKind::Assign,
            Self::Forward { .. } => TaskEventKind::Forward,
            Self::Submit => TaskEventKind::Submit,
            Self::Acknowledge => TaskEventKind::Acknowledge,
            Self::Reject => TaskEventKind::Reject,
            Self::Revert => TaskEventKind::Revert,
        }
    }

    /// Returns the new assignee for assignment-carrying events.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        match self {
            Self::Assign { assignee } | Self::Forward { assignee } => Some(*assignee),
            _ => None,
        }
    }
}

/// Payload-free discriminant of [`TaskEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskEventKind {
    /// Assignment of an unstarted task.
    Assign,
    /// Forwarding between users.
    Forward,
    /// Submission for completion.
    Submit,
    /// Acknowledgement of a completion.
    Acknowledge,
    /// Rejection of a completion.
    Reject,
    /// Reversal of a closed task.
    Revert,
}

impl TaskEventKind {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assign => "assign",
            Self::Forward => "forward",
            Self::Submit => "submit",
            Self::Acknowledge => "acknowledge",
            Self::Reject => "reject",
            Self::Revert => "revert",
        }
    }
}

impl fmt::Display for TaskEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authorization guard attached to a transition rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionGuard {
    /// The task's creator, or any actor at Manager rank or above.
    CreatorOrManager,
    /// The current assignee only.
    CurrentAssignee,
    /// The current assignee, or any actor at Manager rank or above.
    AssigneeOrManager,
    /// Superadmin, or the completion-approval grant.
    CanAcknowledge,
    /// Superadmin, or the completion-revert grant.
    CanRevert,
}

impl TransitionGuard {
    /// Evaluates the guard against the acting user and the task's creator
    /// and current assignee.
    #[must_use]
    pub fn allows(self, actor: &Actor, created_by: UserId, assigned_to: Option<UserId>) -> bool {
        match self {
            Self::CreatorOrManager => actor.user_id() == created_by || actor.manages_tasks(),
            Self::CurrentAssignee => assigned_to == Some(actor.user_id()),
            Self::AssigneeOrManager => {
                assigned_to == Some(actor.user_id()) || actor.manages_tasks()
            }
            Self::CanAcknowledge => actor.can_acknowledge_task(),
            Self::CanRevert => actor.can_revert_task(),
        }
    }
}

/// The user a transition's notification is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationRecipient {
    /// The task's assignee after the transition.
    Assignee,
    /// The task's creator.
    Creator,
}

/// One row of the legal-transition table.
#[derive(Debug, Clone, Copy)]
pub struct TransitionRule {
    event: TaskEventKind,
    from: TaskStatus,
    to: TaskStatus,
    actions: &'static [ActionKind],
    guard: TransitionGuard,
    notification: Option<(NotificationRecipient, NotificationKind)>,
}

impl TransitionRule {
    /// Returns the event this rule governs.
    #[must_use]
    pub const fn event(&self) -> TaskEventKind {
        self.event
    }

    /// Returns the required prior status.
    #[must_use]
    pub const fn from(&self) -> TaskStatus {
        self.from
    }

    /// Returns the resulting status.
    #[must_use]
    pub const fn to(&self) -> TaskStatus {
        self.to
    }

    /// Returns the action kinds appended on application, in order.
    #[must_use]
    pub const fn actions(&self) -> &'static [ActionKind] {
        self.actions
    }

    /// Returns the authorization guard.
    #[must_use]
    pub const fn guard(&self) -> TransitionGuard {
        self.guard
    }

    /// Returns the notification recipient and category, if the event
    /// targets a specific user.
    #[must_use]
    pub const fn notification(&self) -> Option<(NotificationRecipient, NotificationKind)> {
        self.notification
    }
}

const ASSIGN: TransitionRule = TransitionRule {
    event: TaskEventKind::Assign,
    from: TaskStatus::Active,
    to: TaskStatus::InProgress,
    actions: &[ActionKind::Assigned],
    guard: TransitionGuard::CreatorOrManager,
    notification: Some((NotificationRecipient::Assignee, NotificationKind::TaskAssigned)),
};

const FORWARD: TransitionRule = TransitionRule {
    event: TaskEventKind::Forward,
    from: TaskStatus::InProgress,
    to: TaskStatus::InProgress,
    actions: &[ActionKind::Forwarded],
    guard: TransitionGuard::AssigneeOrManager,
    notification: Some((NotificationRecipient::Assignee, NotificationKind::TaskForwarded)),
};

const SUBMIT: TransitionRule = TransitionRule {
    event: TaskEventKind::Submit,
    from: TaskStatus::InProgress,
    to: TaskStatus::Completed,
    actions: &[ActionKind::Submitted],
    guard: TransitionGuard::CurrentAssignee,
    notification: Some((NotificationRecipient::Creator, NotificationKind::TaskSubmitted)),
};

const ACKNOWLEDGE: TransitionRule = TransitionRule {
    event: TaskEventKind::Acknowledge,
    from: TaskStatus::Completed,
    to: TaskStatus::Closed,
    actions: &[ActionKind::Acknowledged, ActionKind::Closed],
    guard: TransitionGuard::CanAcknowledge,
    notification: Some((NotificationRecipient::Assignee, NotificationKind::TaskClosed)),
};

const REJECT: TransitionRule = TransitionRule {
    event: TaskEventKind::Reject,
    from: TaskStatus::Completed,
    to: TaskStatus::InProgress,
    actions: &[ActionKind::Rejected],
    guard: TransitionGuard::CanAcknowledge,
    notification: Some((NotificationRecipient::Assignee, NotificationKind::TaskRejected)),
};

const REVERT: TransitionRule = TransitionRule {
    event: TaskEventKind::Revert,
    from: TaskStatus::Closed,
    to: TaskStatus::InProgress,
    actions: &[ActionKind::Reverted],
    guard: TransitionGuard::CanRevert,
    notification: Some((NotificationRecipient::Assignee, NotificationKind::TaskReverted)),
};

/// The full legal-transition set, enumerable for tests and tooling.
pub const TRANSITIONS: [TransitionRule; 6] =
    [ASSIGN, FORWARD, SUBMIT, ACKNOWLEDGE, REJECT, REVERT];

/// Returns the rule governing `event`.
#[must_use]
pub const fn rule_for(event: TaskEventKind) -> &'static TransitionRule {
    match event {
        TaskEventKind::Assign => &ASSIGN,
        TaskEventKind::Forward => &FORWARD,
        TaskEventKind::Submit => &SUBMIT,
        TaskEventKind::Acknowledge => &ACKNOWLEDGE,
        TaskEventKind::Reject => &REJECT,
        TaskEventKind::Revert => &REVERT,
    }
}

/// Resolved notification produced by an applied transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationNote {
    /// The user the notification is addressed to.
    pub recipient: UserId,
    /// The notification category.
    pub kind: NotificationKind,
}

/// Result of applying a transition to the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionOutcome {
    /// Action kinds to append, in order.
    pub actions: &'static [ActionKind],
    /// Notification to dispatch, if the event targets a specific user.
    pub notify: Option<NotificationNote>,
}
