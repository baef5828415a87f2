//! Post-commit change notification dispatcher.
//!
//! Runs strictly after the task write commits. Every failure in here is
//! logged and swallowed: realtime emission and outbound mail are advisory
//! side channels and must never be mistaken for mutation failures.

use crate::task::{
    adapters::mail::{MailTemplates, RenderedMail},
    domain::{Actor, Task, TaskProjection},
    ports::{MailMessage, Mailer, RealtimePublisher},
};
use std::sync::Arc;

/// Topic carrying the post-mutation task projection.
pub const TASK_UPDATED_TOPIC: &str = "task_updated";

/// Dispatches realtime events and outbound mail after committed mutations.
#[derive(Clone)]
pub struct ChangeNotificationDispatcher<M, P>
where
    M: Mailer,
    P: RealtimePublisher,
{
    mailer: Arc<M>,
    realtime: Arc<P>,
    templates: MailTemplates,
}

impl<M, P> ChangeNotificationDispatcher<M, P>
where
    M: Mailer,
    P: RealtimePublisher,
{
    /// Creates a dispatcher.
    #[must_use]
    pub const fn new(mailer: Arc<M>, realtime: Arc<P>, templates: MailTemplates) -> Self {
        Self {
            mailer,
            realtime,
            templates,
        }
    }

    /// Broadcasts the post-mutation projection to realtime subscribers.
    pub async fn task_changed(&self, projection: &TaskProjection) {
        match serde_json::to_value(projection) {
            Ok(payload) => {
                if let Err(err) = self.realtime.publish(TASK_UPDATED_TOPIC, payload).await {
                    tracing::warn!(error = %err, task_id = %projection.task.id(), "realtime publish failed");
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, task_id = %projection.task.id(), "projection serialization failed");
            }
        }
    }

    /// Mails an assignment notice to each assignee.
    pub async fn task_assigned(&self, task: &Task, assignees: &[Actor], creator_name: &str) {
        for assignee in assignees {
            let rendered = self
                .templates
                .task_assigned(task.title(), assignee.name(), creator_name);
            self.send(task, assignee.email(), rendered).await;
        }
    }

    /// Mails the acknowledgement pair: an update to the creator and a
    /// confirmation to the acknowledging assignee.
    pub async fn task_acknowledged(&self, task: &Task, assignee: &Actor, creator: Option<&Actor>) {
        if let Some(creator) = creator {
            let rendered = self
                .templates
                .task_acknowledged_admin(task.title(), assignee.name());
            self.send(task, creator.email(), rendered).await;
        }
        let rendered = self
            .templates
            .task_acknowledged_user(task.title(), assignee.name());
        self.send(task, assignee.email(), rendered).await;
    }

    /// Mails a completion notice to the task creator.
    pub async fn task_completed(&self, task: &Task, assignee: &Actor, creator: Option<&Actor>) {
        if let Some(creator) = creator {
            let rendered = self
                .templates
                .task_completed_admin(task.title(), assignee.name());
            self.send(task, creator.email(), rendered).await;
        }
    }

    async fn send(
        &self,
        task: &Task,
        to: &str,
        rendered: Result<RenderedMail, crate::task::adapters::mail::MailTemplateError>,
    ) {
        let rendered = match rendered {
            Ok(rendered) => rendered,
            Err(err) => {
                tracing::warn!(error = %err, task_id = %task.id(), "mail rendering failed");
                return;
            }
        };
        let message = MailMessage {
            to: to.to_owned(),
            subject: rendered.subject,
            html_body: rendered.html_body,
        };
        if let Err(err) = self.mailer.send(message).await {
            tracing::warn!(error = %err, task_id = %task.id(), "mail hand-off failed");
        }
    }
}
