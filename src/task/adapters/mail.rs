//! Outbound mail bodies rendered with minijinja.
//!
//! The dispatcher owns recipient selection; this module only renders
//! subject and body pairs for the transitions that notify humans.

use minijinja::{Environment, context};
use thiserror::Error;

const LAYOUT: &str = r#"<div style="background-color:#f9fafb;padding:30px;font-family:'Segoe UI',Tahoma,sans-serif">
  <div style="max-width:600px;margin:auto;background:#ffffff;border-radius:8px;border:1px solid #e5e7eb">
    <div style="background-color:#355e3b;padding:20px;text-align:center;color:#efbf04;font-weight:bold;letter-spacing:2px">
      TASK REGISTRY
    </div>
    <div style="padding:30px;color:#374151">
      {% block content %}{% endblock %}
    </div>
    <div style="background-color:#f3f4f6;padding:15px;text-align:center;font-size:11px;color:#9ca3af;letter-spacing:1px">
      OFFICIAL COMMUNICATION // REGISTRY SECURE
    </div>
  </div>
</div>"#;

const ASSIGNED_BODY: &str = r#"{% extends "layout.html" %}{% block content %}
<h2 style="color:#355e3b;margin-top:0">NEW ASSIGNMENT</h2>
<p>Greetings, <strong>{{ assignee_name }}</strong>.</p>
<p><strong>{{ creator_name }}</strong> has deployed a new objective to you:</p>
<div style="border-left:4px solid #efbf04;padding-left:15px;margin:20px 0">
  <h3 style="color:#355e3b;margin:0">{{ task_title }}</h3>
</div>
<p>Open the briefing in the registry to acknowledge receipt.</p>
{% endblock %}"#;

const ACKNOWLEDGED_ADMIN_BODY: &str = r#"{% extends "layout.html" %}{% block content %}
<h2 style="color:#355e3b;margin-top:0;border-bottom:2px solid #efbf04;padding-bottom:10px">BRIEFING ACKNOWLEDGED</h2>
<p>Automated update received:</p>
<div style="background:#f9fafb;padding:15px;border-radius:6px;margin:20px 0">
  <p style="margin:5px 0"><strong>OPERATIVE:</strong> <span style="color:#355e3b">{{ assignee_name }}</span></p>
  <p style="margin:5px 0"><strong>OBJECTIVE:</strong> {{ task_title }}</p>
</div>
<p>The operative has confirmed receipt of the briefing and moved to <strong>active status</strong>.</p>
{% endblock %}"#;

const ACKNOWLEDGED_USER_BODY: &str = r#"{% extends "layout.html" %}{% block content %}
<p>Greetings, <strong>{{ assignee_name }}</strong>.</p>
<p>You have acknowledged the objective:</p>
<div style="border-left:4px solid #efbf04;padding-left:15px;margin:20px 0">
  <h3 style="color:#355e3b;margin:0">{{ task_title }}</h3>
</div>
<p>Progress and artifacts should be uploaded to the registry. Good luck.</p>
{% endblock %}"#;

const COMPLETED_ADMIN_BODY: &str = r#"{% extends "layout.html" %}{% block content %}
<h2 style="color:#065f46;margin-top:0;text-align:center">OBJECTIVE SECURED</h2>
<p><strong>{{ assignee_name }}</strong> has finalized the following task:</p>
<div style="background:#355e3b;color:#ffffff;padding:20px;border-radius:6px;text-align:center;margin:20px 0">
  <h3 style="margin:0;color:#efbf04">{{ task_title }}</h3>
</div>
<p>Please review the submission in the registry for closure.</p>
{% endblock %}"#;

/// A rendered subject and body pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMail {
    /// Subject line.
    pub subject: String,
    /// Rendered HTML body.
    pub html_body: String,
}

/// Errors raised while rendering mail bodies.
#[derive(Debug, Error)]
pub enum MailTemplateError {
    /// The template source failed to compile or render.
    #[error("mail template rendering failed: {0}")]
    Render(#[from] minijinja::Error),
}

/// Compiled mail templates for task lifecycle notifications.
#[derive(Debug, Clone)]
pub struct MailTemplates {
    env: Environment<'static>,
}

impl MailTemplates {
    /// Compiles the embedded templates.
    ///
    /// # Errors
    ///
    /// Returns [`MailTemplateError::Render`] when a template source fails
    /// to compile.
    pub fn new() -> Result<Self, MailTemplateError> {
        let mut env = Environment::new();
        env.add_template("layout.html", LAYOUT)?;
        env.add_template("assigned.html", ASSIGNED_BODY)?;
        env.add_template("acknowledged_admin.html", ACKNOWLEDGED_ADMIN_BODY)?;
        env.add_template("acknowledged_user.html", ACKNOWLEDGED_USER_BODY)?;
        env.add_template("completed_admin.html", COMPLETED_ADMIN_BODY)?;
        Ok(Self { env })
    }

    /// Renders the assignment notice sent to each new assignee.
    ///
    /// # Errors
    ///
    /// Returns [`MailTemplateError::Render`] when rendering fails.
    pub fn task_assigned(
        &self,
        task_title: &str,
        assignee_name: &str,
        creator_name: &str,
    ) -> Result<RenderedMail, MailTemplateError> {
        let html_body = self.env.get_template("assigned.html")?.render(context! {
            task_title,
            assignee_name,
            creator_name,
        })?;
        Ok(RenderedMail {
            subject: format!("[Deployed] New Objective: {task_title}"),
            html_body,
        })
    }

    /// Renders the acknowledgement notice sent to the task creator.
    ///
    /// # Errors
    ///
    /// Returns [`MailTemplateError::Render`] when rendering fails.
    pub fn task_acknowledged_admin(
        &self,
        task_title: &str,
        assignee_name: &str,
    ) -> Result<RenderedMail, MailTemplateError> {
        let html_body = self
            .env
            .get_template("acknowledged_admin.html")?
            .render(context! { task_title, assignee_name })?;
        Ok(RenderedMail {
            subject: format!("[Acknowledged] Mission Update: {task_title}"),
            html_body,
        })
    }

    /// Renders the acknowledgement confirmation sent to the assignee.
    ///
    /// # Errors
    ///
    /// Returns [`MailTemplateError::Render`] when rendering fails.
    pub fn task_acknowledged_user(
        &self,
        task_title: &str,
        assignee_name: &str,
    ) -> Result<RenderedMail, MailTemplateError> {
        let html_body = self
            .env
            .get_template("acknowledged_user.html")?
            .render(context! { task_title, assignee_name })?;
        Ok(RenderedMail {
            subject: format!("Confirmation: {task_title} Briefing Received"),
            html_body,
        })
    }

    /// Renders the completion notice sent to the task creator.
    ///
    /// # Errors
    ///
    /// Returns [`MailTemplateError::Render`] when rendering fails.
    pub fn task_completed_admin(
        &self,
        task_title: &str,
        assignee_name: &str,
    ) -> Result<RenderedMail, MailTemplateError> {
        let html_body = self
            .env
            .get_template("completed_admin.html")?
            .render(context! { task_title, assignee_name })?;
        Ok(RenderedMail {
            subject: format!("[Completed] Mission Accomplished: {task_title}"),
            html_body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::MailTemplates;

    #[test]
    fn templates_compile() {
        MailTemplates::new().expect("embedded templates compile");
    }

    #[test]
    fn assignment_mail_carries_names_and_title() {
        let templates = MailTemplates::new().expect("embedded templates compile");
        let rendered = templates
            .task_assigned("Perimeter survey", "Reyes", "Commander Adams")
            .expect("rendering succeeds");

        assert_eq!(rendered.subject, "[Deployed] New Objective: Perimeter survey");
        assert!(rendered.html_body.contains("Reyes"));
        assert!(rendered.html_body.contains("Commander Adams"));
        assert!(rendered.html_body.contains("Perimeter survey"));
        assert!(rendered.html_body.contains("TASK REGISTRY"));
    }

    #[test]
    fn html_in_titles_is_escaped() {
        let templates = MailTemplates::new().expect("embedded templates compile");
        let rendered = templates
            .task_completed_admin("<script>alert(1)</script>", "Reyes")
            .expect("rendering succeeds");

        assert!(!rendered.html_body.contains("<script>"));
        assert!(rendered.html_body.contains("&lt;script&gt;"));
    }
}
