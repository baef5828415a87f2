//! Actor (user) snapshot consumed by policy decisions and notifications.
//!
//! The engine never mutates actor records; the identity collaborator owns
//! them. Role and the active flag are read-only inputs to authorization.

use super::{ActorId, ParseActorRoleError, TeamId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role carried by an authenticated actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// Regular operative; sees and works only assigned tasks.
    User,
    /// Administrator; deploys, updates, and reassigns tasks.
    Admin,
    /// Super administrator; additionally archives and purges tasks.
    SuperAdmin,
}

impl ActorRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::SuperAdmin => "superadmin",
        }
    }

    /// Returns whether the role carries administrative privileges.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ActorRole {
    type Error = ParseActorRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "superadmin" => Ok(Self::SuperAdmin),
            _ => Err(ParseActorRoleError(value.to_owned())),
        }
    }
}

/// Actor snapshot supplied by the identity collaborator.
///
/// The engine trusts these fields without re-verifying credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    id: ActorId,
    name: String,
    email: String,
    role: ActorRole,
    active: bool,
    teams: Vec<TeamId>,
}

impl Actor {
    /// Creates an actor snapshot.
    #[must_use]
    pub fn new(id: ActorId, name: impl Into<String>, email: impl Into<String>, role: ActorRole) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
            active: true,
            teams: Vec::new(),
        }
    }

    /// Marks the actor as deactivated.
    #[must_use]
    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }

    /// Sets the actor's team memberships.
    #[must_use]
    pub fn with_teams(mut self, teams: impl IntoIterator<Item = TeamId>) -> Self {
        self.teams = teams.into_iter().collect();
        self
    }

    /// Returns the actor identifier.
    #[must_use]
    pub const fn id(&self) -> ActorId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the notification email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the actor role.
    #[must_use]
    pub const fn role(&self) -> ActorRole {
        self.role
    }

    /// Returns whether the actor account is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the actor's team memberships.
    #[must_use]
    pub fn teams(&self) -> &[TeamId] {
        &self.teams
    }

    /// Returns whether the actor belongs to the given team.
    #[must_use]
    pub fn is_member_of(&self, team: TeamId) -> bool {
        self.teams.contains(&team)
    }
}
