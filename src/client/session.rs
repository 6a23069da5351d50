//! Signed-in session and route guarding

use crate::core::models::User;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Token and profile returned by a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: String, user: User, expires_in: u64) -> Self {
        let now = Utc::now();
        let expires_at = i64::try_from(expires_in)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            token,
            user,
            expires_at,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Client-side routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Roles,
    Permissions,
    DeviceStatistics,
}

impl Route {
    /// Routes reachable without a session
    pub fn is_public(self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Roles => "/roles",
            Route::Permissions => "/permissions",
            Route::DeviceStatistics => "/device-statistics",
        }
    }
}

/// Outcome of [`route_guard`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectToLogin,
}

/// Protected routes need a session that is still live at `now`; everything
/// else passes
pub fn route_guard(session: Option<&Session>, route: Route, now: DateTime<Utc>) -> RouteDecision {
    if route.is_public() {
        return RouteDecision::Allow;
    }
    match session {
        Some(session) if !session.token.is_empty() && !session.is_expired_at(now) => {
            RouteDecision::Allow
        }
        _ => RouteDecision::RedirectToLogin,
    }
}
