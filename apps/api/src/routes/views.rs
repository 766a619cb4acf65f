use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};

const APP_TITLE: &str = "Job Notification Tracker";

/// Every page the client can navigate to. Unknown paths resolve to `Home`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Home,
    Dashboard,
    Saved,
    Digest,
    Settings,
    Proof,
}

impl View {
    #[cfg(test)]
    pub const ALL: [View; 6] = [
        View::Home,
        View::Dashboard,
        View::Saved,
        View::Digest,
        View::Settings,
        View::Proof,
    ];

    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        match trimmed {
            "" => View::Home,
            "/dashboard" => View::Dashboard,
            "/saved" => View::Saved,
            "/digest" => View::Digest,
            "/settings" => View::Settings,
            "/proof" => View::Proof,
            _ => View::Home,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            View::Home => "/",
            View::Dashboard => "/dashboard",
            View::Saved => "/saved",
            View::Digest => "/digest",
            View::Settings => "/settings",
            View::Proof => "/proof",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Dashboard => "Dashboard",
            View::Saved => "Saved",
            View::Digest => "Digest",
            View::Settings => "Settings",
            View::Proof => "Proof",
        }
    }

    pub fn title(self) -> String {
        format!("{} — {APP_TITLE}", self.name())
    }
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct ResolvedView {
    pub view: View,
    pub path: &'static str,
    pub title: String,
}

/// GET /api/v1/views/resolve?path=/dashboard
pub async fn handle_resolve_view(Query(query): Query<ResolveQuery>) -> Json<ResolvedView> {
    let view = View::from_path(&query.path);
    Json(ResolvedView {
        view,
        path: view.path(),
        title: view.title(),
    })
}
