use axum::{
    extract::Query,
    response::Redirect,
    routing::{get, MethodRouter},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{auth::ApiClient, pagination::PaginationParams, views, AppState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Login,
    #[serde(rename = "alunos")]
    Students,
    #[serde(rename = "turmas")]
    Classes,
    #[serde(rename = "matriculas")]
    Enrollments,
}

impl View {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Students => "alunos",
            Self::Classes => "turmas",
            Self::Enrollments => "matriculas",
        }
    }

    /// Upstream API path listed by this view, if it shows data.
    #[must_use]
    pub const fn resource(self) -> Option<&'static str> {
        match self {
            Self::Login => None,
            Self::Students => Some("/alunos"),
            Self::Classes => Some("/turmas"),
            Self::Enrollments => Some("/matriculas"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Redirect(&'static str),
    View(View),
}

#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub path: &'static str,
    pub target: Target,
}

pub const ROUTES: [Route; 5] = [
    Route {
        path: "/",
        target: Target::Redirect("/login"),
    },
    Route {
        path: "/login",
        target: Target::View(View::Login),
    },
    Route {
        path: "/alunos",
        target: Target::View(View::Students),
    },
    Route {
        path: "/turmas",
        target: Target::View(View::Classes),
    },
    Route {
        path: "/matriculas",
        target: Target::View(View::Enrollments),
    },
];

/// Looks `path` up in [`ROUTES`], ignoring one trailing slash.
#[must_use]
pub fn resolve(path: &str) -> Option<Target> {
    let path = match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    };
    ROUTES
        .iter()
        .find(|route| route.path == path)
        .map(|route| route.target)
}

pub fn router(state: AppState) -> Router {
    let mut router = Router::new();
    for route in ROUTES {
        let handler = handler_for(route.target);
        router = router.route(route.path, handler.clone());
        if route.path != "/" {
            router = router.route(&format!("{}/", route.path), handler);
        }
    }
    router
        .layer(tower_cookies::CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn handler_for(target: Target) -> MethodRouter<AppState> {
    match target {
        Target::Redirect(to) => get(move || async move { Redirect::to(to) }),
        Target::View(view) => match view.resource() {
            None => get(views::login),
            Some(resource) => {
                get(move |client: ApiClient, query: Query<PaginationParams>| {
                    views::list(client, resource, query)
                })
            }
        },
    }
}
