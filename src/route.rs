//! Navigable views and their paths.

use std::fmt;

/// A view the user can navigate to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Submission form
    Home,
    /// Result view for one summary
    Summary(String),
    History,
}

impl Route {
    /// Resolve a path. Unknown paths redirect to `Home`.
    pub fn parse(path: &str) -> Route {
        let segments: Vec<&str> = path
            .trim()
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        match segments.as_slice() {
            ["history"] => Route::History,
            ["summary", id] => Route::Summary((*id).to_string()),
            _ => Route::Home,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Summary(id) => format!("/summary/{}", id),
            Route::History => "/history".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths_resolve() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse("/history"), Route::History);
        assert_eq!(Route::parse("/summary/42"), Route::Summary("42".to_string()));
        assert_eq!(Route::parse("summary/42/"), Route::Summary("42".to_string()));
    }

    #[test]
    fn unknown_paths_redirect_home() {
        assert_eq!(Route::parse("/nowhere"), Route::Home);
        assert_eq!(Route::parse("/summary"), Route::Home);
        assert_eq!(Route::parse("/summary/1/extra"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
    }

    #[test]
    fn path_round_trips() {
        for route in [Route::Home, Route::History, Route::Summary("abc-1".to_string())] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }
}
