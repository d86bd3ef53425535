use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Connect,
    Chat,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Connect => "/",
            Route::Chat => "/chat",
        }
    }

    /// Only the two known paths resolve; there is no guard on `/chat`.
    pub fn from_path(path: &str) -> Option<Route> {
        match path.trim() {
            "/" => Some(Route::Connect),
            "/chat" => Some(Route::Chat),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
