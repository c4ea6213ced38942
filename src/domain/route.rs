//! Static route table consumed by the navigation guard.

/// One entry of the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub name: String,
    /// Path pattern. Segments starting with `:` match any single segment.
    pub path: String,
    /// View the route renders.
    pub view: String,
    pub requires_auth: bool,
}

impl RouteDescriptor {
    pub fn public(name: &str, path: &str, view: &str) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            view: view.into(),
            requires_auth: false,
        }
    }

    pub fn protected(name: &str, path: &str, view: &str) -> Self {
        Self {
            requires_auth: true,
            ..Self::public(name, path, view)
        }
    }

    /// Whether a concrete path matches this route's pattern.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let pattern = segments(&self.path);
        let concrete = segments(path);
        pattern.len() == concrete.len()
            && pattern
                .iter()
                .zip(&concrete)
                .all(|(p, c)| p.starts_with(':') || p == c)
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Immutable list of routes, fixed at startup.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    #[must_use]
    pub fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self { routes }
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// First route whose pattern matches `path`.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|r| r.matches(path))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(vec![
            RouteDescriptor::public("home", "/", "HomeView"),
            RouteDescriptor::public("login", "/login", "LoginView"),
            RouteDescriptor::public("register", "/register", "RegisterView"),
            RouteDescriptor::public("about", "/about", "AboutView"),
            RouteDescriptor::protected("bots", "/bots", "BotsView"),
            RouteDescriptor::protected("create-bot", "/create-bot", "CreateBotView"),
            RouteDescriptor::protected("bot", "/bots/:id", "BotDetailView"),
            RouteDescriptor::protected("terminal", "/bots/:id/terminal", "TerminalView"),
            RouteDescriptor::protected("marketplace", "/marketplace", "MarketplaceView"),
        ])
    }
}
