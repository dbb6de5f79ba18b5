use std::fmt;

/// Pages the workflow can hand control to. Routing itself belongs to the
/// host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Login,
    RoleSelection,
    Dashboard,
    ProviderRegistration,
    FreelancerVerification,
}

impl Page {
    pub fn key(self) -> &'static str {
        match self {
            Page::Login => "login",
            Page::RoleSelection => "role-selection",
            Page::Dashboard => "dashboard",
            Page::ProviderRegistration => "provider-registration",
            Page::FreelancerVerification => "freelancer-verification",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

pub trait Navigator: Send {
    fn navigate(&mut self, page: Page);
}

impl<F> Navigator for F
where
    F: FnMut(Page) + Send,
{
    fn navigate(&mut self, page: Page) {
        self(page)
    }
}

/// Navigator that ignores every request.
pub struct NoNavigation;

impl Navigator for NoNavigation {
    fn navigate(&mut self, page: Page) {
        tracing::debug!(page = %page, "navigation ignored");
    }
}
