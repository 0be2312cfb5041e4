/// Authenticated account context for a request.
///
/// Derived from the bearer token by the auth middleware; immutable and
/// present on all protected routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountContext {
    username: String,
    email: String,
}

impl AccountContext {
    pub fn new(username: String, email: String) -> Self {
        Self { username, email }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}
