use crate::domain::AdminIdentity;
use crate::error::DomainError;

/// Who is making a request: nobody in particular, or a signed-in admin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Viewer {
    #[default]
    Anonymous,
    Admin(AdminIdentity),
}

impl Viewer {
    pub fn is_admin(&self) -> bool {
        matches!(self, Viewer::Admin(_))
    }

    pub fn admin(&self) -> Option<&AdminIdentity> {
        match self {
            Viewer::Admin(identity) => Some(identity),
            Viewer::Anonymous => None,
        }
    }

    /// Gate for mutating operations.
    pub fn require_admin(&self) -> Result<&AdminIdentity, DomainError> {
        self.admin().ok_or(DomainError::Unauthorized)
    }
}

impl From<Option<AdminIdentity>> for Viewer {
    fn from(identity: Option<AdminIdentity>) -> Self {
        identity.map_or(Viewer::Anonymous, Viewer::Admin)
    }
}
