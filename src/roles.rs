use serde::{Deserialize, Serialize};

/// Team member role within a fleet account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Owner,
    Admin,
    Manager,
    Dispatcher,
    Viewer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Owner => write!(f, "owner"),
            Role::Admin => write!(f, "admin"),
            Role::Manager => write!(f, "manager"),
            Role::Dispatcher => write!(f, "dispatcher"),
            Role::Viewer => write!(f, "viewer"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ViewDashboard,
    ViewDocuments,
    ViewReminders,
    ExportReports,
    ManageDocuments,
    ManageDrivers,
    ManageTeam,
    ManageBilling,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Capability::ViewDashboard => "view_dashboard",
            Capability::ViewDocuments => "view_documents",
            Capability::ViewReminders => "view_reminders",
            Capability::ExportReports => "export_reports",
            Capability::ManageDocuments => "manage_documents",
            Capability::ManageDrivers => "manage_drivers",
            Capability::ManageTeam => "manage_team",
            Capability::ManageBilling => "manage_billing",
        };
        write!(f, "{}", name)
    }
}

use Capability::*;

const OWNER: &[Capability] = &[
    ViewDashboard,
    ViewDocuments,
    ViewReminders,
    ExportReports,
    ManageDocuments,
    ManageDrivers,
    ManageTeam,
    ManageBilling,
];

const ADMIN: &[Capability] = &[
    ViewDashboard,
    ViewDocuments,
    ViewReminders,
    ExportReports,
    ManageDocuments,
    ManageDrivers,
    ManageTeam,
];

const MANAGER: &[Capability] = &[
    ViewDashboard,
    ViewDocuments,
    ViewReminders,
    ExportReports,
    ManageDocuments,
    ManageDrivers,
];

const DISPATCHER: &[Capability] = &[ViewDashboard, ViewDocuments, ViewReminders];

const VIEWER: &[Capability] = &[ViewDashboard];

impl Role {
    /// Capabilities granted to this role.
    pub fn capabilities(self) -> &'static [Capability] {
        match self {
            Role::Owner => OWNER,
            Role::Admin => ADMIN,
            Role::Manager => MANAGER,
            Role::Dispatcher => DISPATCHER,
            Role::Viewer => VIEWER,
        }
    }

    pub fn can(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Fail with a readable message when the role lacks `capability`.
    pub fn require(self, capability: Capability) -> anyhow::Result<()> {
        if self.can(capability) {
            Ok(())
        } else {
            anyhow::bail!("role '{}' lacks the '{}' capability", self, capability)
        }
    }
}
