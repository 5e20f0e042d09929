use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Every top-level screen the shell can mount.
///
/// The string form is the kebab-case route used by navigation requests and the
/// search index (`dashboard-product`, `profile-followers`, ...).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ViewId {
    Overview,
    Projects,
    #[default]
    DashboardProduct,
    DashboardTeam,
    DashboardEmployee,
    Courses,
    Jira,
    ProfileOverview,
    ProfileTamagotchi,
    ProfileCampaigns,
    ProfileDocuments,
    ProfileFollowers,
    ProfileCareer,
    ProfileJobCrafting,
    PrCoach,
    Account,
    Corporate,
    Blog,
    Messenger,
}

impl ViewId {
    /// Route string of this view.
    pub fn route(&self) -> &str {
        self.as_ref()
    }

    pub fn is_messenger(&self) -> bool {
        matches!(self, Self::Messenger)
    }
}
