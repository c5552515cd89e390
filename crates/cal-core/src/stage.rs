use std::fmt;

/// Pipeline stage.
///
/// Every stage before [`Stage::Dispatching`] can end in [`Stage::Failed`];
/// dispatch and settling never do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Stage {
    #[default]
    Idle,
    FetchingIdentities,
    FetchingCourses,
    FetchingConfig,
    Matching,
    Transforming,
    Dispatching,
    /// Dispatch has returned; submissions are still completing.
    Settling,
    Failed,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::FetchingIdentities => "fetching identities",
            Self::FetchingCourses => "fetching courses",
            Self::FetchingConfig => "fetching configuration",
            Self::Matching => "matching",
            Self::Transforming => "transforming",
            Self::Dispatching => "dispatching",
            Self::Settling => "settling",
            Self::Failed => "failed",
        }
    }

    /// True while the sequential part of a run is in progress.
    pub fn is_loading(self) -> bool {
        matches!(
            self,
            Self::FetchingIdentities
                | Self::FetchingCourses
                | Self::FetchingConfig
                | Self::Matching
                | Self::Transforming
        )
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
