pub mod analytics;
pub mod orders;
pub mod overview;
pub mod users;

use crate::config::{Preferences, Settings, Theme};
use crate::gateway::{DashboardGateway, HttpGateway};
use std::sync::Arc;

/// Everything a view needs at construction; there is no ambient global state.
#[derive(Clone)]
pub struct ViewContext {
    pub gateway: Arc<dyn DashboardGateway>,
    pub preferences: Preferences,
}

impl ViewContext {
    pub fn new(gateway: Arc<dyn DashboardGateway>, preferences: Preferences) -> Self {
        Self {
            gateway,
            preferences,
        }
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let gateway = HttpGateway::from_settings(settings)?;
        Ok(Self::new(Arc::new(gateway), settings.preferences))
    }

    pub fn theme(&self) -> Theme {
        self.preferences.theme
    }

    /// A copy of this context rendering with the other theme.
    pub fn with_theme_toggled(&self) -> Self {
        let mut next = self.clone();
        next.preferences.theme = next.preferences.theme.toggle();
        next
    }
}

impl std::fmt::Debug for ViewContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewContext")
            .field("preferences", &self.preferences)
            .finish_non_exhaustive()
    }
}
