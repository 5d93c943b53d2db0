mod handlers;

use std::fmt;
use std::str::FromStr;

use axum::Router;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Top-level views of the app.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Tab {
    #[default]
    FoodLog,
    MacroTracker,
    AiAdvice,
    Progress,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::FoodLog,
        Tab::MacroTracker,
        Tab::AiAdvice,
        Tab::Progress,
        Tab::Profile,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Tab::FoodLog => "food-log",
            Tab::MacroTracker => "macro-tracker",
            Tab::AiAdvice => "ai-advice",
            Tab::Progress => "progress",
            Tab::Profile => "profile",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::FoodLog => "Food Log",
            Tab::MacroTracker => "Macro Tracker",
            Tab::AiAdvice => "AI Advice",
            Tab::Progress => "Progress",
            Tab::Profile => "Profile",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Tab {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|t| t.id() == s)
            .ok_or_else(|| AppError::InvalidTab(s.to_string()))
    }
}

/// Which tab is active. Unknown ids are rejected and leave the selection as is.
#[derive(Debug, Clone, Default)]
pub struct TabController {
    active: Tab,
}

impl TabController {
    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn select(&mut self, id: &str) -> Result<Tab, AppError> {
        let tab = id.parse::<Tab>()?;
        debug!(from = %self.active, to = %tab, "tab selected");
        self.active = tab;
        Ok(tab)
    }
}

pub fn router() -> Router<AppState> {
    handlers::tab_routes()
}
