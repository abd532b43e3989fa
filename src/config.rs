//! Report configuration loaded from TOML.
//!
//! ```toml
//! title = "GiNZA NLP Library"
//! placeholder = "-"
//!
//! [diagram]
//! compact = false
//!
//! [navigation]
//! region = "main"
//!
//! [labels.pos]
//! NOUN = "名詞(普通)"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::annotation_table::DEFAULT_PLACEHOLDER;
use crate::arc_diagram::DiagramOptions;
use crate::error::{ReportError, ReportResult};
use crate::localize::Localizer;
use crate::surface::Region;

/// Settings for one report run. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Page title. The binary also writes it as the page's `H1` heading,
    /// outside the table of contents.
    pub title: String,
    /// Shown in table cells for absent attributes.
    pub placeholder: String,
    /// Language code given to tokens read from CoNLL-U.
    pub lang: String,
    pub diagram: DiagramOptions,
    /// URL of a script defining `renderDiagram`, loaded by the HTML page to
    /// draw the diagrams. Without it the page only carries the diagram data.
    pub renderer: Option<String>,
    pub navigation: NavigationConfig,
    pub labels: LabelOverrides,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "GiNZA NLP Library".to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            lang: "ja".to_string(),
            diagram: DiagramOptions::default(),
            renderer: None,
            navigation: NavigationConfig::default(),
            labels: LabelOverrides::default(),
        }
    }
}

/// Where the table of contents is placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub region: Region,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            region: Region::Sidebar,
        }
    }
}

/// Display labels added to or replacing the built-in Japanese tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelOverrides {
    pub pos: HashMap<String, String>,
    pub dep: HashMap<String, String>,
}

impl ReportConfig {
    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> ReportResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ReportError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::parse(&content).map_err(|message| ReportError::Config {
            path: path.display().to_string(),
            message,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Built-in Japanese labels with the configured overrides applied.
    pub fn localizer(&self) -> Localizer {
        let mut localizer = Localizer::japanese();
        localizer.pos.extend(self.labels.pos.clone());
        localizer.dep.extend(self.labels.dep.clone());
        localizer
    }
}
