//! Launcher feedback model
//!
//! Serializes to the script-filter JSON the launcher reads from stdout.

use std::collections::BTreeMap;

use serde::Serialize;

/// Modifier key subtitle for document actions
pub const ALT_SUBTITLE: &str = "Copy share link";
pub const CMD_SUBTITLE: &str = "Open in WPS";
pub const CTRL_SUBTITLE: &str = "Reveal in Finder";

/// Icon file shipped with the workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Icon {
    pub path: String,
}

impl Icon {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Alternate subtitle shown while a modifier key is held
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Modifier {
    pub subtitle: String,
    pub valid: bool,
}

/// One selectable row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Item {
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subtitle: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(rename = "quicklookurl", skip_serializing_if = "Option::is_none")]
    pub quicklook: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub mods: BTreeMap<String, Modifier>,
}

impl Item {
    /// Selectable item with a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            valid: true,
            ..Self::default()
        }
    }

    /// Non-selectable informational row
    pub fn notice(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            valid: false,
            icon: Some(Icon::new(super::icons::WARNING)),
            ..Self::default()
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    pub fn icon(mut self, path: impl Into<String>) -> Self {
        self.icon = Some(Icon::new(path));
        self
    }

    pub fn autocomplete(mut self, text: impl Into<String>) -> Self {
        self.autocomplete = Some(text.into());
        self
    }

    pub fn quicklook(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        if !url.is_empty() {
            self.quicklook = Some(url);
        }
        self
    }

    pub fn var(mut self, key: &str, value: impl Into<String>) -> Self {
        self.variables.insert(key.to_string(), value.into());
        self
    }

    /// Attach the share-link and open-in-app modifier subtitles
    pub fn document_actions(mut self) -> Self {
        for (key, subtitle) in [("alt", ALT_SUBTITLE), ("cmd", CMD_SUBTITLE)] {
            self.mods.insert(
                key.to_string(),
                Modifier {
                    subtitle: subtitle.to_string(),
                    valid: true,
                },
            );
        }
        self
    }

    /// Attach the reveal-in-file-manager modifier for items with a local copy
    pub fn reveal_action(mut self) -> Self {
        if self.quicklook.is_some() {
            self.mods.insert(
                "ctrl".to_string(),
                Modifier {
                    subtitle: CTRL_SUBTITLE.to_string(),
                    valid: true,
                },
            );
        }
        self
    }
}

/// Ordered result items for one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub items: Vec<Item>,
}

impl Feedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feedback consisting of a single notice
    pub fn notice(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            items: vec![Item::notice(title, subtitle)],
        }
    }

    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
