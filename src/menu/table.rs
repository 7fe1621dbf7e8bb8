use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Navigation content, declared once and rendered by both presentations.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
pub struct MenuTable {
    /// Expandable groups ("Product", "Company", ...).
    #[serde(default)]
    pub sections: Vec<MenuSection>,
    /// Plain top-level links shown next to the groups.
    #[serde(default)]
    pub links: Vec<MenuEntry>,
}

#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct MenuSection {
    pub id: String,
    /// Heading shown on the trigger; falls back to `id`.
    pub label: Option<String>,
    #[serde(default)]
    pub entries: Vec<MenuEntry>,
}

/// An entry as supplied by the content layer. Every field is optional so a
/// half-filled entry still deserializes; it just never renders.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
pub struct MenuEntry {
    pub name: Option<String>,
    pub description: Option<String>,
    pub href: Option<String>,
    pub icon: Option<String>,
}

/// A renderable link: name and destination are guaranteed present.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MenuLink<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub href: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'a str>,
}

impl MenuEntry {
    pub fn as_link(&self) -> Option<MenuLink<'_>> {
        let name = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())?;
        let href = self.href.as_deref().map(str::trim).filter(|h| !h.is_empty())?;
        Some(MenuLink {
            name,
            description: self.description.as_deref(),
            href,
            icon: self.icon.as_deref(),
        })
    }
}

impl MenuSection {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }

    pub fn links(&self) -> impl Iterator<Item = MenuLink<'_>> {
        self.entries.iter().filter_map(MenuEntry::as_link)
    }
}

impl MenuTable {
    /// Section ids key the overlay's disclosure state, so they must be unique.
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        match self.section_ids().find(|id| !seen.insert(*id)) {
            Some(id) => Err(format!("duplicate menu section id '{}'", id)),
            None => Ok(()),
        }
    }

    pub fn section_ids(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.id.as_str())
    }

    /// Every renderable destination, grouped links first.
    pub fn links(&self) -> impl Iterator<Item = MenuLink<'_>> {
        self.sections
            .iter()
            .flat_map(|s| s.links())
            .chain(self.links.iter().filter_map(MenuEntry::as_link))
    }

    /// The table with malformed entries dropped, ready to hand to a renderer.
    pub fn render(&self) -> RenderedMenu<'_> {
        RenderedMenu {
            sections: self
                .sections
                .iter()
                .map(|s| RenderedSection {
                    id: &s.id,
                    label: s.label(),
                    links: s.links().collect(),
                })
                .collect(),
            links: self.links.iter().filter_map(MenuEntry::as_link).collect(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct RenderedMenu<'a> {
    pub sections: Vec<RenderedSection<'a>>,
    pub links: Vec<MenuLink<'a>>,
}

#[derive(Serialize, Debug)]
pub struct RenderedSection<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub links: Vec<MenuLink<'a>>,
}
