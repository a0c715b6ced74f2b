//! Menu model and assembly.
//!
//! The [`MenuModel`] is everything a renderer needs: presentation
//! settings, one [`DistributionMenu`] per enabled distribution, and the
//! additional items that follow them. Assembly is pure; all network work
//! has already happened in the resolver.

use crate::config::schema::{AdditionalItemConfig, ItemKind, MenuConfig};
use crate::error::{ElfshoeError, Result};
use crate::resolver::DistributionMenu;

/// Presentation settings for the main menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSettings {
    pub title: String,
    pub default_item: String,
    /// Main menu timeout in milliseconds.
    pub timeout: u64,
    /// Prompt timeout after a failed boot, in milliseconds.
    pub error_timeout: u64,
}

impl From<&MenuConfig> for MenuSettings {
    fn from(config: &MenuConfig) -> Self {
        Self {
            title: config.title.clone(),
            default_item: config.default_item.clone(),
            timeout: config.timeout,
            error_timeout: config.error_timeout.unwrap_or(config.timeout),
        }
    }
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self::from(&MenuConfig::default())
    }
}

/// What an additional item does when selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemAction {
    /// Chainload another iPXE script.
    Chain { url: String },
    /// Drop to the iPXE shell.
    Shell,
    /// Leave iPXE.
    Exit,
}

/// A static menu entry not tied to any distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdditionalItem {
    pub id: String,
    pub label: String,
    pub action: ItemAction,
}

impl AdditionalItem {
    /// Convert the `index`-th entry of `additional_items`.
    pub fn from_config(index: usize, config: &AdditionalItemConfig) -> Result<Self> {
        let field = |name: &str| format!("additional_items[{}].{}", index, name);
        let missing = |name: &str| ElfshoeError::InvalidField {
            field: field(name),
            message: "missing required field".to_string(),
        };

        if config.id.trim().is_empty() {
            return Err(missing("id"));
        }
        let action = match config.kind.ok_or_else(|| missing("type"))? {
            ItemKind::Chain => ItemAction::Chain {
                url: config.url.clone().ok_or_else(|| missing("url"))?,
            },
            ItemKind::Shell => ItemAction::Shell,
            ItemKind::Exit => ItemAction::Exit,
        };

        Ok(Self {
            id: config.id.clone(),
            label: if config.label.is_empty() {
                config.id.clone()
            } else {
                config.label.clone()
            },
            action,
        })
    }
}

/// The complete menu handed to a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MenuModel {
    pub settings: MenuSettings,
    pub distributions: Vec<DistributionMenu>,
    pub additional_items: Vec<AdditionalItem>,
}

impl MenuModel {
    /// Whether any additional item chainloads a script.
    pub fn has_chain_items(&self) -> bool {
        self.additional_items
            .iter()
            .any(|item| matches!(item.action, ItemAction::Chain { .. }))
    }

    /// Total number of boot entries across all distributions.
    pub fn entry_count(&self) -> usize {
        self.distributions.iter().map(|d| d.entries.len()).sum()
    }
}

/// Combine resolved distributions and additional items into a menu.
///
/// Order is preserved: distributions as resolved (configuration order),
/// then additional items in configuration order.
pub fn assemble(
    settings: MenuSettings,
    distributions: Vec<DistributionMenu>,
    additional_items: Vec<AdditionalItem>,
) -> MenuModel {
    MenuModel {
        settings,
        distributions,
        additional_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_config(yaml: &str) -> AdditionalItemConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn error_timeout_defaults_to_timeout() {
        let settings = MenuSettings::from(&MenuConfig {
            timeout: 5000,
            ..Default::default()
        });
        assert_eq!(settings.error_timeout, 5000);

        let settings = MenuSettings::from(&MenuConfig {
            timeout: 5000,
            error_timeout: Some(1000),
            ..Default::default()
        });
        assert_eq!(settings.error_timeout, 1000);
    }

    #[test]
    fn default_settings() {
        let settings = MenuSettings::default();
        assert_eq!(settings.title, "Network Boot Menu");
        assert_eq!(settings.default_item, "shell");
        assert_eq!(settings.timeout, 30000);
    }

    #[test]
    fn chain_item_requires_url() {
        let err = AdditionalItem::from_config(2, &item_config("{id: nb, label: NB, type: chain}"))
            .unwrap_err();
        assert!(err.to_string().contains("additional_items[2].url"));
    }

    #[test]
    fn item_kinds_convert() {
        let chain = AdditionalItem::from_config(
            0,
            &item_config("{id: nb, label: netboot.xyz, type: chain, url: 'http://boot.netboot.xyz'}"),
        )
        .unwrap();
        assert_eq!(
            chain.action,
            ItemAction::Chain {
                url: "http://boot.netboot.xyz".into()
            }
        );

        let shell =
            AdditionalItem::from_config(1, &item_config("{id: shell, type: shell}")).unwrap();
        assert_eq!(shell.action, ItemAction::Shell);
        assert_eq!(shell.label, "shell");
    }

    #[test]
    fn missing_type_is_rejected() {
        let err = AdditionalItem::from_config(0, &item_config("{id: x, label: X}")).unwrap_err();
        assert!(err.to_string().contains("additional_items[0].type"));
    }

    #[test]
    fn assemble_keeps_order() {
        let menus = vec![
            DistributionMenu::new("fedora_menu", "fedora", "Fedora"),
            DistributionMenu::new("debian_menu", "debian", "Debian"),
        ];
        let items = vec![
            AdditionalItem {
                id: "shell".into(),
                label: "Shell".into(),
                action: ItemAction::Shell,
            },
            AdditionalItem {
                id: "nb".into(),
                label: "netboot".into(),
                action: ItemAction::Chain {
                    url: "http://nb".into(),
                },
            },
        ];

        let model = assemble(MenuSettings::default(), menus, items);
        let ids: Vec<_> = model.distributions.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["fedora_menu", "debian_menu"]);
        assert_eq!(model.additional_items[1].id, "nb");
        assert!(model.has_chain_items());
        assert_eq!(model.entry_count(), 0);
    }
}
