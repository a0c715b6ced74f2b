//! Menu rendering.
//!
//! A [`Renderer`] turns a [`MenuModel`] into script text. The only
//! built-in renderer is [`IpxeRenderer`], which emits a single iPXE script
//! with a main menu, one submenu per distribution and a section per entry.

use crate::distribution::{menu_back_label, menu_error_label};
use crate::menu::{AdditionalItem, ItemAction, MenuModel, MenuSettings};
use crate::resolver::{BootEntry, DistributionMenu};

/// Label every menu returns to.
pub const START_LABEL: &str = "start";

/// Shared failure handler for chainloaded items.
pub const CHAIN_ERROR_LABEL: &str = "chain_error";

/// Labels the script always owns, whatever the model contains.
pub const RESERVED_LABELS: [&str; 2] = [START_LABEL, CHAIN_ERROR_LABEL];

/// Turns a menu model into script text.
pub trait Renderer {
    fn render(&self, model: &MenuModel) -> String;
}

/// Renders iPXE scripts.
#[derive(Debug, Clone, Copy, Default)]
pub struct IpxeRenderer;

impl IpxeRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for IpxeRenderer {
    fn render(&self, model: &MenuModel) -> String {
        let mut script = Script::default();

        main_menu(&mut script, model);
        for menu in &model.distributions {
            submenu(&mut script, menu, &model.settings);
        }
        additional_items(&mut script, model);

        script.finish()
    }
}

/// Line buffer for script text.
#[derive(Default)]
struct Script {
    text: String,
}

impl Script {
    fn line(&mut self, line: impl AsRef<str>) {
        self.text.push_str(line.as_ref());
        self.text.push('\n');
    }

    fn blank(&mut self) {
        self.text.push('\n');
    }

    fn finish(self) -> String {
        self.text
    }
}

fn main_menu(script: &mut Script, model: &MenuModel) {
    let settings = &model.settings;

    script.line("#!ipxe");
    script.line("dhcp");
    script.blank();
    script.line(format!(":{}", START_LABEL));
    script.line(format!("menu {}", settings.title));

    if !model.distributions.is_empty() {
        script.line("item --gap -- Operating Systems:");
        for menu in &model.distributions {
            script.line(format!("item {} {}", menu.id, menu.label));
        }
    }

    if !model.additional_items.is_empty() {
        script.line("item --gap -- Other Options:");
        for item in &model.additional_items {
            script.line(format!("item {} {}", item.id, item.label));
        }
    }

    script.line(format!(
        "choose --default {} --timeout {} target && goto ${{target}}",
        settings.default_item, settings.timeout
    ));
    script.blank();
}

fn submenu(script: &mut Script, menu: &DistributionMenu, settings: &MenuSettings) {
    let error_label = menu_error_label(&menu.id);
    let back_label = menu_back_label(&menu.id);
    let guarded = menu.architectures().len() > 1;

    script.line(format!(":{}", menu.id));
    script.line(format!("menu {} - Select Version", menu.label));

    if menu.is_empty() {
        script.line("item --gap -- No versions available");
    }
    for entry in &menu.entries {
        if guarded {
            script.line(format!(
                "iseq ${{buildarch}} {} && item {} {} ||",
                entry.architecture, entry.id, entry.label
            ));
        } else {
            script.line(format!("item {} {}", entry.id, entry.label));
        }
    }

    script.line("item --gap --");
    script.line(format!("item {} Back to main menu", back_label));

    // Per-arch guards can hide the first entry, so only pin a default when
    // every item is visible.
    let default = match menu.entries.first() {
        Some(first) if !guarded => format!("--default {} ", first.id),
        Some(_) => String::new(),
        None => format!("--default {} ", back_label),
    };
    script.line(format!(
        "choose {}target && goto ${{target}} || goto {}",
        default, START_LABEL
    ));
    script.blank();

    for entry in &menu.entries {
        boot_entry(script, entry, &error_label);
    }

    if !menu.is_empty() {
        script.line(format!(":{}", error_label));
        script.line("echo");
        script.line("echo Boot failed! Press any key to return to menu...");
        script.line(format!("prompt --timeout {}", settings.error_timeout));
        script.line(format!("goto {}", menu.id));
        script.blank();
    }

    script.line(format!(":{}", back_label));
    script.line(format!("goto {}", START_LABEL));
    script.blank();
}

fn boot_entry(script: &mut Script, entry: &BootEntry, error_label: &str) {
    script.line(format!(":{}", entry.id));
    script.line(format!("initrd {}", entry.initrd_url));

    let mut chain = format!("chain {} initrd={}", entry.kernel_url, entry.initrd_name());
    if !entry.boot_params.is_empty() {
        chain.push(' ');
        chain.push_str(&entry.boot_params);
    }
    script.line(format!("{} || goto {}", chain, error_label));
    script.blank();
}

fn additional_items(script: &mut Script, model: &MenuModel) {
    for item in &model.additional_items {
        additional_item(script, item);
    }

    if model.has_chain_items() {
        script.line(format!(":{}", CHAIN_ERROR_LABEL));
        script.line("echo");
        script.line("echo Chain load failed! Press any key to return to menu...");
        script.line(format!("prompt --timeout {}", model.settings.error_timeout));
        script.line(format!("goto {}", START_LABEL));
        script.blank();
    }
}

fn additional_item(script: &mut Script, item: &AdditionalItem) {
    script.line(format!(":{}", item.id));
    match &item.action {
        ItemAction::Chain { url } => {
            script.line(format!("chain --autofree {} || goto {}", url, CHAIN_ERROR_LABEL));
        }
        ItemAction::Shell => {
            script.line("shell");
            script.line(format!("goto {}", START_LABEL));
        }
        ItemAction::Exit => script.line("exit"),
    }
    script.blank();
}
