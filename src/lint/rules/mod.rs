//! Built-in iPXE script rules.

mod menu_balance;
mod shebang;
mod undefined_label;
mod unknown_command;

pub use menu_balance::MenuBalanceRule;
pub use shebang::ShebangRule;
pub use undefined_label::UndefinedLabelRule;
pub use unknown_command::{UnknownCommandRule, KNOWN_COMMANDS};
