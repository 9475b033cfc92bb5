//! Settings CLI command
//!
//! Shows the current settings, or updates and saves the ones given.

use clap::Args;

use crate::config::{ContactPaths, Settings};
use crate::error::ContactResult;
use crate::models::Category;

/// Options for `contacts config`; with none given, the settings are printed
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Quote CSV fields (false writes the legacy unquoted layout)
    #[arg(long, value_name = "BOOL")]
    pub csv_quoting: Option<bool>,

    /// Category for new contacts added without one
    #[arg(long, value_name = "CATEGORY")]
    pub default_category: Option<Category>,

    /// Ask for confirmation before deleting
    #[arg(long, value_name = "BOOL")]
    pub confirm_deletes: Option<bool>,
}

impl ConfigArgs {
    fn is_empty(&self) -> bool {
        self.csv_quoting.is_none() && self.default_category.is_none() && self.confirm_deletes.is_none()
    }

    /// Copy every given option onto `settings`
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(quoting) = self.csv_quoting {
            settings.csv_quoting = quoting;
        }
        if let Some(category) = self.default_category {
            settings.default_category = category;
        }
        if let Some(confirm) = self.confirm_deletes {
            settings.confirm_deletes = confirm;
        }
    }
}

/// Handle `contacts config`
pub fn handle_config_command(
    paths: &ContactPaths,
    settings: &mut Settings,
    args: ConfigArgs,
) -> ContactResult<()> {
    if !args.is_empty() {
        args.apply(settings);
        settings.save(paths)?;
        println!("Settings saved to {}", paths.settings_file().display());
        println!();
    }

    println!("Settings:");
    println!("  CSV quoting:      {}", settings.csv_quoting);
    println!("  Default category: {}", settings.default_category);
    println!("  Confirm deletes:  {}", settings.confirm_deletes);
    Ok(())
}
