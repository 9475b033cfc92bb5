use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use contactbook::cli::{
    handle_config_command, handle_contact_command, ConfigArgs, ContactCommands, Session,
};
use contactbook::config::{ContactPaths, Settings};
use contactbook::logging::init_logging;
use contactbook::models::SystemClock;
use contactbook::services::ContactService;
use contactbook::storage::{ContactRepository, LoadOutcome};

#[derive(Parser)]
#[command(
    name = "contacts",
    version,
    about = "Terminal address book for personal contacts",
    long_about = "Contact Book keeps your personal contacts in a compact local file. \
                  Run it without a subcommand for the interactive menu, or use the \
                  subcommands for one-shot edits and exports."
)]
struct Cli {
    /// Store file to use instead of the default contacts.dat
    #[arg(long, global = true, env = "CONTACTBOOK_FILE", value_name = "PATH")]
    file: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive menu (default)
    #[command(alias = "menu")]
    Interactive,

    /// Show resolved paths and settings
    Info,

    /// Show or change settings
    Config(ConfigArgs),

    #[command(flatten)]
    Contact(ContactCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut paths = ContactPaths::new()?;
    if let Some(file) = cli.file {
        paths = paths.with_store_file(file);
    }
    let mut settings = Settings::load_or_default(&paths);

    let mut repo = ContactRepository::new(paths.store_file());
    report_load(&repo.load());

    let clock = SystemClock;
    let mut service =
        ContactService::new(&mut repo, &clock).with_default_category(settings.default_category);

    let result = match cli.command {
        None | Some(Commands::Interactive) => {
            let csv_path = paths.csv_file();
            let stdin = io::stdin();
            let mut session = Session::new(
                &mut service,
                &settings,
                &csv_path,
                stdin.lock(),
                io::stdout(),
            );
            if let Err(e) = session.run() {
                tracing::error!(error = %e, "interactive session ended early");
            }
            Ok(())
        }
        Some(Commands::Info) => {
            println!("Contact Book Configuration");
            println!("==========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Store file:     {}", paths.store_file().display());
            println!("Backup file:    {}", paths.backup_file().display());
            println!("CSV export:     {}", paths.csv_file().display());
            println!();
            println!("Settings:");
            println!("  CSV quoting:      {}", settings.csv_quoting);
            println!("  Default category: {}", settings.default_category);
            println!("  Confirm deletes:  {}", settings.confirm_deletes);
            println!();
            println!("Contacts loaded: {}", service.list_contacts().len());
            Ok(())
        }
        Some(Commands::Config(args)) => handle_config_command(&paths, &mut settings, args),
        Some(Commands::Contact(cmd)) => handle_contact_command(&mut service, &settings, &paths, cmd),
    };

    if !service.flush() {
        eprintln!("Warning: your changes may not have been saved!");
    }

    result?;
    Ok(())
}

fn report_load(outcome: &LoadOutcome) {
    if let LoadOutcome::Recovered { reason, backup } = outcome {
        eprintln!("Error loading contacts: {}", reason);
        eprintln!("Starting with an empty contact book.");
        match backup {
            Some(path) => eprintln!("The unreadable file was copied to {}", path.display()),
            None => eprintln!("Warning: the unreadable file could not be backed up."),
        }
    }
}
