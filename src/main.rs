use arr_request::{
    ActionRow, ArrRequestError, Component, ComponentInteraction, ConfigError, ConnectionArgs,
    Interaction, Reply, ReplyMode, RequestDesk,
};
use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Select};
use std::process;
use thiserror::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Request movies and TV shows for Radarr and Sonarr from the terminal.
///
/// Works exactly like the chat commands: search, pick a result, pick the
/// seasons (TV shows only) and confirm.
#[derive(Parser)]
#[command(name = "arr-request", version)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search for a movie and add it to Radarr
    Movies {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Search for a TV show and add it to Sonarr
    Tvshows {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Check that the bot answers
    Ping,
}

impl Command {
    fn interaction(&self) -> Interaction {
        let (name, query) = match self {
            Command::Movies { query } => ("movies", query.join(" ")),
            Command::Tvshows { query } => ("tvshows", query.join(" ")),
            Command::Ping => ("ping", String::new()),
        };

        Interaction::Command {
            name: name.to_string(),
            query,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Setup(#[from] ArrRequestError),

    #[error("Terminal error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

fn configure_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("arr_request=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints a reply the way a chat client would show it
fn print_reply(reply: &Reply) {
    if reply.mode == ReplyMode::Ephemeral {
        println!("(only visible to you)");
    }

    if let Some(content) = &reply.content {
        println!("{}", content);
    }

    for embed in &reply.embeds {
        println!("\n=== {} ===", embed.title);
        if let Some(description) = &embed.description {
            println!("{}\n", description);
        }
        for field in &embed.fields {
            println!("{}", field.name);
            for line in field.value.lines() {
                println!("  {}", line);
            }
        }
    }
    println!();
}

/// The control a user would act on next: the last enabled one on the message
fn next_control(rows: &[ActionRow]) -> Option<&Component> {
    rows.iter()
        .rev()
        .flat_map(|row| row.0.iter().rev())
        .find(|component| component.is_enabled())
}

/// Lets the user operate a control. Returns the picked option values, or
/// `None` if the user backed out.
fn operate(component: &Component) -> Result<Option<Vec<String>>, dialoguer::Error> {
    match component {
        Component::Select(menu) => {
            let items: Vec<String> = menu
                .options
                .iter()
                .map(|option| format!("{}  ({})", option.label, option.description))
                .collect();

            let choice = Select::new()
                .with_prompt(menu.placeholder.as_str())
                .items(&items)
                .default(0)
                .interact_opt()?;

            Ok(choice.map(|index| vec![menu.options[index].value.clone()]))
        }
        Component::Button(button) => {
            let confirmed = Confirm::new()
                .with_prompt(button.label.as_str())
                .default(true)
                .interact_opt()?;

            Ok(confirmed.filter(|yes| *yes).map(|_| Vec::new()))
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.connection.into_config()?;
    let desk = RequestDesk::connect(&config)?;

    if !matches!(cli.command, Command::Ping) {
        for report in desk.check_connections() {
            if report.is_connected() {
                info!("{}", report);
            } else {
                warn!("{}", report);
            }
        }
    }

    let mut reply = desk.handle(&cli.command.interaction());
    let mut on_screen: Vec<ActionRow> = Vec::new();

    loop {
        print_reply(&reply);

        match reply.mode {
            ReplyMode::Message | ReplyMode::Update => on_screen = reply.components.clone(),
            ReplyMode::Ephemeral => return Ok(()),
        }

        let Some(component) = next_control(&on_screen) else {
            return Ok(());
        };
        let Some(values) = operate(component)? else {
            debug!("Selection aborted");
            return Ok(());
        };

        reply = desk.handle(&Interaction::Component(ComponentInteraction {
            custom_id: component.custom_id().to_string(),
            values,
            message_components: on_screen.clone(),
        }));
    }
}

fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    configure_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
