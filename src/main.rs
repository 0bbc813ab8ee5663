use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rift_coach::api::client::RiotApiClient;
use rift_coach::api::endpoints::Platform;
use rift_coach::api::openai::OpenAiClient;
use rift_coach::coaching::CoachingService;
use rift_coach::config::Config;
use rift_coach::display::output::{
    display_advice, display_error, display_info, display_profile, display_success,
};
use rift_coach::lookup::{LookupRequest, ProfileLookup};
use rift_coach::server::{self, AppState};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "Rift Coach")]
#[command(about = "Ranked profile analysis and AI coaching for League of Legends")]
#[command(long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Bind address (overrides RIFT_COACH_BIND)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Look up a player and print their ranked summary
    Profile {
        /// Riot Game Name
        game_name: String,

        /// Riot Tag (tag line)
        tag_line: String,

        /// Region (default: RIOT_REGION or na1)
        #[arg(short, long)]
        region: Option<Platform>,

        /// Also request coaching advice for the generated prompt
        #[arg(long)]
        coach: bool,

        /// Print the raw JSON report instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Send a free-text prompt to the coach
    Coach {
        /// Prompt text
        prompt: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    // Credentials are checked once, before any work starts.
    let mut config = Config::from_env()?;

    match args.command {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind_address = bind;
            }
            let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
            runtime.block_on(server::serve(AppState::from_config(config)))
        }
        Command::Profile {
            game_name,
            tag_line,
            region,
            coach,
            json,
        } => {
            let request = LookupRequest {
                game_name,
                tag_line,
                region: region.unwrap_or(config.region),
            };
            run_profile(&config, request, coach, json)
        }
        Command::Coach { prompt } => {
            let generator = OpenAiClient::new(&config);
            let advice = CoachingService::new(&generator).advise(Some(&prompt))?;
            display_advice(&advice);
            Ok(())
        }
    }
}

fn run_profile(config: &Config, request: LookupRequest, coach: bool, json: bool) -> Result<()> {
    display_info(&format!(
        "Fetching data for {} in region {}",
        request.riot_id(),
        request.region
    ));

    let client = RiotApiClient::new(config);
    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::with_template("{spinner} {msg} [{bar:30}] {pos}/{len}")
            .context("invalid progress template")?,
    );
    progress.set_message("Fetching match details");

    let report = ProfileLookup::new(&client)
        .with_progress(progress)
        .run(&request)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display_success(&format!(
            "Analyzed {} ranked games for {}",
            report.aggregation.matches.len(),
            request.riot_id()
        ));
        display_profile(&report);
    }

    if coach {
        display_info("Requesting coaching advice...");
        let generator = OpenAiClient::new(config);
        let advice = CoachingService::new(&generator)
            .advise(Some(&report.aggregation.coaching_prompt))?;
        display_advice(&advice);
    }

    Ok(())
}
