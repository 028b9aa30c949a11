use crate::{
    config::{ProviderConfig, ProviderKind},
    parser::parse_itinerary_with_report,
    prompt::build_itinerary_prompt,
    schemas::{itinerary_schema, request_schema, validate_itinerary_str},
    types::{Accommodation, TripRequest},
    TripPlanner,
};
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, io::Read, time::Duration};
use tracing::{error, info, Level};

fn trip_args() -> Vec<Arg> {
    vec![
        Arg::new("destination")
            .short('d')
            .long("destination")
            .value_name("PLACE")
            .help("Destination city and country")
            .required(true),
        Arg::new("start")
            .short('s')
            .long("start")
            .value_name("YYYY-MM-DD")
            .help("First day of the trip")
            .value_parser(clap::value_parser!(NaiveDate))
            .required(true),
        Arg::new("end")
            .short('e')
            .long("end")
            .value_name("YYYY-MM-DD")
            .help("Last day of the trip (inclusive)")
            .value_parser(clap::value_parser!(NaiveDate))
            .required(true),
        Arg::new("budget")
            .short('b')
            .long("budget")
            .value_name("USD")
            .help("Budget per person")
            .value_parser(clap::value_parser!(f64))
            .default_value("1000"),
        Arg::new("group-size")
            .short('g')
            .long("group-size")
            .value_name("SIZE")
            .help("Group size, e.g. 2, 3-5 or 10+")
            .default_value("1"),
        Arg::new("preference")
            .short('p')
            .long("preference")
            .value_name("TAG")
            .help("Trip preference tag (repeatable)")
            .action(ArgAction::Append),
        Arg::new("accommodation")
            .short('a')
            .long("accommodation")
            .value_name("KIND")
            .help("hotel, hostel, apartment, resort or camping")
            .value_parser(clap::value_parser!(Accommodation))
            .default_value("hotel"),
        Arg::new("notes")
            .short('n')
            .long("notes")
            .value_name("TEXT")
            .help("Additional notes for the planner"),
    ]
}

fn provider_args() -> Vec<Arg> {
    vec![
        Arg::new("provider")
            .long("provider")
            .value_name("NAME")
            .help("gemini or chat (or set ITINERARY_PROVIDER)")
            .value_parser(clap::value_parser!(ProviderKind)),
        Arg::new("model")
            .short('m')
            .long("model")
            .value_name("MODEL")
            .help("Model name (or set ITINERARY_MODEL)"),
        Arg::new("api-key")
            .short('k')
            .long("api-key")
            .value_name("KEY")
            .help("Provider API key (or set GEMINI_API_KEY / OPENAI_API_KEY)"),
        Arg::new("base-url")
            .short('u')
            .long("base-url")
            .value_name("URL")
            .help("Provider base URL (or set OPENAI_BASE_URL / OPENROUTER_BASE_URL)"),
        Arg::new("timeout")
            .short('t')
            .long("timeout")
            .value_name("SECONDS")
            .help("Request timeout in seconds")
            .value_parser(clap::value_parser!(u64)),
        Arg::new("retries")
            .short('r')
            .long("retries")
            .value_name("COUNT")
            .help("Retries after a rate limit, server error or timeout")
            .value_parser(clap::value_parser!(usize)),
        Arg::new("report")
            .long("report")
            .help("Print what was extracted versus synthesized to stderr")
            .action(ArgAction::SetTrue),
    ]
}

fn input_arg() -> Arg {
    Arg::new("input")
        .help("File to read, or - for stdin")
        .default_value("-")
        .index(1)
}

fn build_command() -> Command {
    Command::new("trip-itinerary")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate and parse day-by-day trip itineraries")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log parser decisions")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("plan")
                .about("Ask the generative provider for an itinerary and print it as JSON")
                .args(trip_args())
                .args(provider_args()),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse previously generated itinerary text")
                .arg(input_arg())
                .args(trip_args())
                .arg(
                    Arg::new("report")
                        .long("report")
                        .help("Print what was extracted versus synthesized to stderr")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("prompt")
                .about("Print the prompt that would be sent to the provider")
                .args(trip_args()),
        )
        .subcommand(
            Command::new("schema")
                .about("Print the JSON schema of the itinerary output")
                .arg(
                    Arg::new("request")
                        .long("request")
                        .help("Print the trip request schema instead")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Check an itinerary JSON document")
                .arg(input_arg()),
        )
}

fn request_from_matches(matches: &ArgMatches) -> anyhow::Result<TripRequest> {
    let destination = matches
        .get_one::<String>("destination")
        .context("--destination is required")?;
    let start = *matches
        .get_one::<NaiveDate>("start")
        .context("--start is required")?;
    let end = *matches
        .get_one::<NaiveDate>("end")
        .context("--end is required")?;

    let mut request = TripRequest::new(destination.clone(), start, end);

    if let Some(budget) = matches.get_one::<f64>("budget") {
        request = request.with_budget(*budget);
    }
    if let Some(group_size) = matches.get_one::<String>("group-size") {
        request = request.with_group_size(group_size.clone());
    }
    if let Some(preferences) = matches.get_many::<String>("preference") {
        request = request.with_preferences(preferences.cloned());
    }
    if let Some(accommodation) = matches.get_one::<Accommodation>("accommodation") {
        request = request.with_accommodation(*accommodation);
    }
    if let Some(notes) = matches.get_one::<String>("notes") {
        request = request.with_notes(notes.clone());
    }

    Ok(request)
}

fn config_from_matches(matches: &ArgMatches) -> anyhow::Result<ProviderConfig> {
    config_from_lookup(matches, |name| env::var(name).ok())
}

fn config_from_lookup<F>(matches: &ArgMatches, lookup: F) -> anyhow::Result<ProviderConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let kind = match matches.get_one::<ProviderKind>("provider") {
        Some(kind) => *kind,
        None => match lookup("ITINERARY_PROVIDER") {
            Some(value) => value.parse()?,
            None => ProviderKind::default(),
        },
    };

    let mut config = match matches.get_one::<String>("api-key") {
        Some(api_key) => ProviderConfig::new(kind, api_key.clone()),
        None => ProviderConfig::from_lookup_for(kind, lookup)?,
    };

    if let Some(model) = matches.get_one::<String>("model") {
        config = config.with_model(model.clone());
    }
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(timeout) = matches.get_one::<u64>("timeout") {
        config = config.with_timeout(Duration::from_secs(*timeout));
    }
    if let Some(retries) = matches.get_one::<usize>("retries") {
        config = config.with_max_retries(*retries);
    }

    Ok(config)
}

fn read_input(matches: &ArgMatches) -> anyhow::Result<String> {
    let input = matches
        .get_one::<String>("input")
        .map(String::as_str)
        .unwrap_or("-");

    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read {}", input))
    }
}

/// CLI entry point for the trip-itinerary tool
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let matches = build_command().get_matches();

    let level = if matches.get_flag("verbose") {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match matches.subcommand() {
        Some(("plan", sub)) => {
            let request = request_from_matches(sub)?;
            let config = config_from_matches(sub)?;
            info!("Using {} model {}", config.kind, config.model);

            let planner = TripPlanner::from_config(config)?;
            match planner.plan_with_report(&request).await {
                Ok(planned) => {
                    if sub.get_flag("report") {
                        eprintln!("{}", serde_json::to_string_pretty(&planned.report)?);
                    }
                    println!("{}", serde_json::to_string_pretty(&planned.itinerary)?);
                    info!("Itinerary generated in {:?}", planned.duration);
                }
                Err(e) => {
                    error!("Itinerary generation failed: {}", e);
                    return Err(e.into());
                }
            }
        }
        Some(("parse", sub)) => {
            let request = request_from_matches(sub)?;
            request.validate()?;
            let text = read_input(sub)?;

            let (itinerary, report) = parse_itinerary_with_report(&text, &request);
            if sub.get_flag("report") {
                eprintln!("{}", serde_json::to_string_pretty(&report)?);
            }
            println!("{}", serde_json::to_string_pretty(&itinerary)?);
        }
        Some(("prompt", sub)) => {
            let request = request_from_matches(sub)?;
            request.validate()?;
            println!("{}", build_itinerary_prompt(&request));
        }
        Some(("schema", sub)) => {
            let schema = if sub.get_flag("request") {
                request_schema()
            } else {
                itinerary_schema()
            };
            println!("{}", serde_json::to_string_pretty(schema)?);
        }
        Some(("validate", sub)) => {
            let document = read_input(sub)?;
            let itinerary = validate_itinerary_str(&document)?;
            println!(
                "valid: {} days, {} activities, total ${}",
                itinerary.days.len(),
                itinerary.activity_count(),
                itinerary.total_cost()
            );
        }
        _ => unreachable!("subcommand_required is set"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        build_command().debug_assert();
    }

    #[test]
    fn test_request_from_arguments() {
        let matches = build_command().get_matches_from([
            "trip-itinerary",
            "prompt",
            "-d",
            "Kyoto",
            "-s",
            "2025-04-01",
            "-e",
            "2025-04-03",
            "-p",
            "Cultural",
            "-p",
            "Foodie",
            "-a",
            "hostel",
        ]);
        let (_, sub) = matches.subcommand().unwrap();
        let request = request_from_matches(sub).unwrap();

        assert_eq!(request.destination, "Kyoto");
        assert_eq!(request.duration_days(), 3);
        assert_eq!(request.preferences, vec!["Cultural", "Foodie"]);
        assert_eq!(request.accommodation, Accommodation::Hostel);
        assert_eq!(request.budget_per_person, 1000.0);
    }

    #[test]
    fn test_explicit_api_key_overrides() {
        let matches = build_command().get_matches_from([
            "trip-itinerary",
            "plan",
            "-d",
            "Kyoto",
            "-s",
            "2025-04-01",
            "-e",
            "2025-04-01",
            "--provider",
            "chat",
            "-k",
            "sk-cli",
            "-m",
            "some/model",
            "-r",
            "0",
        ]);
        let (_, sub) = matches.subcommand().unwrap();
        let config = config_from_matches(sub).unwrap();

        assert_eq!(config.kind, ProviderKind::ChatCompletions);
        assert_eq!(config.api_key, "sk-cli");
        assert_eq!(config.model, "some/model");
        assert_eq!(config.max_retries, 0);
    }

    fn plan_matches(extra: &[&str]) -> ArgMatches {
        let mut args = vec![
            "trip-itinerary",
            "plan",
            "-d",
            "Kyoto",
            "-s",
            "2025-04-01",
            "-e",
            "2025-04-01",
        ];
        args.extend_from_slice(extra);
        let matches = build_command().get_matches_from(args);
        let (_, sub) = matches.subcommand().unwrap();
        sub.clone()
    }

    #[test]
    fn test_provider_flag_reads_its_own_env_key() {
        let sub = plan_matches(&["--provider", "chat"]);
        let config = config_from_lookup(&sub, |name| {
            (name == "OPENAI_API_KEY").then(|| "sk-env".to_string())
        })
        .unwrap();

        assert_eq!(config.kind, ProviderKind::ChatCompletions);
        assert_eq!(config.api_key, "sk-env");
    }

    #[test]
    fn test_provider_flag_beats_env_provider() {
        let sub = plan_matches(&["--provider", "chat"]);
        let config = config_from_lookup(&sub, |name| match name {
            "ITINERARY_PROVIDER" => Some("gemini".to_string()),
            "GEMINI_API_KEY" => Some("g-key".to_string()),
            "OPENAI_API_KEY" => Some("sk-env".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.kind, ProviderKind::ChatCompletions);
        assert_eq!(config.api_key, "sk-env");
    }

    #[test]
    fn test_env_provider_used_without_flag() {
        let sub = plan_matches(&[]);
        let config = config_from_lookup(&sub, |name| match name {
            "ITINERARY_PROVIDER" => Some("openrouter".to_string()),
            "OPENAI_API_KEY" => Some("sk-env".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.kind, ProviderKind::ChatCompletions);
    }
}
