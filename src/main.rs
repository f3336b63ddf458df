use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use vuca_diag::config::Settings;
use vuca_diag::respondent::RespondentInfo;
use vuca_diag::scoring::AssessmentConfig;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INVALID_INPUT: i32 = 1;
const EXIT_CONFIG: i32 = 2;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Take the assessment in the interactive TUI (default if no subcommand)
    Run,
    /// Score ten answers without the TUI
    Score {
        /// Answers to the ten questions, in order, each between 1 and 10
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        answers: Vec<i64>,

        /// Print the result as JSON
        #[arg(long, conflicts_with_all = ["tsv", "report"])]
        json: bool,

        /// Print score, tier key, tier label and recommendation count tab-separated
        #[arg(long, conflicts_with = "report")]
        tsv: bool,

        /// Print the full plain-text report (requires respondent details)
        #[arg(long)]
        report: bool,

        /// Forward the result to the configured form backend (requires respondent details)
        #[arg(long)]
        submit: bool,

        #[command(flatten)]
        respondent: RespondentArgs,
    },
    /// List the questionnaire
    Questions {
        /// Print the questions as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a config file interactively
    Init,
}

#[derive(Args, Debug, Default)]
struct RespondentArgs {
    /// Respondent full name
    #[arg(long)]
    name: Option<String>,
    /// Respondent company
    #[arg(long)]
    company: Option<String>,
    /// Respondent role
    #[arg(long)]
    role: Option<String>,
    /// Respondent country
    #[arg(long)]
    country: Option<String>,
    /// Respondent email
    #[arg(long)]
    email: Option<String>,
    /// Respondent WhatsApp number
    #[arg(long)]
    phone: Option<String>,
}

impl RespondentArgs {
    fn into_info(self) -> RespondentInfo {
        RespondentInfo {
            name: self.name.unwrap_or_default(),
            company: self.company.unwrap_or_default(),
            role: self.role.unwrap_or_default(),
            country: self.country.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "vuca-diag")]
#[command(about = "VUCA supply-chain self-assessment", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file (defaults to ~/.config/vuca-diag/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Never forward results, even if a submission endpoint is configured
    #[arg(long, global = true)]
    no_submit: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(vuca_diag::stderr_buffer::writer)
        .with_target(false)
        .init();

    let command = cli.command.unwrap_or(Commands::Run);

    // Init runs before loading, so a broken config can be replaced
    if let Commands::Init = command {
        if let Err(e) = vuca_diag::config::init::run_init_wizard(cli.config) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let settings = match vuca_diag::config::load_settings(cli.config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = vuca_diag::config::validate_settings(&settings) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let assessment = AssessmentConfig::default();
    if let Err(errors) = vuca_diag::scoring::validate_assessment(&assessment) {
        eprintln!("Assessment errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let use_colors = !cli.no_color && vuca_diag::output::should_use_colors();
    let submit_enabled = !cli.no_submit;

    let code = match command {
        Commands::Run => run_interactive(assessment, settings, submit_enabled).await,
        Commands::Score {
            answers,
            json,
            tsv,
            report,
            submit,
            respondent,
        } => {
            let opts = ScoreOptions {
                json,
                tsv,
                report,
                submit: submit && submit_enabled,
                use_colors,
            };
            run_score(&answers, respondent.into_info(), &assessment, &settings, opts).await
        }
        Commands::Questions { json } => {
            if json {
                match serde_json::to_string_pretty(&assessment.questions) {
                    Ok(out) => println!("{}", out),
                    Err(e) => {
                        eprintln!("Failed to serialize questions: {}", e);
                        std::process::exit(EXIT_CONFIG);
                    }
                }
            } else {
                println!(
                    "{}",
                    vuca_diag::output::format_question_list(&assessment, use_colors)
                );
            }
            EXIT_SUCCESS
        }
        Commands::Init => EXIT_SUCCESS,
    };

    std::process::exit(code);
}

async fn run_interactive(assessment: AssessmentConfig, settings: Settings, submit_enabled: bool) -> i32 {
    let client = if submit_enabled && settings.submission.is_some() {
        match vuca_diag::submit::create_client() {
            Ok(c) => Some(c),
            Err(e) => {
                // Results still work without the side channel
                tracing::warn!("Could not create HTTP client, submission disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    let theme = vuca_diag::tui::resolve_theme(settings.theme);
    let app = vuca_diag::tui::App::new(assessment, settings, theme, client.is_some());

    match vuca_diag::tui::run_tui(app, client).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("TUI error: {:#}", e);
            EXIT_CONFIG
        }
    }
}

struct ScoreOptions {
    json: bool,
    tsv: bool,
    report: bool,
    submit: bool,
    use_colors: bool,
}

async fn run_score(
    answers: &[i64],
    respondent: RespondentInfo,
    assessment: &AssessmentConfig,
    settings: &Settings,
    opts: ScoreOptions,
) -> i32 {
    let scored = vuca_diag::scoring::parse_answers(answers)
        .and_then(|answers| vuca_diag::scoring::score(&answers, assessment));
    let result = match scored {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return if e.is_invalid_input() {
                EXIT_INVALID_INPUT
            } else {
                EXIT_CONFIG
            };
        }
    };

    let needs_respondent = opts.report || opts.submit;
    let respondent = respondent.normalized();
    if needs_respondent {
        if let Err(errors) = vuca_diag::respondent::validate_respondent(&respondent) {
            eprintln!("Respondent details are required for --report and --submit:");
            eprintln!("{}", vuca_diag::output::format_field_errors(&errors));
            return EXIT_INVALID_INPUT;
        }
    }

    let completed_at = chrono::Local::now();

    if opts.json {
        match vuca_diag::output::format_json(&result) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Failed to serialize result: {}", e);
                return EXIT_CONFIG;
            }
        }
    } else if opts.tsv {
        println!("{}", vuca_diag::output::format_tsv(&result));
    } else if opts.report {
        println!(
            "{}",
            vuca_diag::report::generate_report_text(
                &respondent,
                &result,
                &settings.contact,
                completed_at.naive_local(),
            )
        );
    } else {
        println!("{}", vuca_diag::output::format_result(&result, opts.use_colors));
    }

    if opts.submit {
        match (&settings.submission, vuca_diag::submit::create_client()) {
            (None, _) => {
                tracing::warn!("--submit given but no submission endpoint is configured");
            }
            (Some(_), Err(e)) => {
                tracing::warn!("Could not create HTTP client: {}", e);
            }
            (Some(submission), Ok(client)) => {
                let sent = vuca_diag::submit::submit_report(
                    &client,
                    submission,
                    &respondent,
                    &result,
                    completed_at.with_timezone(&chrono::Utc),
                )
                .await;
                if sent {
                    eprintln!("Report submitted.");
                } else {
                    // Best-effort: the result above still stands
                    eprintln!("Report could not be submitted.");
                }
            }
        }
    }

    EXIT_SUCCESS
}
