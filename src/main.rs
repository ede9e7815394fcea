//! ZÉNA CLI
//!
//! Usage:
//!   zena --text "your text here"               # RPS analysis
//!   zena --text "text" --emotional             # Emotional analysis + reply
//!   zena --interactive                         # Line-by-line mode
//!   zena --serve                               # HTTP API server
//!   zena --text "text" --json                  # JSON output

use clap::Parser;
use colored::{ColoredString, Colorize};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::error;
use tracing_subscriber::EnvFilter;

use zena::config::{Config, DEFAULT_ADDR};
use zena::core::{
    run_server, AlertDispatcher, AnalysisStore, EmotionalAnalyzer, ReplyComposer, RpsEngine,
};
use zena::types::{
    AnalysisInput, AnalysisRecord, AnonymizedAlert, EmotionalAnalysis, ReplyRequest, RiskLevel,
    RpsReport, SelfReport,
};
use zena::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "zena",
    version = VERSION,
    about = "ZÉNA - Psychosocial risk (RPS) and burnout analysis from free text",
    long_about = "Scores French free text on six psychosocial-risk dimensions, computes\n\
                  burnout risk and motivation, detects patterns and selects an\n\
                  intervention protocol. Crisis phrases always take precedence.\n\n\
                  Modes:\n  \
                  --text         Single analysis\n  \
                  --interactive  One analysis per input line\n  \
                  --serve        HTTP API server mode\n\n\
                  Risk levels:\n  \
                  LOW / MODERATE / HIGH / CRITICAL"
)]
struct Args {
    /// Text to analyze (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Use the conversational analysis and print a reply
    #[arg(short, long)]
    emotional: bool,

    /// Interactive mode - read lines from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address
    #[arg(long, env = "ZENA_ADDR", default_value = DEFAULT_ADDR)]
    addr: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show per-dimension breakdown
    #[arg(long)]
    verbose: bool,

    /// Self-reported energy (0-10)
    #[arg(long)]
    energy: Option<f64>,

    /// Self-reported stress (0-10)
    #[arg(long)]
    stress: Option<f64>,

    /// Self-reported isolation (0-10)
    #[arg(long)]
    isolation: Option<f64>,

    /// Self-reported fatigue (0-10)
    #[arg(long)]
    fatigue: Option<f64>,

    /// User identifier stored with each analysis
    #[arg(long, env = "ZENA_USER")]
    user: Option<String>,

    /// Session identifier stored with each analysis
    #[arg(long, env = "ZENA_SESSION")]
    session: Option<String>,

    /// JSON-lines history file (in-memory when unset)
    #[arg(long, env = "ZENA_STORE")]
    store: Option<PathBuf>,

    /// Protocol catalog JSON file (built-in catalog when unset)
    #[arg(long, env = "ZENA_CATALOG")]
    catalog: Option<PathBuf>,

    /// Salt for anonymized alert subjects
    #[arg(long, env = "ZENA_ALERT_SALT", default_value = "")]
    alert_salt: String,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            addr: self.addr.clone(),
            store_path: self.store.clone(),
            catalog_path: self.catalog.clone(),
            alert_salt: self.alert_salt.clone(),
        }
    }

    fn self_report(&self) -> Option<SelfReport> {
        let report = SelfReport {
            energy: self.energy,
            stress: self.stress,
            isolation: self.isolation,
            fatigue: self.fatigue,
        };
        (report != SelfReport::default()).then_some(report)
    }
}

/// Everything a CLI run needs, built once from the config
struct Runtime {
    engine: RpsEngine,
    emotional: EmotionalAnalyzer,
    composer: ReplyComposer,
    store: Arc<dyn AnalysisStore>,
    dispatcher: AlertDispatcher,
}

impl Runtime {
    fn from_config(config: &Config) -> zena::Result<Self> {
        Ok(Self {
            engine: RpsEngine::with_catalog(config.load_catalog()?),
            emotional: EmotionalAnalyzer::new(),
            composer: ReplyComposer::new(),
            store: config.open_store(),
            dispatcher: AlertDispatcher::new(config.alert_salt.clone()),
        })
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let config = args.config();

    if args.serve {
        if let Err(e) = run_server(&config).await {
            error!(error = %e, "server error");
            std::process::exit(1);
        }
        return;
    }

    let runtime = match Runtime::from_config(&config) {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "cannot start");
            std::process::exit(1);
        }
    };

    let result = match args.text.as_deref() {
        Some(text) if !args.interactive => run_single(text, &args, &runtime),
        _ => run_interactive(&args, &runtime),
    };
    if let Err(e) = result {
        error!(error = %e, "analysis failed");
        std::process::exit(1);
    }
}

/// Run one analysis
fn run_single(text: &str, args: &Args, runtime: &Runtime) -> zena::Result<()> {
    if args.emotional {
        run_emotional(text, args, runtime)
    } else {
        run_rps(text, args, runtime)
    }
}

/// JSON shape of an RPS run: the report plus the alerts it raised
#[derive(serde::Serialize)]
struct RpsOutput<'a> {
    #[serde(flatten)]
    report: &'a RpsReport,
    alerts: &'a [AnonymizedAlert],
}

/// Analyze, persist, then dispatch alerts for the selected protocol
fn analyze_and_dispatch(
    input: &AnalysisInput,
    runtime: &Runtime,
) -> zena::Result<(RpsReport, Vec<AnonymizedAlert>)> {
    let report = runtime.engine.analyze(input);
    runtime
        .store
        .append(AnalysisRecord::from_report(input, &report))?;
    let alerts = runtime
        .dispatcher
        .dispatch_report(input.user_id.as_deref(), &report);
    Ok((report, alerts))
}

fn run_rps(text: &str, args: &Args, runtime: &Runtime) -> zena::Result<()> {
    let mut input = AnalysisInput::new(text);
    input.scores = args.self_report();
    input.user_id = args.user.clone();
    input.session_id = args.session.clone();

    let (report, alerts) = analyze_and_dispatch(&input, runtime)?;

    if args.json {
        let output = RpsOutput {
            report: &report,
            alerts: &alerts,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_rps(&report, args.verbose);
    for alert in &alerts {
        println!(
            "  {} {:?} alert queued (subject {})",
            "→".dimmed(),
            alert.recipient,
            alert.subject
        );
    }
    Ok(())
}

fn run_emotional(text: &str, args: &Args, runtime: &Runtime) -> zena::Result<()> {
    let scores = args.self_report();
    let analysis = runtime.emotional.analyze_input(text, scores.as_ref());
    let reply = runtime.composer.compose(&ReplyRequest {
        text,
        analysis: &analysis,
        profile: None,
    });

    if args.json {
        #[derive(serde::Serialize)]
        struct EmotionalOutput<'a> {
            analysis: &'a EmotionalAnalysis,
            reply: &'a zena::types::Reply,
        }
        let output = EmotionalOutput {
            analysis: &analysis,
            reply: &reply,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_emotional(&analysis, args.verbose);
    println!();
    println!("{}", reply.text);
    Ok(())
}

/// Run interactive mode
fn run_interactive(args: &Args, runtime: &Runtime) -> zena::Result<()> {
    print_header(if args.emotional { "Emotional" } else { "RPS" });
    println!("Type text and press Enter to analyze. Type 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut count = 0usize;

    loop {
        print!("{} ", "zena>".bold());
        stdout.flush()?;

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }
        if line.is_empty() {
            continue;
        }

        run_single(line, args, runtime)?;
        count += 1;
        println!();
    }

    println!("Session ended. Analyses: {}", count);
    Ok(())
}

fn paint(level: RiskLevel) -> ColoredString {
    let text = level.to_string();
    match level {
        RiskLevel::Low => text.green(),
        RiskLevel::Moderate => text.yellow(),
        RiskLevel::High => text.red(),
        RiskLevel::Critical => text.bright_red().bold(),
    }
}

fn print_header(mode: &str) {
    println!("{}", format!("ZÉNA v{} - {} mode", VERSION, mode).bold());
    println!();
}

fn print_rps(report: &RpsReport, verbose: bool) {
    let analysis = &report.analysis;

    if report.requires_safety_message() {
        println!("{}", zena::core::SAFETY_MESSAGE.bright_red());
        println!();
    }

    println!(
        "{} {} | burnout={} | motivation={} | mean={:.1}",
        analysis.global_risk_level.emoji(),
        paint(analysis.global_risk_level),
        analysis.burnout_risk_score,
        analysis.motivation_index,
        analysis.mean_dimension_score()
    );

    if verbose {
        let b = &analysis.burnout_breakdown;
        println!(
            "  burnout: exhaustion={} depersonalization={} accomplishment={}",
            b.emotional_exhaustion, b.depersonalization, b.reduced_accomplishment
        );
        for (dimension, score) in &analysis.dimensions {
            let keywords = if score.matched_keywords.is_empty() {
                String::new()
            } else {
                format!(" [{}]", score.matched_keywords.join(", "))
            };
            println!("  {:<22} {:>3}{}", dimension.label(), score.score, keywords.dimmed());
        }
    }

    if !analysis.detected_patterns.is_empty() {
        let labels: Vec<&str> = analysis.detected_patterns.iter().map(|p| p.label()).collect();
        println!("  patterns: {}", labels.join(", "));
    }

    match &report.protocol {
        Some(protocol) => println!("  protocol: {} ({})", protocol.name.bold(), protocol.level),
        None => println!("  protocol: {}", "none".dimmed()),
    }

    for action in &analysis.recommended_actions {
        println!("  • {}", action);
    }
}

fn print_emotional(analysis: &EmotionalAnalysis, verbose: bool) {
    println!(
        "{} {} | emotion={} | tone={:?} | role={:?}",
        analysis.risk_level.emoji(),
        paint(analysis.risk_level),
        analysis.dominant_emotion,
        analysis.tone,
        analysis.role
    );

    if verbose {
        let s = &analysis.scores;
        println!(
            "  stress={:.1} fatigue={:.1} isolation={:.1} energy={:.1}",
            s.stress, s.fatigue, s.isolation, s.energy
        );
        let signals: Vec<&str> = analysis.detected_signals.iter().map(|s| s.label()).collect();
        println!("  signals: [{}]", signals.join(", "));
        println!(
            "  burnout={} dropout={}",
            analysis.burnout_risk, analysis.dropout_risk
        );
    }
}
