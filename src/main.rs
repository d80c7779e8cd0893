//! Registon client
//!
//! Command-line front end driving the client screens against a live backend

use std::path::PathBuf;
use std::time::Duration;
use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use registon::{
    config::Settings,
    screens::{LoginForm, Navbar, SignupForm, SubjectTestsView},
    services::ConnectivityMonitor,
    state::FetchOutcome,
    utils::logging,
    AppContext,
};

#[derive(Parser)]
#[command(name = "registon", version, about = "Registon test platform client")]
struct Cli {
    /// Configuration file stem (without extension)
    #[arg(long, default_value = "registon", global = true)]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show subjects and platform statistics
    Home,
    /// Log in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long = "confirm-password")]
        confirm_password: String,
    },
    /// Log out
    Logout,
    /// Show the current session
    Whoami,
    /// List a subject's tests, newest first
    Tests {
        subject_id: String,
        #[arg(long, default_value = "Tests")]
        name: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show the questions of a test
    Questions { test_id: String },
    /// Submit answers for a test from a JSON file
    Submit {
        test_id: String,
        #[arg(long, value_name = "FILE")]
        answers: PathBuf,
    },
    /// Show the tests you have worked on
    History,
    /// Show platform statistics
    Stats,
    /// Wait on the offline screen until the backend is reachable
    WatchConnectivity,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::load_from(&cli.config).context("Failed to load configuration")?;
    settings.validate()?;

    // Initialize logging
    let _guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}", registon::info());

    let app = AppContext::new(settings)?;
    let online = app.start().await;

    let result = if online || matches!(cli.command, Command::WatchConnectivity) {
        run(&app, cli.command).await
    } else {
        println!("No internet connection. Check your connection and try again.");
        Ok(())
    };

    print_toasts(&app);

    if let Err(ref e) = result {
        error!(error = %e, "Command failed");
    }
    result
}

async fn run(app: &AppContext, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Home => {
            app.home_screen().mount().await;
            let view = registon::screens::HomeScreen::view(&app.catalog.snapshot());
            for subject in &view.subjects {
                println!("[{}] {}\n    {}", subject.id, subject.name, subject.description);
            }
            if let Some(stats) = view.statistics {
                print_statistics(&stats);
            }
        }
        Command::Login { email, password } => {
            app.login_screen().submit(&LoginForm::new(email, password)).await?;
        }
        Command::Signup { name, email, password, confirm_password } => {
            let form = SignupForm::new(name, email, password, confirm_password);
            app.signup_screen().submit(&form).await?;
        }
        Command::Logout => {
            app.navbar().logout().await;
        }
        Command::Whoami => {
            let state = app.session.snapshot();
            match state.user {
                Some(ref user) if state.is_authenticated => println!("{} <{}>", user.name, user.email),
                _ => println!("Not signed in"),
            }
            let menu: Vec<_> = Navbar::menu(&state).iter().map(|item| item.label()).collect();
            println!("Menu: {}", menu.join(" | "));
        }
        Command::Tests { subject_id, name, page } => {
            let mut screen = app.subject_tests_screen(subject_id, name);
            screen.mount().await;
            screen.go_to_page(page);
            print_subject_tests(&screen.view(&app.catalog.snapshot()));
        }
        Command::Questions { test_id } => {
            if app.catalog.get_test_questions(&test_id).await == FetchOutcome::Updated {
                print_json(app.catalog.snapshot().questions.as_ref())?;
            }
        }
        Command::Submit { test_id, answers } => {
            let raw = tokio::fs::read_to_string(&answers)
                .await
                .with_context(|| format!("Failed to read {}", answers.display()))?;
            let answers: serde_json::Value = serde_json::from_str(&raw).context("Answers file is not valid JSON")?;

            if app.catalog.check_answers(&answers, &test_id).await == FetchOutcome::Updated {
                print_json(app.catalog.snapshot().check_result.as_ref())?;
            }
        }
        Command::History => {
            if app.catalog.get_worked_on_tests().await == FetchOutcome::Updated {
                print_json(app.catalog.snapshot().worked_on.as_ref())?;
            }
        }
        Command::Stats => {
            app.catalog.get_statistics().await;
            if let Some(stats) = app.catalog.snapshot().statistics {
                print_statistics(&stats);
            }
        }
        Command::WatchConnectivity => {
            let interval = Duration::from_millis(app.settings.connectivity.poll_interval_ms);
            let (connectivity, handle) = ConnectivityMonitor::new(app.connectivity.clone(), interval).spawn().await;

            println!("Waiting for the backend at {} ...", app.api.base_url());
            if app.no_internet_screen().watch(connectivity).await {
                println!("Back online");
                app.session.check_auth().await;
            }
            handle.abort();
        }
    }

    Ok(())
}

fn print_subject_tests(view: &SubjectTestsView) {
    match view {
        SubjectTestsView::Loading { title } => println!("{}: loading...", title),
        SubjectTestsView::Empty { title } => println!("{}: no tests yet", title),
        SubjectTestsView::Page { title, tests, pager } => {
            println!("{}", title);
            for test in tests {
                println!("  [{}] {} ({} questions, {})", test.id, test.title, test.question_count, test.created);
            }
            if let Some(pager) = pager {
                let pages: Vec<String> = pager
                    .pages
                    .iter()
                    .map(|&page| if page == pager.current { format!("[{}]", page) } else { page.to_string() })
                    .collect();
                println!("Page {} of {}: {}", pager.current, pager.total_pages, pages.join(" "));
            }
        }
    }
}

fn print_statistics(stats: &registon::models::Statistics) {
    println!(
        "Subjects: {}  Tests: {}  Students: {}  Teachers: {}",
        stats.subjects_count, stats.tests_count, stats.student_count, stats.teacher_count
    );
}

fn print_json(value: Option<&serde_json::Value>) -> anyhow::Result<()> {
    if let Some(value) = value {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

fn print_toasts(app: &AppContext) {
    for toast in app.notifications.drain() {
        match toast.detail {
            Some(ref detail) => eprintln!("{}: {}", toast.title, detail),
            None => eprintln!("{}", toast.title),
        }
    }
}
