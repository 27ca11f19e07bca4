use tutor::adapters::ReqwestHttpClient;
use tutor::app::{App, AppOutput};
use tutor::cli::{parse_args, run_cli_command, CliCommand, RunOptions};
use tutor::config::TutorConfig;
use tutor::error::TutorError;
use tutor::models::{MessageRole, TtsRequest};
use tutor::session::{SessionState, SessionUpdate};
use tutor::traits::{AudioPlayer, HttpClient};

use color_eyre::Result;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

fn main() -> Result<()> {
    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run with --help for usage.");
            std::process::exit(2);
        }
    };
    if run_cli_command(&command) {
        return Ok(());
    }
    let CliCommand::Run(options) = command else {
        return Ok(());
    };

    color_eyre::install()?;
    init_tracing();

    let config = match TutorConfig::load(options.config_path.as_deref()) {
        Ok(config) => options.apply(config),
        Err(e) => {
            report(&e.into());
            std::process::exit(2);
        }
    };
    tracing::debug!(?config, "Loaded configuration");

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(config, options))
}

/// Logs go to stderr so they never interleave with the streamed answer.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tutor=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(config: TutorConfig, options: RunOptions) -> Result<()> {
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::with_connect_timeout(CONNECT_TIMEOUT)?);
    let player = build_player(&config, Arc::clone(&http));
    let (mut app, mut updates) = App::new(&config, http, player);

    if options.speak {
        let url = app.speak(&TtsRequest::default()).await?;
        if !app.audio_enabled() {
            println!("{}", url);
        }
        return Ok(());
    }

    match options.topic {
        Some(topic) => run_once(&mut app, &mut updates, &topic).await,
        None => run_interactive(&mut app, &mut updates).await,
    }
}

#[cfg(feature = "rodio")]
fn build_player(_config: &TutorConfig, http: Arc<dyn HttpClient>) -> Arc<dyn AudioPlayer> {
    Arc::new(tutor::adapters::RodioPlayer::new(http))
}

#[cfg(not(feature = "rodio"))]
fn build_player(config: &TutorConfig, _http: Arc<dyn HttpClient>) -> Arc<dyn AudioPlayer> {
    Arc::new(tutor::adapters::CommandPlayer::new(config.player.clone()))
}

/// Stream one answer, let its audio finish, then exit.
async fn run_once(
    app: &mut App,
    updates: &mut mpsc::UnboundedReceiver<SessionUpdate>,
    topic: &str,
) -> Result<()> {
    app.submit(topic)?;

    loop {
        tokio::select! {
            update = updates.recv() => {
                let Some(update) = update else { break };
                if render(app.handle_update(update)) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                app.cancel_active();
                println!();
                app.shutdown().await;
                return Ok(());
            }
        }
    }

    let interrupted = tokio::select! {
        _ = app.wait_idle() => false,
        _ = tokio::signal::ctrl_c() => true,
    };
    if interrupted {
        app.shutdown().await;
    }
    Ok(())
}

async fn run_interactive(
    app: &mut App,
    updates: &mut mpsc::UnboundedReceiver<SessionUpdate>,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if let Some(greeting) = app.conversation.messages().first() {
        if greeting.role == MessageRole::Assistant {
            println!("{}", greeting.content);
        }
    }
    prompt();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_line(app, line.trim()).await {
                    break;
                }
            }
            Some(update) = updates.recv() => {
                if render(app.handle_update(update)) {
                    prompt();
                }
            }
            _ = tokio::signal::ctrl_c() => {
                if app.cancel_active() {
                    println!("\n[cancelled]");
                    prompt();
                } else {
                    println!();
                    break;
                }
            }
        }
    }

    app.shutdown().await;
    Ok(())
}

/// Returns false when the user asked to quit.
async fn handle_line(app: &mut App, line: &str) -> bool {
    match line {
        "" => prompt(),
        "/quit" | "/exit" => return false,
        "/reset" => {
            app.reset();
            if let Some(greeting) = app.conversation.messages().first() {
                println!("{}", greeting.content);
            }
            prompt();
        }
        "/speak" => {
            match app.speak(&TtsRequest::default()).await {
                Ok(url) if !app.audio_enabled() => println!("{}", url),
                Ok(_) => {}
                Err(e) => report(&e),
            }
            prompt();
        }
        topic => match app.submit(topic) {
            Ok(_) => {}
            Err(e) => {
                report(&e.into());
                prompt();
            }
        },
    }
    true
}

/// Show an error on the prompt, with what to try next.
fn report(err: &TutorError) {
    if let Some(context) = err.context() {
        tracing::debug!(code = err.error_code(), context = %context.to_log_string(), "Request failed");
    }
    eprintln!("{} {}.", err.user_message(), err.recovery_hint());
}

/// Print outputs; returns true once the turn is over.
fn render(outputs: Vec<AppOutput>) -> bool {
    let mut stdout = std::io::stdout();
    let mut finished = false;
    for output in outputs {
        match output {
            AppOutput::Delta(text) => {
                let _ = write!(stdout, "{}", text);
            }
            AppOutput::AudioQueued(label) => {
                let _ = write!(stdout, "\n[audio: {}]\n", label);
            }
            AppOutput::UnitFinished(content) => {
                let _ = write!(stdout, "\n[{}]\n", content);
            }
            AppOutput::TurnFinished(state) => {
                if matches!(state, SessionState::Aborted(_)) {
                    let _ = write!(stdout, "\n[{}]", state);
                }
                let _ = writeln!(stdout);
                finished = true;
            }
        }
    }
    let _ = stdout.flush();
    finished
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}
