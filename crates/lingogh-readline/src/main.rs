use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing_subscriber::EnvFilter;

use lingogh_application::bootstrap::build_shell;
use lingogh_application::{DailyPlanManager, TutorShell};
use lingogh_core::language::{LANGUAGES, Language};
use lingogh_core::plan::TaskType;
use lingogh_core::secret::SecretService;
use lingogh_core::session::{FeatureTab, Message, Sender, SessionState};
use lingogh_infrastructure::{AppConfig, EnvSecretService, LingoghPaths};

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: [
                "/back", "/chat", "/creative", "/generate", "/help", "/plan", "/quit", "/toggle",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

#[derive(Parser, Debug)]
#[command(name = "lingogh", version, about = "Lingogh language tutor (terminal)")]
struct CliArgs {
    /// Override the data directory (persisted plans and generated images)
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Override the chat/plan model
    #[arg(long)]
    chat_model: Option<String>,
    /// Override the image model
    #[arg(long)]
    image_model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let paths = LingoghPaths::new(args.data_dir)?;
    let mut config = AppConfig::load_default()?;
    if let Some(model) = args.chat_model {
        config.chat_model = model;
    }
    if let Some(model) = args.image_model {
        config.image_model = model;
    }

    let secret: Arc<dyn SecretService> = Arc::new(EnvSecretService::from_env());
    let mut shell = build_shell(&paths, &config, secret)?;

    let mut rl: Editor<CliHelper, rustyline::history::DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "Lingogh".bright_blue().bold());
    println!("Pick a language to start practicing. /help lists commands.\n");
    print_catalog();

    loop {
        match rl.readline(&prompt_for(shell.state())) {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());
                match handle_line(&mut shell, &paths, &line).await {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(err) => eprintln!("{}", format!("Error: {err}").red()),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", format!("Readline error: {err}").red());
                break;
            }
        }
    }

    println!("{}", "Hasta luego!".bright_blue());
    Ok(())
}

fn prompt_for(state: &SessionState) -> String {
    match state {
        SessionState::Unselected => "lingogh> ".to_string(),
        SessionState::Active { language, tab } => {
            let tab = match tab {
                FeatureTab::Chat => "chat",
                FeatureTab::Plan => "plan",
                FeatureTab::Creative => "creative",
            };
            format!("{language}:{tab}> ")
        }
    }
}

/// Handles one line of input; returns `false` to exit the loop.
async fn handle_line(shell: &mut TutorShell, paths: &LingoghPaths, line: &str) -> Result<bool> {
    match line {
        "/quit" | "/exit" => return Ok(false),
        "/help" => {
            print_help();
            return Ok(true);
        }
        _ => {}
    }

    if !shell.state().is_active() {
        pick_language(shell, line).await?;
        return Ok(true);
    }

    match line {
        "/back" => {
            shell.go_back();
            print_catalog();
        }
        "/chat" => {
            shell.set_active_tab(FeatureTab::Chat).await?;
            if let Some(chat) = shell.chat() {
                for message in chat.transcript() {
                    print_message(message);
                }
            }
        }
        "/plan" => {
            shell.set_active_tab(FeatureTab::Plan).await?;
            if let Some(plan) = shell.plan() {
                print_plan(plan);
            }
        }
        "/creative" => {
            shell.set_active_tab(FeatureTab::Creative).await?;
            println!("Describe a scene in your new language and see it come to life.");
        }
        "/generate" => match shell.state().active_tab() {
            Some(FeatureTab::Plan) => {
                let Some(plans) = shell.plan_mut() else {
                    return Ok(true);
                };
                println!("{}", "Generating your personalized plan...".dimmed());
                if plans.generate().await.is_none() {
                    println!("{}", "Could not generate a plan. Please try again.".red());
                } else if let Some(plans) = shell.plan() {
                    print_plan(plans);
                }
            }
            _ => println!("{}", "/generate works on the /plan tab; on /creative just type a prompt.".yellow()),
        },
        _ if line.starts_with("/toggle") => {
            toggle_task(shell, line.trim_start_matches("/toggle").trim()).await?;
        }
        _ if line.starts_with('/') => {
            println!("{}", format!("Unknown command: {line}").red());
        }
        text => match shell.state().active_tab() {
            Some(FeatureTab::Chat) => {
                let Some(chat) = shell.chat_mut() else {
                    return Ok(true);
                };
                let before = chat.transcript().len();
                chat.send(text).await;
                for message in &chat.transcript()[before..] {
                    if message.sender == Sender::Ai {
                        print_message(message);
                    }
                }
            }
            Some(FeatureTab::Creative) => {
                let Some(session) = shell.creative_mut() else {
                    return Ok(true);
                };
                println!("{}", "Generating...".dimmed());
                session.generate(text).await;
                let image = session.image().map(<[u8]>::to_vec);
                let error = session.error().map(str::to_string);
                if let Some(bytes) = image {
                    let path = save_image(paths, &bytes).await?;
                    println!("{} {}", "Image saved to".green(), path.display());
                } else if let Some(error) = error {
                    println!("{}", error.red());
                }
            }
            _ => println!("{}", "Use /generate to create a plan or /toggle <n> to check a task off.".yellow()),
        },
    }

    Ok(true)
}

async fn pick_language(shell: &mut TutorShell, line: &str) -> Result<()> {
    // Accept a catalog index as well as a name.
    let name = match line.parse::<usize>() {
        Ok(n) if (1..=LANGUAGES.len()).contains(&n) => LANGUAGES[n - 1].name,
        _ => line,
    };

    match shell.select_language(name).await {
        Ok(language) => {
            println!(
                "{} {}",
                language.flag,
                format!("Practicing {}", language.name).bold()
            );
            if let Some(chat) = shell.chat() {
                for message in chat.transcript() {
                    print_message(message);
                }
            }
        }
        Err(err) if err.is_not_found() => {
            println!("{}", format!("Unknown language: {line}").red());
            print_catalog();
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

async fn toggle_task(shell: &mut TutorShell, arg: &str) -> Result<()> {
    if shell.state().active_tab() != Some(FeatureTab::Plan) {
        println!("{}", "/toggle works on the /plan tab.".yellow());
        return Ok(());
    }
    let Some(plans) = shell.plan_mut() else {
        return Ok(());
    };
    let Some(task_id) = arg
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| plans.active_plan().and_then(|p| p.tasks.get(i)))
        .map(|t| t.id.clone())
    else {
        println!("{}", "Usage: /toggle <task number>".yellow());
        return Ok(());
    };
    plans.toggle(&task_id).await?;
    if let Some(plans) = shell.plan() {
        print_plan(plans);
    }
    Ok(())
}

fn print_catalog() {
    for (i, Language { name, flag, .. }) in LANGUAGES.iter().enumerate() {
        println!("  {:>2}. {flag}  {name}", i + 1);
    }
    println!();
}

fn print_help() {
    println!("  <text>        chat with the tutor (chat tab) or describe an image (creative tab)");
    println!("  /chat         switch to the tutor chat");
    println!("  /plan         switch to today's plan");
    println!("  /creative     switch to creative practice");
    println!("  /generate     generate today's plan");
    println!("  /toggle <n>   toggle task n of today's plan");
    println!("  /back         return to language selection");
    println!("  /quit         exit");
}

fn print_message(message: &Message) {
    match message.sender {
        Sender::User => println!("{} {}", "you:".bold(), message.text),
        Sender::Ai => {
            println!("{} {}", "Lingogh:".bright_blue().bold(), message.text);
            if !message.sources.is_empty() {
                println!("{}", "  Sources:".dimmed());
                for source in &message.sources {
                    println!("{}", format!("  - {} <{}>", source.title, source.uri).dimmed());
                }
            }
        }
    }
}

fn print_plan(plans: &DailyPlanManager) {
    let Some(plan) = plans.active_plan() else {
        println!("No plan for today yet. Type /generate to create one.");
        return;
    };

    println!("{}", format!("Your plan for {}:", plan.date).bold());
    for (i, task) in plan.tasks.iter().enumerate() {
        let check = if task.completed {
            "[x]".green()
        } else {
            "[ ]".normal()
        };
        let tag = match task.task_type {
            TaskType::Listening => "listening".magenta(),
            TaskType::Speaking => "speaking".green(),
            TaskType::Writing => "writing".yellow(),
            TaskType::Other => "other".blue(),
        };
        println!("  {:>2}. {check} {} ({tag})", i + 1, task.description);
    }
    println!(
        "{}",
        format!(
            "  {} of {} tasks completed ({:.0}%)",
            plan.completed_count(),
            plan.tasks.len(),
            plans.progress()
        )
        .dimmed()
    );
}

async fn save_image(paths: &LingoghPaths, bytes: &[u8]) -> Result<PathBuf> {
    let images_dir = paths.images_dir();
    tokio::fs::create_dir_all(&images_dir).await?;
    let name = format!("image-{}.png", chrono::Utc::now().format("%Y%m%d-%H%M%S"));
    let path = images_dir.join(name);
    tokio::fs::write(&path, bytes).await?;
    Ok(path)
}
