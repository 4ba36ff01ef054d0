//! MindCare progression CLI.
//!
//! Usage:
//!   mindcare [OPTIONS] [status|checkin|award <action>|watch]
//!
//! Examples:
//!   mindcare                          # Show level, streak, mood and reminders
//!   mindcare checkin                  # Record today's check-in
//!   mindcare award journal            # Award XP for a journal entry
//!   mindcare watch --polls 3          # Run the reminder loop three times
//!   mindcare watch --quiet            # Reminders go to the log only
//!   RUST_LOG=debug mindcare status    # Verbose engine logging

use chrono::Utc;
use mindcare::achievements::{get_achievement_def, record_unlocks, AchievementId};
use mindcare::build_info;
use mindcare::config::{data_dir, load_config, load_policy};
use mindcare::notifications::{
    LogDispatcher, NotificationDispatcher, NotificationPayload, ReminderScheduler,
    SchedulerConfig,
};
use mindcare::storage::{JsonFileStore, ProgressionRepository};
use mindcare::{CharacterId, Evaluation, ProgressionEngine, Result, XpAction};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use tracing::error;

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Status,
    Checkin,
    Award(XpAction),
    Watch { polls: Option<u32> },
    Version,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
struct CliArgs {
    command: Command,
    user: Option<String>,
    character: Option<CharacterId>,
    data_dir: Option<PathBuf>,
    json: bool,
    quiet: bool,
}

/// Prints reminders to stdout so `watch` is visible without RUST_LOG.
struct ConsoleDispatcher;

impl NotificationDispatcher for ConsoleDispatcher {
    fn dispatch(&self, payload: &NotificationPayload) -> Result<()> {
        println!(
            "[{}] {} - {}",
            payload.urgency.name().to_uppercase(),
            payload.title,
            payload.body
        );
        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(msg) => {
            eprintln!("{}", msg);
            eprintln!("Run 'mindcare --help' for usage.");
            std::process::exit(1);
        }
    };

    match cli.command {
        Command::Version => {
            println!("mindcare {}", build_info::version_line());
            return;
        }
        Command::Help => {
            print_help();
            return;
        }
        _ => {}
    }

    if let Err(e) = run(&cli) {
        error!(error = %e, "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_help() {
    println!("MindCare - companion progression engine\n");
    println!("Usage: mindcare [OPTIONS] [COMMAND]\n");
    println!("Commands:");
    println!("  status              Show level, streak, mood and due reminders (default)");
    println!("  checkin             Record today's check-in");
    println!("  award <action>      Award XP for chat, breathing or journal");
    println!("  watch [--polls N]   Run the reminder scheduler");
    println!("  --version           Show version information");
    println!("  --help              Show this help message\n");
    println!("Options:");
    println!("  --user ID           User to act on (default from config.json)");
    println!("  --character NAME    Companion for a new user: luna, max or sage");
    println!("  --data-dir PATH     Use PATH instead of ~/.mindcare");
    println!("  --json              Print machine-readable output");
    println!("  --quiet             watch: send reminders to the log instead of stdout");
}

fn parse_args(args: &[String]) -> std::result::Result<CliArgs, String> {
    let mut cli = CliArgs {
        command: Command::Status,
        user: None,
        character: None,
        data_dir: None,
        json: false,
        quiet: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "status" => cli.command = Command::Status,
            "checkin" => cli.command = Command::Checkin,
            "award" => {
                let action = args.get(i + 1).ok_or("award needs an action")?;
                let action: XpAction = action.parse().map_err(|e| format!("{}", e))?;
                if action == XpAction::DailyCheckin {
                    return Err("use 'mindcare checkin' for the daily check-in".to_string());
                }
                cli.command = Command::Award(action);
                i += 1;
            }
            "watch" => cli.command = Command::Watch { polls: None },
            "--polls" => {
                let n = args
                    .get(i + 1)
                    .and_then(|s| s.parse::<u32>().ok())
                    .ok_or("--polls needs a number")?;
                cli.command = Command::Watch { polls: Some(n) };
                i += 1;
            }
            "-u" | "--user" => {
                cli.user = Some(args.get(i + 1).ok_or("--user needs an id")?.clone());
                i += 1;
            }
            "-c" | "--character" => {
                let name = args.get(i + 1).ok_or("--character needs a name")?;
                cli.character = Some(name.parse().map_err(|e| format!("{}", e))?);
                i += 1;
            }
            "--data-dir" => {
                cli.data_dir = Some(PathBuf::from(args.get(i + 1).ok_or("--data-dir needs a path")?));
                i += 1;
            }
            "--json" => cli.json = true,
            "-q" | "--quiet" => cli.quiet = true,
            "--version" | "-v" => cli.command = Command::Version,
            "--help" | "-h" => cli.command = Command::Help,
            other => return Err(format!("Unknown argument: {}", other)),
        }
        i += 1;
    }

    Ok(cli)
}

fn run(cli: &CliArgs) -> Result<()> {
    let dir = data_dir(cli.data_dir.as_deref())?;
    let mut config = load_config(&dir);
    if let Some(user) = &cli.user {
        config.user_id = user.clone();
    }
    let poll_interval = config.poll_interval();
    let user_id = config.user_id.clone();
    let character = cli.character.unwrap_or_default();

    let engine = Arc::new(ProgressionEngine::new(load_policy(&dir), config)?);
    let repo = Arc::new(ProgressionRepository::new(JsonFileStore::new(dir.join("store"))));
    let now = Utc::now();

    match &cli.command {
        Command::Status => {
            let state = repo.load(&user_id, character, now)?;
            let evaluation = engine.evaluate(&state, now)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&evaluation)?);
            } else {
                print_status(&user_id, state.character_id, &evaluation);
            }
        }
        Command::Checkin => {
            let mut state = repo.load(&user_id, character, now)?;
            let outcome = engine.plan_checkin(&state, now)?;
            if outcome.already_checked_in {
                println!("Already checked in today. Streak: {} days.", state.streak_days);
                return Ok(());
            }
            outcome.apply_to(&mut state);
            let mut ledger = repo.load_achievements(&user_id, now)?;
            let unlocked = record_unlocks(
                &mut state,
                &mut ledger,
                &outcome.proposed_achievements,
                now.timestamp(),
            );
            repo.save(&state, now)?;
            repo.save_achievements(&user_id, &ledger, now)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                if outcome.streak_broken {
                    println!("Streak restarted after a break.");
                }
                println!(
                    "Checked in! +{} XP (total {}). Streak: {} days.",
                    outcome.xp_awarded, outcome.new_total_xp, outcome.new_streak_days
                );
                if outcome.leveled_up() {
                    println!("Level up! Now level {}.", outcome.level_after);
                }
                print_unlocked(&unlocked);
            }
        }
        Command::Award(action) => {
            let mut state = repo.load(&user_id, character, now)?;
            let outcome = engine.plan_award(&state, *action)?;
            outcome.apply_to(&mut state);
            let mut ledger = repo.load_achievements(&user_id, now)?;
            let unlocked = record_unlocks(
                &mut state,
                &mut ledger,
                &outcome.proposed_achievements,
                now.timestamp(),
            );
            repo.save(&state, now)?;
            repo.save_achievements(&user_id, &ledger, now)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!(
                    "+{} XP for {} (total {}).",
                    outcome.xp_awarded,
                    action.as_str(),
                    outcome.new_total_xp
                );
                if outcome.leveled_up() {
                    println!("Level up! Now level {}.", outcome.level_after);
                }
                print_unlocked(&unlocked);
            }
        }
        Command::Watch { polls } => {
            let dispatcher: Arc<dyn NotificationDispatcher> = if cli.quiet {
                Arc::new(LogDispatcher)
            } else {
                println!("Watching reminders for '{}' every {}s...", user_id, poll_interval.as_secs());
                Arc::new(ConsoleDispatcher)
            };
            let scheduler = ReminderScheduler::start(
                engine.clone(),
                repo.clone().snapshot_source(user_id.clone()),
                dispatcher,
                SchedulerConfig { poll_interval },
            )?;
            match polls {
                Some(n) => {
                    // The first poll runs immediately
                    thread::sleep(poll_interval * n.saturating_sub(1) + poll_interval / 2);
                    scheduler.stop();
                }
                None => loop {
                    thread::park();
                },
            }
        }
        Command::Version | Command::Help => {}
    }

    Ok(())
}

fn print_status(user_id: &str, character: CharacterId, eval: &Evaluation) {
    let level = &eval.level;
    println!("{} {} with {}", character.icon(), user_id, character.display_name());
    println!();
    if level.is_max_level {
        println!("Level {} - {} (max level)", level.level, level.title);
    } else {
        println!(
            "Level {} - {}  [{}%]  {} / {} XP to next level",
            level.level,
            level.title,
            level.progress_percent,
            level.current_xp_in_level,
            level.xp_to_next_level
        );
    }

    if eval.streak_lapsed {
        println!("Streak: lost ({} days missed)", eval.missed_days);
    } else if eval.checked_in_today {
        println!("Streak: {} days, checked in today", eval.effective_streak_days);
    } else if eval.streak.hours_remaining > 0.0 {
        println!(
            "Streak: {} days, {:.1}h left ({})",
            eval.effective_streak_days,
            eval.streak.hours_remaining,
            eval.streak.warning_tier.name()
        );
    } else {
        println!("Streak: {} days, check in today to keep it", eval.effective_streak_days);
    }

    println!(
        "Mood: {} {} - \"{}\"",
        eval.mood.mood.emoji(),
        eval.mood.mood.name(),
        eval.mood.message
    );

    for payload in eval.streak_warning.iter().chain(eval.notification.iter()) {
        println!("Reminder [{}]: {}", payload.urgency.name(), payload.body);
    }
    if !eval.proposed_achievements.is_empty() {
        println!("Achievements ready: {}", eval.proposed_achievements.len());
    }
}

fn print_unlocked(ids: &[AchievementId]) {
    for id in ids {
        if let Some(def) = get_achievement_def(*id) {
            println!("Achievement unlocked: {} {} - {}", def.icon, def.name, def.description);
        }
    }
}
