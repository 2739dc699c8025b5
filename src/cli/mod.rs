use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::application::TrackerService;
use crate::config::Config;
use crate::domain::{format_cents, parse_cents, MovementKind};
use crate::io::{parse_grid, GridExporter};

/// Hucha - Household Finance Tracker
#[derive(Parser)]
#[command(name = "hucha")]
#[command(about = "A local-first tracker for household movements and savings goals")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "hucha.db")]
    pub database: String,

    /// Profiles/policy config file (JSON); built-in sample profiles if omitted
    #[arg(short, long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Check a user's PIN (cosmetic gate, not a security boundary)
    Login {
        /// User id
        user: String,

        /// PIN to check
        pin: String,
    },

    /// Movement management commands
    #[command(subcommand)]
    Movement(MovementCommands),

    /// Edit-grid round trip (export, edit, apply)
    #[command(subcommand)]
    Grid(GridCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Show the aggregate dashboard for a user
    Report {
        /// User id
        user: String,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Income minus expense within one category label
    Profit {
        /// User id
        user: String,

        /// Category label
        category: String,
    },

    /// List configured user profiles
    Profiles,
}

#[derive(Subcommand)]
pub enum MovementCommands {
    /// Record a new movement
    Add {
        /// User id
        user: String,

        /// Amount (e.g., "25.00" or "25")
        amount: String,

        /// Category label from the user's configured list
        #[arg(short, long)]
        category: String,

        /// Movement kind: expense, income, investment
        #[arg(short, long)]
        kind: String,

        /// Free-text note
        #[arg(long)]
        concept: Option<String>,

        /// Calendar date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List a user's movements, oldest first
    List {
        /// User id
        user: String,
    },

    /// Delete a movement by id
    Delete {
        /// User id
        user: String,

        /// Movement id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum GridCommands {
    /// Export a user's movements as an editable CSV grid
    Export {
        /// User id
        user: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Apply an edited CSV grid: rows with an id update, blank ids insert
    Apply {
        /// User id
        user: String,

        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a savings goal
    Add {
        /// User id
        user: String,

        /// Goal name
        name: String,

        /// Target amount (e.g., "200.00")
        target: String,
    },

    /// List a user's goals with progress
    List {
        /// User id
        user: String,
    },

    /// Add to a goal's total
    Deposit {
        /// User id
        user: String,

        /// Goal name
        name: String,

        /// Amount to add
        amount: String,
    },
}

impl Cli {
    fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load(path),
            None => Ok(Config::default()),
        }
    }

    pub async fn run(self) -> Result<()> {
        let config = self.load_config()?;

        match self.command {
            Commands::Init => {
                TrackerService::init(&self.database, config).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Login { user, pin } => {
                let service = TrackerService::connect(&self.database, config).await?;
                if service.verify_pin(&user, &pin)? {
                    println!("Welcome, {}", service.profile(&user)?.name);
                } else {
                    bail!("PIN rejected for user '{}'", user);
                }
            }

            Commands::Movement(cmd) => {
                let service = TrackerService::connect(&self.database, config).await?;
                run_movement_command(&service, cmd).await?;
            }

            Commands::Grid(cmd) => {
                let service = TrackerService::connect(&self.database, config).await?;
                run_grid_command(&service, cmd).await?;
            }

            Commands::Goal(cmd) => {
                let service = TrackerService::connect(&self.database, config).await?;
                run_goal_command(&service, cmd).await?;
            }

            Commands::Report { user, format } => {
                let service = TrackerService::connect(&self.database, config).await?;
                run_report_command(&service, &user, &format).await?;
            }

            Commands::Profit { user, category } => {
                let service = TrackerService::connect(&self.database, config).await?;
                let profit = service.category_profit(&user, &category).await?;
                println!("{}: {}", category, format_cents(profit));
            }

            Commands::Profiles => {
                for profile in &config.profiles {
                    let gate = if profile.pin.is_some() { "pin" } else { "open" };
                    println!(
                        "{} ({}) theme={} categories={} [{}]",
                        profile.id,
                        profile.name,
                        profile.theme,
                        profile.categories.join(","),
                        gate
                    );
                }
            }
        }

        Ok(())
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}'. Use YYYY-MM-DD", s))
}

fn parse_kind(s: &str) -> Result<MovementKind> {
    MovementKind::from_str(s)
        .with_context(|| format!("Invalid kind '{}'. Use expense, income or investment", s))
}

async fn run_movement_command(service: &TrackerService, cmd: MovementCommands) -> Result<()> {
    match cmd {
        MovementCommands::Add {
            user,
            amount,
            category,
            kind,
            concept,
            date,
        } => {
            let amount_cents =
                parse_cents(&amount).context("Invalid amount format. Use '25.00' or '25'")?;
            let kind = parse_kind(&kind)?;
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => Utc::now().date_naive(),
            };

            let movement = service
                .add_movement(&user, date, &category, concept, amount_cents, kind)
                .await?;

            println!(
                "Recorded {} {} [{}] on {} ({})",
                movement.kind,
                format_cents(movement.amount_cents),
                movement.category,
                movement.date,
                movement.id
            );
        }

        MovementCommands::List { user } => {
            let movements = service.list_movements(&user).await?;
            if movements.is_empty() {
                println!("No movements for '{}'", user);
                return Ok(());
            }
            for m in movements {
                println!(
                    "{} {:>10} {:<12} {:<10} {} {}",
                    m.date,
                    format_cents(m.amount_cents),
                    m.kind.as_str(),
                    m.category,
                    m.concept.as_deref().unwrap_or("-"),
                    m.id
                );
            }
        }

        MovementCommands::Delete { user, id } => {
            let id = Uuid::parse_str(&id).context("Invalid movement ID format (expected UUID)")?;
            service.delete_movement(id, &user).await?;
            println!("Deleted movement {}", id);
        }
    }

    Ok(())
}

async fn run_grid_command(service: &TrackerService, cmd: GridCommands) -> Result<()> {
    match cmd {
        GridCommands::Export { user, output } => {
            let exporter = GridExporter::new(service);
            let count = match output {
                Some(path) => {
                    let file = std::fs::File::create(&path)
                        .with_context(|| format!("Failed to create {}", path))?;
                    exporter.export_movements_csv(&user, file).await?
                }
                None => exporter.export_movements_csv(&user, std::io::stdout()).await?,
            };
            eprintln!("Exported {} movement(s)", count);
        }

        GridCommands::Apply { user, input } => {
            let drafts = match input {
                Some(path) => {
                    let file = std::fs::File::open(&path)
                        .with_context(|| format!("Failed to open {}", path))?;
                    parse_grid(file)?
                }
                None => parse_grid(std::io::stdin())?,
            };

            let outcome = service.reconcile_movements(&user, drafts).await?;
            println!(
                "Grid applied: {} inserted, {} updated",
                outcome.inserted, outcome.updated
            );
        }
    }

    Ok(())
}

async fn run_goal_command(service: &TrackerService, cmd: GoalCommands) -> Result<()> {
    match cmd {
        GoalCommands::Add { user, name, target } => {
            let target_cents = parse_cents(&target).context("Invalid target amount format")?;
            let goal = service.add_goal(&user, &name, target_cents).await?;
            println!(
                "Created goal '{}' with target {} ({})",
                goal.name,
                format_cents(goal.target_cents),
                goal.id
            );
        }

        GoalCommands::List { user } => {
            let goals = service.list_goals(&user).await?;
            if goals.is_empty() {
                println!("No goals for '{}'", user);
                return Ok(());
            }
            for goal in goals {
                let ratio = crate::domain::savings_ratio(&goal);
                let marker = if goal.is_complete() { " [reached]" } else { "" };
                println!(
                    "{:<20} {:>10} / {:>10} ({:>3.0}%){}",
                    goal.name,
                    format_cents(goal.current_cents),
                    format_cents(goal.target_cents),
                    ratio * 100.0,
                    marker
                );
            }
        }

        GoalCommands::Deposit { user, name, amount } => {
            let amount_cents = parse_cents(&amount).context("Invalid amount format")?;
            let goal = service
                .list_goals(&user)
                .await?
                .into_iter()
                .find(|g| g.name == name)
                .with_context(|| format!("No goal named '{}' for user '{}'", name, user))?;

            let outcome = service.deposit(goal.id, amount_cents).await?;
            println!(
                "Deposited {} into '{}': now {}",
                format_cents(amount_cents),
                outcome.goal.name,
                format_cents(outcome.goal.current_cents)
            );
            if outcome.completed {
                println!("Goal '{}' reached its target!", outcome.goal.name);
            }
        }
    }

    Ok(())
}

async fn run_report_command(service: &TrackerService, user: &str, format: &str) -> Result<()> {
    let dashboard = service.dashboard(user).await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    println!("Dashboard for {}", dashboard.user);
    println!(
        "  income     {:>12}",
        format_cents(dashboard.totals.income)
    );
    println!(
        "  investment {:>12}",
        format_cents(dashboard.totals.investment)
    );
    println!(
        "  expense    {:>12}",
        format_cents(dashboard.totals.expense)
    );
    println!("  balance    {:>12}", format_cents(dashboard.balance));
    println!("  health     {:>9}/100", dashboard.health_score);

    if !dashboard.expense_breakdown.is_empty() {
        println!("Expenses by category:");
        for (category, total) in &dashboard.expense_breakdown {
            println!("  {:<15} {:>10}", category, format_cents(*total));
        }
    }

    if !dashboard.daily_expense.is_empty() {
        println!("Expenses by day:");
        for (date, total) in &dashboard.daily_expense {
            println!("  {} {:>10}", date, format_cents(*total));
        }
    }

    if !dashboard.goals.is_empty() {
        println!("Goals:");
        for progress in &dashboard.goals {
            let marker = if progress.complete { " [reached]" } else { "" };
            println!(
                "  {:<20} {:>10} / {:>10} ({:>3.0}%){}",
                progress.goal.name,
                format_cents(progress.goal.current_cents),
                format_cents(progress.goal.target_cents),
                progress.ratio * 100.0,
                marker
            );
        }
    }

    Ok(())
}
