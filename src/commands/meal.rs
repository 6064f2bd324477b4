use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use clap::{Args, Subcommand};
use kibble_core::{MealType, Session, Statistics};
use uuid::Uuid;

use super::{scoped_session, AppStore, OutputFormat};
use crate::prompt::confirmer;

#[derive(Args)]
pub struct MealCommand {
    #[command(subcommand)]
    pub command: MealSubcommand,
}

#[derive(Subcommand)]
pub enum MealSubcommand {
    /// Log a meal for the selected cat
    Log {
        /// Amount, e.g. "1/4 cup" or "10g"
        #[arg(long, short, required_unless_present = "preset")]
        amount: Option<String>,

        /// Use a saved amount preset instead of --amount
        #[arg(long, short, conflicts_with = "amount")]
        preset: Option<String>,

        /// Meal type (wet, dry, treats); defaults to the configured type
        #[arg(long = "type", short = 't', value_name = "TYPE")]
        meal_type: Option<String>,

        /// Notes about the meal
        #[arg(long, short)]
        notes: Option<String>,

        /// When the meal happened (RFC 3339 or "YYYY-MM-DD HH:MM" local), defaults to now
        #[arg(long)]
        at: Option<String>,

        /// Cat name or ID, overriding the selected cat
        #[arg(long)]
        cat: Option<String>,
    },

    /// Show meal history, most recent first
    History {
        /// Cat name or ID, overriding the selected cat
        #[arg(long)]
        cat: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show feeding statistics
    Stats {
        /// Cat name or ID, overriding the selected cat
        #[arg(long)]
        cat: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Delete a meal record
    Delete {
        /// Meal ID
        id: String,

        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,
    },
}

impl MealCommand {
    pub fn run(
        &self,
        store: &mut AppStore,
        session: &Session,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            MealSubcommand::Log {
                amount,
                preset,
                meal_type,
                notes,
                at,
                cat,
            } => {
                let mut scoped = scoped_session(store, session, cat.as_deref())?;

                if let Some(t) = meal_type {
                    scoped.draft.meal_type = t.parse::<MealType>()?;
                }
                if let Some(p) = preset {
                    if !store.presets().contains(p) {
                        return Err(format!("Preset not found: {}", p).into());
                    }
                    scoped.draft.apply_preset(p);
                }
                if let Some(a) = amount {
                    scoped.draft.amount = a.clone();
                }
                if let Some(n) = notes {
                    scoped.draft.notes = n.clone();
                }
                if let Some(a) = at {
                    scoped.draft.occurred_at = Some(parse_time(a)?);
                }

                let meal = scoped.submit_meal(store)?;
                let cat_name = store
                    .cat(meal.cat_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_default();
                println!("Logged meal for {}:", cat_name);
                println!();
                println!("{}", meal);
            }
            MealSubcommand::History { cat, format } => {
                let scoped = scoped_session(store, session, cat.as_deref())?;
                let Some(active) = scoped.active(store) else {
                    println!("No cat selected. Use 'kibble cat select <name>' or --cat.");
                    return Ok(());
                };

                let meals = store.query(&scoped).meals_for_active_cat();
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&meals)?);
                    }
                    OutputFormat::Text => {
                        if meals.is_empty() {
                            println!("No meals logged for {}", active.name);
                            return Ok(());
                        }
                        println!("Meal history: {}", active.name);
                        println!("{}", "=".repeat(30));
                        for meal in meals {
                            println!("{}", meal);
                            println!();
                        }
                    }
                }
            }
            MealSubcommand::Stats { cat, format } => {
                let scoped = scoped_session(store, session, cat.as_deref())?;
                let Some(active) = scoped.active(store) else {
                    println!("No cat selected. Use 'kibble cat select <name>' or --cat.");
                    return Ok(());
                };

                let stats = store.query(&scoped).statistics_for_active_cat();
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&stats)?);
                    }
                    OutputFormat::Text => match stats {
                        Some(stats) => print_statistics(&active.name, &stats),
                        None => println!("No meals logged for {}", active.name),
                    },
                }
            }
            MealSubcommand::Delete { id, yes } => {
                let id =
                    Uuid::parse_str(id).map_err(|_| format!("Invalid meal ID: {}", id))?;
                if store.meal(id).is_none() {
                    println!("Meal not found: {}", id);
                    return Ok(());
                }

                let confirmed = confirmer(*yes)
                    .confirm("Are you sure you want to delete this meal record?")?;
                if !confirmed {
                    println!("Cancelled");
                    return Ok(());
                }

                if store.delete_meal(id).is_some() {
                    println!("Deleted meal {}", id);
                }
            }
        }
        Ok(())
    }
}

fn print_statistics(cat_name: &str, stats: &Statistics) {
    let last = stats.last_meal.occurred_at.with_timezone(&Local);

    println!("Statistics: {}", cat_name);
    println!("{}", "=".repeat(30));
    println!("Total meals:  {}", stats.total_meals);
    println!("Last 7 days:  {}", stats.recent_meals);
    println!(
        "Last meal:    {} - {} ({})",
        stats.last_meal.meal_type,
        stats.last_meal.amount,
        last.format("%Y-%m-%d %H:%M")
    );
    println!();
    println!("Meal types:");
    for (meal_type, count) in &stats.meal_type_counts {
        println!("  {}: {}", meal_type, count);
    }
}

/// Accepts RFC 3339, or a local "YYYY-MM-DD HH:MM" / "YYYY-MM-DDTHH:MM".
fn parse_time(input: &str) -> Result<DateTime<Utc>, String> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .ok_or_else(|| {
            format!(
                "Invalid time '{}'. Use RFC 3339 or YYYY-MM-DD HH:MM.",
                input
            )
        })?;

    Local
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| format!("Ambiguous local time '{}'", input))
}
