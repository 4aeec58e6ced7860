//! roster-runner: headless one-day roster generator.
//!
//! Usage:
//!   roster-runner --day M --seed 12345
//!   roster-runner --day Sa --data-dir ./data --json roster-sa.json
//!   roster-runner --day Th --policy policy.json --availability week.json

use anyhow::{Context, Result};
use roster_core::{
    config::RosterConfig,
    directory::WeeklyAvailability,
    engine::{DayRoster, RosterEngine},
    event::RosterEvent,
    report::{employee_timeline, task_distribution, CoverageSummary},
    slot::slot_to_time,
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let day = string_arg(&args, "--day").unwrap_or("M");
    let data_dir = string_arg(&args, "--data-dir").unwrap_or("./data");
    let policy_path = string_arg(&args, "--policy")
        .map(str::to_string)
        .unwrap_or_else(|| format!("{data_dir}/store_policy.json"));
    let availability_path = string_arg(&args, "--availability")
        .map(str::to_string)
        .unwrap_or_else(|| format!("{data_dir}/weekly_availability.json"));
    let json_out = string_arg(&args, "--json");

    println!("roster-runner");
    println!("  day:           {day}");
    println!("  seed:          {seed}");
    println!("  policy:        {policy_path}");
    println!("  availability:  {availability_path}");
    println!();

    let config = RosterConfig::load(&policy_path)?;
    let sheet = std::fs::read_to_string(&availability_path)
        .with_context(|| format!("Cannot read {availability_path}"))?;
    let availability = WeeklyAvailability::from_json(&sheet)
        .with_context(|| format!("Invalid availability {availability_path}"))?;
    let directory = availability.directory_for_day(day)?;
    log::info!("{} employees on shift for {day}", directory.len());

    let mut engine = RosterEngine::build(config, seed);
    let generated = engine.generate(day, &directory)?;
    let plan = engine.config().plan_for(day)?;

    print_summary(&generated);
    print_coverage(&CoverageSummary::from_roster(&generated.roster, &plan));
    print_timelines(&generated, directory.employees().iter().map(|e| e.name.as_str()));

    if let Some(path) = json_out {
        let json = generated.snapshot().to_json_pretty()?;
        std::fs::write(path, json).with_context(|| format!("Cannot write {path}"))?;
        println!();
        println!("snapshot written to {path}");
    }

    Ok(())
}

fn print_summary(generated: &DayRoster) {
    let count = |kind: &str| generated.events.iter().filter(|e| e.event_type == kind).count();

    println!("=== ROSTER SUMMARY ===");
    println!("  day:             {}", generated.day);
    println!("  open slots:      {}", generated.roster.slots().count());
    println!("  40-min breaks:   {}", count("break_assigned"));
    println!("  10-min breaks:   {}", count("ten_minute_break_assigned"));
    println!("  hurdles:         {}", count("hurdle_assigned"));
    println!("  tracker resets:  {}", count("tracker_reset"));
    println!("  warnings:        {}", generated.warnings().count());

    for entry in generated.warnings() {
        match &entry.event {
            RosterEvent::RegisterShortage { slot, needed, selected, borrowed } => println!(
                "    {} register needed {needed}, got {selected} (borrowed {borrowed:?})",
                slot_to_time(*slot)
            ),
            RosterEvent::DuplicateAssignment { slot, employees } => {
                println!("    {} duplicate {employees:?}", slot_to_time(*slot))
            }
            RosterEvent::BlockConflict { slot, employee, task, held } => println!(
                "    {} {employee} kept on {held} instead of {}",
                slot_to_time(*slot),
                task.label()
            ),
            other => println!("    {}", other.event_type()),
        }
    }
}

fn print_coverage(summary: &CoverageSummary) {
    println!();
    println!("=== COVERAGE ===");
    if summary.is_fully_covered() {
        println!("  every task staffed in every open slot");
        return;
    }
    for line in summary.lines() {
        println!("  {line}");
    }
}

fn print_timelines<'a>(generated: &DayRoster, names: impl Iterator<Item = &'a str>) {
    let distribution = task_distribution(&generated.roster);

    println!();
    println!("=== EMPLOYEES ===");
    for name in names {
        let blocks: Vec<String> = employee_timeline(&generated.roster, name)
            .iter()
            .map(|b| format!("{}-{} {}", slot_to_time(b.start), slot_to_time(b.end), b.bucket))
            .collect();
        let tasks = distribution.get(name).copied().unwrap_or_default();
        println!(
            "  {name:<12} FR {:>2} GR {:>2} R {:>2} brk {:>2} | {}",
            tasks.fitting_room,
            tasks.greeter,
            tasks.register,
            tasks.on_break,
            blocks.join(", ")
        );
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
