use colored::Colorize;

use zilch_engine::{OrderMode, RandomRoller, RollOff, order};

use super::OrderArg;

pub fn run(names: &[String], mode: OrderArg, seed: Option<u64>) -> Result<(), String> {
    let mut roller = match seed {
        Some(seed) => RandomRoller::seeded(seed),
        None => RandomRoller::from_entropy(),
    };
    let mode = OrderMode::from(mode);
    let resolved = order::resolve(names, mode, &mut roller).map_err(|e| e.to_string())?;

    for roll_off in resolved.roll_offs() {
        println!("  {}", describe_roll_off(roll_off));
    }
    if !resolved.roll_offs().is_empty() {
        println!();
    }

    println!("  {}", "Playing order".bold());
    for (seat, player) in resolved.players().enumerate() {
        let rank = resolved.rank_of(player).unwrap_or(seat + 1);
        let note = if mode == OrderMode::FirstPlaceOnly && rank != 1 {
            String::new()
        } else {
            format!(" (rank {rank})").dimmed().to_string()
        };
        println!("  {}. {player}{note}", seat + 1);
    }

    Ok(())
}

/// `Roll-off for place 1: Ada 4, Bo 6`
pub fn describe_roll_off(roll_off: &RollOff<String>) -> String {
    let rolls: Vec<String> = roll_off
        .rolls
        .iter()
        .map(|(player, face)| format!("{player} {face}"))
        .collect();
    format!("Roll-off for place {}: {}", roll_off.rank, rolls.join(", "))
}
