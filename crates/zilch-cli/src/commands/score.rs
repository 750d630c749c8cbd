use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use zilch_engine::{DiceSet, ScoringEngine, ScoringTable};

use super::GroupArg;

pub fn run(faces: &[u8], groups: GroupArg, json: bool) -> Result<(), String> {
    let dice = DiceSet::from_faces(faces).map_err(|e| e.to_string())?;
    let engine = ScoringEngine::new(ScoringTable::default().with_groups(groups.into()));
    let combos = engine.enumerate(&dice);

    if json {
        let out = serde_json::to_string_pretty(&combos).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    println!("  {} {dice}", "Roll".bold());
    if combos.is_empty() {
        println!("  {}", "Zilch!".red().bold());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Points", "Scoring dice", "Free dice"]);
    for (i, combo) in combos.iter().enumerate() {
        let free = if combo.is_hot_dice() {
            "0 (hot dice)".to_string()
        } else {
            combo.free_dice().to_string()
        };
        table.add_row(vec![
            (i + 1).to_string(),
            combo.points.to_string(),
            combo.description(),
            free,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} scoring options", combos.len());

    Ok(())
}
