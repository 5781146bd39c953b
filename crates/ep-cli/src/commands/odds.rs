use std::collections::BTreeMap;

use comfy_table::{ContentArrangement, Table};

use ep_success::{PercentileRoll, ResultTier, Target, classify};

pub fn run(target: i32, defaulting: bool) -> Result<(), String> {
    let target = Target::clamped(target);
    let mut counts: BTreeMap<ResultTier, Vec<PercentileRoll>> = BTreeMap::new();
    for roll in PercentileRoll::all() {
        counts
            .entry(classify(roll, target, defaulting))
            .or_default()
            .push(roll);
    }

    println!(
        "  Target {target}{}",
        if defaulting { " (defaulting)" } else { "" }
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Result", "Chance", "Rolls"]);
    for tier in ResultTier::all().iter().rev() {
        let rolls = counts.get(tier).map(Vec::as_slice).unwrap_or_default();
        table.add_row(vec![
            super::colorize_tier(*tier).to_string(),
            format!("{}%", rolls.len()),
            summarize(rolls),
        ]);
    }
    println!("{table}");

    let successes: usize = counts
        .iter()
        .filter(|(tier, _)| tier.is_successful())
        .map(|(_, rolls)| rolls.len())
        .sum();
    println!("  Success chance: {successes}%");
    Ok(())
}

/// Collapse sorted rolls into ranges like `00, 02-10, 12`.
fn summarize(rolls: &[PercentileRoll]) -> String {
    let mut ranges: Vec<(u8, u8)> = Vec::new();
    for roll in rolls.iter().map(|r| r.value()) {
        match ranges.last_mut() {
            Some((_, end)) if *end + 1 == roll => *end = roll,
            _ => ranges.push((roll, roll)),
        }
    }
    ranges
        .iter()
        .map(|(start, end)| {
            if start == end {
                format!("{start:02}")
            } else {
                format!("{start:02}-{end:02}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
