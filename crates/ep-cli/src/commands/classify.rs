use ep_success::{PercentileRoll, Target, classify};

pub fn run(roll: u32, target: i32, defaulting: bool) -> Result<(), String> {
    let roll = PercentileRoll::try_from(roll).map_err(|e| format!("{e}"))?;
    let target = Target::clamped(target);
    let tier = classify(roll, target, defaulting);

    println!(
        "  {} vs {}{}  {}",
        roll,
        target,
        if defaulting { " (defaulting)" } else { "" },
        super::colorize_tier(tier)
    );
    let effects = tier.granted_superior_effect_count();
    if effects > 0 {
        println!("  superior result effects: {effects}");
    }
    Ok(())
}
