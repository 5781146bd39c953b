pub mod classify;
pub mod odds;
pub mod psi;
pub mod roll;

use clap::Args;
use colored::{ColoredString, Colorize};
use comfy_table::{ContentArrangement, Table};
use tracing::debug;

use ep_success::{
    ModifierOrigin, Pool, PoolAction, PoolType, ResultTier, RollConfig, SuccessTest,
    SuccessTestRecord, TestChange,
};

/// Pool flags shared by the rolling commands.
#[derive(Args, Debug)]
pub struct PoolArgs {
    /// A pool the character has, repeatable (e.g. --pool insight:3:1)
    #[arg(long = "pool", value_name = "TYPE:MAX[:SPENT]")]
    pub pools: Vec<String>,

    /// Spend a point from this pool before rolling
    #[arg(long, value_name = "TYPE")]
    pub use_pool: Option<String>,

    /// What the pool point buys: bonus, ignore-mods, improve
    #[arg(long, default_value = "bonus")]
    pub action: String,
}

/// Output flags shared by the rolling commands.
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// RNG seed for reproducible rolls
    #[arg(short, long, env = "EP_SEED")]
    pub seed: Option<u64>,

    /// Print the record as JSON
    #[arg(long)]
    pub json: bool,
}

impl OutputArgs {
    fn roll_config(&self) -> RollConfig {
        debug!(seed = ?self.seed, "building roller");
        match self.seed {
            Some(seed) => RollConfig::default().with_seed(seed),
            None => RollConfig::default(),
        }
    }
}

/// Attach pools and the chosen pool action to a test.
fn configure_pools(test: SuccessTest, args: &PoolArgs) -> Result<SuccessTest, String> {
    let pools = args
        .pools
        .iter()
        .map(String::as_str)
        .map(parse_pool)
        .collect::<Result<Vec<_>, _>>()?;
    let mut test = test.with_pools(pools);

    if let Some(pool_type) = requested_pool(args)? {
        let action: PoolAction = args.action.parse().map_err(|e| format!("{e}"))?;
        test.apply(TestChange::TogglePoolAction(Some((pool_type, action))));
    }
    ensure_pool_active(&test, args)?;
    Ok(test)
}

fn requested_pool(args: &PoolArgs) -> Result<Option<PoolType>, String> {
    args.use_pool
        .as_deref()
        .map(|p| p.parse::<PoolType>().map_err(|e| format!("{e}")))
        .transpose()
}

/// Fail if `--use-pool` was given but no pool action survived setup.
fn ensure_pool_active(test: &SuccessTest, args: &PoolArgs) -> Result<(), String> {
    match requested_pool(args)? {
        Some(pool_type) if test.pools().active().is_none() => {
            Err(format!("no {} pool points available", pool_type.name()))
        }
        _ => Ok(()),
    }
}

/// Parse `NAME=VALUE`.
fn parse_modifier(arg: &str) -> Result<(String, i32), String> {
    let (name, value) = arg
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{arg}'"))?;
    let value = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid modifier value in '{arg}'"))?;
    Ok((name.trim().to_string(), value))
}

/// Parse `TYPE:MAX[:SPENT]`.
fn parse_pool(arg: &str) -> Result<Pool, String> {
    let parts: Vec<&str> = arg.split(':').collect();
    let (pool_type, max, spent) = match parts.as_slice() {
        [pool_type, max] => (*pool_type, *max, "0"),
        [pool_type, max, spent] => (*pool_type, *max, *spent),
        _ => return Err(format!("expected TYPE:MAX[:SPENT], got '{arg}'")),
    };
    let pool_type: PoolType = pool_type.parse().map_err(|e| format!("{e}"))?;
    let max = max
        .parse()
        .map_err(|_| format!("invalid pool max in '{arg}'"))?;
    let spent = spent
        .parse()
        .map_err(|_| format!("invalid pool spent in '{arg}'"))?;
    Ok(Pool::with_spent(pool_type, max, spent))
}

fn colorize_tier(tier: ResultTier) -> ColoredString {
    let label = tier.to_string();
    match tier {
        ResultTier::CriticalSuccess => label.green().bold(),
        ResultTier::SuperiorSuccessX2 | ResultTier::SuperiorSuccess | ResultTier::Success => {
            label.green()
        }
        ResultTier::Failure | ResultTier::SuperiorFailure | ResultTier::SuperiorFailureX2 => {
            label.red()
        }
        ResultTier::CriticalFailure => label.red().bold(),
    }
}

/// Hand the finished record to the user.
fn print_record(record: &SuccessTestRecord, json: bool) -> Result<(), String> {
    if json {
        let rendered = serde_json::to_string_pretty(record)
            .map_err(|e| format!("failed to serialize record: {e}"))?;
        println!("{rendered}");
        return Ok(());
    }

    println!(
        "  {} {} vs {}  {}",
        "Roll".bold(),
        record.roll(),
        record.target(),
        colorize_tier(record.result())
    );
    if record.is_defaulting() {
        println!("  {}", "defaulting".dimmed());
    }

    if !record.modifiers_applied().is_empty() {
        println!();
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Modifier", "Value", "Source", "Counted"]);
        for m in record.modifiers_applied() {
            let source = match &m.origin {
                ModifierOrigin::Simple(id) => id.to_string(),
                ModifierOrigin::Effect(key) => key.clone(),
                ModifierOrigin::Pool(pool_type) => format!("{pool_type} pool"),
            };
            table.add_row(vec![
                m.name.clone(),
                format!("{:+}", m.value),
                source,
                if m.active { "yes" } else { "no" }.to_string(),
            ]);
        }
        println!("{table}");
    }

    if let (Some(pool), Some(action)) = (record.pool_used(), record.pool_action()) {
        println!("  {} {pool} ({action})", "Pool".bold());
    }

    let effects = record.superior_effects_allowed();
    if effects > 0 {
        println!("  {} {effects}", "Superior result effects:".bold());
    }
    Ok(())
}
