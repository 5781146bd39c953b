use ep_success::{PsiPush, PsiTarget, PsiTest, Sleight, SuccessTest};

use super::{OutputArgs, PoolArgs};

/// Everything the psi command reads from the command line.
pub struct PsiOptions {
    pub rating: i32,
    pub sleight: String,
    pub temporary: bool,
    pub distances: Vec<u32>,
    pub touch: bool,
    pub self_target: bool,
    pub targeting_async: bool,
    pub push: Option<String>,
    pub push_pools: u32,
    pub free_push: Option<String>,
}

fn parse_push(push: Option<&str>) -> Result<Option<PsiPush>, String> {
    push.map(|p| p.parse::<PsiPush>().map_err(|e| format!("{e}")))
        .transpose()
}

pub fn run(options: &PsiOptions, pools: &PoolArgs, output: &OutputArgs) -> Result<(), String> {
    let free_push = parse_push(options.free_push.as_deref())?;
    let push = parse_push(options.push.as_deref())?;
    let sleight = if options.temporary {
        Sleight::temporary(&options.sleight)
    } else {
        Sleight::new(&options.sleight)
    };

    let test = super::configure_pools(SuccessTest::new(options.rating), pools)?;
    let mut psi = PsiTest::new(test, sleight, free_push);
    psi.set_push(push);
    psi.set_push_pools(options.push_pools);
    psi.set_targeting_async(options.targeting_async);
    psi.set_touch(options.touch);

    let mut targets: Vec<PsiTarget> = options
        .distances
        .iter()
        .enumerate()
        .map(|(i, distance)| PsiTarget::new(format!("target {}", i + 1), *distance))
        .collect();
    if options.self_target {
        targets.insert(0, PsiTarget::own_self("self"));
    }
    if targets.len() > psi.max_targets() {
        return Err(format!(
            "{} targets given but the sleight affects at most {}",
            targets.len(),
            psi.max_targets()
        ));
    }
    if !targets.is_empty() {
        psi.set_targets(targets);
    }
    super::ensure_pool_active(psi.test(), pools)?;

    if !output.json {
        let band = psi
            .range_band()
            .map(|b| b.to_string())
            .unwrap_or_else(|| "Range: Self".to_string());
        println!(
            "  Sleight {} ({band}, {} target max)",
            psi.sleight().name,
            psi.max_targets()
        );
    }

    let mut roller = output.roll_config().roller();
    let record = psi.commit(&mut roller);
    super::print_record(&record, output.json)
}
