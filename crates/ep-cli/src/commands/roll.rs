use ep_success::{SuccessTest, TestChange};

use super::{OutputArgs, PoolArgs};

pub fn run(
    rating: i32,
    mods: &[String],
    defaulting: bool,
    pools: &PoolArgs,
    output: &OutputArgs,
) -> Result<(), String> {
    let mut test = SuccessTest::new(rating).with(TestChange::SetDefaulting(defaulting));
    for arg in mods {
        let (name, value) = super::parse_modifier(arg)?;
        test.add_modifier(name, value);
    }
    let test = super::configure_pools(test, pools)?;

    let mut roller = output.roll_config().roller();
    let record = test.commit(&mut roller);
    super::print_record(&record, output.json)
}
