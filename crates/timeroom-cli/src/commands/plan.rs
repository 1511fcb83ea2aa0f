use timeroom_core::{Config, TimerRequest};

use super::timer::TimerArgs;

/// Validate the inputs and print what would run, without running it.
pub fn run(args: TimerArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let request = args.request(&config.defaults)?;

    let mut out = serde_json::json!({
        "kind": request.kind(),
        "request": &request,
    });
    if let TimerRequest::Sequenced(timer_config) = &request {
        let plan = timer_config.build()?;
        out["total_secs"] = plan.sequence.total_secs().into();
        out["total_ticks"] = plan.sequence.total_ticks().into();
        out["plan"] = serde_json::to_value(&plan)?;
    }
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
