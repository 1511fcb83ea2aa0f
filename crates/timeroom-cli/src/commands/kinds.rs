use timeroom_core::TimerKind;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let kinds: Vec<_> = TimerKind::ALL
            .iter()
            .map(|kind| {
                serde_json::json!({
                    "id": kind.id(),
                    "description": kind.description(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&kinds)?);
        return Ok(());
    }
    for kind in TimerKind::ALL {
        println!("{:<14}{}", kind.id(), kind.description());
    }
    Ok(())
}
