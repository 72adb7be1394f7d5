use hwmon_core::Rect;

pub fn execute(json: bool) {
    let monitors = match hwmon_windows::enumerate_monitors() {
        Ok(monitors) => monitors,
        Err(e) => {
            eprintln!("Error: could not enumerate monitors: {e}");
            std::process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(&monitors) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    println!("{:<3} {:<24} {:<24}", "#", "Monitor", "Work area");
    for (i, m) in monitors.iter().enumerate() {
        println!("{:<3} {:<24} {:<24}", i, describe(&m.monitor), describe(&m.work));
    }
    println!("\n{} monitors found", monitors.len());
}

fn describe(r: &Rect) -> String {
    format!("{}x{} @ ({}, {})", r.width, r.height, r.x, r.y)
}
