use hwmon_core::format;
use hwmon_core::sensors::{Metrics, NetMetrics};
use hwmon_windows::{NetworkBackend, SensorBackend};

/// Takes one sample from every backend and prints it.
pub fn execute(json: bool) {
    let mut sensors = match SensorBackend::new() {
        Ok(backend) => backend,
        Err(e) => {
            eprintln!("Error: could not open sensors: {e}");
            std::process::exit(1);
        }
    };
    let metrics = sensors.sample();
    let net = NetworkBackend::new().ok().map(|mut n| n.sample());

    if json {
        match to_json(&metrics, net.as_ref(), &sensors.gpu_sources()) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    print_table(&metrics);
    if let Some(net) = net {
        println!("{:<8} {}", "Down", format::download(net.net_in));
        println!("{:<8} {}", "Up", format::upload(net.net_out));
    }
    let sources = sensors.gpu_sources();
    if sources.is_empty() {
        println!("\nNo GPU temperature source available.");
    } else {
        println!("\nGPU temperature sources: {}", sources.join(" > "));
    }
}

fn print_table(metrics: &Metrics) {
    println!(
        "{:<8} {:>8} {:>8}",
        "CPU",
        format::temperature(metrics.cpu_temp),
        format::usage(metrics.cpu_usage)
    );
    println!(
        "{:<8} {:>8} {:>8}",
        "GPU",
        format::temperature(metrics.gpu_temp),
        format::usage(metrics.gpu_usage)
    );
}

/// The sample's fields at the top level, plus `network` (null when the
/// counters are unavailable) and the GPU temperature source order.
fn to_json(
    metrics: &Metrics,
    net: Option<&NetMetrics>,
    sources: &[&str],
) -> serde_json::Result<String> {
    let mut value = serde_json::to_value(metrics)?;
    if let serde_json::Value::Object(map) = &mut value {
        map.insert("network".into(), serde_json::to_value(net)?);
        map.insert("gpu_temp_sources".into(), serde_json::to_value(sources)?);
    }
    serde_json::to_string_pretty(&value)
}
