/// Generates the default `config.toml` contents with explanatory comments.
///
/// This is used by `hwmon init` to create a starter config file that
/// users can immediately edit.
pub fn generate_config() -> String {
    r##"# hwmon configuration
# Location: ~/.config/hwmon/config.toml

[window]
# Overlay width in pixels.
width = 220
# Sensor polling interval in milliseconds.
refresh_ms = 250
# Number of polls averaged into one displayed value. Labels and graphs
# refresh once every `sample_window` polls.
sample_window = 4
# Number of points kept in each graph.
history_len = 60
# Distance in pixels at which a dragged overlay snaps to a screen edge.
snap_px = 16
# Movement in pixels below which a press and release counts as a click.
click_threshold = 3
# Starting corner: "topleft", "topright", "bottomleft", or "bottomright".
# Snap the overlay to the top edge and click the time row to minimize it
# to a strip; click again to restore.
anchor = "topright"

[style]
font = "Segoe UI"
# Font heights in pixels.
font_size = 15
time_font_size = 13
# Graph height in pixels.
graph_height = 20
# Graphs turn to the warning color above this temperature (°C).
temp_threshold = 80.0
# Graphs scale to at least this value.
max_value = 100.0
# Supports %H %M %S %A %d %B %Y and %%.
time_format = "%H:%M:%S"

[colors]
background = "#1e1e1e"
border = "#3c3c3c"
text = "#e0e0e0"
dim = "#888888"
graph_background = "#2a2a2a"
center_line = "#3a3a3a"
cpu = "#4a9eff"
gpu = "#4aff9e"
warn = "#ff4444"
down = "#8b5cf6"
up = "#eab308"
time_background = "#2a2a2a"

# Components are stacked top to bottom in the order listed.
# Set enabled = false to hide one without removing it.
[[components]]
type = "cpu"

[[components]]
type = "gpu"

[[components]]
type = "network"
enabled = false

[[components]]
type = "time"

[logging]
# Enable file logging to ~/.config/hwmon/logs/hwmon.log.
enabled = false
# Minimum log level: "debug", "info", "warn", or "error".
level = "info"
# Maximum log file size in MB before rotation.
max_file_mb = 10
"##
    .to_string()
}
