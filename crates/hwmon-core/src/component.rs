//! Per-row component state: sample windows, graph history, and labels.
//!
//! Components hold everything the renderer needs as plain data. The
//! Windows overlay reads the labels and history and draws them.

use crate::config::{ComponentKind, Config};
use crate::format::{self, LocalTime};
use crate::sample::{Cadence, History, SampleWindow};
use crate::sensors::{Metrics, NetMetrics};

/// Shown before the first averaged refresh.
pub const PLACEHOLDER: &str = "--";

/// CPU or GPU row: temperature graph with temperature and usage labels.
#[derive(Debug, Clone)]
pub struct LoadTemp {
    kind: ComponentKind,
    temps: SampleWindow,
    usage: SampleWindow,
    history: History,
    cadence: Cadence,
    latest_temp: Option<f64>,
    temp_text: String,
    usage_text: String,
}

impl LoadTemp {
    pub fn new(kind: ComponentKind, sample_window: usize, history_len: usize) -> Self {
        Self {
            kind,
            temps: SampleWindow::new(sample_window),
            usage: SampleWindow::new(sample_window),
            history: History::new(history_len),
            cadence: Cadence::new(sample_window),
            latest_temp: None,
            temp_text: PLACEHOLDER.into(),
            usage_text: PLACEHOLDER.into(),
        }
    }

    pub fn add_sample(&mut self, temp: Option<f64>, usage: Option<f64>) {
        self.temps.push(temp);
        self.usage.push(usage);
    }

    /// Advances one tick. Every `sample_window` ticks the averaged
    /// temperature is pushed into the history (zero when unknown) and
    /// the labels refresh. Returns true when that happened.
    pub fn update(&mut self) -> bool {
        if !self.cadence.tick() {
            return false;
        }
        let temp = self.temps.mean();
        self.history.push(temp.unwrap_or(0.0));
        self.latest_temp = temp;
        self.temp_text = format::temperature(temp);
        self.usage_text = format::usage(self.usage.mean());
        true
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn label(&self) -> &'static str {
        match self.kind {
            ComponentKind::Gpu => "GPU:",
            _ => "CPU:",
        }
    }

    pub fn latest_temp(&self) -> Option<f64> {
        self.latest_temp
    }

    pub fn temp_text(&self) -> &str {
        &self.temp_text
    }

    pub fn usage_text(&self) -> &str {
        &self.usage_text
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}

/// Download and upload throughput on one row.
#[derive(Debug, Clone)]
pub struct Network {
    net_in: SampleWindow,
    net_out: SampleWindow,
    cadence: Cadence,
    down_text: String,
    up_text: String,
}

impl Network {
    pub fn new(sample_window: usize) -> Self {
        Self {
            net_in: SampleWindow::new(sample_window),
            net_out: SampleWindow::new(sample_window),
            cadence: Cadence::new(sample_window),
            down_text: format!("↓ {PLACEHOLDER}"),
            up_text: format!("↑ {PLACEHOLDER}"),
        }
    }

    pub fn add_sample(&mut self, sample: &NetMetrics) {
        self.net_in.push(sample.net_in);
        self.net_out.push(sample.net_out);
    }

    pub fn update(&mut self) -> bool {
        if !self.cadence.tick() {
            return false;
        }
        self.down_text = format::download(self.net_in.mean());
        self.up_text = format::upload(self.net_out.mean());
        true
    }

    pub fn down_text(&self) -> &str {
        &self.down_text
    }

    pub fn up_text(&self) -> &str {
        &self.up_text
    }
}

/// Local time, refreshed every tick.
#[derive(Debug, Clone)]
pub struct Clock {
    pattern: String,
    text: String,
}

impl Clock {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            text: String::new(),
        }
    }

    /// Re-formats the time. Returns true when the text changed.
    pub fn update(&mut self, now: &LocalTime) -> bool {
        let text = now.format(&self.pattern);
        if text == self.text {
            return false;
        }
        self.text = text;
        true
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// One row of the overlay.
#[derive(Debug, Clone)]
pub enum Component {
    LoadTemp(LoadTemp),
    Network(Network),
    Time(Clock),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::LoadTemp(c) => c.kind(),
            Self::Network(_) => ComponentKind::Network,
            Self::Time(_) => ComponentKind::Time,
        }
    }
}

/// The enabled components in display order.
#[derive(Debug, Clone, Default)]
pub struct Components {
    items: Vec<Component>,
}

impl Components {
    pub fn from_config(config: &Config) -> Self {
        let window = config.window.sample_window;
        let history = config.window.history_len;
        let items = config
            .enabled_components()
            .into_iter()
            .map(|kind| match kind {
                ComponentKind::Cpu | ComponentKind::Gpu => {
                    Component::LoadTemp(LoadTemp::new(kind, window, history))
                }
                ComponentKind::Network => Component::Network(Network::new(window)),
                ComponentKind::Time => Component::Time(Clock::new(&config.style.time_format)),
            })
            .collect();
        Self { items }
    }

    /// Feeds one tick of readings to every component.
    ///
    /// `net` is `None` when network sampling is off. Returns true if any
    /// component's display changed.
    pub fn feed(&mut self, metrics: &Metrics, net: Option<&NetMetrics>, now: &LocalTime) -> bool {
        let mut changed = false;
        for item in &mut self.items {
            changed |= match item {
                Component::LoadTemp(c) => {
                    match c.kind() {
                        ComponentKind::Gpu => c.add_sample(metrics.gpu_temp, metrics.gpu_usage),
                        _ => c.add_sample(metrics.cpu_temp, metrics.cpu_usage),
                    }
                    c.update()
                }
                Component::Network(c) => {
                    if let Some(sample) = net {
                        c.add_sample(sample);
                    }
                    c.update()
                }
                Component::Time(c) => c.update(now),
            };
        }
        changed
    }

    pub fn kinds(&self) -> Vec<ComponentKind> {
        self.items.iter().map(Component::kind).collect()
    }

    pub fn get(&self, index: usize) -> Option<&Component> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(second: u16) -> LocalTime {
        LocalTime {
            hour: 12,
            minute: 30,
            second,
            ..Default::default()
        }
    }

    #[test]
    fn load_temp_refreshes_every_window() {
        // Arrange
        let mut cpu = LoadTemp::new(ComponentKind::Cpu, 2, 5);

        // Act
        cpu.add_sample(Some(40.0), Some(10.0));
        let first = cpu.update();
        cpu.add_sample(Some(50.0), Some(30.0));
        let second = cpu.update();

        // Assert
        assert!(!first);
        assert!(second);
        assert_eq!(cpu.temp_text(), "45.0°C");
        assert_eq!(cpu.usage_text(), "20.0%");
        assert_eq!(cpu.history().latest(), 45.0);
        assert_eq!(cpu.history().len(), 5);
    }

    #[test]
    fn load_temp_without_readings_shows_unavailable() {
        // Arrange
        let mut gpu = LoadTemp::new(ComponentKind::Gpu, 1, 5);

        // Act
        gpu.add_sample(None, None);
        gpu.update();

        // Assert
        assert_eq!(gpu.temp_text(), "N/A");
        assert_eq!(gpu.usage_text(), "N/A");
        assert_eq!(gpu.latest_temp(), None);
        assert_eq!(gpu.history().latest(), 0.0);
        assert_eq!(gpu.label(), "GPU:");
    }

    #[test]
    fn load_temp_labels_start_as_placeholder() {
        let cpu = LoadTemp::new(ComponentKind::Cpu, 4, 60);
        assert_eq!(cpu.temp_text(), "--");
        assert_eq!(cpu.usage_text(), "--");
    }

    #[test]
    fn network_averages_in_and_out() {
        // Arrange
        let mut net = Network::new(2);

        // Act
        net.add_sample(&NetMetrics {
            net_in: Some(1024.0),
            net_out: Some(100.0),
        });
        net.update();
        net.add_sample(&NetMetrics {
            net_in: Some(2048.0),
            net_out: None,
        });
        let refreshed = net.update();

        // Assert
        assert!(refreshed);
        assert_eq!(net.down_text(), "↓ 1.5 KB");
        assert_eq!(net.up_text(), "↑ 100 B");
    }

    #[test]
    fn clock_reports_changes_only() {
        let mut clock = Clock::new("%H:%M:%S");

        assert!(clock.update(&at(1)));
        assert!(!clock.update(&at(1)));
        assert!(clock.update(&at(2)));
        assert_eq!(clock.text(), "12:30:02");
    }

    #[test]
    fn components_follow_config_order() {
        let config = Config::default();

        let components = Components::from_config(&config);

        assert_eq!(
            components.kinds(),
            vec![ComponentKind::Cpu, ComponentKind::Gpu, ComponentKind::Time]
        );
    }

    #[test]
    fn feed_routes_cpu_and_gpu_readings() {
        // Arrange
        let mut config = Config::default();
        config.window.sample_window = 1;
        let mut components = Components::from_config(&config);
        let metrics = Metrics {
            cpu_temp: Some(55.0),
            cpu_usage: Some(12.0),
            gpu_temp: Some(66.0),
            gpu_usage: None,
        };

        // Act
        let changed = components.feed(&metrics, None, &at(0));

        // Assert
        assert!(changed);
        let texts: Vec<String> = components
            .iter()
            .filter_map(|c| match c {
                Component::LoadTemp(lt) => Some(format!("{} {}", lt.temp_text(), lt.usage_text())),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["55.0°C 12.0%", "66.0°C N/A"]);
    }
}
