use super::*;

#[test]
fn default_config_has_expected_values() {
    // Arrange
    let mut config = Config::default();

    // Act
    config.validate();

    // Assert
    assert_eq!(config.window.refresh_ms, 250);
    assert_eq!(config.window.sample_window, 4);
    assert_eq!(config.window.snap_px, 16);
    assert_eq!(config.style.temp_threshold, 80.0);
    assert_eq!(config.colors, ColorConfig::default());
}

#[test]
fn default_components_hide_network() {
    let config = Config::default();

    assert_eq!(
        config.enabled_components(),
        vec![ComponentKind::Cpu, ComponentKind::Gpu, ComponentKind::Time]
    );
    assert!(!config.has_component(ComponentKind::Network));
}

#[test]
fn partial_toml_uses_defaults_for_missing_sections() {
    // Arrange
    let toml_str = "[window]\nwidth = 300\n";

    // Act
    let config: Config = toml::from_str(toml_str).unwrap();

    // Assert
    assert_eq!(config.window.width, 300);
    assert_eq!(config.window.refresh_ms, 250);
    assert_eq!(config.components, default_components());
}

#[test]
fn component_enabled_defaults_to_true() {
    // Arrange
    let toml_str = "[[components]]\ntype = \"network\"\n\n[[components]]\ntype = \"time\"\n";

    // Act
    let config: Config = toml::from_str(toml_str).unwrap();

    // Assert
    assert_eq!(
        config.enabled_components(),
        vec![ComponentKind::Network, ComponentKind::Time]
    );
}

#[test]
fn unknown_component_type_is_rejected() {
    let toml_str = "[[components]]\ntype = \"fan\"\n";
    let result: Result<Config, _> = toml::from_str(toml_str);
    assert!(result.is_err());
}

#[test]
fn validate_clamps_out_of_range_values() {
    // Arrange
    let mut config = Config::default();
    config.window.refresh_ms = 1;
    config.window.sample_window = 0;
    config.window.history_len = 1;
    config.window.snap_px = -5;
    config.style.max_value = 0.0;

    // Act
    config.validate();

    // Assert
    assert_eq!(config.window.refresh_ms, 50);
    assert_eq!(config.window.sample_window, 1);
    assert_eq!(config.window.history_len, 2);
    assert_eq!(config.window.snap_px, 0);
    assert_eq!(config.style.max_value, 100.0);
}

#[test]
fn validate_replaces_invalid_colors() {
    let mut config = Config::default();
    config.colors.cpu = "blue-ish".into();
    config.colors.warn = "#ff0000".into();

    config.validate();

    assert_eq!(config.colors.cpu, "#4a9eff");
    assert_eq!(config.colors.warn, "#ff0000");
}

#[test]
fn anchor_parses_lowercase() {
    let config: Config = toml::from_str("[window]\nanchor = \"bottomleft\"\n").unwrap();
    assert_eq!(config.window.anchor, Anchor::BottomLeft);
}

#[test]
fn config_roundtrips_through_toml() {
    // Arrange
    let config = Config::default();

    // Act
    let serialized = toml::to_string(&config).unwrap();
    let deserialized: Config = toml::from_str(&serialized).unwrap();

    // Assert
    assert_eq!(deserialized.components, config.components);
    assert_eq!(deserialized.colors, config.colors);
    assert_eq!(deserialized.window.width, config.window.width);
}

#[test]
fn template_parses_as_valid_config() {
    // Arrange
    let toml_str = template::generate_config();

    // Act
    let result: Result<Config, _> = toml::from_str(&toml_str);

    // Assert
    assert!(
        result.is_ok(),
        "config template is not valid TOML: {result:?}"
    );
}

#[test]
fn template_matches_default_values() {
    // Arrange
    let toml_str = template::generate_config();

    // Act
    let mut config: Config = toml::from_str(&toml_str).unwrap();
    config.validate();

    // Assert
    let defaults = Config::default();
    assert_eq!(config.window.width, defaults.window.width);
    assert_eq!(config.window.refresh_ms, defaults.window.refresh_ms);
    assert_eq!(config.window.sample_window, defaults.window.sample_window);
    assert_eq!(config.window.history_len, defaults.window.history_len);
    assert_eq!(config.window.snap_px, defaults.window.snap_px);
    assert_eq!(
        config.window.click_threshold,
        defaults.window.click_threshold
    );
    assert_eq!(config.window.anchor, defaults.window.anchor);
    assert_eq!(config.style.font, defaults.style.font);
    assert_eq!(config.style.font_size, defaults.style.font_size);
    assert_eq!(config.style.time_format, defaults.style.time_format);
    assert_eq!(config.colors, defaults.colors);
    assert_eq!(config.components, defaults.components);
    assert_eq!(config.logging.level, defaults.logging.level);
}
