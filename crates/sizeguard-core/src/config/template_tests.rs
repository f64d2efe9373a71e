use super::*;
use crate::config::KeybindingsFile;

#[test]
fn config_template_parses_as_valid_config() {
    // Arrange
    let toml_str = generate_config();

    // Act
    let result: Result<crate::Config, _> = toml::from_str(&toml_str);

    // Assert
    assert!(
        result.is_ok(),
        "config template is not valid TOML: {result:?}"
    );
}

#[test]
fn config_template_matches_default_values() {
    // Arrange
    let toml_str = generate_config();

    // Act
    let mut config: crate::Config = toml::from_str(&toml_str).unwrap();
    config.validate();

    // Assert
    let mut defaults = crate::Config::default();
    defaults.validate();
    assert_eq!(config, defaults);
}

#[test]
fn keybindings_template_parses_correctly() {
    // Arrange
    let toml_str = generate_keybindings();

    // Act
    let result: Result<KeybindingsFile, _> = toml::from_str(&toml_str);

    // Assert
    assert!(
        result.is_ok(),
        "keybindings template is not valid TOML: {result:?}"
    );
}

#[test]
fn keybindings_template_matches_defaults() {
    // Arrange
    let toml_str = generate_keybindings();

    // Act
    let file: KeybindingsFile = toml::from_str(&toml_str).unwrap();

    // Assert
    assert_eq!(file.keybinding, crate::config::keybinding::defaults());
}
