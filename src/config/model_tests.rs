use super::*;

#[test]
fn empty_settings_parse_to_defaults() {
    let config: SettingsConfig = toml::from_str("").unwrap();

    assert_eq!(config, SettingsConfig::default());
    assert!(config.provider.is_none());
    assert!(config.checkers.is_empty());
}

#[test]
fn search_provider_defaults() {
    let config: SettingsConfig = toml::from_str(
        r#"
        checkers = ["file-size"]

        [provider]
        kind = "search"
        "#,
    )
    .unwrap();

    assert_eq!(
        config.provider,
        Some(ProviderConfig::Search {
            filter: String::new(),
            include: None,
            exclude: None,
            folders: vec!["Assets".to_string()],
            ignore_default_assets: false,
        })
    );
}

#[test]
fn parses_every_provider_kind() {
    let config: SettingsConfig = toml::from_str(
        r#"
        [provider]
        kind = "explicit"
        assets = ["Assets/a.png"]

        [[profiles]]
        name = "selection"
        checkers = ["line-endings"]
        provider = { kind = "selection", modes = ["assets", "deep-assets"] }

        [[profiles]]
        name = "textures"
        custom_view_provider = "builtin"
        checkers = ["file-size"]

        [profiles.provider]
        kind = "search"
        filter = "t:Texture"
        exclude = "/Legacy/"
        folders = ["Assets/Art"]
        ignore_default_assets = true
        "#,
    )
    .unwrap();

    assert_eq!(
        config.provider,
        Some(ProviderConfig::Explicit {
            assets: vec!["Assets/a.png".to_string()]
        })
    );
    assert_eq!(
        config.profile("selection").unwrap().provider,
        Some(ProviderConfig::Selection {
            modes: vec!["assets".to_string(), "deep-assets".to_string()]
        })
    );
    let textures = config.profile(" textures ").unwrap();
    assert_eq!(textures.custom_view_provider.as_deref(), Some("builtin"));
    assert!(matches!(
        &textures.provider,
        Some(ProviderConfig::Search { filter, ignore_default_assets: true, .. }) if filter == "t:Texture"
    ));
    assert_eq!(
        config.profile_names().collect::<Vec<_>>(),
        vec!["selection", "textures"]
    );
}

#[test]
fn unknown_provider_kind_is_rejected() {
    let result: Result<SettingsConfig, _> = toml::from_str(
        r#"
        [provider]
        kind = "remote"
        "#,
    );

    assert!(result.is_err());
}

#[test]
fn checker_options_round_trip_through_toml() {
    let mut config = SettingsConfig::default();
    config.checker_options.file_size.warn_bytes = 42;
    config.checkers = vec!["file-size".to_string()];

    let text = toml::to_string(&config).unwrap();
    let parsed: SettingsConfig = toml::from_str(&text).unwrap();

    assert_eq!(parsed, config);
}
