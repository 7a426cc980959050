use super::*;

#[test]
fn test_default_filters_parse() {
    for verbose in [false, true] {
        assert!(
            default_filter(verbose).parse::<EnvFilter>().is_ok(),
            "verbose={verbose}"
        );
    }
}

#[test]
fn test_verbose_filter_covers_every_crate() {
    let filter = default_filter(true);
    for target in ["lmap_cli", "lmap_core", "lmap_sql", "lmap_lineage"] {
        assert!(filter.contains(&format!("{target}=debug")), "{target}");
    }
    assert_eq!(default_filter(false), "warn");
}
