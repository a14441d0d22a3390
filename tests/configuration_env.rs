use mealshuffler::Config;

// Lives in its own test binary so the environment change can't leak into
// other configuration tests.
#[test]
fn test_environment_overrides_file() -> anyhow::Result<()> {
    unsafe {
        std::env::set_var("MEALSHUFFLER__PLANNER__USER_ID", "albert");
        std::env::set_var("MEALSHUFFLER__PLANNER__SEED", "7");
    }

    let config = Config::load(Some("config/default.toml".to_owned()))?;

    assert_eq!(config.planner.user_id, "albert");
    assert_eq!(config.planner.seed, Some(7));
    assert_eq!(config.catalog.path, "data/recipes.json");

    Ok(())
}
