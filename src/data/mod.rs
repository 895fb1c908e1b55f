mod loader;
mod tuning;

pub use loader::{load_tuning, load_tuning_from_path, tuning_path};
pub use tuning::{
    DamageTuning, DebugTuning, DrainTuning, EnemyRewardInfo, KillRewardTuning,
    PerfectDodgeTuning, RunTuning, SkillDefinition, TimeTuning,
};

#[cfg(test)]
mod tests {
    use super::{RunTuning, load_tuning, load_tuning_from_path};

    #[test]
    fn bundled_tuning_loads_and_matches_defaults() {
        let tuning = load_tuning().expect("bundled tuning should load");

        assert!(
            !tuning.skills.is_empty(),
            "tuning.json should include at least one skill"
        );
        assert_eq!(tuning, RunTuning::default());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_tuning_from_path("does/not/exist.json").expect_err("missing file");
        assert!(format!("{err:#}").contains("does/not/exist.json"));
    }
}
