//! End-to-end scenarios for the scoring engine
//!
//! Each test drives the full pipeline through [`ScoringEngine::run`] and
//! checks the externally observable outcome records.

use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use flock_rank::{
    Animal, CullReason, EngineConfig, FilterConfig, HardFilterCode, Kpi, KpiRecord,
    PresetRegistry, ScoringEngine, Sex,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn animal(id: &str, sex: Sex, day: u32) -> Animal {
    Animal::new(
        id,
        sex,
        NaiveDate::from_ymd_opt(2023, 8, day).unwrap(),
        "MOB-A",
    )
}

/// Raw values that pass every default hard filter
fn passing_raw(id: &str) -> KpiRecord {
    KpiRecord::new(id)
        .with_value(Kpi::BirthWeight, 4.0)
        .with_value(Kpi::FootrotScore, 1.0)
        .with_value(Kpi::DagScore, 1.0)
        .with_value(Kpi::WeaningWeight, 28.0)
        .with_value(Kpi::Micron, 21.0)
        .with_value(Kpi::BsePass, 1.0)
}

/// Engine whose only hard filter is footrot, for hand-computable scores
fn lenient_config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.filters.bse_required = false;
    config.use_parallel = false;
    config
}

#[test]
fn test_hard_failed_animal_absent_from_ranking_present_in_culls() {
    init_logging();
    let config = EngineConfig {
        filters: FilterConfig {
            max_footrot_score: 3.0,
            ..FilterConfig::default()
        },
        ..EngineConfig::default()
    };
    let engine = ScoringEngine::new(config).unwrap();

    let animals = vec![
        animal("A1", Sex::Ram, 1),
        animal("A2", Sex::Ram, 2),
        animal("A3", Sex::Ram, 3),
    ];
    let mut bad = passing_raw("A2").with_value(Kpi::Adg100To200d, 0.25);
    bad.set(Kpi::FootrotScore, 5.0);
    let kpis = vec![
        passing_raw("A1").with_value(Kpi::Adg100To200d, 0.2),
        bad,
        passing_raw("A3").with_value(Kpi::Adg100To200d, 0.3),
    ];

    let outcome = engine.run(&animals, &kpis);

    assert!(outcome.ranked.iter().all(|e| e.animal_id != "A2"));
    assert_eq!(outcome.ranked.len(), 2);

    let rec = outcome
        .culls
        .iter()
        .find(|c| c.animal_id == "A2")
        .expect("every animal is cull-evaluated");
    assert!(rec.cull_recommended);
    assert!(rec.reasons.iter().any(|r| matches!(
        r,
        CullReason::HardFilter {
            code: HardFilterCode::FootrotAboveMax,
            value: Some(v),
            threshold,
        } if *v == 5.0 && *threshold == 3.0
    )));

    // The explanation carries the literal triggering value too.
    let explanation = outcome.explanation("A2").unwrap();
    assert_eq!(explanation.hard_hits.len(), 1);
    assert_eq!(explanation.hard_hits[0].value, Some(5.0));

    assert!(outcome.validate().is_empty());
}

#[test]
fn test_ranks_are_permutation_over_scored_survivors() {
    init_logging();
    let engine = ScoringEngine::new(lenient_config()).unwrap();

    // A4 fails footrot, A5 has no KPI data at all.
    let animals: Vec<Animal> = (1..=5)
        .map(|i| animal(&format!("A{i}"), Sex::Ram, i))
        .collect();
    let kpis = vec![
        KpiRecord::new("A1").with_value(Kpi::Adg100To200d, 0.2),
        KpiRecord::new("A2").with_value(Kpi::Adg100To200d, 0.3),
        KpiRecord::new("A3").with_value(Kpi::Adg100To200d, 0.4),
        KpiRecord::new("A4")
            .with_value(Kpi::Adg100To200d, 0.5)
            .with_value(Kpi::FootrotScore, 5.0),
    ];

    let outcome = engine.run(&animals, &kpis);

    // N = non-hard-failed animals with a composite score.
    assert_eq!(outcome.ranked.len(), 3);
    let mut ranks: Vec<u32> = outcome.ranked.iter().map(|e| e.rank).collect();
    ranks.sort_unstable();
    assert_eq!(ranks, vec![1, 2, 3]);

    // A5 is still cull-evaluated despite having no data.
    assert!(outcome.culls.iter().any(|c| c.animal_id == "A5"));
    assert!(outcome.validate().is_empty());
}

#[test]
fn test_tie_break_deterministic_under_shuffled_input() {
    init_logging();

    // Identical KPIs everywhere: zero variance puts every animal at the
    // same composite, so ordering falls through to animal id.
    let mut animals: Vec<Animal> = (0..20)
        .map(|i| animal(&format!("R{i:02}"), Sex::Ram, 1 + (i % 5)))
        .collect();
    let kpis: Vec<KpiRecord> = animals
        .iter()
        .map(|a| {
            KpiRecord::new(a.animal_id.clone())
                .with_value(Kpi::Adg100To200d, 0.3)
                .with_value(Kpi::FecCount, 150.0)
        })
        .collect();

    let engine = ScoringEngine::new(lenient_config()).unwrap();
    let baseline: Vec<String> = engine
        .run(&animals, &kpis)
        .ranked
        .iter()
        .map(|e| e.animal_id.clone())
        .collect();

    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..5 {
        animals.shuffle(&mut rng);
        let ids: Vec<String> = engine
            .run(&animals, &kpis)
            .ranked
            .iter()
            .map(|e| e.animal_id.clone())
            .collect();
        assert_eq!(ids, baseline);
    }

    let sorted_ids: Vec<String> = {
        let mut ids = baseline.clone();
        ids.sort();
        ids
    };
    assert_eq!(baseline, sorted_ids);
}

#[test]
fn test_missing_wool_renormalizes_composite() {
    init_logging();
    let engine = ScoringEngine::new(lenient_config()).unwrap();

    let animals = vec![animal("A1", Sex::Ram, 1), animal("A2", Sex::Ram, 2)];
    // A1 carries a wool trait; A2 misses every wool KPI.
    let kpis = vec![
        KpiRecord::new("A1")
            .with_value(Kpi::Adg100To200d, 1.0)
            .with_value(Kpi::FecCount, 100.0)
            .with_value(Kpi::CleanFleeceWeight, 3.0),
        KpiRecord::new("A2")
            .with_value(Kpi::Adg100To200d, 2.0)
            .with_value(Kpi::FecCount, 300.0),
    ];

    let outcome = engine.run(&animals, &kpis);

    // Two-animal group: z-scores are +/- 1/sqrt(2).
    let z = 1.0 / 2.0_f64.sqrt();
    // A2, balanced weights over growth (0.3) and health (0.2) only:
    // growth z = +z, health (FEC flipped) = -z.
    let expected_a2 = (0.3 * z - 0.2 * z) / 0.5;
    let a2 = outcome.explanation("A2").unwrap();
    assert!(a2.categories.iter().all(|c| {
        c.category != flock_rank::TraitCategory::Wool || c.score.is_none()
    }));
    assert!((a2.composite.unwrap() - expected_a2).abs() < 1e-9);

    // A1's singleton wool trait standardizes to the neutral 0.
    let expected_a1 = (0.3 * -z + 0.2 * 0.0 + 0.2 * z) / 0.7;
    let a1 = outcome.explanation("A1").unwrap();
    assert!((a1.composite.unwrap() - expected_a1).abs() < 1e-9);
}

#[test]
fn test_worm_preset_promotes_parasite_resistant_ram() {
    init_logging();
    let registry = PresetRegistry::builtin();

    let animals = vec![animal("GROW", Sex::Ram, 1), animal("RESIST", Sex::Ram, 2)];
    // RESIST: bottom growth, top health. GROW: the opposite.
    let kpis = vec![
        KpiRecord::new("GROW")
            .with_value(Kpi::Adg100To200d, 0.45)
            .with_value(Kpi::FecCount, 600.0),
        KpiRecord::new("RESIST")
            .with_value(Kpi::Adg100To200d, 0.15)
            .with_value(Kpi::FecCount, 50.0),
    ];

    let mut balanced_config = EngineConfig::for_preset(&registry, "balanced").unwrap();
    balanced_config.filters.bse_required = false;
    let balanced = ScoringEngine::new(balanced_config).unwrap().run(&animals, &kpis);
    assert_eq!(balanced.ranked[0].animal_id, "GROW");

    let mut worm_config = EngineConfig::for_preset(&registry, "worm").unwrap();
    worm_config.filters.bse_required = false;
    let worm = ScoringEngine::new(worm_config).unwrap().run(&animals, &kpis);
    assert_eq!(worm.ranked[0].animal_id, "RESIST");
}

#[test]
fn test_explicit_cull_flag_kept_alongside_computed_reasons() {
    init_logging();
    let engine = ScoringEngine::new(EngineConfig::default()).unwrap();

    let flagged = animal("A1", Sex::Ewe, 1).with_cull_flag(Some("udder damage".to_string()));
    let animals = vec![flagged, animal("A2", Sex::Ewe, 2)];
    let mut bad = passing_raw("A1");
    bad.set(Kpi::Micron, 30.0);
    let kpis = vec![bad, passing_raw("A2")];

    let outcome = engine.run(&animals, &kpis);
    let rec = outcome.culls.iter().find(|c| c.animal_id == "A1").unwrap();

    assert!(rec.cull_recommended);
    assert!(matches!(
        &rec.reasons[0],
        CullReason::ExplicitFlag { note: Some(note) } if note == "udder damage"
    ));
    assert!(rec.reasons.iter().any(|r| matches!(
        r,
        CullReason::HardFilter {
            code: HardFilterCode::MicronAboveMax,
            ..
        }
    )));
}

#[test]
fn test_no_data_animal_has_no_composite_but_full_evaluation() {
    init_logging();
    let engine = ScoringEngine::new(lenient_config()).unwrap();

    let animals = vec![animal("A1", Sex::Ram, 1)];
    let outcome = engine.run(&animals, &[]);

    assert!(outcome.ranked.is_empty());
    let explanation = outcome.explanation("A1").unwrap();
    assert!(explanation.composite.is_none());
    assert!(explanation.categories.iter().all(|c| c.score.is_none()));
    assert_eq!(outcome.culls.len(), 1);

    let stats = outcome.statistics();
    assert_eq!(stats.total_animals, 1);
    assert_eq!(stats.ranked_count, 0);
    assert_eq!(stats.score_mean, None);
}

#[test]
fn test_group_summaries_expose_size_and_small_flag() {
    init_logging();
    let engine = ScoringEngine::new(lenient_config()).unwrap();

    let mut animals = vec![
        animal("A1", Sex::Ram, 1),
        animal("A2", Sex::Ram, 5),
        animal("A3", Sex::Ram, 10),
    ];
    // A lone late-born animal forms its own small group.
    animals.push(Animal::new(
        "A4",
        Sex::Ram,
        NaiveDate::from_ymd_opt(2023, 12, 1).unwrap(),
        "MOB-A",
    ));

    let outcome = engine.run(&animals, &[]);
    assert_eq!(outcome.groups.len(), 2);

    let big = outcome.groups.iter().find(|g| g.size == 3).unwrap();
    assert!(!big.small);
    let lone = outcome.groups.iter().find(|g| g.size == 1).unwrap();
    assert!(lone.small);

    let explanation = outcome.explanation("A4").unwrap();
    assert_eq!(explanation.group_id, lone.id);
    assert!(explanation.group_small);
}

#[test]
fn test_top_rams_filters_sex() {
    init_logging();
    let engine = ScoringEngine::new(lenient_config()).unwrap();

    let animals = vec![
        animal("E1", Sex::Ewe, 1),
        animal("R1", Sex::Ram, 2),
        animal("R2", Sex::Ram, 3),
        animal("W1", Sex::Wether, 4),
    ];
    let kpis: Vec<KpiRecord> = [("E1", 0.5), ("R1", 0.4), ("R2", 0.3), ("W1", 0.2)]
        .into_iter()
        .map(|(id, adg)| KpiRecord::new(id).with_value(Kpi::Adg100To200d, adg))
        .collect();

    let outcome = engine.run(&animals, &kpis);
    assert_eq!(outcome.ranked.len(), 4);

    let rams = outcome.top_rams(10);
    let ids: Vec<&str> = rams.iter().map(|e| e.animal_id.as_str()).collect();
    assert_eq!(ids, vec!["R1", "R2"]);
    assert_eq!(outcome.top_rams(1).len(), 1);
}

#[test]
fn test_outputs_serialize_for_reporting() {
    init_logging();
    let engine = ScoringEngine::new(lenient_config()).unwrap();

    let animals = vec![animal("A1", Sex::Ram, 1), animal("A2", Sex::Ram, 2)];
    let kpis = vec![
        KpiRecord::new("A1").with_value(Kpi::Adg100To200d, 0.2),
        KpiRecord::new("A2").with_value(Kpi::Adg100To200d, 0.4),
    ];
    let outcome = engine.run(&animals, &kpis);

    let ranked = serde_json::to_value(&outcome.ranked).unwrap();
    assert_eq!(ranked.as_array().unwrap().len(), 2);

    let explanation = serde_json::to_value(outcome.explanation("A1").unwrap()).unwrap();
    assert_eq!(explanation["animal_id"], "A1");
    assert!(explanation["weights"]["growth"].is_number());

    let culls = serde_json::to_value(&outcome.culls).unwrap();
    assert!(culls.as_array().unwrap().len() == 2);
}

#[test]
fn test_parallel_and_sequential_runs_agree() {
    init_logging();

    // Enough animals to cross the parallel threshold.
    let animals: Vec<Animal> = (0..200)
        .map(|i| animal(&format!("R{i:03}"), Sex::Ram, 1 + (i % 28) as u32))
        .collect();
    let kpis: Vec<KpiRecord> = animals
        .iter()
        .enumerate()
        .map(|(i, a)| {
            KpiRecord::new(a.animal_id.clone())
                .with_value(Kpi::Adg100To200d, 0.2 + (i % 17) as f64 * 0.01)
                .with_value(Kpi::FecCount, 100.0 + (i % 23) as f64 * 20.0)
                .with_value(Kpi::CleanFleeceWeight, 2.0 + (i % 7) as f64 * 0.1)
        })
        .collect();

    let mut sequential_config = lenient_config();
    sequential_config.use_parallel = false;
    let mut parallel_config = lenient_config();
    parallel_config.use_parallel = true;

    let sequential = ScoringEngine::new(sequential_config)
        .unwrap()
        .run(&animals, &kpis);
    let parallel = ScoringEngine::new(parallel_config)
        .unwrap()
        .run(&animals, &kpis);

    let seq_ids: Vec<&str> = sequential.ranked.iter().map(|e| e.animal_id.as_str()).collect();
    let par_ids: Vec<&str> = parallel.ranked.iter().map(|e| e.animal_id.as_str()).collect();
    assert_eq!(seq_ids, par_ids);
    for (s, p) in sequential.ranked.iter().zip(&parallel.ranked) {
        assert_eq!(s.composite, p.composite);
    }
}
