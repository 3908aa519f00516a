//! Property tests for seeding and the update fold

mod fixtures;

use proptest::prelude::*;
use std::collections::HashSet;
use xg_ratings::config::GameweekPolicy;
use xg_ratings::rating::{build_base_table, resolve, resolve_all, RatingSeeder, UpdateEngine};
use xg_ratings::types::{BaseRating, Fixture, TeamId};

use fixtures::base;

const TOLERANCE: f64 = 1e-6;

/// Base ratings for 2..8 teams and up to 40 fixtures between them.
/// The first fixture always carries xG so every season has work to do.
fn season_strategy() -> impl Strategy<Value = (Vec<BaseRating>, Vec<Fixture>)> {
    (2u32..8)
        .prop_flat_map(|teams| {
            let bases = prop::collection::vec((1300u32..=1700, 1300u32..=1700), teams as usize);
            let fixtures = prop::collection::vec(
                (
                    1u32..12,
                    1..=teams,
                    1..=teams,
                    prop::option::weighted(0.85, 0u32..400),
                    0u32..400,
                ),
                1..40,
            );
            (bases, fixtures)
        })
        .prop_map(|(raw_bases, raw_fixtures)| {
            let teams = raw_bases.len() as TeamId;
            let bases: Vec<BaseRating> = raw_bases
                .into_iter()
                .enumerate()
                .map(|(i, (off, def))| base(i as TeamId + 1, off as f64, def as f64))
                .collect();

            let fixtures = raw_fixtures
                .into_iter()
                .enumerate()
                .map(|(i, (event, home, away, home_xg, away_xg))| {
                    let away = if home == away { home % teams + 1 } else { away };
                    let home_xg = if i == 0 { Some(home_xg.unwrap_or(100)) } else { home_xg };
                    Fixture {
                        code: 10_000 + i as i64,
                        id: None,
                        event: Some(event),
                        finished: home_xg.is_some(),
                        team_h: home,
                        team_a: away,
                        kickoff_time: None,
                        team_h_xg: home_xg.map(|x| x as f64 / 100.0),
                        team_a_xg: Some(away_xg as f64 / 100.0),
                    }
                })
                .collect();

            (bases, fixtures)
        })
}

fn policy_strategy() -> impl Strategy<Value = GameweekPolicy> {
    prop_oneof![Just(GameweekPolicy::Sequential), Just(GameweekPolicy::Snapshot)]
}

proptest! {
    #[test]
    fn seeding_is_monotonic(metrics in prop::collection::hash_set(-1000i32..1000, 2..40)) {
        let ranking: Vec<(TeamId, f64)> = metrics
            .iter()
            .enumerate()
            .map(|(i, m)| (i as TeamId, *m as f64))
            .collect();

        let seeded = RatingSeeder::default().seed(&ranking).unwrap();

        prop_assert_eq!(seeded.len(), ranking.len());
        prop_assert_eq!(seeded.first().unwrap().1, 1700);
        prop_assert_eq!(seeded.last().unwrap().1, 1300);
        for pair in seeded.windows(2) {
            prop_assert!(pair[0].1 >= pair[1].1);
        }

        // Best metric gets the top rating
        let best = ranking
            .iter()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap();
        prop_assert_eq!(seeded[0].0, best.0);
    }

    #[test]
    fn every_fixture_is_zero_sum(
        (bases, fixtures) in season_strategy(),
        policy in policy_strategy(),
    ) {
        let table = build_base_table(bases).unwrap();
        let (ledger, report) = UpdateEngine::default()
            .with_policy(policy)
            .recompute(&fixtures, &table)
            .unwrap();

        prop_assert!(report.failures.is_empty());
        prop_assert_eq!(ledger.len() % 2, 0);
        for pair in ledger.changes().chunks(2) {
            let (home, away) = (pair[0], pair[1]);
            prop_assert_eq!(home.fixture_code, away.fixture_code);
            prop_assert!((home.off_change + away.def_change).abs() < TOLERANCE);
            prop_assert!((home.def_change + away.off_change).abs() < TOLERANCE);
        }

        // Zero-sum pairs conserve the league-wide rating total
        let before: f64 = table.values().map(|b| b.off_rating + b.def_rating).sum();
        let after: f64 = resolve_all(&table, ledger.changes())
            .unwrap()
            .iter()
            .map(|r| r.off_rating + r.def_rating)
            .sum();
        prop_assert!((before - after).abs() < TOLERANCE * 100.0);
    }

    #[test]
    fn only_eligible_fixtures_reach_the_ledger((bases, fixtures) in season_strategy()) {
        let table = build_base_table(bases).unwrap();
        let (ledger, _) = UpdateEngine::default().recompute(&fixtures, &table).unwrap();

        let eligible: HashSet<i64> = fixtures
            .iter()
            .filter(|f| f.is_eligible())
            .map(|f| f.code)
            .collect();
        let recorded: HashSet<i64> = ledger.iter().map(|c| c.fixture_code).collect();
        prop_assert_eq!(eligible, recorded);
    }

    #[test]
    fn input_order_does_not_matter(
        (bases, fixtures, shuffled) in season_strategy().prop_flat_map(|(bases, fixtures)| {
            (Just(bases), Just(fixtures.clone()), Just(fixtures).prop_shuffle())
        }),
        policy in policy_strategy(),
    ) {
        let table = build_base_table(bases).unwrap();
        let engine = UpdateEngine::default().with_policy(policy);

        let (first, _) = engine.recompute(&fixtures, &table).unwrap();
        let (again, _) = engine.recompute(&fixtures, &table).unwrap();
        let (reordered, _) = engine.recompute(&shuffled, &table).unwrap();

        prop_assert_eq!(first.changes(), again.changes());
        prop_assert_eq!(first.changes(), reordered.changes());
    }

    #[test]
    fn repeated_codes_are_rejected_in_any_order(
        (bases, fixtures, shuffled) in season_strategy().prop_flat_map(|(bases, mut fixtures)| {
            // Same code and slot as the first fixture, teams swapped
            let mut copy = fixtures[0].clone();
            std::mem::swap(&mut copy.team_h, &mut copy.team_a);
            fixtures.push(copy);
            (Just(bases), Just(fixtures.clone()), Just(fixtures).prop_shuffle())
        }),
    ) {
        let table = build_base_table(bases).unwrap();
        let engine = UpdateEngine::default();

        let (first, first_report) = engine.recompute(&fixtures, &table).unwrap();
        let (reordered, reordered_report) = engine.recompute(&shuffled, &table).unwrap();

        prop_assert_eq!(first.changes(), reordered.changes());
        prop_assert!(!first.has_fixture(fixtures[0].code));
        prop_assert_eq!(first_report.failures, reordered_report.failures);
    }

    #[test]
    fn resolution_is_order_independent((bases, fixtures) in season_strategy()) {
        let table = build_base_table(bases).unwrap();
        let (ledger, _) = UpdateEngine::default().recompute(&fixtures, &table).unwrap();

        let mut reversed = ledger.changes().to_vec();
        reversed.reverse();

        for current in resolve_all(&table, ledger.changes()).unwrap() {
            let forward = resolve(current.team_id, &table, ledger.changes()).unwrap();
            let backward = resolve(current.team_id, &table, &reversed).unwrap();
            prop_assert!((forward.off_rating - current.off_rating).abs() < TOLERANCE);
            prop_assert!((forward.def_rating - current.def_rating).abs() < TOLERANCE);
            prop_assert!((forward.off_rating - backward.off_rating).abs() < TOLERANCE);
            prop_assert!((forward.def_rating - backward.def_rating).abs() < TOLERANCE);
        }
    }
}
