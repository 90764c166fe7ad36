//! Property tests over the sim's core invariants.
//!
//! Fuzzes timer arithmetic, the difficulty clock, pass bookkeeping, the
//! spawn lane guard, and the whole tick pipeline with arbitrary scripts.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use chrono_dash::consts::SIM_DT_MS;
use chrono_dash::sim::{
    DifficultyRamp, GameState, HazardKind, HazardSet, Power, Powers, SpawnScheduler, TickInput,
    tick,
};
use chrono_dash::tuning::Tuning;

proptest! {
    /// Countdowns clamp at zero whatever deltas arrive, negatives included.
    #[test]
    fn timer_countdowns_never_go_negative(
        deltas in prop::collection::vec(-100.0f64..500.0, 1..200),
    ) {
        let mut powers = Powers::new(&Tuning::default());
        powers.try_activate(Power::Freeze);
        for (i, delta) in deltas.iter().enumerate() {
            powers.tick(*delta);
            if i % 7 == 0 {
                powers.try_activate(Power::Slow);
            }
            for power in Power::ALL {
                prop_assert!(powers.timer(power).remaining_active_ms() >= 0.0);
                prop_assert!(powers.timer(power).remaining_cooldown_ms() >= 0.0);
            }
        }
    }

    /// Mutual exclusion holds under any request interleaving, and the
    /// multiplier only ever takes values from the tuning table.
    #[test]
    fn at_most_one_power_active(
        script in prop::collection::vec((0u8..4, 0.0f64..300.0), 1..300),
    ) {
        let mut powers = Powers::new(&Tuning::default());
        for (request, delta) in script {
            match request {
                0 => {
                    powers.try_activate(Power::Freeze);
                }
                1 => {
                    powers.try_activate(Power::Slow);
                }
                2 => {
                    powers.try_activate(Power::Speed);
                }
                _ => {}
            }
            let active = Power::ALL
                .iter()
                .filter(|&&power| powers.timer(power).is_active())
                .count();
            prop_assert!(active <= 1);
            let m = powers.multiplier();
            prop_assert!(m == 0.0 || m == 0.5 || m == 1.0 || m == 2.0);
            powers.tick(delta);
        }
    }

    /// The level is always the floor of wall-clock elapsed over the interval,
    /// and it never goes down.
    #[test]
    fn level_is_floor_of_elapsed(
        deltas in prop::collection::vec(0.0f64..1500.0, 1..400),
    ) {
        let mut ramp = DifficultyRamp::new(Tuning::default().difficulty);
        let mut prev = 0;
        for delta in deltas {
            ramp.tick(delta);
            let expected = (ramp.elapsed_ms() / 20_000.0) as u32;
            prop_assert_eq!(ramp.level(), expected);
            prop_assert!(ramp.level() >= prev);
            prev = ramp.level();
        }
    }

    /// Each hazard reports its pass at most once over its whole lifetime.
    #[test]
    fn pass_events_fire_once_per_hazard(
        deltas in prop::collection::vec(0.0f64..120.0, 1..200),
    ) {
        let mut set = HazardSet::new();
        for i in 0..6u32 {
            let kind = HazardKind::ALL[(i % 3) as usize];
            set.spawn(kind, (i % 3) as usize, 4.0 + i as f32 * 7.0, 12.0);
        }
        let mut seen = std::collections::HashSet::new();
        for delta in deltas {
            set.advance(delta, 1.0);
            for id in set.detect_passes(0.0) {
                prop_assert!(seen.insert(id));
            }
        }
    }

    /// The lane guard keeps at least one lane barrier-free inside the
    /// clearance window, however the RNG rolls.
    #[test]
    fn spawner_always_leaves_an_escape_lane(seed in 0u64..5000) {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut ramp = DifficultyRamp::new(tuning.difficulty);
        let mut spawner = SpawnScheduler::new(tuning.track);
        let mut hazards = HazardSet::new();

        // 80 s of spawning at a coarse step, well into the level ramp
        let step = SIM_DT_MS * 4.0;
        let ticks = (80_000.0 / step) as u32;
        let window_start = tuning.track.spawn_at - tuning.track.clearance_window;
        for _ in 0..ticks {
            ramp.tick(step);
            spawner.maybe_spawn(ramp.elapsed_ms(), &ramp, &mut hazards, &mut rng);
            hazards.advance(step, 1.0);
            hazards.reap_off_field(tuning.track.despawn_at);

            let blocked = (0..tuning.track.lane_count)
                .filter(|&lane| {
                    hazards.iter().any(|h| {
                        h.kind.blocks_lane() && h.lane == lane && h.position >= window_start
                    })
                })
                .count();
            prop_assert!(blocked < tuning.track.lane_count);
        }
    }

    /// The tick pipeline is total: any input script with any deltas leaves a
    /// consistent state and a non-decreasing score.
    #[test]
    fn pipeline_accepts_any_script(
        seed in 0u64..1000,
        script in prop::collection::vec((0u16..512, -50.0f64..400.0), 1..300),
    ) {
        let mut state = GameState::new(seed, Tuning::default());
        let mut prev_score = 0.0;
        for (bits, delta) in script {
            let input = TickInput {
                move_left: bits & 1 != 0,
                move_right: bits & 2 != 0,
                jump: bits & 4 != 0,
                slide: bits & 8 != 0,
                freeze: bits & 16 != 0,
                slow: bits & 32 != 0,
                speed: bits & 64 != 0,
                pause: bits & 128 != 0,
                idle_mode: bits & 256 != 0,
            };
            tick(&mut state, &input, delta);
            prop_assert!(state.score.value() >= prev_score);
            prev_score = state.score.value();
            prop_assert!(state.avatar.lane < state.tuning.track.lane_count);
        }
    }
}
