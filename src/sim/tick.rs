//! Fixed timestep simulation tick
//!
//! Advances the run deterministically and reports what happened as events.
//! Component order is fixed and observable: powers before the ramp, spawn
//! before motion, collision against this tick's post-advance positions.

use super::avatar::AvatarAction;
use super::collision::first_collision;
use super::powers::Power;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (one-shot flags, cleared by the driver)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub slide: bool,
    pub freeze: bool,
    pub slow: bool,
    pub speed: bool,
    /// Pause toggle
    pub pause: bool,
    /// Attract-mode autopilot plays the run
    pub idle_mode: bool,
}

impl TickInput {
    fn any_gameplay_input(&self) -> bool {
        self.move_left
            || self.move_right
            || self.jump
            || self.slide
            || self.freeze
            || self.slow
            || self.speed
    }
}

/// Advance the game by one fixed timestep, reporting events in order
pub fn tick(state: &mut GameState, input: &TickInput, delta_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let delta_ms = delta_ms.max(0.0);

    // Pause gate consumes the tick before any component sees it
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                events.push(GameEvent::Paused);
                return events;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                events.push(GameEvent::Resumed);
                return events;
            }
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return events,
        _ => {}
    }

    let mut input = *input;
    if input.idle_mode {
        autopilot(state, &mut input);
    }

    // First gameplay input starts the run
    if state.phase == GamePhase::Ready {
        if input.any_gameplay_input() {
            state.phase = GamePhase::Playing;
            events.push(GameEvent::RunStarted);
        } else {
            return events;
        }
    }

    state.time_ticks += 1;

    // Power requests, fixed order
    for (requested, power) in [
        (input.freeze, Power::Freeze),
        (input.slow, Power::Slow),
        (input.speed, Power::Speed),
    ] {
        if !requested {
            continue;
        }
        let interrupted = state.powers.active_power();
        if state.powers.try_activate(power) {
            if let Some(prev) = interrupted {
                events.push(GameEvent::PowerInterrupted { power: prev });
            }
            events.push(GameEvent::PowerActivated { power });
        } else {
            events.push(GameEvent::PowerDenied { power });
        }
    }

    // Avatar intents, then its pose clock
    if input.move_left {
        state.avatar.move_left();
    }
    if input.move_right {
        state.avatar.move_right();
    }
    if input.jump {
        state.avatar.jump();
    }
    if input.slide {
        state.avatar.slide();
    }
    state.avatar.tick(delta_ms);

    // Multiplier and boost come from timer state at tick entry, before the
    // decrement: a power expiring at the end of this tick covers all of it
    let multiplier = state.powers.multiplier();
    let speed_boost = state.powers.score_boost_active();

    if let Some(power) = state.powers.tick(delta_ms) {
        events.push(GameEvent::PowerExpired { power });
    }

    // Difficulty runs on the wall clock, immune to the multiplier
    let gained = state.ramp.tick(delta_ms);
    for i in 0..gained {
        events.push(GameEvent::LevelUp {
            level: state.ramp.level() - gained + i + 1,
        });
    }

    // Spawning follows wall-clock cadence too
    if let Some(hazard) = state.spawner.maybe_spawn(
        state.ramp.elapsed_ms(),
        &state.ramp,
        &mut state.hazards,
        &mut state.rng,
    ) {
        events.push(GameEvent::HazardSpawned {
            id: hazard.id,
            kind: hazard.kind,
            lane: hazard.lane,
        });
    }

    // Hazard motion under the entry-state multiplier
    state.hazards.advance(delta_ms, multiplier);

    // A collision ends the run on the spot; nothing accrues on this tick
    let avatar_bounds = state.avatar.bounds();
    if let Some(hazard_id) = first_collision(&avatar_bounds, state.avatar.lane, &state.hazards) {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver {
            hazard_id,
            score: state.score.display(),
            level: state.ramp.level(),
        });
        return events;
    }

    // Pass detection, reaping, then scoring
    let passed = state.hazards.detect_passes(0.0);
    for id in &passed {
        events.push(GameEvent::HazardPassed { id: *id });
    }

    for id in state.hazards.reap_off_field(state.tuning.track.despawn_at) {
        events.push(GameEvent::HazardRetired { id });
    }

    state.score.tick(delta_ms, speed_boost);
    if !passed.is_empty() {
        state.score.on_hazards_passed(passed.len(), speed_boost);
    }

    events
}

/// Attract-mode autopilot: dodge the nearest threat, exercise the powers.
///
/// Reaction windows are expressed as time-to-contact so dodges stay timed
/// at any difficulty level or multiplier.
fn autopilot(state: &GameState, input: &mut TickInput) {
    use super::hazard::HazardKind;

    // Any input starts the run from the Ready screen
    if state.phase == GamePhase::Ready {
        input.jump = true;
        return;
    }

    let multiplier = state.powers.multiplier();
    let avatar_front = crate::consts::AVATAR_HALF_DEPTH;

    // Nearest unpassed hazard ahead in our lane
    let threat = state
        .hazards
        .iter()
        .filter(|h| h.lane == state.avatar.lane && !h.passed && h.leading_edge() > avatar_front)
        .min_by(|a, b| {
            a.position
                .partial_cmp(&b.position)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(threat) = threat else {
        // Open road: bank double points whenever Speed is off cooldown
        if state.powers.timer(Power::Speed).is_ready() {
            input.speed = true;
        }
        return;
    };

    if multiplier <= 0.0 {
        // Field is frozen, nothing approaches; reposition if we sit in a
        // barrier lane so the thaw finds us clear
        if threat.kind == HazardKind::Barrier {
            steer_to_clear_lane(state, input);
        }
        return;
    }

    let effective_speed = threat.base_speed as f64 * multiplier;
    let time_to_contact = (threat.leading_edge() - avatar_front) as f64 / effective_speed;

    match threat.kind {
        HazardKind::Hurdle => {
            if time_to_contact < 0.35 && state.avatar.action == AvatarAction::Running {
                input.jump = true;
            }
        }
        HazardKind::Drone => {
            if time_to_contact < 0.35 && state.avatar.action == AvatarAction::Running {
                input.slide = true;
            }
        }
        HazardKind::Barrier => {
            if time_to_contact < 0.6 {
                if !steer_to_clear_lane(state, input)
                    && state.powers.timer(Power::Freeze).is_ready()
                {
                    // boxed in: stop the world instead
                    input.freeze = true;
                }
            }
        }
    }
}

/// Pick the safer adjacent lane, if one exists; returns false when boxed in
fn steer_to_clear_lane(state: &GameState, input: &mut TickInput) -> bool {
    let lane = state.avatar.lane;
    let lane_count = state.tuning.track.lane_count;
    // a lane counts as open if nothing unpassed sits within dodge range
    let horizon = 10.0;
    let lane_open = |l: usize| {
        !state
            .hazards
            .iter()
            .any(|h| h.lane == l && !h.passed && h.leading_edge() < horizon)
    };

    let left_open = lane > 0 && lane_open(lane - 1);
    let right_open = lane + 1 < lane_count && lane_open(lane + 1);

    match (left_open, right_open) {
        (true, true) => {
            // alternate deterministically so demos do not hug one wall
            if state.time_ticks.is_multiple_of(2) {
                input.move_left = true;
            } else {
                input.move_right = true;
            }
            true
        }
        (true, false) => {
            input.move_left = true;
            true
        }
        (false, true) => {
            input.move_right = true;
            true
        }
        (false, false) => false,
    }
}
