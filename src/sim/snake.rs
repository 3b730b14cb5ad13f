//! A single snake: segment chain, steering, growth and the crash/respawn
//! lifecycle.

use super::clock::TickClock;
use super::food::Food;
use super::segment::Segment;
use super::vector::{Direction, Vector2};
use crate::config::SnakeColor;
use crate::constants::{
    DEFAULT_STEP, FIELD_MAX, FOOD_PRIZE, MAX_SPEED, RESPAWN_DELAY_MS, SPEED_INCREMENT,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Index of a snake in the match registry. Also identifies the controlling player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub usize);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0 + 1)
    }
}

/// Non-owning handle to the match food.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodHandle;

/// Tunables shared by every snake in a match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnakeRules {
    /// Per-axis movement step.
    pub step: Vector2,
    /// Tick period at zero speed (ms).
    pub max_speed: u32,
    pub speed_increment: u32,
    pub prize: u32,
    pub respawn_delay_ms: u64,
}

impl Default for SnakeRules {
    fn default() -> Self {
        Self {
            step: Vector2::new(DEFAULT_STEP, DEFAULT_STEP),
            max_speed: MAX_SPEED,
            speed_increment: SPEED_INCREMENT,
            prize: FOOD_PRIZE,
            respawn_delay_ms: RESPAWN_DELAY_MS,
        }
    }
}

impl SnakeRules {
    /// Highest reachable speed.
    pub fn speed_cap(&self) -> u32 {
        self.max_speed / 10
    }
}

/// Lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeState {
    Alive,
    /// Crashed; ticking is suspended until the countdown reaches zero.
    Dying { respawn_in_ms: u64 },
}

/// What a scheduled deadline belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Due {
    Tick,
    Respawn,
}

/// Result of a steering command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    /// The live direction changed.
    Applied,
    /// Staged as pending but held back because it would reverse into the neck.
    Queued,
    /// Ignored: same axis as the current travel, or the snake is not alive.
    Rejected,
}

/// What happened during one `proceed` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub ate: bool,
    pub sped_up: bool,
    pub crashed_into: Option<PlayerId>,
}

#[derive(Debug, Clone)]
pub struct Snake {
    pub id: PlayerId,
    pub name: String,
    pub color: SnakeColor,
    /// Head first, tail last.
    pub segments: Vec<Segment>,
    pub direction: Vector2,
    /// Last accepted command; applied only when not reversive.
    pub pending_direction: Vector2,
    pub speed: u32,
    pub score: u32,
    pub target: Option<FoodHandle>,
    pub opponent: Option<PlayerId>,
    pub life: LifeState,
    pub clock: TickClock,
    pub rules: SnakeRules,
}

impl Snake {
    /// Create a snake and seed it via `reset`. The clock starts stopped.
    pub fn new<R: Rng>(
        id: PlayerId,
        name: impl Into<String>,
        color: SnakeColor,
        rules: SnakeRules,
        rng: &mut R,
    ) -> Self {
        let mut snake = Self {
            id,
            name: name.into(),
            color,
            segments: Vec::new(),
            direction: Vector2::ZERO,
            pending_direction: Vector2::ZERO,
            speed: 0,
            score: 0,
            target: None,
            opponent: None,
            life: LifeState::Alive,
            clock: TickClock::new(u64::from(rules.max_speed)),
            rules,
        };
        snake.reset(rng);
        snake
    }

    /// One head segment at a random position, random direction, zero score and speed.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.segments.clear();
        self.segments.push(Segment::head(Vector2::random_position(rng)));
        self.direction = Vector2::random_direction(rng, self.rules.step);
        self.pending_direction = Vector2::ZERO;
        self.speed = 0;
        self.score = 0;
        self.life = LifeState::Alive;
        self.clock.set_interval(self.tick_interval_ms());
    }

    pub fn is_alive(&self) -> bool {
        self.life == LifeState::Alive
    }

    pub fn head(&self) -> Option<&Segment> {
        self.segments.first()
    }

    pub fn tail(&self) -> Option<&Segment> {
        self.segments.last()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Current tick period in milliseconds.
    pub fn tick_interval_ms(&self) -> u64 {
        u64::from(self.rules.max_speed.saturating_sub(self.speed))
    }

    /// Where the head would land under `direction`, before wraparound.
    pub fn next_position(&self, direction: Vector2) -> Vector2 {
        self.head()
            .map(|head| head.position + direction)
            .unwrap_or(direction)
    }

    /// True when the neck segment sits where the pending direction would take the head.
    pub fn next_move_is_reversive(&self) -> bool {
        self.segments.len() > 1
            && self.segments[1].collides_with(&self.next_position(self.pending_direction))
    }

    /// Direction arbitration.
    ///
    /// Only a turn onto an axis the snake is not moving along is accepted. An
    /// accepted turn is staged in `pending_direction` and promoted unless it
    /// is reversive; a held-back turn stays pending until the next command.
    pub fn steer(&mut self, command: Direction) -> Steer {
        if !self.is_alive() {
            return Steer::Rejected;
        }

        let moving_on_axis = if command.is_horizontal() {
            self.direction.x != 0.0
        } else {
            self.direction.y != 0.0
        };
        if moving_on_axis {
            return Steer::Rejected;
        }

        self.pending_direction = command.to_step(self.rules.step);
        if self.next_move_is_reversive() {
            return Steer::Queued;
        }

        self.direction = self.pending_direction;
        Steer::Applied
    }

    /// Advance one tick: shift the body, move the head, then resolve
    /// wraparound, food and opponent collisions in that order.
    pub fn proceed<R: Rng>(
        &mut self,
        food: Option<&mut Food>,
        opponent: Option<&Snake>,
        rng: &mut R,
    ) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if !self.is_alive() {
            return outcome;
        }
        assert!(
            !self.segments.is_empty(),
            "live snake {} has no segments",
            self.id
        );

        // Back to front so each segment copies its predecessor's old position
        for i in (1..self.segments.len()).rev() {
            self.segments[i].position = self.segments[i - 1].position;
        }
        self.segments[0].position = self.next_position(self.direction);

        self.wrap_head();

        if let Some(food) = food {
            if self.segments[0].collides_with(&*food) {
                food.relocate(rng);
                outcome.ate = true;
                outcome.sped_up = self.give_prize();
            }
        }

        if let Some(opponent) = opponent {
            let head = self.segments[0];
            if opponent.segments.iter().any(|seg| head.collides_with(seg)) && self.lose() {
                outcome.crashed_into = Some(opponent.id);
            }
        }

        outcome
    }

    /// Wrap each axis of the head independently onto the opposite edge.
    fn wrap_head(&mut self) {
        let head = &mut self.segments[0].position;
        if head.x > FIELD_MAX {
            head.x = 0.0;
        } else if head.x < 0.0 {
            head.x = FIELD_MAX;
        }
        if head.y > FIELD_MAX {
            head.y = 0.0;
        } else if head.y < 0.0 {
            head.y = FIELD_MAX;
        }
    }

    /// Grow by one tail segment, speed up and add the prize. Returns true if
    /// the speed changed.
    pub fn give_prize(&mut self) -> bool {
        assert!(
            !self.segments.is_empty(),
            "cannot grow snake {} with no segments",
            self.id
        );
        let tail = self.segments[self.segments.len() - 1].position;
        self.segments.push(Segment::body(tail - self.direction));
        self.score += self.rules.prize;

        let sped_up = self.increase_speed(self.rules.speed_increment);
        debug!(
            player = %self.id,
            score = self.score,
            length = self.segments.len(),
            "food eaten"
        );
        sped_up
    }

    /// Add `delta` to the speed if the result stays within the cap, and
    /// reschedule the clock at the new period.
    pub fn increase_speed(&mut self, delta: u32) -> bool {
        let next = match self.speed.checked_add(delta) {
            Some(next) if delta > 0 && next <= self.rules.speed_cap() => next,
            _ => return false,
        };
        self.speed = next;
        let interval = self.tick_interval_ms();
        if self.clock.is_running() {
            self.clock.restart(interval);
        } else {
            self.clock.set_interval(interval);
        }
        debug!(player = %self.id, speed = self.speed, interval_ms = interval, "speed up");
        true
    }

    /// Crash: stop ticking and start the respawn countdown. Returns false if
    /// the snake was already down.
    pub fn lose(&mut self) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.clock.stop();
        self.life = LifeState::Dying {
            respawn_in_ms: self.rules.respawn_delay_ms,
        };
        info!(
            player = %self.id,
            name = %self.name,
            score = self.score,
            "snake crashed"
        );
        true
    }

    /// Clear the chain, reset and resume ticking.
    pub fn respawn<R: Rng>(&mut self, rng: &mut R) {
        self.segments.clear();
        self.reset(rng);
        self.clock.restart(self.tick_interval_ms());
        info!(player = %self.id, name = %self.name, "snake respawned");
    }

    /// Earliest pending deadline for this snake.
    pub fn next_due(&self) -> Option<(u64, Due)> {
        match self.life {
            LifeState::Alive => self.clock.due_in().map(|ms| (ms, Due::Tick)),
            LifeState::Dying { respawn_in_ms } => Some((respawn_in_ms, Due::Respawn)),
        }
    }

    /// Let simulated time pass for the clock or the respawn countdown.
    pub fn elapse(&mut self, dt_ms: u64) {
        match &mut self.life {
            LifeState::Alive => self.clock.advance(dt_ms),
            LifeState::Dying { respawn_in_ms } => {
                *respawn_in_ms = respawn_in_ms.saturating_sub(dt_ms);
            }
        }
    }
}
