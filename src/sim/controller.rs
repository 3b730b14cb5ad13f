//! Match orchestration: owns the snakes and the food, wires their handles
//! and schedules every snake's ticks on simulated time.

use super::food::Food;
use super::snake::{Due, FoodHandle, PlayerId, Snake, Steer, TickOutcome};
use super::snapshot::{MatchSnapshot, SnakeSnapshot};
use super::vector::Direction;
use crate::config::MatchConfig;
use crate::constants::MAX_FRAME_MS;
use crate::error::MatchError;
use rand::Rng;
use tracing::{info, warn};

/// A single notable change produced while advancing the match.
///
/// The presentation layer maps these to messages; the simulation never
/// touches UI types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEvent {
    FoodEaten { player: PlayerId, score: u32 },
    SpeedUp { player: PlayerId, speed: u32 },
    /// `player` ran its head into `into`.
    Crashed { player: PlayerId, into: PlayerId },
    Respawned { player: PlayerId },
}

#[derive(Debug, Clone)]
pub struct MatchController {
    config: MatchConfig,
    snakes: Vec<Snake>,
    food: Food,
    elapsed_ms: u64,
}

impl MatchController {
    /// Build both snakes and the food, wire them together and start ticking.
    pub fn new<R: Rng>(config: MatchConfig, rng: &mut R) -> Result<Self, MatchError> {
        config.validate()?;

        let rules = config.rules();
        let snakes = config
            .players
            .iter()
            .enumerate()
            .map(|(i, player)| Snake::new(PlayerId(i), &player.name, player.color, rules, rng))
            .collect();
        let food = Food::new(rng);

        let mut controller = Self {
            config,
            snakes,
            food,
            elapsed_ms: 0,
        };
        controller.wire();
        controller.start();

        info!(
            players = ?controller.snakes.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            "match started"
        );
        Ok(controller)
    }

    /// Point every snake at the shared food and at the next snake in the registry.
    fn wire(&mut self) {
        let count = self.snakes.len();
        for (i, snake) in self.snakes.iter_mut().enumerate() {
            snake.target = Some(FoodHandle);
            snake.opponent = (count > 1).then(|| PlayerId((i + 1) % count));
        }
    }

    /// Start every snake's clock.
    pub fn start(&mut self) {
        for snake in &mut self.snakes {
            if snake.is_alive() {
                snake.clock.start();
            }
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn snakes(&self) -> &[Snake] {
        &self.snakes
    }

    pub fn snake(&self, player: PlayerId) -> Option<&Snake> {
        self.snakes.get(player.0)
    }

    pub fn snake_mut(&mut self, player: PlayerId) -> Option<&mut Snake> {
        self.snakes.get_mut(player.0)
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn food_mut(&mut self) -> &mut Food {
        &mut self.food
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Route a steering command to the player's snake.
    pub fn handle_command(
        &mut self,
        player: PlayerId,
        direction: Direction,
    ) -> Result<Steer, MatchError> {
        let Some(snake) = self.snakes.get_mut(player.0) else {
            warn!(player = player.0, ?direction, "command for unknown player");
            return Err(MatchError::InvalidDirectionCommand { player: player.0 });
        };
        Ok(snake.steer(direction))
    }

    /// Let `dt_ms` of simulated time pass (clamped to `MAX_FRAME_MS`),
    /// firing ticks and respawns in chronological order. Simultaneous
    /// deadlines fire in registry order.
    pub fn advance<R: Rng>(&mut self, dt_ms: u64, rng: &mut R) -> Vec<MatchEvent> {
        let mut remaining = dt_ms.min(MAX_FRAME_MS);
        let mut events = Vec::new();

        loop {
            let next = self
                .snakes
                .iter()
                .enumerate()
                .filter_map(|(i, snake)| snake.next_due().map(|(ms, due)| (ms, i, due)))
                .min_by_key(|&(ms, i, _)| (ms, i));

            match next {
                Some((ms, index, due)) if ms <= remaining => {
                    self.elapse(ms);
                    remaining -= ms;
                    match due {
                        Due::Tick => self.tick_snake(index, rng, &mut events),
                        Due::Respawn => {
                            self.snakes[index].respawn(rng);
                            events.push(MatchEvent::Respawned {
                                player: PlayerId(index),
                            });
                        }
                    }
                }
                _ => {
                    self.elapse(remaining);
                    break;
                }
            }
        }

        events
    }

    fn elapse(&mut self, dt_ms: u64) {
        self.elapsed_ms += dt_ms;
        for snake in &mut self.snakes {
            snake.elapse(dt_ms);
        }
    }

    /// Run one `proceed` for the snake at `index`, resolving its food and
    /// opponent handles.
    fn tick_snake<R: Rng>(&mut self, index: usize, rng: &mut R, events: &mut Vec<MatchEvent>) {
        let opponent_index = self.snakes[index]
            .opponent
            .map(|id| id.0)
            .filter(|&o| o != index && o < self.snakes.len());

        let (snake, opponent) = snake_and_opponent(&mut self.snakes, index, opponent_index);
        snake.clock.fire();
        let food = match snake.target {
            Some(FoodHandle) => Some(&mut self.food),
            None => None,
        };
        let outcome = snake.proceed(food, opponent, rng);

        push_outcome_events(snake, outcome, events);
    }

    /// Immutable view for renderers.
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            elapsed_ms: self.elapsed_ms,
            snakes: self
                .snakes
                .iter()
                .map(|snake| SnakeSnapshot {
                    id: snake.id.0,
                    name: snake.name.clone(),
                    color: snake.color,
                    segments: snake.segments.iter().map(|s| s.position).collect(),
                    alive: snake.is_alive(),
                    score: snake.score,
                    speed: snake.speed,
                })
                .collect(),
            food: self.food.position,
        }
    }
}

fn push_outcome_events(snake: &Snake, outcome: TickOutcome, events: &mut Vec<MatchEvent>) {
    if outcome.ate {
        events.push(MatchEvent::FoodEaten {
            player: snake.id,
            score: snake.score,
        });
    }
    if outcome.sped_up {
        events.push(MatchEvent::SpeedUp {
            player: snake.id,
            speed: snake.speed,
        });
    }
    if let Some(into) = outcome.crashed_into {
        events.push(MatchEvent::Crashed {
            player: snake.id,
            into,
        });
    }
}

/// Borrow one snake mutably and another one shared.
fn snake_and_opponent(
    snakes: &mut [Snake],
    index: usize,
    opponent: Option<usize>,
) -> (&mut Snake, Option<&Snake>) {
    match opponent {
        Some(o) if o < index => {
            let (left, right) = snakes.split_at_mut(index);
            (&mut right[0], Some(&left[o]))
        }
        Some(o) if o > index => {
            let (left, right) = snakes.split_at_mut(o);
            (&mut left[index], Some(&right[0]))
        }
        _ => (&mut snakes[index], None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MAX_SPEED, RESPAWN_DELAY_MS};
    use crate::sim::segment::Segment;
    use crate::sim::vector::Vector2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const P1: PlayerId = PlayerId(0);
    const P2: PlayerId = PlayerId(1);
    const TICK: u64 = MAX_SPEED as u64;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn place(controller: &mut MatchController, player: PlayerId, head: Vector2, dir: Vector2) {
        let snake = controller.snake_mut(player).unwrap();
        snake.segments = vec![Segment::head(head)];
        snake.direction = dir;
    }

    /// Match with both snakes far apart and the food out of reach.
    fn quiet_match(rng: &mut ChaCha8Rng) -> MatchController {
        let mut controller = MatchController::new(MatchConfig::default(), rng).unwrap();
        place(
            &mut controller,
            P1,
            Vector2::new(10.0, 10.0),
            Vector2::new(1.0, 0.0),
        );
        place(
            &mut controller,
            P2,
            Vector2::new(10.0, 80.0),
            Vector2::new(1.0, 0.0),
        );
        controller.food_mut().position = Vector2::new(80.0, 45.0);
        controller
    }

    #[test]
    fn test_new_wires_opponents_and_food() {
        let mut rng = test_rng();
        let controller = MatchController::new(MatchConfig::default(), &mut rng).unwrap();

        assert_eq!(controller.snakes().len(), 2);
        assert_eq!(controller.snakes()[0].opponent, Some(P2));
        assert_eq!(controller.snakes()[1].opponent, Some(P1));
        assert!(controller.snakes().iter().all(|s| s.target.is_some()));
        assert!(controller.snakes().iter().all(|s| s.clock.is_running()));
        assert_eq!(controller.snakes()[0].name, "Player1");
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut rng = test_rng();
        let config = MatchConfig {
            max_speed: 0,
            ..Default::default()
        };
        assert!(matches!(
            MatchController::new(config, &mut rng),
            Err(MatchError::Configuration(_))
        ));
    }

    #[test]
    fn test_unknown_player_command_is_an_error() {
        let mut rng = test_rng();
        let mut controller = quiet_match(&mut rng);
        assert_eq!(
            controller.handle_command(PlayerId(5), Direction::Up),
            Err(MatchError::InvalidDirectionCommand { player: 5 })
        );
        // Match keeps running
        let events = controller.advance(TICK, &mut rng);
        assert!(events.is_empty());
        assert_eq!(
            controller.snake(P1).unwrap().segments[0].position,
            Vector2::new(11.0, 10.0)
        );
    }

    #[test]
    fn test_no_tick_before_interval() {
        let mut rng = test_rng();
        let mut controller = quiet_match(&mut rng);
        controller.advance(TICK - 1, &mut rng);
        assert_eq!(
            controller.snake(P1).unwrap().segments[0].position,
            Vector2::new(10.0, 10.0)
        );
        controller.advance(1, &mut rng);
        assert_eq!(
            controller.snake(P1).unwrap().segments[0].position,
            Vector2::new(11.0, 10.0)
        );
    }

    #[test]
    fn test_advance_is_clamped_per_call() {
        let mut rng = test_rng();
        let mut controller = quiet_match(&mut rng);
        controller.advance(60_000, &mut rng);
        // 500 ms clamp at a 400 ms period: exactly one tick
        assert_eq!(
            controller.snake(P1).unwrap().segments[0].position,
            Vector2::new(11.0, 10.0)
        );
        assert_eq!(controller.elapsed_ms(), MAX_FRAME_MS);
    }

    #[test]
    fn test_render_rate_does_not_change_outcome() {
        let mut rng_a = test_rng();
        let mut coarse = quiet_match(&mut rng_a);
        let mut rng_b = test_rng();
        let mut fine = quiet_match(&mut rng_b);

        for _ in 0..20 {
            coarse.advance(400, &mut rng_a);
        }
        for _ in 0..500 {
            fine.advance(16, &mut rng_b);
        }

        assert_eq!(coarse.snapshot(), fine.snapshot());
    }

    #[test]
    fn test_faster_snake_ticks_more_often() {
        let mut rng = test_rng();
        let mut controller = quiet_match(&mut rng);
        {
            let fast = controller.snake_mut(P1).unwrap();
            fast.speed = 40;
            fast.clock.restart(fast.tick_interval_ms());
        }

        for _ in 0..36 {
            controller.advance(100, &mut rng);
        }
        // 3600 ms: 10 ticks at 360 ms vs 9 ticks at 400 ms
        assert_eq!(
            controller.snake(P1).unwrap().segments[0].position,
            Vector2::new(20.0, 10.0)
        );
        assert_eq!(
            controller.snake(P2).unwrap().segments[0].position,
            Vector2::new(19.0, 80.0)
        );
    }

    #[test]
    fn test_eating_emits_events() {
        let mut rng = test_rng();
        let mut controller = quiet_match(&mut rng);
        controller.food_mut().position = Vector2::new(11.0, 10.0);

        let events = controller.advance(TICK, &mut rng);

        assert!(events.contains(&MatchEvent::FoodEaten {
            player: P1,
            score: 5
        }));
        assert!(events.contains(&MatchEvent::SpeedUp {
            player: P1,
            speed: 5
        }));
        assert_eq!(controller.snake(P1).unwrap().segments.len(), 2);
        assert_ne!(controller.food().position, Vector2::new(11.0, 10.0));
    }

    #[test]
    fn test_crash_pause_and_respawn() {
        let mut rng = test_rng();
        let mut controller = quiet_match(&mut rng);
        // P1 runs into P2's body
        place(
            &mut controller,
            P2,
            Vector2::new(12.0, 14.0),
            Vector2::new(0.0, 1.0),
        );
        {
            let p2 = controller.snake_mut(P2).unwrap();
            p2.segments.push(Segment::body(Vector2::new(12.0, 13.0)));
            p2.segments.push(Segment::body(Vector2::new(12.0, 12.0)));
            p2.score = 10;
        }
        controller.snake_mut(P1).unwrap().score = 20;

        let events = controller.advance(TICK, &mut rng);
        assert!(events.contains(&MatchEvent::Crashed {
            player: P1,
            into: P2
        }));
        assert!(!controller.snake(P1).unwrap().is_alive());
        assert!(controller.snake(P2).unwrap().is_alive());

        // During the pause the other snake keeps ticking and P1 stays frozen
        let frozen = controller.snake(P1).unwrap().segments.clone();
        let p2_head = controller.snake(P2).unwrap().segments[0].position;
        let mut crash_events = 0;
        let mut respawned = false;
        let mut waited = 0;
        while waited < RESPAWN_DELAY_MS - 100 {
            let events = controller.advance(100, &mut rng);
            waited += 100;
            crash_events += events
                .iter()
                .filter(|e| matches!(e, MatchEvent::Crashed { player: P1, .. }))
                .count();
            respawned |= events.contains(&MatchEvent::Respawned { player: P1 });
        }
        assert_eq!(crash_events, 0);
        assert!(!respawned);
        assert_eq!(controller.snake(P1).unwrap().segments, frozen);
        assert_ne!(controller.snake(P2).unwrap().segments[0].position, p2_head);

        let events = controller.advance(100, &mut rng);
        assert!(events.contains(&MatchEvent::Respawned { player: P1 }));
        let p1 = controller.snake(P1).unwrap();
        assert!(p1.is_alive());
        assert_eq!(p1.segments.len(), 1);
        assert_eq!(p1.score, 0);
        assert_eq!(p1.name, "Player1");
        assert_eq!(controller.snake(P2).unwrap().score, 10);
    }

    #[test]
    fn test_commands_route_to_the_right_snake() {
        let mut rng = test_rng();
        let mut controller = quiet_match(&mut rng);

        assert_eq!(
            controller.handle_command(P2, Direction::Down),
            Ok(Steer::Applied)
        );
        assert_eq!(
            controller.snake(P2).unwrap().direction,
            Vector2::new(0.0, 1.0)
        );
        assert_eq!(
            controller.snake(P1).unwrap().direction,
            Vector2::new(1.0, 0.0)
        );
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut rng = test_rng();
        let mut controller = quiet_match(&mut rng);
        controller.advance(TICK, &mut rng);

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.elapsed_ms, TICK);
        assert_eq!(snapshot.food, Vector2::new(80.0, 45.0));
        assert_eq!(snapshot.snakes.len(), 2);
        assert_eq!(snapshot.snakes[0].segments, vec![Vector2::new(11.0, 10.0)]);
        assert!(snapshot.snakes.iter().all(|s| s.alive));
        assert_eq!(snapshot.snakes[1].scoreboard_line(), "Player2: 0 PPT");
    }

    #[test]
    fn test_snake_and_opponent_split() {
        let mut rng = test_rng();
        let mut controller = quiet_match(&mut rng);
        let (me, other) = snake_and_opponent(&mut controller.snakes, 1, Some(0));
        assert_eq!(me.id, P2);
        assert_eq!(other.map(|s| s.id), Some(P1));

        let (me, other) = snake_and_opponent(&mut controller.snakes, 0, None);
        assert_eq!(me.id, P1);
        assert!(other.is_none());
    }
}
