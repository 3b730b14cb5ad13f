//! Configured rules flowing from JSON through a running match.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use snake_duel::config::step_from_resolution;
use snake_duel::sim::Segment;
use snake_duel::{MatchConfig, MatchController, MatchError, PlayerId, Vector2};

fn test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(7)
}

fn config_from_json(json: &str) -> MatchConfig {
    let config: MatchConfig = serde_json::from_str(json).unwrap();
    config.validate().unwrap();
    config
}

#[test]
fn test_configured_step_and_tick_period() {
    let config = config_from_json(r#"{ "step": { "x": 2.0, "y": 3.0 }, "max_speed": 200 }"#);
    let mut rng = test_rng();
    let mut controller = MatchController::new(config, &mut rng).unwrap();
    {
        let snake = controller.snake_mut(PlayerId(0)).unwrap();
        snake.segments = vec![Segment::head(Vector2::new(10.0, 10.0))];
        snake.direction = Vector2::new(2.0, 0.0);
    }
    controller.food_mut().position = Vector2::new(80.0, 80.0);

    controller.advance(199, &mut rng);
    assert_eq!(
        controller.snake(PlayerId(0)).unwrap().head().unwrap().position,
        Vector2::new(10.0, 10.0)
    );

    controller.advance(1, &mut rng);
    assert_eq!(
        controller.snake(PlayerId(0)).unwrap().head().unwrap().position,
        Vector2::new(12.0, 10.0)
    );
}

#[test]
fn test_speed_stops_at_cap() {
    // Cap is max_speed / 10 = 10, so two increments of 5 reach it.
    let config = config_from_json(r#"{ "max_speed": 100, "speed_increment": 5, "prize": 3 }"#);
    let mut rng = test_rng();
    let mut controller = MatchController::new(config, &mut rng).unwrap();
    let snake = controller.snake_mut(PlayerId(0)).unwrap();
    snake.segments = vec![Segment::head(Vector2::new(40.0, 40.0))];

    assert!(snake.give_prize());
    assert!(snake.give_prize());
    assert!(!snake.give_prize());
    assert_eq!(snake.speed, 10);
    assert_eq!(snake.score, 9);
    assert_eq!(snake.len(), 4);
    assert_eq!(snake.tick_interval_ms(), 90);
}

#[test]
fn test_invalid_json_values_fail_validation() {
    let config: MatchConfig = serde_json::from_str(r#"{ "step": { "x": -1.0, "y": 1.0 } }"#).unwrap();
    let mut rng = test_rng();
    assert!(matches!(
        MatchController::new(config, &mut rng),
        Err(MatchError::Configuration(_))
    ));
}

#[test]
fn test_step_from_resolution_feeds_config() {
    let step = step_from_resolution(960, 540).unwrap();
    assert_eq!(step, Vector2::new(2.0, 4.0));

    let config = MatchConfig {
        step,
        ..Default::default()
    };
    assert!(config.validate().is_ok());
    assert!(step_from_resolution(0, 1080).is_err());
}
