use grid_snake::collision::is_out;
use grid_snake::food::place_food;
use grid_snake::game::{DirectionOutcome, EndReason, Game, GameRules, GameState, GameStatus};
use grid_snake::input::Direction;
use grid_snake::snake::{Position, Snake};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn wrapping_board_cycles_without_growing() {
    let rules = GameRules {
        check_is_out: false,
        check_is_colliding: true,
        disable_timer: false,
    };
    let mut game = Game::new_with_seed(5, rules, 42);
    let food = game.state().food().expect("a 5x5 board has room for food");
    assert_ne!(food.y, 0, "food never lands on the starting row");

    for tick in 1..=20 {
        assert_eq!(game.tick(), GameStatus::Running);

        let snake = game.state().snake();
        assert_eq!(snake.len(), 5);
        assert!(!is_out(snake, 5));
        assert_eq!(snake.head(), Position::new((4 + tick) % 5, 0));
        assert_eq!(game.state().food(), Some(food));
    }
}

#[test]
fn repeated_eating_fills_the_board_and_wins() {
    let rules = GameRules {
        check_is_out: true,
        check_is_colliding: true,
        disable_timer: false,
    };
    let snake = Snake::from_segments(vec![Position::new(0, 0), Position::new(1, 0)])
        .expect("segments are non-empty");
    let state = GameState::with_snake(snake, Direction::Right, Some(Position::new(1, 1)));
    let mut game = Game::with_state(2, rules, state, 7);

    assert_eq!(game.request_direction(Direction::Down), DirectionOutcome::Turned);
    assert_eq!(game.tick(), GameStatus::Running);
    assert_eq!(game.state().snake().len(), 3);
    assert_eq!(game.state().food(), Some(Position::new(0, 1)));

    assert_eq!(game.request_direction(Direction::Left), DirectionOutcome::Turned);
    assert_eq!(game.tick(), GameStatus::Ended(EndReason::Won));
    assert_eq!(game.state().snake().len(), 4);

    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(place_food(&mut rng, game.state().snake(), 2), None);
}

#[test]
fn turn_then_wall_ends_game() {
    let rules = GameRules {
        check_is_out: true,
        check_is_colliding: true,
        disable_timer: false,
    };
    let snake = Snake::from_segments(vec![Position::new(0, 1), Position::new(1, 1)])
        .expect("segments are non-empty");
    let state = GameState::with_snake(snake, Direction::Right, Some(Position::new(2, 1)));
    let mut game = Game::with_state(6, rules, state, 42);

    game.tick();
    assert_eq!(game.status(), GameStatus::Running);
    assert_eq!(game.state().snake().len(), 3);
    assert_eq!(game.state().snake().head(), Position::new(2, 1));

    assert_eq!(game.request_direction(Direction::Up), DirectionOutcome::Turned);
    game.tick();
    assert_eq!(game.status(), GameStatus::Running);
    assert_eq!(game.state().snake().head(), Position::new(2, 0));

    game.tick();
    assert_eq!(game.status(), GameStatus::Ended(EndReason::OutOfBounds));
}

#[test]
fn reset_after_loss_starts_a_fresh_running_game() {
    let mut game = Game::new_with_seed(
        5,
        GameRules {
            check_is_out: true,
            ..GameRules::default()
        },
        3,
    );

    assert_eq!(game.tick(), GameStatus::Ended(EndReason::OutOfBounds));

    game.reset();
    assert_eq!(game.status(), GameStatus::Running);
    assert_eq!(game.state().snake().head(), Position::new(4, 0));
}
