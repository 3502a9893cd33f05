use super::*;

#[test]
fn test_initial_state() {
    let state = State::new();
    assert_eq!(state.board, [0; 9]);
    assert_eq!(state.current_player, X);
    assert_eq!(state.winner, 0);
    assert!(!state.is_done());
    assert_eq!(state.side_to_move(), Colour::White);
    assert_eq!(state.game_result(), GameResult::InProgress);
}

#[test]
fn test_legal_moves() {
    let state = State::new();
    assert_eq!(state.legal_moves(), (0..9).collect::<Vec<_>>());

    // After one move
    let state = state.play(4); // Center
    let legal = state.legal_moves();
    assert_eq!(legal.len(), 8);
    assert!(!legal.contains(&4));
}

#[test]
fn test_make_move() {
    let mut state = State::new();
    state.make_move(Cell(4)); // X places in center

    assert_eq!(state.cell(4), X);
    assert_eq!(state.side_to_move(), Colour::Black);
    assert_eq!(state.opponent_colour(), Colour::White);
    assert!(!state.is_done());
}

#[test]
fn test_invalid_move() {
    let state = State::new().play(4);

    // Occupied and out-of-range cells leave the state unchanged
    assert_eq!(state.play(4), state);
    assert_eq!(state.play(9), state);
}

#[test]
fn test_winning_game() {
    // X wins with top row
    let state = State::new().play(0).play(3).play(1).play(4).play(2);

    assert!(state.is_done());
    assert_eq!(state.game_result(), GameResult::Win(Colour::White));
    // The winner made the last move
    assert_eq!(state.opponent_colour(), Colour::White);
    assert!(state.legal_moves().is_empty());

    // No moves after the game ends
    assert_eq!(state.play(5), state);
}

#[test]
fn test_o_wins_diagonal() {
    // O completes the 2-4-6 diagonal
    let state = State::new().play(0).play(4).play(1).play(2).play(8).play(6);

    assert_eq!(state.game_result(), GameResult::Win(Colour::Black));
    assert_eq!(state.opponent_colour(), Colour::Black);
}

#[test]
fn test_draw_game() {
    // X | O | X
    // X | O | O
    // O | X | X
    let state = [0, 1, 2, 4, 3, 5, 7, 6, 8]
        .iter()
        .fold(State::new(), |s, &pos| s.play(pos));

    assert!(state.is_done());
    assert_eq!(state.game_result(), GameResult::Draw);
    assert!(state.legal_moves().is_empty());
}

#[test]
fn test_move_generator() {
    let state = State::new().play(0).play(8);
    let moves = TicTacToeMoves.generate_moves(&state, true, PromotionMode::default());

    assert_eq!(moves.len(), 7);
    assert!(!moves.contains(&Cell(0)));
    assert!(!moves.contains(&Cell(8)));
    // The root flag does not change the move list
    assert_eq!(moves, TicTacToeMoves.generate_moves(&state, false, PromotionMode::All));
}

#[test]
fn test_move_generator_finished_game() {
    let state = State::new().play(0).play(3).play(1).play(4).play(2);
    assert!(TicTacToeMoves
        .generate_moves(&state, false, PromotionMode::default())
        .is_empty());
}

#[test]
fn test_invalid_cell_sentinel() {
    assert!(Cell::INVALID.is_invalid());
    assert!(!Cell(0).is_invalid());
}

#[test]
fn test_evaluator_empty_board_is_even() {
    let state = State::new();
    let white = LineEvaluator.evaluate_sim_board(&state, true);
    let black = LineEvaluator.evaluate_sim_board(&state, false);

    assert!((white - 0.5).abs() < 1e-12);
    assert!((black - 0.5).abs() < 1e-12);
}

#[test]
fn test_evaluator_perspectives_sum_to_one() {
    let state = State::new().play(4).play(0).play(2);
    let white = LineEvaluator.evaluate_sim_board(&state, true);
    let black = LineEvaluator.evaluate_sim_board(&state, false);

    assert!((white + black - 1.0).abs() < 1e-12);
    // X holds the centre and a corner with more open lines
    assert!(white > 0.5);
    assert!(white < 1.0);
}

#[test]
fn test_evaluator_decisive_results() {
    let x_wins = State::new().play(0).play(3).play(1).play(4).play(2);
    assert!((LineEvaluator.evaluate_sim_board(&x_wins, true) - 1.0).abs() < 1e-12);
    assert!(LineEvaluator.evaluate_sim_board(&x_wins, false).abs() < 1e-12);

    let draw = [0, 1, 2, 4, 3, 5, 7, 6, 8]
        .iter()
        .fold(State::new(), |s, &pos| s.play(pos));
    assert!((LineEvaluator.evaluate_sim_board(&draw, true) - 0.5).abs() < 1e-12);
}

#[test]
fn test_lightweight_clone_matches() {
    let state = State::new().play(4).play(0);
    assert_eq!(state.lightweight_clone(), state);
}
