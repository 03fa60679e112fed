// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Acrostic-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Acrostic and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{apply_action, Action, ApplyError};
use crate::model::{ClientId, Game, GameId};
use crate::puzzle::{compile, fixtures};

fn game() -> Game {
    let compiled = compile(&fixtures::mini_5x5()).expect("compile");
    Game::new(GameId::new("g-ops").expect("game id"), &compiled)
}

fn rebus_game() -> Game {
    let compiled = compile(&fixtures::rebus_3x3()).expect("compile");
    Game::new(GameId::new("g-rebus").expect("game id"), &compiled)
}

fn cid(value: &str) -> ClientId {
    ClientId::new(value).expect("client id")
}

fn change(id: usize, value: &str, advance: bool) -> Action {
    Action::ChangeInput {
        id,
        value: value.to_owned(),
        penciled: false,
        source: cid("c-1"),
        advance_cursor: advance,
    }
}

#[test]
fn change_input_writes_and_tags_the_cell() {
    let mut game = game();
    apply_action(&mut game, &change(1, "B", true)).expect("apply");

    let cell = game.board().cell(1).unwrap();
    assert_eq!(cell.input, "B");
    assert!(!cell.initial);
    assert_eq!(cell.source, Some(cid("c-1")));
    assert_eq!(game.advance_cursor(), 1);
    assert!(!game.saved_to_db());
    assert_eq!(game.most_recent_action(), Some("change-input"));
}

#[test]
fn change_input_without_advance_leaves_the_counter() {
    let mut game = game();
    apply_action(&mut game, &change(1, "B", false)).expect("apply");
    assert_eq!(game.advance_cursor(), 0);
}

#[test]
fn change_input_out_of_bounds_is_an_error() {
    let mut game = game();
    let result = apply_action(&mut game, &change(99, "B", false));
    assert_eq!(
        result,
        Err(ApplyError::SquareOutOfBounds { id: 99, len: 25 })
    );
}

#[test]
fn verified_squares_ignore_typing() {
    let mut game = game();
    apply_action(&mut game, &Action::RevealSquare { id: 1 }).expect("reveal");
    let revealed = game.board().cell(1).unwrap().input.clone();

    apply_action(&mut game, &change(1, "Z", true)).expect("apply");
    let cell = game.board().cell(1).unwrap();
    assert_eq!(cell.input, revealed);
    assert!(cell.verified);
    assert!(!cell.incorrect);
    assert!(!cell.partial);
    // The counter still moves; focus advance is independent of the write.
    assert_eq!(game.advance_cursor(), 1);
}

#[test]
fn autocheck_verifies_correct_input_without_a_request() {
    let mut game = game();
    apply_action(&mut game, &Action::ToggleAutocheck).expect("toggle");
    assert!(game.autocheck());

    // Square 1's answer in the mini fixture is "B".
    apply_action(&mut game, &change(1, "B", true)).expect("apply");
    assert!(game.board().cell(1).unwrap().verified);

    apply_action(&mut game, &change(2, "X", true)).expect("apply");
    let cell = game.board().cell(2).unwrap();
    assert!(cell.incorrect);
    assert!(!cell.verified);
}

#[test]
fn check_square_is_lazy_and_one_shot() {
    let mut game = game();
    apply_action(&mut game, &change(1, "X", false)).expect("apply");
    let cell = game.board().cell(1).unwrap();
    // No check requested yet: the wrong input carries no mark.
    assert!(!cell.incorrect);

    apply_action(&mut game, &Action::CheckSquare { id: 1 }).expect("check");
    let cell = game.board().cell(1).unwrap();
    assert!(cell.incorrect);
    assert!(!cell.check);
}

#[test]
fn check_skips_empty_squares() {
    let mut game = game();
    apply_action(&mut game, &Action::CheckPuzzle).expect("check");
    for cell in game.board().cells() {
        assert!(!cell.check);
        assert!(!cell.incorrect);
    }
}

#[test]
fn turning_autocheck_off_keeps_existing_marks() {
    let mut game = game();
    apply_action(&mut game, &Action::ToggleAutocheck).expect("on");
    apply_action(&mut game, &change(2, "X", false)).expect("apply");
    assert!(game.board().cell(2).unwrap().incorrect);

    apply_action(&mut game, &Action::ToggleAutocheck).expect("off");
    assert!(!game.autocheck());
    assert!(game.board().cell(2).unwrap().incorrect);
}

#[test]
fn reveal_word_fills_answers_and_clears_marks() {
    let mut game = game();
    apply_action(&mut game, &change(1, "X", false)).expect("apply");
    apply_action(&mut game, &Action::CheckSquare { id: 1 }).expect("check");
    assert!(game.board().cell(1).unwrap().incorrect);

    apply_action(
        &mut game,
        &Action::RevealWord {
            ids: vec![1, 2, 3, 4],
        },
    )
    .expect("reveal");

    for id in 1..=4 {
        let cell = game.board().cell(id).unwrap();
        let answer = &game.grid().square(id).unwrap().answer;
        assert_eq!(&cell.input, answer);
        assert!(cell.verified);
        assert!(cell.reveal);
        assert!(!cell.incorrect);
        assert!(!cell.partial);
    }
}

#[test]
fn reveal_puzzle_is_rebus_safe_and_skips_blocks() {
    let mut rebus = rebus_game();
    apply_action(&mut rebus, &Action::RevealPuzzle).expect("reveal");
    assert_eq!(rebus.board().cell(1).unwrap().input, "AM");

    let mut mini = game();
    apply_action(&mut mini, &Action::RevealPuzzle).expect("reveal");
    assert!(mini.board().cell(0).unwrap().input.is_empty());
    assert!(!mini.board().cell(0).unwrap().verified);
}

#[test]
fn rebus_partial_matches_on_first_character() {
    let mut game = rebus_game();
    apply_action(&mut game, &Action::ToggleAutocheck).expect("toggle");
    apply_action(&mut game, &change(1, "AX", false)).expect("apply");
    let cell = game.board().cell(1).unwrap();
    assert!(cell.partial);
    assert!(!cell.verified);
    assert!(!cell.incorrect);
}

#[test]
fn reset_game_replaces_only_the_board() {
    let mut game = game();
    game.add_player(
        crate::model::PlayerId::new("p-1").expect("player id"),
        "Ada".to_owned(),
        None,
    );
    apply_action(&mut game, &change(1, "B", true)).expect("apply");

    apply_action(&mut game, &Action::ResetGame).expect("reset");
    assert!(game.board().cell(1).unwrap().input.is_empty());
    assert!(game.board().cell(1).unwrap().initial);
    assert_eq!(game.board().len(), game.grid().len());
    assert_eq!(game.players().len(), 1);
    assert_eq!(game.grid().num_rows(), 5);
}

#[test]
fn replaying_the_same_input_converges() {
    let mut game = game();
    let action = change(1, "B", false);
    apply_action(&mut game, &action).expect("apply");
    let snapshot = game.clone();
    apply_action(&mut game, &action).expect("replay");
    assert_eq!(game, snapshot);
}

#[test]
fn actions_round_trip_through_json_tagging() {
    let action = change(5, "Q", true);
    let json = serde_json::to_string(&action).expect("serialize");
    assert!(json.contains("\"type\":\"change-input\""));
    let back: Action = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, action);

    let toggle = serde_json::to_string(&Action::ToggleAutocheck).expect("serialize");
    assert!(toggle.contains("toggle-autocheck"));
}
