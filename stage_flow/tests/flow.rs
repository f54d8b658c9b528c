//! End-to-end playthroughs against the built-in script table.

use puzzle_rules::{Assignment, Content, SlotOutcome};
use stage_flow::{
    FlowError, GridStage, IgnoreReason, IntroPhase, PresenterCall, RecordingPresenter, Stage,
    StageEvent, StageKind, StageMachine, Submission, WordStage,
};

fn machine() -> StageMachine<RecordingPresenter> {
    let content = Content::builtin().unwrap();
    let mut machine = StageMachine::with_seed(content, RecordingPresenter::new(), 42);
    machine.start();
    machine
}

fn type_each(machine: &mut StageMachine<RecordingPresenter>, letters: &str) {
    for letter in letters.chars() {
        machine.submit(&letter.to_string());
    }
}

fn word_stage(machine: &StageMachine<RecordingPresenter>) -> &WordStage {
    match machine.stage() {
        Stage::WordPuzzle(stage) => stage,
        other => panic!("expected the word puzzle, found {:?}", other.kind()),
    }
}

fn intro_phase(machine: &StageMachine<RecordingPresenter>) -> Option<IntroPhase> {
    match machine.stage() {
        Stage::Intro(intro) => Some(intro.phase()),
        _ => None,
    }
}

/// Name, difficulty, all four words solved.
fn reach_riddle() -> StageMachine<RecordingPresenter> {
    let mut machine = machine();
    machine.submit("Nadia");
    machine.submit("dificil");
    type_each(&mut machine, "PRINCESA");
    type_each(&mut machine, "CORA");
    type_each(&mut machine, "DETRMINAÇO");
    type_each(&mut machine, "GUERAS");
    assert_eq!(machine.stage_kind(), StageKind::FinalRiddle);
    machine
}

fn reach_grid() -> StageMachine<RecordingPresenter> {
    let mut machine = reach_riddle();
    machine.submit("mulan");
    assert_eq!(machine.stage_kind(), StageKind::ConstraintPuzzle);
    machine
}

#[test]
fn test_start_shows_intro_once() {
    let mut machine = machine();
    machine.start();
    let shown = machine.presenter().lines();
    assert_eq!(shown.first(), Some(&"Carregando sistema..."));
    assert_eq!(shown.iter().filter(|l| **l == "Eu sou IAgo.").count(), 1);
    assert_eq!(machine.presenter().input_enabled(), Some(true));
}

#[test]
fn test_submit_before_start_is_ignored() {
    let content = Content::builtin().unwrap();
    let mut machine = StageMachine::with_seed(content, RecordingPresenter::new(), 1);
    assert_eq!(
        machine.submit("nadia"),
        Submission::Ignored(IgnoreReason::NotStarted)
    );
    assert!(machine.presenter().calls.is_empty());
}

#[test]
fn test_blank_input_is_ignored() {
    let mut machine = machine();
    let before = machine.presenter().calls.len();
    assert_eq!(machine.submit("   "), Submission::Ignored(IgnoreReason::Empty));
    assert_eq!(machine.presenter().calls.len(), before);
}

#[test]
fn test_busy_submissions_are_dropped() {
    let mut machine = machine();
    let gate = machine.busy_gate();
    assert!(gate.try_hold());

    assert_eq!(machine.submit("nadia"), Submission::Ignored(IgnoreReason::Busy));
    assert_eq!(intro_phase(&machine), Some(IntroPhase::GetName));
    assert!(machine.events().contains(&StageEvent::SubmissionDropped {
        reason: IgnoreReason::Busy
    }));

    gate.release();
    assert_eq!(machine.submit("nadia"), Submission::Handled);
    assert_eq!(intro_phase(&machine), Some(IntroPhase::GetDifficulty));
}

#[test]
fn test_gate_is_released_after_each_turn() {
    let mut machine = machine();
    machine.submit("alguém");
    assert!(!machine.busy_gate().is_busy());
    let calls = &machine.presenter().calls;
    assert!(calls.contains(&PresenterCall::InputEnabled(false)));
    assert_eq!(calls.last(), Some(&PresenterCall::InputEnabled(true)));
}

#[test]
fn test_name_errors_stay_in_intro() {
    let mut machine = machine();
    for _ in 0..5 {
        machine.submit("Joana");
    }
    let Stage::Intro(intro) = machine.stage() else {
        panic!("left the intro");
    };
    assert_eq!(intro.phase(), IntroPhase::GetName);
    assert_eq!(intro.error_count(), 5);
}

#[test]
fn test_solved_first_word_fills_slot_one() {
    let mut machine = machine();
    machine.submit("Nadia");
    machine.submit("dificil");
    assert!(machine.presenter().saw("Coragem, hein?"));
    assert_eq!(machine.stage_kind(), StageKind::WordPuzzle);

    type_each(&mut machine, "PRINCESA");
    let puzzle = word_stage(&machine).puzzle();
    assert_eq!(
        puzzle.slots()[0],
        Some(SlotOutcome::Solved("PRINCESA".to_string()))
    );
    assert_eq!(
        puzzle.slots()[0].as_ref().map(SlotOutcome::display).as_deref(),
        Some("PRINCESA")
    );
}

#[test]
fn test_failed_second_word_advances() {
    let mut machine = machine();
    machine.submit("nadia");
    machine.submit("facil");
    type_each(&mut machine, "PRINCESA");
    type_each(&mut machine, "BDFGHJ");

    let puzzle = word_stage(&machine).puzzle();
    assert_eq!(
        puzzle.slots()[1].as_ref().map(SlotOutcome::display).as_deref(),
        Some("(COROA)")
    );
    assert_eq!(puzzle.current_word().map(|w| w.word.as_str()), Some("DETERMINAÇÃO"));
    assert_eq!(puzzle.wrong_guesses(), 0);

    let frame = machine.presenter().last_frame().unwrap();
    assert_eq!(frame.view.word_index, 2);
    assert_eq!(frame.view.wrong_guesses, 0);
    assert!(machine.presenter().saw("A palavra era COROA."));
}

#[test]
fn test_malformed_guess_changes_nothing() {
    let mut machine = machine();
    machine.submit("nadia");
    machine.submit("medio");
    let before = machine.presenter().calls.len();

    assert_eq!(machine.submit("xyz"), Submission::Handled);
    assert_eq!(machine.presenter().calls.len(), before);
    assert!(word_stage(&machine).puzzle().guesses().is_empty());
}

#[test]
fn test_reconstructed_phrase_is_revealed() {
    let machine = reach_riddle();
    assert!(machine.presenter().saw(
        "\"uma PRINCESA sem COROA, mas com coragem e DETERMINAÇÃO para ganhar GUERRAS.\""
    ));
    assert!(machine.presenter().saw("A quem essa frase se refere?"));
}

#[test]
fn test_riddle_exhaustion_is_a_dead_end() {
    let mut machine = reach_riddle();
    machine.submit("cinderela");
    machine.submit("ariel");
    assert!(machine.presenter().saw("Você tem mais 1 chances."));
    machine.submit("elsa");

    assert!(machine.presenter().saw("Acabou. Suas chances acabaram."));
    assert!(!machine.presenter().saw("Você tem mais 0 chances."));
    assert_eq!(machine.presenter().input_enabled(), Some(false));
    assert!(!machine.accepts_input());
    assert!(machine.events().contains(&StageEvent::RiddleExhausted));

    assert_eq!(
        machine.submit("mulan"),
        Submission::Ignored(IgnoreReason::InputClosed)
    );
    assert_eq!(machine.stage_kind(), StageKind::FinalRiddle);
}

#[test]
fn test_grid_rejects_text_and_wrong_grids() {
    let mut machine = reach_grid();
    assert!(machine.awaits_grid());
    assert!(machine
        .presenter()
        .calls
        .iter()
        .any(|c| matches!(c, PresenterCall::Grid { labels, .. } if labels.len() == 5)));

    assert_eq!(
        machine.submit("Sombra Besta"),
        Submission::Ignored(IgnoreReason::AwaitingGrid)
    );

    let mut candidate = machine.content().grid_solution().as_candidate();
    candidate.set(
        5,
        Assignment {
            label: Some("Colecionador".to_string()),
            item: None,
        },
    );
    assert_eq!(machine.submit_grid(&candidate), Ok(Submission::Handled));
    assert!(machine.awaits_grid());
    assert!(machine.presenter().saw("Alguma coisa aí está errada."));
}

#[test]
fn test_grid_submission_outside_grid_stage() {
    let mut machine = machine();
    let candidate = machine.content().grid_solution().as_candidate();
    assert_eq!(
        machine.submit_grid(&candidate),
        Err(FlowError::NoGridAwaiting(StageKind::Intro))
    );
}

#[test]
fn test_full_playthrough_reaches_ending() {
    let mut machine = reach_grid();
    let solution = machine.content().grid_solution().as_candidate();
    assert_eq!(machine.submit_grid(&solution), Ok(Submission::Handled));
    assert!(!machine.awaits_grid());
    assert!(machine.presenter().saw("Qual arma estava com o Colecionador?"));

    machine.submit("o martelo de borracha");
    assert_eq!(machine.stage_kind(), StageKind::ConstraintPuzzle);

    machine.submit("A seringa com potássio");
    assert_eq!(machine.stage_kind(), StageKind::Ending);

    let calls = &machine.presenter().calls;
    assert!(calls.contains(&PresenterCall::FinalScene(
        "Ele te espera. Não o desaponte.".to_string()
    )));
    assert!(calls.contains(&PresenterCall::PlayAudio));
    assert_eq!(machine.presenter().input_enabled(), Some(false));
    assert_eq!(
        machine.submit("olá?"),
        Submission::Ignored(IgnoreReason::InputClosed)
    );

    let entered: Vec<StageKind> = machine
        .events()
        .iter()
        .filter_map(|e| match e {
            StageEvent::StageEntered { stage } => Some(*stage),
            _ => None,
        })
        .collect();
    assert_eq!(
        entered,
        vec![
            StageKind::Intro,
            StageKind::WordPuzzle,
            StageKind::FinalRiddle,
            StageKind::ConstraintPuzzle,
            StageKind::Ending,
        ]
    );
}

#[test]
fn test_backward_transition_is_refused() {
    let mut machine = reach_riddle();
    let content = machine.content().clone();
    let err = machine
        .transition(Stage::WordPuzzle(WordStage::new(content.word_puzzle())))
        .unwrap_err();
    assert_eq!(
        err,
        FlowError::BackwardTransition {
            from: StageKind::FinalRiddle,
            to: StageKind::WordPuzzle
        }
    );
    assert_eq!(machine.stage_kind(), StageKind::FinalRiddle);
}

#[test]
fn test_skipping_a_stage_is_refused() {
    let mut machine = machine();
    assert_eq!(
        machine.transition(Stage::Ending),
        Err(FlowError::SkippedStage {
            from: StageKind::Intro,
            to: StageKind::Ending,
            expected: Some(StageKind::WordPuzzle),
        })
    );
    assert_eq!(machine.stage_kind(), StageKind::Intro);
    assert!(!machine.presenter().calls.contains(&PresenterCall::PlayAudio));
}

#[test]
fn test_closed_riddle_cannot_be_left() {
    let mut machine = reach_riddle();
    for answer in ["cinderela", "ariel", "elsa"] {
        machine.submit(answer);
    }
    assert!(!machine.accepts_input());

    assert_eq!(
        machine.transition(Stage::ConstraintPuzzle(GridStage::new())),
        Err(FlowError::StageClosed(StageKind::FinalRiddle))
    );
    assert_eq!(machine.stage_kind(), StageKind::FinalRiddle);
    assert!(!machine.accepts_input());
}

#[test]
fn test_same_seed_same_lines() {
    let play = || {
        let mut machine = machine();
        for name in ["a", "b", "c", "d"] {
            machine.submit(name);
        }
        machine
            .presenter()
            .lines()
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
    };
    assert_eq!(play(), play());
}
