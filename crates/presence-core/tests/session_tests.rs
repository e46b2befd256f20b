use pretty_assertions::assert_eq;
use presence_core::prelude::*;
use presence_core::SlotStatus;
use presence_test_utils::*;

#[test]
fn test_every_scenario_reaches_growth_with_horizon_length() {
    for weeks in [2, 6, 12] {
        let mut session = setup_session_with_weeks(weeks);
        for key in ScenarioKey::ALL {
            session.select_scenario(key.as_str()).unwrap();
            session.navigate(Page::Growth).unwrap();
            let t = session.last_trajectory(key).unwrap();
            assert_eq!(t.actual.len(), weeks);
            assert_eq!(t.baseline.len(), weeks);
            assert_in_score_range(&t.actual);
            assert_in_score_range(&t.baseline);
            session.go_back();
        }
    }
}

#[test]
fn test_end_to_end_board_update_trajectory() {
    let mut session = setup_session();
    session.select_scenario("board-update").unwrap();
    session.navigate(Page::Growth).unwrap();

    let first = session
        .score_vector(ScenarioKey::BoardUpdate, VectorShape::Presence, attempt(1))
        .unwrap();
    let last = session
        .score_vector(ScenarioKey::BoardUpdate, VectorShape::Presence, attempt(3))
        .unwrap();
    assert_eq!(first.values(), &[5.0, 5.5, 6.0, 5.0, 4.8]);
    assert_eq!(last.values(), &[8.4, 8.1, 8.6, 7.9, 8.2]);
    assert_close(first.composite(), 5.26);
    assert_close(last.composite(), 8.24);

    match session.current_view().unwrap() {
        PageView::Growth {
            trajectory,
            export_available,
        } => {
            assert!(!export_available);
            assert_path_close(
                &trajectory.actual,
                &[5.26, 5.856, 6.452, 7.048, 7.644, 8.24],
            );
            assert_eq!(trajectory.actual[0], first.composite());
            assert_eq!(trajectory.actual[5], last.composite());
        }
        other => panic!("expected growth page, got {other:?}"),
    }
}

#[test]
fn test_custom_seeds_drive_the_projection() {
    let session = session_with_presence(
        ScenarioKey::CrisisBriefing,
        [5.0, 5.5, 6.0, 5.0, 4.8],
        [8.4, 8.1, 8.6, 7.9, 8.2],
        6,
    );
    let t = trajectory(&session, ScenarioKey::CrisisBriefing);
    assert_path_close(&t.actual, &[5.26, 5.856, 6.452, 7.048, 7.644, 8.24]);
}

#[test]
fn test_set_clamps_partially_out_of_range_values() {
    let mut session = setup_session();
    let key = ScenarioKey::ClientNegotiation;
    let clamped = session
        .set_score_vector(key, VectorShape::Stage, attempt(1), &[11.0, -2.0, 5.0])
        .unwrap();

    let labels: Vec<_> = clamped.iter().map(|c| c.label).collect();
    assert_eq!(labels, vec!["Opening", "Objections"]);
    assert_eq!(
        session
            .score_vector(key, VectorShape::Stage, attempt(1))
            .unwrap()
            .values(),
        &[10.0, 0.0, 5.0]
    );
    assert_eq!(
        session.store().status(key, VectorShape::Stage, attempt(1)).unwrap(),
        SlotStatus::Saved
    );
}

#[test]
fn test_saving_growth_endpoint_recomputes_trajectory() {
    let mut session = session_in(ScenarioKey::ClientNegotiation);
    session.navigate(Page::Growth).unwrap();
    let before = session
        .last_trajectory(ScenarioKey::ClientNegotiation)
        .cloned()
        .unwrap();

    session
        .stage_scores(
            ScenarioKey::ClientNegotiation,
            VectorShape::Presence,
            attempt(2),
            &[10.0; 5],
        )
        .unwrap();
    assert_eq!(
        session.last_trajectory(ScenarioKey::ClientNegotiation),
        Some(&before)
    );

    session
        .save_scores(ScenarioKey::ClientNegotiation, VectorShape::Presence, attempt(2))
        .unwrap();
    let after = session
        .last_trajectory(ScenarioKey::ClientNegotiation)
        .unwrap();
    assert_eq!(after.actual[5], 10.0);
    assert_eq!(after.actual[0], before.actual[0]);
}

#[test]
fn test_reset_all_is_idempotent() {
    let mut session = setup_session();
    let pristine = snapshot(&session);

    for key in ScenarioKey::ALL {
        session
            .set_score_vector(key, VectorShape::Presence, attempt(1), &[1.0; 5])
            .unwrap();
        session
            .stage_scores(key, VectorShape::Stage, attempt(2), &[2.0; 3])
            .unwrap();
    }
    assert_ne!(snapshot(&session), pristine);

    session.reset_all();
    let once = snapshot(&session);
    session.reset_all();
    let twice = snapshot(&session);

    assert_eq!(once, pristine);
    assert_eq!(twice, once);
    assert_eq!(session.store().touched_count(), 0);
    assert_eq!(session.position(), View::Dashboard);
}

#[test]
fn test_reset_scenario_leaves_others_alone() {
    let mut session = setup_session();
    session
        .set_score_vector(ScenarioKey::BoardUpdate, VectorShape::Stage, attempt(3), &[1.0; 3])
        .unwrap();
    session
        .set_score_vector(ScenarioKey::CrisisBriefing, VectorShape::Stage, attempt(3), &[1.0; 3])
        .unwrap();

    session.reset_scenario(ScenarioKey::BoardUpdate);

    assert_eq!(
        session
            .score_vector(ScenarioKey::BoardUpdate, VectorShape::Stage, attempt(3))
            .unwrap()
            .values(),
        &[8.3, 7.9, 7.2]
    );
    assert_eq!(
        session
            .score_vector(ScenarioKey::CrisisBriefing, VectorShape::Stage, attempt(3))
            .unwrap()
            .values(),
        &[1.0, 1.0, 1.0]
    );
}

#[test]
fn test_journal_records_every_interaction_in_order() {
    let mut session = setup_session();
    session.select_scenario("crisis-briefing").unwrap();
    session.navigate(Page::Feedback).unwrap();
    let _ = session.navigate_named("Settings");
    session.go_back();
    session.reset_all();

    let journal = session.journal();
    assert_eq!(journal.len(), 5);
    assert!(journal.is_ordered());
    assert_eq!(journal.recovered().count(), 1);
    assert_eq!(journal.entries()[2].action, "navigate Settings");
}

#[test]
fn test_feedback_view_reflects_saved_scores() {
    let mut session = session_in(ScenarioKey::ClientNegotiation);
    session.navigate(Page::Feedback).unwrap();
    session
        .set_score_vector(
            ScenarioKey::ClientNegotiation,
            VectorShape::Presence,
            attempt(2),
            &[9.0, 9.0, 9.0, 9.0, 9.0],
        )
        .unwrap();

    match session.current_view().unwrap() {
        PageView::Feedback {
            presence, stage, scale, ..
        } => {
            assert_eq!(presence.labels.len(), 5);
            assert_eq!(stage.labels.len(), 3);
            assert_eq!(presence.attempts[1].committed, vec![9.0; 5]);
            assert_eq!(presence.attempts[1].caption, "Attempt 2 (After Learning)");
            assert_eq!(scale.step, 0.1);
        }
        other => panic!("expected feedback page, got {other:?}"),
    }
}
