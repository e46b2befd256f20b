use presence_core::prelude::*;
use presence_core::{Notice, SessionError};
use presence_test_utils::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Select(&'static str),
    Navigate(Page),
    Named(&'static str),
    Back,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Select("client-negotiation")),
        Just(Step::Select("board-update")),
        Just(Step::Select("crisis-briefing")),
        Just(Step::Select("Nonexistent")),
        proptest::sample::select(Page::ALL.to_vec()).prop_map(Step::Navigate),
        Just(Step::Named("Growth Dashboard")),
        Just(Step::Named("Settings")),
        Just(Step::Back),
    ]
}

proptest! {
    #[test]
    fn prop_navigation_is_total(steps in proptest::collection::vec(step(), 1..60)) {
        let mut session = setup_session();
        let pristine = snapshot(&session);

        for s in steps {
            let before = session.position();
            let result = match s {
                Step::Select(name) => session.select_scenario(name).map(|_| session.position()),
                Step::Navigate(page) => session.navigate(page),
                Step::Named(name) => session.navigate_named(name),
                Step::Back => Ok(session.go_back()),
            };
            let after = session.position();

            match (&result, after) {
                (Ok(_), View::Scenario { key, .. }) => {
                    prop_assert!(session.catalog().contains(key));
                }
                (Ok(_), View::Dashboard) => {}
                (Err(SessionError::ScenarioNotFound { .. } | SessionError::NoActiveScenario), _) => {
                    prop_assert_eq!(after, View::Dashboard);
                }
                (Err(SessionError::InvalidPage { .. }), _) => {
                    let expected = before.scenario().map_or(View::Dashboard, |key| View::Scenario {
                        key,
                        page: Page::Overview,
                    });
                    prop_assert_eq!(after, expected);
                }
                (Err(other), _) => prop_assert!(false, "unexpected error {other:?}"),
            }
            prop_assert!(session.current_view().is_ok());
        }

        prop_assert_eq!(snapshot(&session), pristine);
    }
}

#[test]
fn test_suggested_path_walks_every_page() {
    let mut session = session_in(ScenarioKey::BoardUpdate);
    let mut page = Page::Overview;
    let mut visited = vec![page];
    while let Some(next) = page.next() {
        let view = session.navigate(next).unwrap();
        assert_eq!(view.page(), Some(next));
        assert_eq!(session.current_view().unwrap().page(), Some(next));
        visited.push(next);
        page = next;
    }
    assert_eq!(visited, Page::ALL.to_vec());
}

#[test]
fn test_back_then_reselect_lands_on_overview() {
    let mut session = session_in(ScenarioKey::CrisisBriefing);
    session.navigate(Page::Learning).unwrap();
    assert_eq!(session.go_back(), View::Dashboard);
    session.select_scenario("crisis-briefing").unwrap();
    assert_eq!(
        session.position(),
        View::Scenario {
            key: ScenarioKey::CrisisBriefing,
            page: Page::Overview
        }
    );
}

#[test]
fn test_select_switches_between_scenarios() {
    let mut session = session_in(ScenarioKey::BoardUpdate);
    session.navigate(Page::Growth).unwrap();
    session.select_scenario("client-negotiation").unwrap();
    assert_eq!(
        session.position(),
        View::Scenario {
            key: ScenarioKey::ClientNegotiation,
            page: Page::Overview
        }
    );
}

#[test]
fn test_named_navigation_accepts_menu_titles() {
    let mut session = session_in(ScenarioKey::ClientNegotiation);
    for page in Page::ALL {
        let view = session.navigate_named(page.title()).unwrap();
        assert_eq!(view.page(), Some(page));
    }
    assert!(session.notice().is_none());
}

#[test]
fn test_invalid_page_shows_overview_with_notice() {
    let mut session = session_in(ScenarioKey::ClientNegotiation);
    session.navigate(Page::Coaching).unwrap();
    let err = session.navigate_named("Settings").unwrap_err();
    assert!(matches!(err, SessionError::InvalidPage { .. }));
    assert_eq!(session.position().page(), Some(Page::Overview));
    match session.notice() {
        Some(Notice::Recovered { message, .. }) => assert!(message.contains("Settings")),
        other => panic!("expected recovered notice, got {other:?}"),
    }
}
