//! Falsification Tests: Category C - Races Against a Changing Page (F041-F050)
//!
//! # Toyota Way: Jidoka (自働化)
//! A test that passes for the wrong reason is a defect that must stop the line.
//!
//! Every test here runs the roster page on a virtual clock, so each race
//! resolves the same way on every run. The claims are about what a given
//! phrasing of an assertion can and cannot tell apart.

use std::time::Duration;

use espera_core::{ManualClock, WaitConfig, WaitError};
use espera_test::{
    Matcher, TestError, Timeline, expect, has_content, has_css, not, within,
};

use super::fixture::{CharacterPage, FILTER_DELAY, LOAD_DELAY, SCRIPT_DELAY, ms, render};

/// F041: Waiting for content covers the initial load
///
/// # Falsification Attempt
/// Assert on the roster before it has loaded.
#[test]
fn f041_shows_a_character_after_load() {
    let page = CharacterPage::visit();
    assert!(!has_content("Sharoar Dewshining").matches(page.now()));

    let outcome = page
        .expect()
        .to(has_content("Sharoar Dewshining"))
        .expect("F041 FALSIFIED: character never appeared");

    assert_eq!(outcome.elapsed, LOAD_DELAY, "F041 FALSIFIED: did not wait for the load");
}

/// F042: Content already on the page passes before the filter runs
///
/// # Falsification Attempt
/// Select the character's own class and check the title afterwards.
#[test]
fn f042_same_class_passes_before_script_runs() {
    let mut page = CharacterPage::loaded();
    page.select("Avenger");

    let outcome = page.expect().to(has_content("Sharoar Dewshining")).unwrap();

    assert_eq!(outcome.elapsed, Duration::ZERO);
    assert!(
        within("#filter_title", has_content("All"))
            .unwrap()
            .matches(page.now()),
        "F042 FALSIFIED: filter had already been applied"
    );
}

/// F043: Absence passes as soon as the list is cleared, before filtering ends
///
/// # Falsification Attempt
/// Select another class and inspect the page when to_not returns.
#[test]
fn f043_absence_passes_during_loading() {
    let mut page = CharacterPage::loaded();
    page.select("Barbarian");

    let outcome = page.expect().to_not(has_content("Sharoar Dewshining")).unwrap();

    assert_eq!(outcome.elapsed, SCRIPT_DELAY);
    assert!(
        has_css(".loading").unwrap().matches(page.now()),
        "F043 FALSIFIED: filter had finished when to_not returned"
    );
}

/// F044: The absence check cannot tell which class was selected
///
/// # Falsification Attempt
/// Select the character's own class; to_not still passes, and the
/// character is back once the page settles.
#[test]
fn f044_absence_is_a_false_positive_for_same_class() {
    let mut page = CharacterPage::loaded();
    page.select("Avenger");

    let passed = page.expect().to_not(has_content("Sharoar Dewshining"));
    assert!(passed.is_ok(), "F044 FALSIFIED: to_not caught the race");

    page.sleep(FILTER_DELAY);
    assert!(
        has_content("Sharoar Dewshining").matches(page.now()),
        "F044 FALSIFIED: character really was removed"
    );
}

/// F045: Waiting for the indicator to vanish passes before it ever appears
///
/// # Falsification Attempt
/// Check the indicator right after selecting, then rely on a fixed sleep.
#[test]
fn f045_indicator_absent_before_script_starts() {
    let mut page = CharacterPage::loaded();
    page.select("Avenger");

    let outcome = page.expect().to_not(has_css(".loading").unwrap()).unwrap();
    assert_eq!(outcome.elapsed, Duration::ZERO, "F045 FALSIFIED: waited for the script");

    page.sleep(ms(500));
    let cleared = page.expect().to_not(has_content("Sharoar Dewshining")).unwrap();
    assert_eq!(cleared.elapsed, Duration::ZERO);

    page.sleep(ms(1000));
    let err = page
        .expect()
        .to_not(has_content("Sharoar Dewshining"))
        .unwrap_err();
    assert!(
        matches!(err, TestError::Wait(WaitError::TimeoutExceeded { .. })),
        "F045 FALSIFIED: settled page lost the character"
    );
}

/// F046: Waiting for the indicator to appear and then vanish spans the filter
///
/// # Falsification Attempt
/// Chain has_css, to_not has_css, to_not content; the page must be settled.
#[test]
fn f046_indicator_round_trip() {
    let mut page = CharacterPage::loaded();
    let selected_at = page.elapsed();
    page.select("Barbarian");

    let appeared = page.expect().to(has_css(".loading").unwrap()).unwrap();
    assert_eq!(appeared.elapsed, SCRIPT_DELAY);

    let vanished = page.expect().to_not(has_css(".loading").unwrap()).unwrap();
    assert_eq!(vanished.elapsed, FILTER_DELAY - SCRIPT_DELAY);

    page.expect().to_not(has_content("Sharoar Dewshining")).unwrap();
    assert_eq!(
        page.elapsed() - selected_at,
        FILTER_DELAY,
        "F046 FALSIFIED: page not settled"
    );
    assert!(has_content("Hollyonna Madwar").matches(page.now()));
}

/// F047: The indicator round trip breaks if the window is slept through
///
/// # Falsification Attempt
/// Sleep three seconds before looking for the indicator.
#[test]
fn f047_sleeping_past_indicator_times_out() {
    let mut page = CharacterPage::loaded();
    page.select("Barbarian");
    page.sleep(ms(3000));

    let err = page.expect().to(has_css(".loading").unwrap()).unwrap_err();
    match err {
        TestError::Wait(WaitError::TimeoutExceeded { what, elapsed, .. }) => {
            assert_eq!(what, "css '.loading'");
            assert_eq!(elapsed, WaitConfig::default().timeout);
        }
        other => panic!("F047 FALSIFIED: {other:?}"),
    }
}

/// F048: Waiting for the title that is written last is deterministic
///
/// # Falsification Attempt
/// After the title matches, a single-poll absence check must pass.
#[test]
fn f048_last_written_indicator_is_deterministic() {
    let mut page = CharacterPage::loaded();
    page.select("Barbarian");

    let titled = page
        .expect()
        .to(within("#filter_title", has_content("Barbarian")).unwrap())
        .unwrap();
    assert_eq!(titled.elapsed, FILTER_DELAY);

    page.expect()
        .now(not(has_content("Sharoar Dewshining")))
        .expect("F048 FALSIFIED: list not filtered when title changed");
    assert!(!has_css(".loading").unwrap().matches(page.now()));
}

/// F049: The title check is only as good as the script's write order
///
/// # Falsification Attempt
/// Same page, but the script writes the title together with the loading
/// state; the title check now returns while the list is still empty.
#[test]
fn f049_title_written_early_reintroduces_race() {
    let clock = ManualClock::new();
    let page = Timeline::new(clock.clone(), render("All", None, false))
        .at(SCRIPT_DELAY, render("Barbarian", None, true))
        .at(FILTER_DELAY, render("Barbarian", Some("Barbarian"), false));
    let on_page = || {
        expect(&page)
            .with_config(WaitConfig::default())
            .on_clock(clock.clone())
    };

    let titled = on_page()
        .to(within("#filter_title", has_content("Barbarian")).unwrap())
        .unwrap();
    assert_eq!(titled.elapsed, SCRIPT_DELAY);

    let err = on_page().now(has_content("Hollyonna Madwar")).unwrap_err();
    assert!(
        matches!(err, TestError::Assertion(_)),
        "F049 FALSIFIED: list was already rendered"
    );
}

/// F050: A never check catches the re-render that to_not misses
///
/// # Falsification Attempt
/// Same-class race from F044, asserted with never after the list clears.
#[test]
fn f050_never_catches_rerender() {
    let mut page = CharacterPage::loaded();
    page.select("Avenger");
    page.expect().to(has_css(".loading").unwrap()).unwrap();

    let err = page
        .expect()
        .never(has_content("Sharoar Dewshining"))
        .unwrap_err();
    match err {
        TestError::Wait(WaitError::ConditionObserved { elapsed, .. }) => {
            assert_eq!(elapsed, FILTER_DELAY - SCRIPT_DELAY);
        }
        other => panic!("F050 FALSIFIED: {other:?}"),
    }
}

#[test]
fn fixture_timeline_is_unambiguous() {
    let mut page = CharacterPage::loaded();
    page.select("Barbarian");
    page.page.validate().unwrap();
    assert_eq!(page.page.settles_at(), LOAD_DELAY + FILTER_DELAY);
}
