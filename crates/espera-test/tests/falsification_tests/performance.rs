//! Falsification Tests: Category D - Cost of Assertion Phrasing (F061-F066)
//!
//! # Toyota Way: Muda (無駄) Elimination
//! A wait that always runs out its budget is pure waste. These tests pin
//! down which phrasings pay that cost and which return as soon as the page
//! allows.
//!
//! All costs are measured on the page's virtual clock, so they are exact.

use std::time::Duration;

use espera_core::WaitConfig;
use espera_test::{Element, Matcher, Page, Selector, expect, has_content, matcher, measure_on};

use super::fixture::{CharacterPage, LOAD_DELAY};

fn budget() -> Duration {
    WaitConfig::default().timeout
}

/// F061: Present content is found without waiting
///
/// # Falsification Attempt
/// Time a content check on a loaded roster.
#[test]
fn f061_present_content_is_free() {
    let page = CharacterPage::loaded();
    let (result, cost) = measure_on(&page.clock, "has_content", || {
        page.expect().to(has_content("Sharoar Dewshining"))
    });

    assert!(result.is_ok());
    assert_eq!(cost.elapsed, Duration::ZERO, "F061 FALSIFIED: {cost}");
}

/// F062: Inverted absence of content is also free
///
/// # Falsification Attempt
/// to_not on a name that is not on the page.
#[test]
fn f062_inverted_absence_is_free() {
    let page = CharacterPage::loaded();
    let (result, cost) = measure_on(&page.clock, "to_not has_content", || {
        page.expect().to_not(has_content("Nobody Atall"))
    });

    assert!(result.is_ok());
    assert_eq!(cost.elapsed, Duration::ZERO, "F062 FALSIFIED: {cost}");
}

/// F063: A failing wait costs the whole budget
///
/// # Falsification Attempt
/// Look for a name that will never appear.
#[test]
fn f063_timeout_costs_full_budget() {
    let page = CharacterPage::loaded();
    let (result, cost) = measure_on(&page.clock, "missing content", || {
        page.expect().to(has_content("Nobody Atall"))
    });

    assert!(result.is_err());
    assert_eq!(cost.elapsed, budget(), "F063 FALSIFIED: {cost}");
}

/// F064: Finders that do not wait see the page before it loads
///
/// # Falsification Attempt
/// Collect name cells right after the visit, then after waiting.
#[test]
fn f064_non_waiting_finder_sees_empty_roster() {
    let page = CharacterPage::visit();
    let cells = Selector::parse("td.name").unwrap();

    let (found, cost) = measure_on(&page.clock, "all td.name", || page.now().all(&cells).len());
    assert_eq!(found, 0, "F064 FALSIFIED: roster already loaded");
    assert_eq!(cost.elapsed, Duration::ZERO);

    page.expect().to(has_content("Bruna Stonefist")).unwrap();
    assert_eq!(page.elapsed(), LOAD_DELAY);
    assert_eq!(page.now().all(&cells).len(), 4);
}

/// F065: Waiting per element pays the budget for every miss
///
/// # Falsification Attempt
/// Search the name cells one by one with a waiting check.
#[test]
fn f065_per_cell_waits_multiply() {
    let page = CharacterPage::loaded();
    let cells = Selector::parse("td.name").unwrap();
    let is_leonan = matcher("Leonan Darksbane", |cell: &Element| {
        cell.text_content() == "Leonan Darksbane"
    });

    let snapshot = page.now().clone();
    let (hits, cost) = measure_on(&page.clock, "per-cell search", || {
        snapshot
            .all(&cells)
            .into_iter()
            .filter(|cell| {
                let source = || (*cell).clone();
                expect(&source)
                    .with_config(WaitConfig::default())
                    .on_clock(page.clock.clone())
                    .matches_eventually(&is_leonan)
                    .unwrap_or(false)
            })
            .count()
    });

    assert_eq!(hits, 1);
    assert_eq!(cost.elapsed, budget() * 3, "F065 FALSIFIED: {cost}");

    let (_, direct) = measure_on(&page.clock, "single content check", || {
        page.expect().to(has_content("Leonan Darksbane"))
    });
    assert_eq!(direct.elapsed, Duration::ZERO);
}

/// F066: Negating a waiting check is not the same as waiting for absence
///
/// # Falsification Attempt
/// `!matches_eventually` against `to_not` with the same custom matcher.
#[test]
fn f066_negated_wait_pays_budget_to_not_does_not() {
    let page = CharacterPage::loaded();
    let has_wizard = matcher("a wizard", |p: &Page| p.has_content("Wizard"));

    let (absent, negated) = measure_on(&page.clock, "!matches_eventually", || {
        !page.expect().matches_eventually(&has_wizard).unwrap()
    });
    assert!(absent);
    assert_eq!(negated.elapsed, budget(), "F066 FALSIFIED: {negated}");

    let (result, inverted) = measure_on(&page.clock, "to_not", || {
        page.expect().to_not(&has_wizard)
    });
    assert!(result.is_ok());
    assert_eq!(inverted.elapsed, Duration::ZERO, "F066 FALSIFIED: {inverted}");
    assert!(!Matcher::matches(&has_wizard, page.now()));
}
