// Demos are allowed to use expect/unwrap for simplicity
#![allow(clippy::expect_used, clippy::unwrap_used)]

//! Matcher Performance Demo
//!
//! Times the common phrasings of a content assertion against a roster page
//! that loads 200ms after the visit. Every measurement runs on a virtual
//! clock, so the numbers are exact and the demo finishes instantly.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example matcher_performance
//!
//! # Show every poll
//! RUST_LOG=debug cargo run --example matcher_performance
//! ```

use std::time::Duration;

use espera::prelude::*;
use espera::testing::{Measurement, measure_on};

const ROSTER: [&str; 4] = [
    "Sharoar Dewshining",
    "Hollyonna Madwar",
    "Leonan Darksbane",
    "Bruna Stonefist",
];

fn roster_page(clock: &ManualClock) -> Timeline<Page, ManualClock> {
    let rows = ROSTER.iter().map(|name| {
        Element::new("tr").with_child(Element::new("td").with_class("name").with_text(*name))
    });
    Timeline::new(
        clock.clone(),
        Page::new([Element::new("table").with_id("characters_list")]),
    )
    .at(
        Duration::from_millis(200),
        Page::new([Element::new("table").with_id("characters_list").with_children(rows)]),
    )
}

fn report(m: &Measurement, passed: bool) {
    let verdict = if passed { "pass" } else { "fail" };
    let elapsed = format!("{:?}", m.elapsed);
    println!("  {:<44} {elapsed:>8}  [{verdict}]", m.label);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let clock = ManualClock::new();
    let page = roster_page(&clock);
    let on_page = || expect(&page).on_clock(clock.clone());
    let config = *on_page().config();

    println!("=== espera matcher performance ===");
    println!(
        "timeout {:?}, poll interval {:?}\n",
        config.timeout, config.poll_interval
    );

    println!("Waiting for the roster:");
    let (r, m) = measure_on(&clock, "to(has_content) before load", || {
        on_page().to(has_content("Sharoar Dewshining"))
    });
    report(&m, r.is_ok());

    let (r, m) = measure_on(&clock, "to(has_content) after load", || {
        on_page().to(has_content("Bruna Stonefist"))
    });
    report(&m, r.is_ok());

    println!("\nChecking for absence:");
    let (r, m) = measure_on(&clock, "to_not(has_content)", || {
        on_page().to_not(has_content("Nobody Atall"))
    });
    report(&m, r.is_ok());

    let (r, m) = measure_on(&clock, "!matches_eventually(has_content)", || {
        !on_page()
            .matches_eventually(has_content("Nobody Atall"))
            .unwrap()
    });
    report(&m, r);

    let (r, m) = measure_on(&clock, "never(has_content)", || {
        on_page().never(has_content("Nobody Atall"))
    });
    report(&m, r.is_ok());

    let (r, m) = measure_on(&clock, "now(not(has_content))", || {
        on_page().now(not(has_content("Nobody Atall")))
    });
    report(&m, r.is_ok());

    println!("\nSearching cell by cell:");
    let cells = Page::clone(page.current());
    let selector = espera::testing::Selector::parse("td.name").unwrap();
    let leonan = matcher("Leonan Darksbane", |e: &Element| {
        e.text_content() == "Leonan Darksbane"
    });
    let (hits, m) = measure_on(&clock, "matches_eventually per cell", || {
        cells
            .all(&selector)
            .into_iter()
            .filter(|cell| {
                let source = || (*cell).clone();
                expect(&source)
                    .on_clock(clock.clone())
                    .matches_eventually(&leonan)
                    .unwrap_or(false)
            })
            .count()
    });
    report(&m, hits == 1);

    let (r, m) = measure_on(&clock, "to(has_css_with_text) on the page", || {
        on_page().to(espera::testing::has_css_with_text("td.name", "Leonan Darksbane").unwrap())
    });
    report(&m, r.is_ok());

    println!("\nTotal virtual time: {:?}", clock.now());
}
