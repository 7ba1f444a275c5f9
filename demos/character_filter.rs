// Demos are allowed to use expect/unwrap for simplicity
#![allow(clippy::expect_used, clippy::unwrap_used)]

//! Character Filter Demo
//!
//! A roster page filters its list by class. Picking a class clears the list
//! and shows a loading indicator after 300ms, then renders the filtered list
//! and the new title after 1s. The demo runs three assertions against that
//! sequence on real time, with a background task playing the page script:
//!
//! 1. `to_not` on a name of the selected class, which passes while the list
//!    is merely cleared (a false positive);
//! 2. `never` on the same name, which catches the re-render;
//! 3. waiting for the title, which is written last, then a single-poll
//!    check on the list.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example character_filter
//! RUST_LOG=espera_core=debug cargo run --example character_filter
//! ```

use std::time::Duration;

use espera::core::{AsyncObservable, eventually_async, never_async, observe_eventually};
use espera::prelude::*;

const SCRIPT_DELAY: Duration = Duration::from_millis(300);
const FILTER_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Default)]
struct Roster {
    title: String,
    names: Vec<&'static str>,
    loading: bool,
}

const CHARACTERS: [(&str, &str); 4] = [
    ("Sharoar Dewshining", "Avenger"),
    ("Hollyonna Madwar", "Barbarian"),
    ("Leonan Darksbane", "Avenger"),
    ("Bruna Stonefist", "Barbarian"),
];

fn all() -> Roster {
    Roster {
        title: "All".to_string(),
        names: CHARACTERS.iter().map(|(name, _)| *name).collect(),
        loading: false,
    }
}

/// Plays the filter script on `page`, as the browser would after a change
/// event.
fn select(page: &SharedState<Roster>, class: &'static str) -> tokio::task::JoinHandle<()> {
    let page = page.clone();
    tokio::spawn(async move {
        tokio::time::sleep(SCRIPT_DELAY).await;
        page.update(|roster| {
            roster.names.clear();
            roster.loading = true;
        });
        tokio::time::sleep(FILTER_DELAY - SCRIPT_DELAY).await;
        page.set(Roster {
            title: class.to_string(),
            names: CHARACTERS
                .iter()
                .filter(|(_, c)| *c == class)
                .map(|(name, _)| *name)
                .collect(),
            loading: false,
        });
    })
}

fn shows(page: &SharedState<Roster>, name: &str) -> bool {
    page.with(|roster| roster.names.contains(&name))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = WaitConfig::default();
    println!("=== espera character filter ===");
    println!("timeout {:?}, poll interval {:?}\n", config.timeout, config.poll_interval);

    // 1. to_not passes for the wrong reason
    let page = SharedState::new(all());
    let script = select(&page, "Avenger");
    let absent = eventually_async(&config, || async { !shows(&page, "Sharoar Dewshining") })
        .await
        .unwrap();
    println!(
        "to_not after selecting Avenger: {} (loading = {})",
        absent,
        page.with(|roster| roster.loading)
    );
    script.await.unwrap();
    println!(
        "  ...and once settled Sharoar is back: {}\n",
        shows(&page, "Sharoar Dewshining")
    );

    // 2. never sees the re-render
    let page = SharedState::new(all());
    let script = select(&page, "Avenger");
    eventually_async(&config, || async { page.with(|roster| roster.loading) })
        .await
        .unwrap()
        .into_result("loading indicator")
        .unwrap();
    match never_async(&config, || async { shows(&page, "Sharoar Dewshining") })
        .await
        .unwrap()
        .into_result("content 'Sharoar Dewshining'")
    {
        Ok(outcome) => println!("never: unexpectedly passed: {outcome}"),
        Err(err) => println!("never: {err}"),
    }
    script.await.unwrap();
    println!();

    // 3. wait for what the script writes last
    let page = SharedState::new(all());
    let script = select(&page, "Barbarian");
    let titled = observe_eventually(&config, &page, |roster: &Roster| {
        roster.title == "Barbarian"
    })
    .await
    .unwrap()
    .into_result("title 'Barbarian'")
    .unwrap();
    let snapshot = AsyncObservable::snapshot(&page).await;
    println!("title changed: {titled}");
    println!(
        "  list at that moment: {:?} (loading = {})",
        snapshot.names, snapshot.loading
    );
    script.await.unwrap();
}
