//! Falsification Tests: Category B - Matchers and Selectors (F021-F030)

use espera_test::{
    Element, Matcher, Page, Selector, TestError, both, has_content, has_css, has_css_with_text,
    matcher, not, within,
};

use super::fixture::CharacterPage;

fn loaded_page() -> Page {
    CharacterPage::loaded().now().clone()
}

/// F021: Content matching ignores whitespace layout
///
/// # Falsification Attempt
/// Split a name across elements and extra spaces.
#[test]
fn f021_content_is_whitespace_normalized() {
    let page = Page::new([Element::new("p")
        .with_text("  Sharoar\n")
        .with_child(Element::new("b").with_text("   Dewshining "))]);

    assert!(
        has_content("Sharoar Dewshining").matches(&page),
        "F021 FALSIFIED: split text not matched"
    );
}

/// F022: Descendant selectors only match inside their ancestor
///
/// # Falsification Attempt
/// Look for table cells under the title.
#[test]
fn f022_descendant_selector_respects_scope() {
    let page = loaded_page();
    let cells = Selector::parse("#characters_list td.name").unwrap();
    let stray = Selector::parse("#filter_title td").unwrap();

    assert_eq!(page.all(&cells).len(), 4, "F022 FALSIFIED: roster cells");
    assert!(page.all(&stray).is_empty(), "F022 FALSIFIED: matched outside scope");
}

/// F023: Within narrows content to the scope element
///
/// # Falsification Attempt
/// Title text must not leak roster names and vice versa.
#[test]
fn f023_within_narrows_content() {
    let page = loaded_page();
    let title_all = within("#filter_title", has_content("All")).unwrap();
    let title_name = within("#filter_title", has_content("Sharoar Dewshining")).unwrap();

    assert!(title_all.matches(&page), "F023 FALSIFIED: title not found");
    assert!(
        !title_name.matches(&page),
        "F023 FALSIFIED: roster content leaked into title scope"
    );
}

/// F024: Within does not match while its scope is missing
///
/// # Falsification Attempt
/// Negated inner matcher against a page without the scope.
#[test]
fn f024_within_missing_scope_never_matches() {
    let m = within("#not_rendered_yet", not(has_content("anything"))).unwrap();
    assert!(
        !m.matches(&Page::default()),
        "F024 FALSIFIED: matched an absent scope"
    );
}

/// F025: Css with text requires both on the same element
///
/// # Falsification Attempt
/// Text present on the page but not in the selected cells.
#[test]
fn f025_css_with_text_same_element() {
    let page = loaded_page();
    let right = has_css_with_text("td.name", "Leonan Darksbane").unwrap();
    let wrong = has_css_with_text("td.class", "Leonan Darksbane").unwrap();

    assert!(right.matches(&page), "F025 FALSIFIED: name cell not matched");
    assert!(!wrong.matches(&page), "F025 FALSIFIED: matched text from another cell");
}

/// F026: Unsupported selector syntax is an error, not a silent miss
///
/// # Falsification Attempt
/// Child combinators and attribute selectors.
#[test]
fn f026_bad_selectors_rejected() {
    for bad in ["", "tr > td", "td[title]", "#", "..", "#a#b"] {
        assert!(
            matches!(has_css(bad), Err(TestError::Selector { .. })),
            "F026 FALSIFIED: accepted '{bad}'"
        );
    }
}

/// F027: Negation inverts matching and says so in its description
///
/// # Falsification Attempt
/// Compare a matcher and its negation on the same page.
#[test]
fn f027_not_inverts() {
    let page = loaded_page();
    let present = has_content("Bruna Stonefist");
    let absent = not(has_content("Bruna Stonefist"));

    assert_ne!(present.matches(&page), absent.matches(&page));
    assert_eq!(Matcher::<Page>::description(&absent), "no content 'Bruna Stonefist'");
}

/// F028: Custom matchers compose with page matchers
///
/// # Falsification Attempt
/// Row-count matcher combined with a content matcher.
#[test]
fn f028_custom_matcher_composes() {
    let rows = Selector::parse("#characters_list tr").unwrap();
    let four_rows = matcher("four roster rows", move |page: &Page| page.all(&rows).len() == 4);
    let m = both(four_rows, has_content("Hollyonna Madwar"));

    assert!(m.matches(&loaded_page()), "F028 FALSIFIED");
    assert!(!m.matches(&Page::default()));
    assert_eq!(Matcher::<Page>::description(&m), "four roster rows and content 'Hollyonna Madwar'");
}

/// F029: The loading indicator is a css match, not content
///
/// # Falsification Attempt
/// Match the indicator by class on a page in its loading state.
#[test]
fn f029_loading_indicator_by_class() {
    let mut page = CharacterPage::loaded();
    page.select("Barbarian");
    page.sleep(super::fixture::SCRIPT_DELAY);

    let loading = has_css(".loading").unwrap();
    assert!(loading.matches(page.now()), "F029 FALSIFIED: indicator missing");
    assert!(!has_content("Sharoar").matches(page.now()));
}

/// F030: Empty content is present on every page
///
/// # Falsification Attempt
/// Empty page, empty needle.
#[test]
fn f030_empty_content_trivially_present() {
    assert!(has_content("").matches(&Page::default()), "F030 FALSIFIED");
    assert!(has_content("   ").matches(&Page::default()), "F030 FALSIFIED");
}
