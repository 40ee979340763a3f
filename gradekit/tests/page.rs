use std::time::{Duration, Instant};

use gradekit::prelude::*;

fn row(id: &str, cells: &[&str]) -> Element {
    Element::tr()
        .id(id)
        .children(cells.iter().map(|c| Element::td(*c)))
}

fn document() -> Element {
    let scores = Element::table()
        .id("scores")
        .child(
            Element::thead().child(
                Element::tr()
                    .child(Element::th("Name").id("h-name").attr("data-sort", ""))
                    .child(Element::th("Class").id("h-class"))
                    .child(
                        Element::th("Score")
                            .id("h-score")
                            .attr("data-sort", "")
                            .attr("data-type", "number"),
                    ),
            ),
        )
        .child(
            Element::tbody()
                .id("scores-body")
                .child(row("r0", &["Carol", "B", "85"]))
                .child(row("r1", &["Alice", "A", "92"]))
                .child(row("r2", &["Bob", "A", "71"])),
        );

    let courses = Element::table()
        .id("courses")
        .child(
            Element::thead()
                .child(Element::tr().child(Element::th("Course").id("h-course").attr("data-sort", ""))),
        )
        .child(
            Element::tbody()
                .child(row("c0", &["Alice's seminar"]))
                .child(row("c1", &["Databases"])),
        );

    let dialog = Element::div().id("grade-dialog").class("modal").child(
        Element::form()
            .id("grade-form")
            .child(
                Element::input("text")
                    .id("f-student")
                    .attr("name", "student")
                    .attr("required", ""),
            )
            .child(
                Element::input("number")
                    .id("f-score")
                    .attr("name", "score")
                    .attr("required", "")
                    .attr("min", "0")
                    .attr("max", "100")
                    .attr("value", "120"),
            )
            .child(Element::input("submit")),
    );

    Element::div()
        .class("container")
        .child(
            Element::div()
                .class("table-responsive")
                .child(
                    Element::div()
                        .class("input-group")
                        .child(Element::input("text").id("search-scores").class("table-search"))
                        .child(
                            Element::new("button")
                                .id("clear-scores")
                                .attr("data-clear-search", ""),
                        ),
                )
                .child(scores),
        )
        .child(Element::div().class("table-responsive").child(courses))
        .child(dialog)
}

fn page() -> (Element, Page) {
    let root = document();
    let page = Page::scan(&root, ToolkitConfig::default());
    (root, page)
}

fn click(target: &str) -> Event {
    Event::Click {
        target: target.to_string(),
    }
}

fn input(target: &str, value: &str) -> Event {
    Event::Input {
        target: target.to_string(),
        value: value.to_string(),
    }
}

fn submit(target: &str) -> Event {
    Event::Submit {
        target: target.to_string(),
    }
}

fn body_ids(root: &Element) -> Vec<String> {
    root.find("scores-body")
        .unwrap()
        .children
        .iter()
        .map(|tr| tr.id.clone())
        .collect()
}

// ============================================================================
// Scanning
// ============================================================================

#[test]
fn test_scan_finds_everything() {
    let (_, page) = page();
    assert_eq!(page.tables().count(), 2);
    assert_eq!(page.forms().len(), 1);
    assert_eq!(page.search_target("search-scores"), Ok("scores"));
    assert_eq!(page.open_dialog(), None);
}

#[test]
fn test_lookup_errors() {
    let (_, mut page) = page();
    assert_eq!(
        page.table("missing").unwrap_err(),
        PageError::UnknownTable("missing".to_string())
    );
    assert_eq!(
        page.sort("missing", 0),
        Err(PageError::UnknownTable("missing".to_string()))
    );
    assert_eq!(
        page.validate_form("missing"),
        Err(PageError::UnknownForm("missing".to_string()))
    );
    let err = page.search("missing", "x").unwrap_err();
    assert_eq!(err.to_string(), "Search box 'missing' not found");
}

// ============================================================================
// Sorting and searching
// ============================================================================

#[test]
fn test_header_click_sorts_and_renders() {
    let (mut root, mut page) = page();

    let done = page.dispatch(&click("h-score"));
    assert_eq!(
        done,
        Dispatched::Sorted {
            table: "scores".to_string(),
            column: 2,
            direction: SortDirection::Ascending,
        }
    );
    assert_eq!(done.control(), EventControl::PROCEED);
    page.render(&mut root);
    assert_eq!(body_ids(&root), vec!["r2", "r0", "r1"]);

    page.dispatch(&click("h-score"));
    page.render(&mut root);
    assert_eq!(body_ids(&root), vec!["r1", "r0", "r2"]);
    assert!(root.find("h-score").unwrap().has_class("sort-desc"));
}

#[test]
fn test_non_sortable_header_is_ignored() {
    let (_, mut page) = page();
    assert_eq!(page.dispatch(&click("h-class")), Dispatched::Ignored);
    assert_eq!(page.table("scores").unwrap().active_sort(), None);
}

#[test]
fn test_search_only_filters_its_table() {
    let (mut root, mut page) = page();

    let done = page.dispatch(&input("search-scores", "alice"));
    assert_eq!(
        done,
        Dispatched::Filtered {
            table: "scores".to_string(),
            visible: 1,
        }
    );
    assert_eq!(page.table("courses").unwrap().visible_count(), 2);

    page.render(&mut root);
    assert!(root.find("r0").unwrap().hidden);
    assert!(!root.find("r1").unwrap().hidden);
    assert!(!root.find("c1").unwrap().hidden);
    assert_eq!(root.find("search-scores").unwrap().get_attr("value"), Some("alice"));
}

#[test]
fn test_clear_button_restores_rows() {
    let (mut root, mut page) = page();
    page.dispatch(&click("h-name"));
    page.dispatch(&input("search-scores", "zzz"));
    assert_eq!(page.table("scores").unwrap().visible_count(), 0);

    let done = page.dispatch(&click("clear-scores"));
    assert_eq!(
        done,
        Dispatched::Filtered {
            table: "scores".to_string(),
            visible: 3,
        }
    );

    page.render(&mut root);
    assert_eq!(root.find("search-scores").unwrap().get_attr("value"), Some(""));
    // Sort order survives the filter round trip.
    assert_eq!(body_ids(&root), vec!["r1", "r2", "r0"]);
}

#[test]
fn test_attach_search_box() {
    let (mut root, mut page) = page();

    let ids = page.attach_search_box(&mut root, "courses", None).unwrap();
    let el = root.find(&ids.input).unwrap();
    assert_eq!(el.get_attr("placeholder"), Some("Search..."));
    assert_eq!(page.search_target(&ids.input), Ok("courses"));

    page.dispatch(&input(&ids.input, "data"));
    assert_eq!(page.table("courses").unwrap().visible_count(), 1);
    assert_eq!(page.table("scores").unwrap().visible_count(), 3);

    page.dispatch(&click(&ids.clear));
    assert_eq!(page.table("courses").unwrap().visible_count(), 2);
}

#[test]
fn test_attach_search_box_unknown_table() {
    let (mut root, mut page) = page();
    assert_eq!(
        page.attach_search_box(&mut root, "missing", Some("Find")),
        Err(PageError::UnknownTable("missing".to_string()))
    );
}

#[test]
fn test_rescan_keeps_rendered_sort() {
    let (mut root, mut page) = page();
    page.dispatch(&click("h-score"));
    page.render(&mut root);

    page.rescan(&root);
    let table = page.table("scores").unwrap();
    assert_eq!(table.active_sort(), Some((2, SortDirection::Ascending)));
    assert_eq!(table.rows()[0].cell(0), "Bob");
}

#[test]
fn test_rescan_keeps_active_filter() {
    let (mut root, mut page) = page();
    page.dispatch(&input("search-scores", "ali"));
    assert_eq!(page.table("scores").unwrap().visible_count(), 1);
    page.render(&mut root);

    page.rescan(&root);
    assert_eq!(page.table("scores").unwrap().visible_count(), 1);
    assert_eq!(page.search_target("search-scores"), Ok("scores"));

    page.render(&mut root);
    assert!(root.find("r0").unwrap().hidden);
    assert!(!root.find("r1").unwrap().hidden);
    assert_eq!(root.find("search-scores").unwrap().get_attr("value"), Some("ali"));
}

#[test]
fn test_rescan_refilters_from_search_text() {
    let (mut root, mut page) = page();
    // Text typed before the page is rescanned, with every row still shown.
    root.find_mut("search-scores").unwrap().set_attr("value", "bob");

    page.rescan(&root);
    let visible: Vec<&str> = page
        .table("scores")
        .unwrap()
        .visible_rows()
        .map(|r| r.cell(0))
        .collect();
    assert_eq!(visible, vec!["Bob"]);
}

#[test]
fn test_attached_search_box_survives_rescan() {
    let mut root = Element::div().child(
        Element::div().child(
            Element::table()
                .id("t")
                .child(Element::thead().child(Element::tr().child(Element::th("Name"))))
                .child(
                    Element::tbody()
                        .child(row("t0", &["Alice"]))
                        .child(row("t1", &["Bob"])),
                ),
        ),
    );
    let mut page = Page::scan(&root, ToolkitConfig::default());
    let ids = page.attach_search_box(&mut root, "t", None).unwrap();

    page.rescan(&root);
    assert_eq!(page.search_target(&ids.input), Ok("t"));
    assert_eq!(
        page.dispatch(&input(&ids.input, "bob")),
        Dispatched::Filtered {
            table: "t".to_string(),
            visible: 1,
        }
    );

    page.dispatch(&click(&ids.clear));
    assert_eq!(page.table("t").unwrap().visible_count(), 2);
}

#[test]
fn test_export_table() {
    let (_, mut page) = page();
    page.dispatch(&input("search-scores", "bob"));

    let mut sink = MemorySink::new();
    page.export_table("scores", "scores.csv", &mut sink).unwrap();
    let csv = sink.last().unwrap().text();
    assert!(csv.starts_with("\"Name\",\"Class\",\"Score\"\n"));
    assert_eq!(csv.lines().count(), 4);

    assert!(page.export_table("missing", "x.csv", &mut sink).is_err());
    assert_eq!(sink.downloads.len(), 1);
}

// ============================================================================
// Forms and dialogs
// ============================================================================

#[test]
fn test_invalid_submit_is_cancelled() {
    let (mut root, mut page) = page();

    let done = page.dispatch(&submit("grade-form"));
    assert_eq!(
        done,
        Dispatched::Submitted {
            form: "grade-form".to_string(),
            valid: false,
        }
    );
    assert!(done.control().is_cancelled());

    page.render(&mut root);
    assert_eq!(root.select(|el| el.has_class("invalid-feedback")).len(), 2);
}

#[test]
fn test_valid_submit_proceeds() {
    let (mut root, mut page) = page();
    page.dispatch(&input("f-student", "S001"));
    page.dispatch(&input("f-score", "90"));

    let done = page.dispatch(&submit("grade-form"));
    assert_eq!(done.control(), EventControl::PROCEED);

    page.render(&mut root);
    assert!(root.select(|el| el.has_class("invalid-feedback")).is_empty());
    assert!(root.find("f-score").unwrap().has_class("is-valid"));
}

fn confirm_page(message: &str) -> (Element, Page) {
    let mut root = document();
    root.find_mut("grade-form")
        .unwrap()
        .set_attr("data-confirm", message);
    let mut page = Page::scan(&root, ToolkitConfig::default());
    page.dispatch(&input("f-student", "S001"));
    page.dispatch(&input("f-score", "90"));
    (root, page)
}

#[test]
fn test_declined_confirmation_cancels_submit() {
    let (_, mut page) = confirm_page("Save this score?");
    let mut asked = Vec::new();

    let done = page.dispatch_with(&submit("grade-form"), &mut |message: &str| {
        asked.push(message.to_string());
        false
    });
    assert_eq!(
        done,
        Dispatched::SubmitDeclined {
            form: "grade-form".to_string(),
        }
    );
    assert_eq!(done.control(), EventControl::CANCEL);
    assert_eq!(asked, vec!["Save this score?"]);
}

#[test]
fn test_accepted_confirmation_proceeds() {
    let (_, mut page) = confirm_page("Save this score?");

    let done = page.dispatch_with(&submit("grade-form"), &mut |_: &str| true);
    assert_eq!(
        done,
        Dispatched::Submitted {
            form: "grade-form".to_string(),
            valid: true,
        }
    );
    assert_eq!(done.control(), EventControl::PROCEED);

    // Without a prompt the submission is accepted.
    assert_eq!(page.dispatch(&submit("grade-form")), done);
}

#[test]
fn test_empty_confirm_uses_default_message() {
    let (_, page) = confirm_page("");
    assert_eq!(
        page.confirm_message("grade-form").unwrap().as_deref(),
        Some("Are you sure you want to do this?")
    );

    let (_, page) = self::page();
    assert_eq!(page.confirm_message("grade-form"), Ok(None));
}

#[test]
fn test_invalid_submit_is_not_confirmed() {
    let mut root = document();
    root.find_mut("grade-form")
        .unwrap()
        .set_attr("data-confirm", "Save?");
    let mut page = Page::scan(&root, ToolkitConfig::default());
    let mut asked = false;

    let done = page.dispatch_with(&submit("grade-form"), &mut |_: &str| {
        asked = true;
        true
    });
    assert!(done.control().is_cancelled());
    assert!(!asked);
}

#[test]
fn test_dialog_shown_resets_validation() {
    let (mut root, mut page) = page();
    page.dispatch(&submit("grade-form"));

    let done = page.dispatch(&Event::DialogShown {
        target: "grade-dialog".to_string(),
    });
    assert_eq!(
        done,
        Dispatched::ValidationReset {
            form: "grade-form".to_string(),
        }
    );
    assert_eq!(page.open_dialog(), Some("grade-dialog"));

    let form = page.form("grade-form").unwrap();
    assert!(form.fields().iter().all(|f| f.state() == ValidationState::Untouched));

    page.render(&mut root);
    assert!(root.find("grade-dialog").unwrap().has_class("show"));
    assert!(root.select(|el| el.has_class("invalid-feedback")).is_empty());
}

#[test]
fn test_dialog_hidden_restores_values() {
    let (mut root, mut page) = page();
    page.dispatch(&Event::DialogShown {
        target: "grade-dialog".to_string(),
    });
    page.dispatch(&input("f-score", "55"));
    page.dispatch(&submit("grade-form"));

    page.dispatch(&Event::DialogHidden {
        target: "grade-dialog".to_string(),
    });
    assert_eq!(page.open_dialog(), None);

    let form = page.form("grade-form").unwrap();
    assert_eq!(form.get("score").unwrap().current_value(), "120");
    assert_eq!(form.get("student").unwrap().feedback(), None);

    page.render(&mut root);
    assert!(!root.find("grade-dialog").unwrap().has_class("show"));
}

// ============================================================================
// Keys
// ============================================================================

#[test]
fn test_ctrl_f_focuses_search() {
    let (_, mut page) = page();
    let done = page.dispatch(&Event::Key {
        key: Key::Char('F'),
        modifiers: Modifiers::ctrl(),
    });
    assert_eq!(
        done,
        Dispatched::SearchFocused {
            input: "search-scores".to_string(),
        }
    );
    assert!(done.control().prevent_default);
    assert!(!done.control().stop_propagation);
    assert_eq!(page.focused(), Some("search-scores"));
}

#[test]
fn test_plain_f_is_ignored() {
    let (_, mut page) = page();
    let done = page.dispatch(&Event::Key {
        key: Key::Char('f'),
        modifiers: Modifiers::NONE,
    });
    assert_eq!(done, Dispatched::Ignored);
}

#[test]
fn test_escape_requests_dialog_close() {
    let (_, mut page) = page();
    let escape = Event::Key {
        key: Key::Escape,
        modifiers: Modifiers::NONE,
    };
    assert_eq!(page.dispatch(&escape), Dispatched::Ignored);

    page.dispatch(&Event::DialogShown {
        target: "grade-dialog".to_string(),
    });
    assert_eq!(
        page.dispatch(&escape),
        Dispatched::DialogCloseRequested {
            dialog: "grade-dialog".to_string(),
        }
    );
}

#[test]
fn test_custom_keybinds() {
    let root = document();
    let keybinds = Keybinds::empty().bind(KeyCombo::key(Key::Char('/')), Shortcut::FocusSearch);
    let mut page = Page::scan(&root, ToolkitConfig::default()).with_keybinds(keybinds);

    let slash = Event::Key {
        key: Key::Char('/'),
        modifiers: Modifiers::NONE,
    };
    assert!(matches!(page.dispatch(&slash), Dispatched::SearchFocused { .. }));
    let ctrl_f = Event::Key {
        key: Key::Char('f'),
        modifiers: Modifiers::ctrl(),
    };
    assert_eq!(page.dispatch(&ctrl_f), Dispatched::Ignored);
}

// ============================================================================
// Banners
// ============================================================================

#[test]
fn test_toasts_expire_after_configured_duration() {
    let (mut root, mut page) = page();
    let start = Instant::now();

    page.notify("Saved", ToastLevel::Success, start);
    page.render(&mut root);
    let first = &root.children[0];
    assert!(first.has_attr("data-toast"));
    assert!(first.has_class("alert-success"));
    assert_eq!(first.text, "Saved");

    assert!(page.expire_toasts(start + Duration::from_secs(4)).is_empty());
    let expired = page.expire_toasts(start + Duration::from_secs(5));
    assert_eq!(expired.len(), 1);
    assert!(page.toasts().is_empty());

    page.render(&mut root);
    assert!(root.select(|el| el.has_attr("data-toast")).is_empty());
}

#[test]
fn test_toast_duration_follows_config() {
    let root = document();
    let config = ToolkitConfig::new().toast_duration(Duration::from_secs(1));
    let mut page = Page::scan(&root, config);
    let start = Instant::now();

    page.notify("Oops", ToastLevel::Error, start);
    assert_eq!(page.expire_toasts(start + Duration::from_secs(1)).len(), 1);
}
