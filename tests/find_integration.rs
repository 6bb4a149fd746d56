use stackfind::find::{FindEngine, FindMode, FindParams, FindResult, StateKind};
use stackfind::model::{CardId, Owner, WidgetId};
use stackfind::store::fs::StackFile;
use stackfind::store::memory::MemoryStack;
use stackfind::store::StackDocument;
use tempfile::TempDir;

fn run_to_end(engine: &mut FindEngine, doc: &MemoryStack) -> Option<FindResult> {
    let mut guard = 0;
    while engine.step(doc) {
        guard += 1;
        assert!(guard < 100_000, "search did not terminate");
    }
    engine.result().cloned()
}

/// Three cards on one background; C2's card field F1 reads "Hello World".
fn hello_stack() -> (MemoryStack, Vec<CardId>, WidgetId) {
    let mut mem = MemoryStack::new();
    let bg = mem.new_background("Main");
    let cards = vec![
        mem.new_card(bg, "C1"),
        mem.new_card(bg, "C2"),
        mem.new_card(bg, "C3"),
    ];
    let f1 = mem.new_field(Owner::Card(cards[1]), "F1", "Hello World");
    (mem, cards, f1)
}

#[test]
fn begins_scenario_reports_card_field_and_term_length() {
    let (mem, cards, f1) = hello_stack();
    let mut engine = FindEngine::new();
    engine.begin_search(&mem, cards[0], FindParams::new(FindMode::Begins, "Hel"));

    let r = run_to_end(&mut engine, &mem).unwrap();
    assert_eq!(
        (r.card, r.field, r.offset, r.length, r.text.as_str()),
        (cards[1], f1, 0, 3, "Hel")
    );
    assert_eq!(engine.state(), Some(StateKind::Finish));
}

#[test]
fn case_asymmetry_between_begins_and_char_phrase() {
    let mut mem = MemoryStack::new();
    let bg = mem.new_background("Main");
    let card = mem.new_card(bg, "only");
    mem.new_field(Owner::Card(card), "F", "hello world");

    let mut engine = FindEngine::new();
    engine.begin_search(&mem, card, FindParams::new(FindMode::Begins, "Hello"));
    assert!(run_to_end(&mut engine, &mem).is_some());

    engine.begin_search(&mem, card, FindParams::new(FindMode::CharPhrase, "Hello"));
    assert!(run_to_end(&mut engine, &mem).is_none());
}

#[test]
fn and_terms_span_fields_and_report_the_first_term() {
    let mut mem = MemoryStack::new();
    let bg = mem.new_background("Main");
    let c1 = mem.new_card(bg, "C1");
    let c2 = mem.new_card(bg, "C2");
    mem.new_field(Owner::Card(c1), "F", "foo only");
    let first = mem.new_field(Owner::Card(c2), "A", "the foo");
    mem.new_field(Owner::Card(c2), "B", "bar");

    let mut engine = FindEngine::new();
    engine.begin_search(&mem, c1, FindParams::new(FindMode::WholeWord, "foo bar"));
    let r = run_to_end(&mut engine, &mem).unwrap();
    assert_eq!((r.card, r.field, r.offset, r.length), (c2, first, 4, 3));
}

#[test]
fn find_again_is_deterministic() {
    let mut mem = MemoryStack::new();
    let bg = mem.new_background("Main");
    let title = mem.new_field(Owner::Background(bg), "Title", "");
    for (i, text) in ["red fish", "blue fish", "one fish two fish", "no match"]
        .iter()
        .enumerate()
    {
        let card = mem.new_card(bg, &format!("c{}", i));
        mem.set_field_text(card, title, *text).unwrap();
    }
    let anchor = mem.card_at(2).unwrap();
    let params = FindParams::new(FindMode::Begins, "fish");

    let sequence = |mem: &MemoryStack| {
        let mut engine = FindEngine::new();
        (0..6)
            .map(|_| {
                engine.begin_search(mem, anchor, params.clone());
                run_to_end(&mut engine, mem).map(|r| (r.card, r.offset))
            })
            .collect::<Vec<_>>()
    };

    let first = sequence(&mem);
    assert_eq!(first, sequence(&mem));
    assert!(first.iter().all(Option::is_some));
    // c2 twice, then c0, c1, then c2 again.
    assert_eq!(first[0], first[4]);
}

#[test]
fn a_miss_visits_each_card_once() {
    let mut mem = MemoryStack::new();
    let bg = mem.new_background("Main");
    let body = mem.new_field(Owner::Background(bg), "Body", "");
    let n = 200;
    let mut anchor = None;
    for i in 0..n {
        let card = mem.new_card(bg, &format!("card {}", i));
        mem.set_field_text(card, body, "lorem ipsum dolor").unwrap();
        if i == 137 {
            anchor = Some(card);
        }
    }

    let mut engine = FindEngine::new();
    engine.begin_search(&mem, anchor.unwrap(), FindParams::new(FindMode::Contains, "zzz"));
    assert!(run_to_end(&mut engine, &mem).is_none());
    assert_eq!(engine.stats().cards_visited, n as u64);
    assert!(engine.stats().steps <= 3 * n as u64);
}

#[test]
fn shared_background_text_is_seen_on_every_card() {
    let mut mem = MemoryStack::new();
    let bg = mem.new_background("Main");
    let c1 = mem.new_card(bg, "one");
    let c2 = mem.new_card(bg, "two");
    let shared = mem.new_field(Owner::Background(bg), "Header", "Shared heading");
    mem.widget_mut(shared).unwrap().shared_text = true;

    let mut engine = FindEngine::new();
    let params = FindParams::new(FindMode::WordPhrase, "shared heading");
    engine.begin_search(&mem, c1, params.clone());
    assert_eq!(run_to_end(&mut engine, &mem).unwrap().card, c1);
    engine.begin_search(&mem, c1, params);
    assert_eq!(run_to_end(&mut engine, &mem).unwrap().card, c2);
}

#[test]
fn compressed_stack_file_can_be_searched() {
    let (mem, cards, f1) = hello_stack();
    let dir = TempDir::new().unwrap();
    let file = StackFile::new(dir.path().join("hello.json.gz"));
    file.save(mem.stack()).unwrap();

    let loaded = file.load().unwrap();
    let mut engine = FindEngine::new();
    engine.begin_search(&loaded, cards[2], FindParams::new(FindMode::CharPhrase, "o W"));
    let r = run_to_end(&mut engine, &loaded).unwrap();
    assert_eq!((r.card, r.field, r.offset), (cards[1], f1, 4));
}
