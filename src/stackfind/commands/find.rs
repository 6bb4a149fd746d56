use crate::commands::{helpers, CmdMessage, CmdResult};
use crate::error::Result;
use crate::find::{FindEngine, FindParams, FindResult};
use crate::model::{CardId, Owner};
use crate::store::StackDocument;
use serde::Serialize;
use std::collections::HashSet;

/// How a bounded run of the step loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Found(FindResult),
    /// The search finished without a match.
    Exhausted,
    /// The step budget ran out first. Running again continues the search.
    Paused { steps: usize },
}

/// A match with the card and field details needed to show it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoundMatch {
    pub result: FindResult,
    pub card_name: String,
    /// 1-based position of the card in the ring.
    pub position: usize,
    pub field_name: String,
    pub background_field: bool,
    pub field_text: String,
}

impl FoundMatch {
    pub fn describe<D: StackDocument + ?Sized>(doc: &D, result: FindResult) -> Self {
        let card_name = doc
            .card(result.card)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        let widget = doc.widget(result.field);
        Self {
            card_name,
            position: helpers::position(doc, result.card).unwrap_or(0),
            field_name: widget.map(|w| w.name.clone()).unwrap_or_default(),
            background_field: widget.is_some_and(|w| matches!(w.owner, Owner::Background(_))),
            field_text: doc.field_text(result.card, result.field).unwrap_or_default(),
            result,
        }
    }

    /// The match as a chunk expression, e.g. `char 1 to 3 of card field "Notes"`.
    pub fn chunk(&self) -> String {
        let (first, last) = self.result.char_range();
        let layer = if self.background_field { "bkgnd" } else { "card" };
        let field = if self.field_name.is_empty() {
            format!("{} field id {}", layer, self.result.field)
        } else {
            format!("{} field \"{}\"", layer, self.field_name)
        };
        format!("char {} to {} of {}", first, last, field)
    }
}

/// Steps `engine` until it finishes or `budget` steps have run.
pub fn drive<D: StackDocument + ?Sized>(
    engine: &mut FindEngine,
    doc: &D,
    budget: usize,
) -> RunOutcome {
    for _ in 0..budget {
        if !engine.step(doc) {
            return match engine.result() {
                Some(found) => RunOutcome::Found(found.clone()),
                None => RunOutcome::Exhausted,
            };
        }
    }
    RunOutcome::Paused { steps: budget }
}

/// Runs one search from `anchor`. With the same params as the engine's active
/// search this is "find again".
pub fn run<D: StackDocument + ?Sized>(
    doc: &D,
    engine: &mut FindEngine,
    anchor: CardId,
    params: FindParams,
    budget: usize,
) -> Result<CmdResult> {
    engine.begin_search(doc, anchor, params);
    let outcome = drive(engine, doc, budget);

    let mut result = CmdResult::default();
    match &outcome {
        RunOutcome::Found(found) => {
            result.matches.push(FoundMatch::describe(doc, found.clone()));
        }
        RunOutcome::Exhausted => {
            result.add_message(CmdMessage::info(format!(
                "No match for \"{}\"",
                engine.active_terms()
            )));
        }
        RunOutcome::Paused { steps } => {
            result.add_message(CmdMessage::warning(format!(
                "Search paused after {} steps",
                steps
            )));
        }
    }
    Ok(result.with_outcome(outcome))
}

/// Collects every match of a search, starting fresh at `anchor`.
///
/// Repeats "find again" until a run ends without a match or a match recurs.
/// `budget` bounds each run, not the total.
pub fn run_all<D: StackDocument + ?Sized>(
    doc: &D,
    engine: &mut FindEngine,
    anchor: CardId,
    params: FindParams,
    budget: usize,
) -> Result<CmdResult> {
    engine.reset();

    let mut seen = HashSet::new();
    let mut matches = Vec::new();
    let outcome = loop {
        engine.begin_search(doc, anchor, params.clone());
        match drive(engine, doc, budget) {
            RunOutcome::Found(found) => {
                if !seen.insert((found.card, found.field, found.offset)) {
                    break RunOutcome::Exhausted;
                }
                matches.push(FoundMatch::describe(doc, found));
            }
            other => break other,
        }
    };

    let mut result = CmdResult::default();
    match &outcome {
        RunOutcome::Paused { steps } => result.add_message(CmdMessage::warning(format!(
            "Search paused after {} steps, {} matches so far",
            steps,
            matches.len()
        ))),
        _ if matches.is_empty() => result.add_message(CmdMessage::info(format!(
            "No match for \"{}\"",
            params.text
        ))),
        _ => result.add_message(CmdMessage::info(match matches.len() {
            1 => "1 match".to_string(),
            n => format!("{} matches", n),
        })),
    }
    Ok(result.with_matches(matches).with_outcome(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::find::FindMode;
    use crate::store::memory::MemoryStack;

    fn stack() -> (MemoryStack, Vec<CardId>) {
        let mut mem = MemoryStack::new();
        let bg = mem.new_background("Main");
        let title = mem.new_field(Owner::Background(bg), "Title", "");
        let cards: Vec<_> = ["one", "two", "three"]
            .iter()
            .map(|n| mem.new_card(bg, n))
            .collect();
        mem.set_field_text(cards[0], title, "Apples and pears").unwrap();
        mem.set_field_text(cards[1], title, "Nothing here").unwrap();
        mem.set_field_text(cards[2], title, "apple pie").unwrap();
        mem.new_field(Owner::Card(cards[2]), "Notes", "line one\napple crumble");
        (mem, cards)
    }

    #[test]
    fn run_reports_the_match_with_its_card() {
        let (mem, cards) = stack();
        let mut engine = FindEngine::new();
        let res = run(
            &mem,
            &mut engine,
            cards[1],
            FindParams::new(FindMode::Begins, "apple"),
            1000,
        )
        .unwrap();

        assert_eq!(res.matches.len(), 1);
        let m = &res.matches[0];
        assert_eq!(m.card_name, "three");
        assert_eq!(m.position, 3);
        assert_eq!(m.chunk(), "char 1 to 5 of bkgnd field \"Title\"");
        assert_eq!(m.field_text, "apple pie");
    }

    #[test]
    fn run_reports_no_match_as_info() {
        let (mem, cards) = stack();
        let mut engine = FindEngine::new();
        let res = run(
            &mem,
            &mut engine,
            cards[0],
            FindParams::new(FindMode::Begins, "zebra"),
            1000,
        )
        .unwrap();

        assert!(res.matches.is_empty());
        assert_eq!(res.outcome, Some(RunOutcome::Exhausted));
        assert_eq!(res.messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn small_budget_pauses_and_resumes() {
        let (mem, cards) = stack();
        let mut engine = FindEngine::new();
        let params = FindParams::new(FindMode::Begins, "crumble");

        engine.begin_search(&mem, cards[0], params);
        assert_eq!(drive(&mut engine, &mem, 2), RunOutcome::Paused { steps: 2 });
        match drive(&mut engine, &mem, 1000) {
            RunOutcome::Found(found) => {
                assert_eq!(found.card, cards[2]);
                assert_eq!(found.line, 2);
            }
            other => panic!("expected a match, got {:?}", other),
        }
    }

    #[test]
    fn run_all_collects_each_match_once() {
        let (mem, cards) = stack();
        let mut engine = FindEngine::new();
        let res = run_all(
            &mem,
            &mut engine,
            cards[0],
            FindParams::new(FindMode::Begins, "apple"),
            1000,
        )
        .unwrap();

        let found: Vec<_> = res
            .matches
            .iter()
            .map(|m| (m.position, m.field_name.as_str(), m.result.offset))
            .collect();
        assert_eq!(
            found,
            vec![(1, "Title", 0), (3, "Title", 0), (3, "Notes", 9)]
        );
        assert_eq!(res.messages[0].content, "3 matches");
    }

    #[test]
    fn run_all_with_no_match() {
        let (mem, cards) = stack();
        let mut engine = FindEngine::new();
        let res = run_all(
            &mem,
            &mut engine,
            cards[0],
            FindParams::new(FindMode::CharPhrase, "Pie"),
            1000,
        )
        .unwrap();
        assert!(res.matches.is_empty());
        assert_eq!(res.outcome, Some(RunOutcome::Exhausted));
    }
}
