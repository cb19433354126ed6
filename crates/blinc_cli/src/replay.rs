//! Headless replay of a scenario against a laid-out document

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use blinc_core::{PointerEvent, Size};
use blinc_layout::style::{Dimension, Style};
use blinc_layout::{Document, ElementId, LayoutStyle};
use blinc_sortable::autoscroll::POLL_INTERVAL;
use blinc_sortable::{ControllerId, SortableRuntime};
use serde::Serialize;

use crate::scenario::{ListConfig, ListLayout, Scenario, Step};

/// A notification as observed during the replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    pub step: usize,
    pub kind: String,
    pub list: String,
    pub item: String,
}

/// What the scenario produced
#[derive(Debug, Default, Serialize)]
pub struct ReplayReport {
    pub events: Vec<EventRecord>,
    /// Final item order of every list, by list name
    pub lists: BTreeMap<String, Vec<String>>,
    /// Final scroll offset of every scrolling list
    pub scroll: BTreeMap<String, f32>,
}

struct Replay {
    doc: Document,
    runtime: SortableRuntime<ElementId>,
    lists: Vec<(String, ControllerId, ElementId)>,
    now: Instant,
}

pub fn run(scenario: &Scenario) -> Result<ReplayReport> {
    let mut replay = Replay::build(scenario)?;

    let names: BTreeMap<ControllerId, String> = replay
        .lists
        .iter()
        .map(|(name, id, _)| (*id, name.clone()))
        .collect();
    let current_step = Arc::new(Mutex::new(0usize));
    let events = Arc::new(Mutex::new(Vec::new()));
    {
        let step = current_step.clone();
        let sink = events.clone();
        let labels: BTreeMap<ElementId, String> = replay
            .doc_labels()
            .into_iter()
            .collect();
        replay.runtime.on_any(move |event| {
            let record = EventRecord {
                step: step.lock().map(|s| *s).unwrap_or_default(),
                kind: event.kind.name().to_string(),
                list: names.get(&event.controller).cloned().unwrap_or_default(),
                item: labels.get(&event.element).cloned().unwrap_or_default(),
            };
            if let Ok(mut events) = sink.lock() {
                events.push(record);
            }
        });
    }

    for (index, step) in scenario.steps.iter().enumerate() {
        if let Ok(mut current) = current_step.lock() {
            *current = index;
        }
        replay
            .apply(step)
            .with_context(|| format!("Step {index} ({step:?}) failed"))?;
    }
    replay.runtime.cancel(&mut replay.doc);

    let mut report = ReplayReport {
        events: events.lock().map(|e| e.clone()).unwrap_or_default(),
        ..Default::default()
    };
    for (name, id, container) in &replay.lists {
        let items = replay
            .runtime
            .items(&replay.doc, *id)?
            .into_iter()
            .map(|item| replay.doc.label(item).unwrap_or("?").to_string())
            .collect();
        report.lists.insert(name.clone(), items);
        if replay.doc.scroll_state(*container).is_some() {
            report
                .scroll
                .insert(name.clone(), replay.doc.scroll_top(*container));
        }
    }
    Ok(report)
}

impl Replay {
    fn build(scenario: &Scenario) -> Result<Self> {
        let viewport = Size::new(scenario.viewport.width, scenario.viewport.height);
        let mut doc = Document::new(viewport)?;
        let root = doc.root();
        let row = doc.create(root, LayoutStyle::flex_row())?;

        let mut runtime = SortableRuntime::new();
        let mut lists = Vec::with_capacity(scenario.lists.len());
        for list in &scenario.lists {
            let container = doc.create(row, list_style(list))?;
            doc.set_label(container, list.name.clone());
            for item in &list.items {
                let style = LayoutStyle::fixed_size(list.item_width, list.item_height);
                let element = doc.create(container, style)?;
                doc.set_label(element, item.clone());
            }
            let id = runtime.register(&mut doc, container, list.sortable.clone());
            lists.push((list.name.clone(), id, container));
        }

        tracing::debug!(lists = lists.len(), "scenario document built");
        Ok(Self {
            doc,
            runtime,
            lists,
            now: Instant::now(),
        })
    }

    fn doc_labels(&self) -> Vec<(ElementId, String)> {
        self.lists
            .iter()
            .flat_map(|(_, _, container)| self.doc.children(*container).to_vec())
            .filter_map(|item| Some((item, self.doc.label(item)?.to_string())))
            .collect()
    }

    fn apply(&mut self, step: &Step) -> Result<()> {
        tracing::debug!(?step, "replaying step");
        match step {
            Step::Down {
                x,
                y,
                target,
                button,
            } => {
                let target = match target {
                    Some(label) => self
                        .doc
                        .find_by_label(label)
                        .with_context(|| format!("No element labelled `{label}`"))?,
                    None => self.target_at(*x, *y),
                };
                let mut event = PointerEvent::down(target, *x, *y).with_button(*button);
                let armed = self.runtime.pointer_down(&mut self.doc, &mut event, self.now);
                tracing::info!(armed, "pointer down");
            }
            Step::Move { x, y } => {
                let event = PointerEvent::moved(self.target_at(*x, *y), *x, *y);
                self.runtime.pointer_move(&mut self.doc, &event, self.now);
            }
            Step::Up { x, y } => {
                let event = PointerEvent::up(self.target_at(*x, *y), *x, *y);
                self.runtime.pointer_up(&mut self.doc, &event);
            }
            Step::Wait { ms } => {
                let mut remaining = Duration::from_millis(*ms);
                while !remaining.is_zero() {
                    let dt = remaining.min(POLL_INTERVAL);
                    remaining -= dt;
                    self.now += dt;
                    self.doc.advance(dt);
                    if let Some(scrolled) = self.runtime.tick(&mut self.doc, self.now) {
                        tracing::debug!(
                            container = self.doc.label(scrolled).unwrap_or("?"),
                            offset = self.doc.scroll_top(scrolled),
                            "auto-scrolled"
                        );
                    }
                }
            }
        }
        Ok(())
    }

    fn target_at(&self, x: f32, y: f32) -> ElementId {
        self.doc
            .element_from_point(blinc_core::Point::new(x, y))
            .unwrap_or_else(|| self.doc.root())
    }
}

fn list_style(list: &ListConfig) -> Style {
    match list.layout {
        ListLayout::Column => Style {
            size: blinc_layout::style::Size {
                width: list.width.map_or(Dimension::Auto, Dimension::Length),
                height: list.height.map_or(Dimension::Auto, Dimension::Length),
            },
            ..LayoutStyle::flex_column()
        },
        ListLayout::RowWrap => LayoutStyle::flex_row_wrap(list.width.unwrap_or_default()),
        ListLayout::Scroll => LayoutStyle::scroll_column(
            list.width.unwrap_or_default(),
            list.height.unwrap_or_default(),
        ),
    }
}
