//! Scroll session simulation
//!
//! Mounts every section of a page against an [`ObserverHost`] and scrolls
//! the viewport from the top of the page to the bottom at a constant speed,
//! recording each phase change with the time and scroll position it
//! happened at.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use reveal_animation::{secs_to_ms, step_secs_to_ms};
use reveal_core::{ElementId, ObserverHost, Rect};
use reveal_motion::{reveal, MountedReveal, MountedRevealGroup, RevealGroup, RevealPhase};
use serde::Serialize;

use crate::page::{PageConfig, SectionConfig};

/// Frames simulated before giving up on a page that never settles
const MAX_FRAMES: usize = 1_000_000;

/// How the simulated user scrolls
#[derive(Debug, Clone, Copy)]
pub struct SimulationOptions {
    /// Scroll speed in px per second
    pub scroll_speed: f32,
    pub fps: u32,
    /// Override the page's viewport height
    pub viewport_height: Option<f32>,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            scroll_speed: 600.0,
            fps: 60,
            viewport_height: None,
        }
    }
}

/// One recorded phase change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEvent {
    pub time_ms: f32,
    pub scroll_y: f32,
    pub section: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<usize>,
    pub phase: &'static str,
}

/// Result of a simulated session
#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub events: Vec<TimelineEvent>,
    pub frames: usize,
    pub duration_ms: f32,
    /// Sections (or items) never revealed, as `name` or `name[i]`
    pub never_revealed: Vec<String>,
}

type EventLog = Rc<RefCell<Vec<(usize, Option<usize>, RevealPhase)>>>;

enum MountedSection {
    Single(MountedReveal<()>),
    Group(MountedRevealGroup<()>),
}

impl MountedSection {
    fn tick(&mut self, dt_ms: f32) -> bool {
        match self {
            MountedSection::Single(section) => section.tick(dt_ms),
            MountedSection::Group(group) => group.tick(dt_ms),
        }
    }

    fn phases(&self) -> Vec<RevealPhase> {
        match self {
            MountedSection::Single(section) => vec![section.phase()],
            MountedSection::Group(group) => group.phases(),
        }
    }
}

fn mount_section(
    page: &PageConfig,
    index: usize,
    section: &SectionConfig,
    host: &ObserverHost,
    layout: &mut HashMap<ElementId, Rect>,
    next_id: &mut u64,
    log: &EventLog,
) -> MountedSection {
    let config = page.observer_for(section);
    let width = page.viewport.width;
    let mut allocate = |rect: Rect| {
        let id = ElementId::new(*next_id);
        *next_id += 1;
        layout.insert(id, rect);
        id
    };

    match section.items {
        Some(count) if count > 0 => {
            let row = section.height / count as f32;
            let items: Vec<_> = (0..count)
                .map(|i| {
                    let rect = Rect::new(0.0, section.top + row * i as f32, width, row);
                    (allocate(rect), ())
                })
                .collect();

            let log = Rc::clone(log);
            let mut group = RevealGroup::new(items, &section.variant)
                .config(config)
                .step_ms(step_secs_to_ms(section.stagger))
                .on_item_phase_change(move |item, phase| {
                    log.borrow_mut().push((index, Some(item), phase))
                });
            if let Some(delay) = section.delay {
                group = group.delay_ms(secs_to_ms(delay));
            }
            if let Some(duration) = section.duration {
                group = group.duration_ms(secs_to_ms(duration));
            }
            MountedSection::Group(group.mount(host))
        }
        _ => {
            let element = allocate(Rect::new(0.0, section.top, width, section.height));
            let log = Rc::clone(log);
            let mut single = reveal((), &section.variant)
                .config(config)
                .on_phase_change(move |phase| log.borrow_mut().push((index, None, phase)));
            if let Some(delay) = section.delay {
                single = single.delay_ms(secs_to_ms(delay));
            }
            if let Some(duration) = section.duration {
                single = single.duration_ms(secs_to_ms(duration));
            }
            MountedSection::Single(single.mount(host, element))
        }
    }
}

/// Scroll through a page and record every phase change
pub fn simulate(page: &PageConfig, options: SimulationOptions) -> SimulationReport {
    let host = ObserverHost::new();
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    let mut layout = HashMap::new();
    let mut next_id = 1;

    let mut sections: Vec<MountedSection> = page
        .sections
        .iter()
        .enumerate()
        .map(|(i, section)| {
            mount_section(page, i, section, &host, &mut layout, &mut next_id, &log)
        })
        .collect();

    let viewport_height = options.viewport_height.unwrap_or(page.viewport.height);
    let max_scroll = (page.page_height() - viewport_height).max(0.0);
    let dt_ms = 1000.0 / options.fps.max(1) as f32;
    let step_px = options.scroll_speed.max(0.0) * dt_ms / 1000.0;

    tracing::info!(
        sections = sections.len(),
        max_scroll,
        dt_ms,
        "simulating scroll session"
    );

    if step_px <= 0.0 && max_scroll > 0.0 {
        tracing::warn!("scroll speed is zero, only the top of the page is simulated");
    }

    let mut events = Vec::new();
    let mut scroll_y = 0.0_f32;
    let mut time_ms = 0.0_f32;
    let mut frames = 0;

    while frames < MAX_FRAMES {
        let viewport = Rect::new(0.0, scroll_y, page.viewport.width, viewport_height);
        host.evaluate(viewport, &layout);

        let mut active = false;
        for section in &mut sections {
            active |= section.tick(dt_ms);
        }

        for (index, item, phase) in log.borrow_mut().drain(..) {
            events.push(TimelineEvent {
                time_ms,
                scroll_y,
                section: page.sections[index].name.clone(),
                item,
                phase: phase.as_str(),
            });
        }

        frames += 1;
        time_ms += dt_ms;

        let stalled = scroll_y >= max_scroll || step_px <= 0.0;
        if stalled && !active {
            break;
        }
        scroll_y = (scroll_y + step_px).min(max_scroll);
    }

    let never_revealed = sections
        .iter()
        .zip(&page.sections)
        .flat_map(|(mounted, config)| {
            let grouped = matches!(mounted, MountedSection::Group(_));
            mounted
                .phases()
                .into_iter()
                .enumerate()
                .filter(|(_, phase)| phase.is_hidden())
                .map(move |(i, _)| {
                    if grouped {
                        format!("{}[{}]", config.name, i)
                    } else {
                        config.name.clone()
                    }
                })
        })
        .collect();

    SimulationReport {
        events,
        frames,
        duration_ms: time_ms,
        never_revealed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(src: &str) -> PageConfig {
        PageConfig::parse(src).unwrap()
    }

    #[test]
    fn test_sections_reveal_in_scroll_order() {
        let page = page(
            r#"
            [[section]]
            name = "hero"
            top = 0.0
            height = 600.0

            [[section]]
            name = "about"
            variant = "fade-left"
            top = 1500.0
            height = 400.0

            [[section]]
            name = "contact"
            variant = "slide-up"
            top = 3000.0
            height = 500.0
            "#,
        );

        let report = simulate(&page, SimulationOptions::default());
        let revealing: Vec<_> = report
            .events
            .iter()
            .filter(|e| e.phase == "revealing")
            .map(|e| e.section.as_str())
            .collect();

        assert_eq!(revealing, vec!["hero", "about", "contact"]);
        assert!(report.never_revealed.is_empty());

        let hero = &report.events[0];
        assert_eq!(hero.time_ms, 0.0);
        assert_eq!(hero.scroll_y, 0.0);

        let about = report
            .events
            .iter()
            .find(|e| e.section == "about" && e.phase == "revealing")
            .unwrap();
        assert!(about.scroll_y > 700.0);
    }

    #[test]
    fn test_group_items_are_staggered() {
        let page = page(
            r#"
            [[section]]
            name = "services"
            variant = "scale-in"
            top = 0.0
            height = 300.0
            items = 3
            stagger = 0.15
            "#,
        );

        let report = simulate(&page, SimulationOptions::default());
        let items: Vec<_> = report
            .events
            .iter()
            .filter(|e| e.phase == "revealing")
            .map(|e| e.item)
            .collect();
        assert_eq!(items, vec![Some(0), Some(1), Some(2)]);

        let revealed: Vec<f32> = report
            .events
            .iter()
            .filter(|e| e.phase == "revealed")
            .map(|e| e.time_ms)
            .collect();
        assert_eq!(revealed.len(), 3);
        assert!(revealed.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_unreachable_section_reported() {
        let mut page = page(
            r#"
            [[section]]
            name = "banner"
            top = 0.0
            height = 100.0
            "#,
        );

        let report = simulate(&page, SimulationOptions::default());
        assert!(report.never_revealed.is_empty());

        page.sections[0].top = -500.0;
        let report = simulate(&page, SimulationOptions::default());
        assert_eq!(report.never_revealed, vec!["banner".to_string()]);
        assert!(report.events.is_empty());
    }

    #[test]
    fn test_repeatable_section_hides_again() {
        let page = page(
            r#"
            [viewport]
            height = 400.0

            [[section]]
            name = "banner"
            top = 0.0
            height = 200.0
            observer = { once = false }

            [[section]]
            name = "footer"
            top = 2000.0
            height = 200.0
            "#,
        );

        let options = SimulationOptions {
            scroll_speed: 100.0,
            ..SimulationOptions::default()
        };
        let report = simulate(&page, options);
        let banner: Vec<_> = report
            .events
            .iter()
            .filter(|e| e.section == "banner")
            .map(|e| e.phase)
            .collect();
        assert_eq!(banner, vec!["revealing", "revealed", "hidden"]);
    }

    #[test]
    fn test_bundled_home_page_fully_reveals() {
        let page = page(include_str!("../pages/home.toml"));
        assert!(page.problems().is_empty());

        let report = simulate(&page, SimulationOptions::default());
        assert!(report.never_revealed.is_empty(), "{:?}", report.never_revealed);

        let revealed = report.events.iter().filter(|e| e.phase == "revealed").count();
        // hero, about, projects, contact plus 6 services and 4 products
        assert_eq!(revealed, 14);
    }
}
