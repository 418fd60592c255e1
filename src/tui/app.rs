use anyhow::Error;
use std::time::{Duration, Instant};

use crate::category::{choose_category, Category, CATEGORIES};
use crate::data::{free_models_sorted, ModelRecord};
use crate::enrichments::Enrichments;
use crate::render::{self, Card};

/// Placeholder cards drawn while a fetch is outstanding.
pub const SKELETON_CARDS: usize = 6;

const COUNT_ANIMATION: Duration = Duration::from_millis(700);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Filters,
    Cards,
}

#[derive(Debug)]
pub enum Message {
    Quit,
    NextFilter,
    PrevFilter,
    NextCard,
    PrevCard,
    SwitchFocus,
    Refresh,
    // Handled in the main loop
    OpenLink,
    CopyModelId,
}

/// Interpolates the displayed counter toward a target over a fixed window
/// of monotonic time. Only the settled value is meaningful; intermediate
/// frames are cosmetic.
#[derive(Debug, Clone, Copy)]
pub struct CountAnimation {
    start: i64,
    target: i64,
    started_at: Instant,
}

impl CountAnimation {
    pub fn new(start: i64, target: i64, started_at: Instant) -> Self {
        Self {
            start,
            target,
            started_at,
        }
    }

    pub fn value_at(&self, now: Instant) -> i64 {
        let elapsed = now.saturating_duration_since(self.started_at);
        let progress = (elapsed.as_secs_f64() / COUNT_ANIMATION.as_secs_f64()).min(1.0);
        self.start + ((self.target - self.start) as f64 * progress).round() as i64
    }

    pub fn is_settled(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= COUNT_ANIMATION
    }
}

/// Owns the fetch lifecycle and the rendered view. The free-model dataset
/// is replaced wholesale on every fetch; the selected filter survives
/// dataset replacement for the life of the session.
pub struct App {
    pub enrichments: Enrichments,
    pub state: FetchState,
    pub focus: Focus,
    pub status: String,
    /// 0 = "All", 1..=5 = CATEGORIES[n - 1]
    pub selected_filter: usize,
    pub selected_card: usize,
    pub last_error: Option<String>,
    all_models: Vec<ModelRecord>,
    cards: Vec<Card>,
    displayed_count: i64,
    animation: Option<CountAnimation>,
    generation: u64,
}

impl App {
    pub fn new(enrichments: Enrichments) -> Self {
        Self {
            enrichments,
            state: FetchState::Idle,
            focus: Focus::Filters,
            status: String::new(),
            selected_filter: 0,
            selected_card: 0,
            last_error: None,
            all_models: Vec::new(),
            cards: Vec::new(),
            displayed_count: 0,
            animation: None,
            generation: 0,
        }
    }

    pub fn filter_list_len(&self) -> usize {
        CATEGORIES.len() + 1
    }

    pub fn selected_category(&self) -> Option<Category> {
        if self.selected_filter == 0 {
            None
        } else {
            Some(CATEGORIES[self.selected_filter - 1])
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.cards.get(self.selected_card)
    }

    pub fn dataset_len(&self) -> usize {
        self.all_models.len()
    }

    pub fn displayed_count_text(&self) -> String {
        self.displayed_count.to_string()
    }

    /// Enters Loading and hands back the generation token the eventual
    /// result must present. A fetch finishing with an older token is stale
    /// and gets dropped.
    pub fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.state = FetchState::Loading;
        self.status = render::fetching_status().to_string();
        self.cards.clear();
        self.selected_card = 0;
        self.generation
    }

    pub fn finish_fetch(&mut self, generation: u64, result: Result<Vec<ModelRecord>, Error>) {
        if generation != self.generation {
            return;
        }

        match result {
            Ok(records) => {
                self.all_models = free_models_sorted(records);
                self.state = FetchState::Ready;
                self.last_error = None;
                self.animate_count_to(self.all_models.len() as i64);
                self.apply_filter();
            }
            Err(err) => {
                self.all_models.clear();
                self.cards.clear();
                self.state = FetchState::Failed;
                self.status = render::failure_status().to_string();
                self.last_error = Some(format!("{:#}", err));
                self.animation = None;
                self.displayed_count = 0;
            }
        }
    }

    /// Re-renders the grid from the already-fetched dataset. Synchronous
    /// and total: the card list is rebuilt from scratch every time.
    pub fn apply_filter(&mut self) {
        let cards = match self.selected_category() {
            None => render::build_cards(&self.all_models, &self.enrichments),
            Some(category) => {
                let subset: Vec<ModelRecord> = self
                    .all_models
                    .iter()
                    .filter(|m| choose_category(m) == category)
                    .cloned()
                    .collect();
                render::build_cards(&subset, &self.enrichments)
            }
        };

        self.status = if cards.is_empty() {
            render::empty_status().to_string()
        } else {
            render::status_line(cards.len())
        };
        self.cards = cards;
        self.selected_card = 0;
    }

    /// Starts the counter toward `target` from whatever value is showing
    /// right now. A new target replaces any in-flight animation, so the
    /// two never fight over the display.
    pub fn animate_count_to(&mut self, target: i64) {
        let now = Instant::now();
        let start = match self.animation.take() {
            Some(anim) => anim.value_at(now),
            None => self.displayed_count,
        };
        self.displayed_count = start;
        if start != target {
            self.animation = Some(CountAnimation::new(start, target, now));
        }
    }

    /// Advances the counter animation; called once per event-loop tick.
    pub fn tick(&mut self, now: Instant) {
        if let Some(anim) = self.animation {
            self.displayed_count = anim.value_at(now);
            if anim.is_settled(now) {
                self.animation = None;
            }
        }
    }

    /// Returns false when the app should exit.
    pub fn update(&mut self, msg: Message) -> bool {
        match msg {
            Message::Quit => return false,
            Message::NextFilter => {
                if self.selected_filter + 1 < self.filter_list_len() {
                    self.selected_filter += 1;
                    self.apply_filter();
                }
            }
            Message::PrevFilter => {
                if self.selected_filter > 0 {
                    self.selected_filter -= 1;
                    self.apply_filter();
                }
            }
            Message::NextCard => {
                if self.selected_card + 1 < self.cards.len() {
                    self.selected_card += 1;
                }
            }
            Message::PrevCard => {
                if self.selected_card > 0 {
                    self.selected_card -= 1;
                }
            }
            Message::SwitchFocus => {
                self.focus = match self.focus {
                    Focus::Filters => Focus::Cards,
                    Focus::Cards => Focus::Filters,
                };
            }
            // Refresh spawns a fetch in the main loop; open/copy are
            // handled there as well.
            Message::Refresh | Message::OpenLink | Message::CopyModelId => {}
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Pricing;
    use serde_json::json;

    fn free(id: &str, name: &str, context: u64) -> ModelRecord {
        priced(id, name, context, "0.000000", "0")
    }

    fn priced(id: &str, name: &str, context: u64, prompt: &str, completion: &str) -> ModelRecord {
        ModelRecord {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            context_length: Some(context),
            pricing: Some(Pricing {
                prompt: json!(prompt),
                completion: json!(completion),
            }),
        }
    }

    fn app() -> App {
        App::new(Enrichments::builtin())
    }

    fn settle(app: &mut App) {
        app.tick(Instant::now() + COUNT_ANIMATION + Duration::from_millis(50));
    }

    #[test]
    fn test_successful_fetch_filters_and_sorts() {
        let mut app = app();
        let generation = app.begin_fetch();
        assert_eq!(app.state, FetchState::Loading);
        assert_eq!(app.status, "Fetching live models from OpenRouter...");

        let models = vec![
            free("vendor/assistant-lite", "Assistant Lite", 16_000),
            priced("vendor/coder-pro", "Coder Pro", 128_000, "0.01", "0.01"),
            free("vendor/code-helper", "Code Helper", 64_000),
        ];
        app.finish_fetch(generation, Ok(models));

        assert_eq!(app.state, FetchState::Ready);
        assert_eq!(app.cards().len(), 2);
        assert_eq!(app.status, "Showing 2 free models.");

        let ids: Vec<&str> = app.cards().iter().map(|c| c.id_line.as_str()).collect();
        assert_eq!(ids, vec!["vendor/code-helper", "vendor/assistant-lite"]);

        settle(&mut app);
        assert_eq!(app.displayed_count_text(), "2");
    }

    #[test]
    fn test_filter_selection_narrows_cards() {
        let mut app = app();
        let generation = app.begin_fetch();
        app.finish_fetch(
            generation,
            Ok(vec![
                free("vendor/assistant-base", "Assistant Base", 32_000),
                free("vendor/coder-mini", "Coder Mini", 64_000),
            ]),
        );

        // Move selection to "Coding" (index 2 in the filter list).
        app.update(Message::NextFilter);
        app.update(Message::NextFilter);
        assert_eq!(app.selected_category(), Some(Category::Coding));

        assert_eq!(app.cards().len(), 1);
        assert_eq!(app.cards()[0].category, Category::Coding);
        assert_eq!(app.status, "Showing 1 free models.");
    }

    #[test]
    fn test_failed_fetch_resets_view() {
        let mut app = app();
        let generation = app.begin_fetch();
        app.finish_fetch(generation, Err(anyhow::anyhow!("connection refused")));

        assert_eq!(app.state, FetchState::Failed);
        assert_eq!(
            app.status,
            "Couldn't load live models right now. Please refresh in a moment."
        );
        assert!(app.cards().is_empty());
        assert_eq!(app.displayed_count_text(), "0");
        assert!(app.last_error.as_deref().unwrap().contains("connection refused"));
    }

    #[test]
    fn test_empty_catalogue_is_not_a_failure() {
        let mut app = app();
        let generation = app.begin_fetch();
        app.finish_fetch(
            generation,
            Ok(vec![priced("vendor/paid", "Paid", 8_000, "1", "1")]),
        );

        assert_eq!(app.state, FetchState::Ready);
        assert!(app.cards().is_empty());
        assert_eq!(
            app.status,
            "No models match this filter yet. Try another use case."
        );
    }

    #[test]
    fn test_stale_fetch_result_is_discarded() {
        let mut app = app();
        let stale = app.begin_fetch();
        let current = app.begin_fetch();

        app.finish_fetch(stale, Ok(vec![free("old/model", "Old", 1_000)]));
        assert_eq!(app.state, FetchState::Loading);
        assert_eq!(app.dataset_len(), 0);

        app.finish_fetch(current, Ok(vec![free("new/model-chat", "New", 2_000)]));
        assert_eq!(app.state, FetchState::Ready);
        assert_eq!(app.dataset_len(), 1);
        assert_eq!(app.cards()[0].id_line, "new/model-chat");
    }

    #[test]
    fn test_filter_survives_refetch() {
        let mut app = app();
        let generation = app.begin_fetch();
        app.finish_fetch(generation, Ok(vec![free("vendor/coder-one", "One", 4_000)]));

        app.update(Message::NextFilter);
        app.update(Message::NextFilter);
        assert_eq!(app.selected_category(), Some(Category::Coding));

        let generation = app.begin_fetch();
        app.finish_fetch(generation, Ok(vec![free("vendor/coder-two", "Two", 4_000)]));

        assert_eq!(app.selected_category(), Some(Category::Coding));
        assert_eq!(app.cards().len(), 1);
        assert_eq!(app.cards()[0].id_line, "vendor/coder-two");
    }

    #[test]
    fn test_count_animation_interpolates_and_settles() {
        let t0 = Instant::now();
        let anim = CountAnimation::new(0, 10, t0);

        assert_eq!(anim.value_at(t0), 0);
        assert_eq!(anim.value_at(t0 + Duration::from_millis(350)), 5);
        assert_eq!(anim.value_at(t0 + COUNT_ANIMATION), 10);
        // Clamped past the window.
        assert_eq!(anim.value_at(t0 + Duration::from_secs(5)), 10);
        assert!(anim.is_settled(t0 + COUNT_ANIMATION));
        assert!(!anim.is_settled(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn test_new_target_supersedes_running_animation() {
        let mut app = app();
        app.animate_count_to(10);
        app.animate_count_to(3);

        settle(&mut app);
        assert_eq!(app.displayed_count_text(), "3");
        assert!(app.animation.is_none());
    }

    #[test]
    fn test_navigation_bounds() {
        let mut app = app();
        assert!(app.update(Message::PrevFilter));
        assert_eq!(app.selected_filter, 0);

        for _ in 0..10 {
            app.update(Message::NextFilter);
        }
        assert_eq!(app.selected_filter, app.filter_list_len() - 1);

        assert!(!app.update(Message::Quit));
    }
}
