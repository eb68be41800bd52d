use kurbo::Vec2;
use rand::rngs::StdRng;

use crate::config::Config;
use crate::input::{InputMapper, InputOutcome, PointerEvent, PointerKind, SurfaceScale};
use crate::ir::{CanvasSize, WordItem};
use crate::layout::text::MetricsProvider;
use crate::layout::{PlacedWord, WordLayout, default_metrics, layout_rng, place};
use crate::render::{ControlAction, ControlLayout, Surface, draw, draw_controls};
use crate::resize::ResizeAdapter;
use crate::viewport::{Viewport, ViewportState};

type ClickHandler = Box<dyn FnMut(&str, f64)>;

/// Interactive word cloud.
///
/// Owns the laid-out words, the viewport and the pointer state. The layout is
/// replaced wholesale whenever the items or the canvas size change; the
/// viewport survives those recomputations and only resets on request.
pub struct WordCloud {
    config: Config,
    items: Vec<WordItem>,
    resize: ResizeAdapter,
    size: CanvasSize,
    layout: WordLayout,
    viewport: Viewport,
    input: InputMapper,
    /// Control button held down since the last press.
    control_press: Option<ControlAction>,
    metrics: Box<dyn MetricsProvider>,
    rng: StdRng,
    on_word_click: Option<ClickHandler>,
}

impl WordCloud {
    /// Creates a cloud at its nominal `width` x `height` and lays it out.
    pub fn new(items: Vec<WordItem>, width: f64, height: f64) -> Self {
        let mut config = Config::default();
        config.render.width = width;
        config.render.height = height;
        Self::with_config(items, config)
    }

    pub fn with_config(items: Vec<WordItem>, config: Config) -> Self {
        let metrics = default_metrics(&config.theme, &config.layout);
        Self::with_metrics(items, config, metrics)
    }

    pub fn with_metrics(
        items: Vec<WordItem>,
        config: Config,
        metrics: Box<dyn MetricsProvider>,
    ) -> Self {
        let resize = ResizeAdapter::from_config(&config.render);
        let size = resize.fit(config.render.width);
        let viewport = Viewport::new(config.viewport);
        let rng = layout_rng(&config.layout);
        let mut cloud = Self {
            config,
            items,
            resize,
            size,
            layout: WordLayout::empty(size),
            viewport,
            input: InputMapper::default(),
            control_press: None,
            metrics,
            rng,
            on_word_click: None,
        };
        cloud.relayout();
        cloud
    }

    pub fn on_word_click(mut self, handler: impl FnMut(&str, f64) + 'static) -> Self {
        self.on_word_click = Some(Box::new(handler));
        self
    }

    pub fn set_click_handler(&mut self, handler: impl FnMut(&str, f64) + 'static) {
        self.on_word_click = Some(Box::new(handler));
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn items(&self) -> &[WordItem] {
        &self.items
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    pub fn layout(&self) -> &WordLayout {
        &self.layout
    }

    pub fn words(&self) -> &[PlacedWord] {
        &self.layout.words
    }

    pub fn viewport(&self) -> ViewportState {
        self.viewport.state()
    }

    pub fn hovered(&self) -> Option<&PlacedWord> {
        self.input.hovered().and_then(|rank| self.layout.words.get(rank))
    }

    pub fn zoom_percent(&self) -> u32 {
        self.viewport.zoom_percent()
    }

    pub fn set_surface_scale(&mut self, scale: SurfaceScale) {
        self.input.set_scale(scale);
    }

    /// Replaces the items and recomputes the layout.
    pub fn set_items(&mut self, items: Vec<WordItem>) {
        self.items = items;
        self.relayout();
    }

    /// Returns `true` when the canvas size changed and the layout was redone.
    pub fn resize(&mut self, container_width: f64) -> bool {
        let size = self.resize.fit(container_width);
        if size == self.size {
            return false;
        }
        tracing::debug!(width = size.width, height = size.height, "canvas resized");
        self.size = size;
        self.relayout();
        true
    }

    /// Returns `true` when a redraw is needed.
    pub fn apply(&mut self, action: ControlAction) -> bool {
        match action {
            ControlAction::ZoomIn => self.viewport.zoom_in(),
            ControlAction::ZoomOut => self.viewport.zoom_out(),
            ControlAction::Reset => {
                let changed = self.viewport.state() != ViewportState::default();
                self.viewport.reset();
                changed
            }
        }
    }

    pub fn zoom_in(&mut self) -> bool {
        self.apply(ControlAction::ZoomIn)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.apply(ControlAction::ZoomOut)
    }

    pub fn reset_view(&mut self) -> bool {
        self.apply(ControlAction::Reset)
    }

    pub fn set_pan(&mut self, pan: Vec2) {
        self.viewport.set_pan(pan);
    }

    /// Feeds a pointer event through the input mapper. A non-drag click on a
    /// word invokes the click handler before this returns. When controls are
    /// shown, presses on them are consumed and never reach the words.
    pub fn pointer(&mut self, event: PointerEvent) -> InputOutcome {
        if let Some(outcome) = self.control_pointer(event) {
            return outcome;
        }
        let outcome = self
            .input
            .handle(event, &self.layout.words, &mut self.viewport);
        if let Some(rank) = outcome.clicked
            && let Some(word) = self.layout.words.get(rank)
        {
            tracing::debug!(word = %word.text, value = word.value, "word clicked");
            if let Some(handler) = self.on_word_click.as_mut() {
                handler(&word.text, word.value);
            }
        }
        outcome
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        draw(
            surface,
            &self.layout,
            self.viewport.state(),
            self.input.hovered(),
            &self.config.theme,
        );
        if self.config.render.show_controls {
            draw_controls(surface, self.size, self.zoom_percent(), &self.config.theme);
        }
    }

    /// A control fires when press and release land on the same button.
    fn control_pointer(&mut self, event: PointerEvent) -> Option<InputOutcome> {
        if !self.config.render.show_controls {
            return None;
        }
        let screen = self.input.scale().apply(event.position);
        let controls = ControlLayout::new(self.size);
        match event.kind {
            PointerKind::Down if controls.covers(screen) => {
                self.control_press = controls.hit(screen);
                Some(InputOutcome::default())
            }
            PointerKind::Up => {
                let action = self.control_press.take()?;
                let redraw = controls.hit(screen) == Some(action) && {
                    tracing::debug!(?action, "zoom control pressed");
                    self.apply(action)
                };
                Some(InputOutcome {
                    redraw,
                    clicked: None,
                })
            }
            PointerKind::Move if self.control_press.is_some() => Some(InputOutcome::default()),
            PointerKind::Leave => {
                self.control_press = None;
                None
            }
            _ => None,
        }
    }

    fn relayout(&mut self) {
        self.layout = place(
            &self.items,
            self.size,
            self.metrics.as_ref(),
            &self.config.theme,
            &self.config.layout,
            &mut self.rng,
        );
        self.input.clear_hover();
    }
}

impl std::fmt::Debug for WordCloud {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordCloud")
            .field("items", &self.items.len())
            .field("size", &self.size)
            .field("viewport", &self.viewport.state())
            .field("hovered", &self.input.hovered())
            .finish_non_exhaustive()
    }
}
