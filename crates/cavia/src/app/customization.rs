use std::time::Duration;

use engine::{
    CursorHint, DrawList, InputEvent, Key, Rect, Rgba, Scene, SceneCommand, SceneKey, Vec2,
    Viewport,
};
use tracing::{debug, info, warn};

use super::colors::{
    load_colors, palette_color_name, save_colors, CaviaColors, ColorPart, CssColor, SharedStore,
    PALETTE,
};
use super::gameplay::draw_cavia;

const BACKGROUND: Rgba = [255, 248, 220, 255];
const ROW_HIGHLIGHT: Rgba = [255, 182, 193, 120];
const SWATCH_BORDER: Rgba = [0, 0, 0, 90];
const SWATCH_ACTIVE_BORDER: Rgba = [0, 0, 0, 255];
const START_BUTTON: Rgba = [255, 105, 180, 255];
const START_BUTTON_BORDER: Rgba = [139, 69, 19, 255];

const PREVIEW_CENTER: Vec2 = Vec2 { x: 220.0, y: 260.0 };
const PREVIEW_SCALE: f32 = 1.5;
const PREVIEW_BOUNCE_STEP: f32 = 0.5;
const PREVIEW_BOUNCE_LIMIT: f32 = 5.0;

const SWATCH_ORIGIN: Vec2 = Vec2 { x: 420.0, y: 110.0 };
const SWATCH_SIZE: f32 = 35.0;
const SWATCH_SPACING_X: f32 = 45.0;
const SWATCH_SPACING_Y: f32 = 70.0;
const START_BUTTON_RECT: Rect = Rect::new(300.0, 500.0, 200.0, 60.0);

pub(crate) struct CustomizationScene {
    store: SharedStore,
    colors: CaviaColors,
    selected_part: usize,
    bounce_offset: f32,
    bounce_direction: f32,
    game_scene: SceneKey,
}

impl CustomizationScene {
    pub(crate) fn new(store: SharedStore, game_scene: SceneKey) -> Self {
        Self {
            store,
            colors: CaviaColors::default(),
            selected_part: 0,
            bounce_offset: 0.0,
            bounce_direction: 1.0,
            game_scene,
        }
    }

    #[cfg(test)]
    pub(crate) fn colors(&self) -> &CaviaColors {
        &self.colors
    }

    pub(crate) fn selected_part(&self) -> ColorPart {
        ColorPart::ALL[self.selected_part % ColorPart::ALL.len()]
    }

    fn select_part_step(&mut self, forward: bool) {
        let count = ColorPart::ALL.len();
        self.selected_part = if forward {
            (self.selected_part + 1) % count
        } else {
            (self.selected_part + count - 1) % count
        };
    }

    fn cycle_color(&mut self, forward: bool) {
        let part = self.selected_part();
        let count = PALETTE.len();
        let next = match (self.colors.palette_index(part), forward) {
            (Some(index), true) => index + 1,
            (Some(index), false) => index + count - 1,
            (None, true) => 0,
            (None, false) => count - 1,
        };
        self.colors.set_palette(part, next);
        self.persist();
    }

    fn choose(&mut self, part: ColorPart, palette_index: usize) {
        if let Some(position) = ColorPart::ALL.iter().position(|entry| *entry == part) {
            self.selected_part = position;
        }
        self.colors.set_palette(part, palette_index);
        self.persist();
    }

    fn persist(&mut self) {
        let part = self.selected_part();
        match save_colors(&mut *self.store.borrow_mut(), &self.colors) {
            Ok(()) => debug!(
                part = part.label(),
                color = %self.colors.get(part),
                "colors_saved"
            ),
            Err(error) => warn!(error = %error, "colors_save_failed"),
        }
    }

    fn start_game(&self) -> SceneCommand {
        info!(body = %self.colors.body, "game_started");
        SceneCommand::HardResetTo(self.game_scene)
    }

    fn click(&mut self, point: Vec2) -> SceneCommand {
        if let Some((part, index)) = swatch_at(point) {
            self.choose(part, index);
            return SceneCommand::None;
        }
        if START_BUTTON_RECT.contains(point) {
            return self.start_game();
        }
        SceneCommand::None
    }
}

impl Scene for CustomizationScene {
    fn load(&mut self) {
        self.colors = load_colors(&*self.store.borrow());
        self.selected_part = 0;
        self.bounce_offset = 0.0;
        self.bounce_direction = 1.0;
        info!("customization_scene_loaded");
    }

    fn handle_input(&mut self, event: &InputEvent, _viewport: Viewport) -> SceneCommand {
        match *event {
            InputEvent::KeyDown(Key::ArrowUp | Key::W) => self.select_part_step(false),
            InputEvent::KeyDown(Key::ArrowDown | Key::S) => self.select_part_step(true),
            InputEvent::KeyDown(Key::ArrowLeft | Key::A) => self.cycle_color(false),
            InputEvent::KeyDown(Key::ArrowRight | Key::D) => self.cycle_color(true),
            InputEvent::KeyDown(Key::Enter) => return self.start_game(),
            InputEvent::PointerDown(point) => return self.click(point),
            InputEvent::TouchStart {
                position,
                touch_count: 1,
            } => return self.click(position),
            _ => {}
        }
        SceneCommand::None
    }

    fn update(&mut self, _elapsed: Duration, _viewport: Viewport) -> SceneCommand {
        self.bounce_offset += self.bounce_direction * PREVIEW_BOUNCE_STEP;
        if self.bounce_offset > PREVIEW_BOUNCE_LIMIT || self.bounce_offset < -PREVIEW_BOUNCE_LIMIT {
            self.bounce_direction = -self.bounce_direction;
        }
        SceneCommand::None
    }

    fn render(&self, _viewport: Viewport, draw_list: &mut DrawList) {
        draw_list.clear(BACKGROUND);

        let selected = self.selected_part();
        for (row, part) in ColorPart::ALL.into_iter().enumerate() {
            if part == selected {
                let first = swatch_rect(row, 0);
                let last = swatch_rect(row, PALETTE.len() - 1);
                draw_list.fill_rect(
                    Rect::new(
                        first.x - 6.0,
                        first.y - 6.0,
                        last.right() - first.x + 12.0,
                        SWATCH_SIZE + 12.0,
                    ),
                    ROW_HIGHLIGHT,
                );
            }
            let active = self.colors.palette_index(part);
            for (col, raw) in PALETTE.into_iter().enumerate() {
                let rect = swatch_rect(row, col);
                if let Ok(color) = CssColor::parse(raw) {
                    draw_list.fill_rect(rect, color.rgba());
                }
                if active == Some(col) {
                    draw_list.stroke_rect(rect, 3.0, SWATCH_ACTIVE_BORDER);
                } else {
                    draw_list.stroke_rect(rect, 1.0, SWATCH_BORDER);
                }
            }
        }

        let preview = Vec2::new(PREVIEW_CENTER.x, PREVIEW_CENTER.y + self.bounce_offset);
        draw_cavia(draw_list, preview, &self.colors, PREVIEW_SCALE);

        draw_list.fill_rect(START_BUTTON_RECT, START_BUTTON);
        draw_list.stroke_rect(START_BUTTON_RECT, 3.0, START_BUTTON_BORDER);
    }

    fn unload(&mut self) {
        info!("customization_scene_unloaded");
    }

    fn cursor_hint(&self, pointer_px: Vec2, _viewport: Viewport) -> CursorHint {
        if swatch_at(pointer_px).is_some() || START_BUTTON_RECT.contains(pointer_px) {
            CursorHint::Pointer
        } else {
            CursorHint::Default
        }
    }

    fn title(&self) -> Option<String> {
        let part = self.selected_part();
        let color = self.colors.get(part);
        Some(format!(
            "Cavia Avonturen - Pas je cavia aan - {}: {} (Enter = start)",
            part.label(),
            palette_color_name(color.as_str())
        ))
    }
}

fn swatch_rect(row: usize, col: usize) -> Rect {
    Rect::new(
        SWATCH_ORIGIN.x + col as f32 * SWATCH_SPACING_X,
        SWATCH_ORIGIN.y + row as f32 * SWATCH_SPACING_Y,
        SWATCH_SIZE,
        SWATCH_SIZE,
    )
}

fn swatch_at(point: Vec2) -> Option<(ColorPart, usize)> {
    ColorPart::ALL
        .into_iter()
        .enumerate()
        .find_map(|(row, part)| {
            (0..PALETTE.len())
                .find(|col| swatch_rect(row, *col).contains(point))
                .map(|col| (part, col))
        })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use engine::MemoryStore;

    use super::super::colors::{load_colors, COLORS_STORAGE_KEY};
    use super::*;

    fn store() -> SharedStore {
        Rc::new(RefCell::new(MemoryStore::default()))
    }

    fn loaded_scene(store: &SharedStore) -> CustomizationScene {
        let mut scene = CustomizationScene::new(Rc::clone(store), SceneKey::B);
        scene.load();
        scene
    }

    fn key(scene: &mut CustomizationScene, key: Key) -> SceneCommand {
        scene.handle_input(&InputEvent::KeyDown(key), Viewport::default())
    }

    fn center(rect: Rect) -> Vec2 {
        Vec2::new(rect.x + rect.w / 2.0, rect.y + rect.h / 2.0)
    }

    #[test]
    fn arrow_keys_select_part_and_cycle_color() {
        let store = store();
        let mut scene = loaded_scene(&store);
        assert_eq!(scene.selected_part(), ColorPart::Body);

        key(&mut scene, Key::ArrowUp);
        assert_eq!(scene.selected_part(), ColorPart::Nose);
        key(&mut scene, Key::ArrowDown);
        key(&mut scene, Key::ArrowDown);
        assert_eq!(scene.selected_part(), ColorPart::Ears);

        key(&mut scene, Key::ArrowRight);
        assert_eq!(scene.colors().ears.as_str(), "#FF69B4");
        key(&mut scene, Key::ArrowLeft);
        key(&mut scene, Key::ArrowLeft);
        assert_eq!(scene.colors().ears.as_str(), "#D2B48C");
    }

    #[test]
    fn non_palette_color_cycles_from_the_palette_ends() {
        let store = store();
        let mut scene = loaded_scene(&store);
        key(&mut scene, Key::ArrowDown);
        key(&mut scene, Key::ArrowDown);
        assert_eq!(scene.selected_part(), ColorPart::Belly);

        key(&mut scene, Key::ArrowLeft);
        assert_eq!(scene.colors().belly.as_str(), "#90EE90");
    }

    #[test]
    fn every_change_is_saved() {
        let store = store();
        let mut scene = loaded_scene(&store);
        assert!(store.borrow().get(COLORS_STORAGE_KEY).expect("get").is_none());

        key(&mut scene, Key::ArrowRight);
        assert_eq!(load_colors(&*store.borrow()), *scene.colors());
        assert_eq!(scene.colors().body.as_str(), "#8B4513");
    }

    #[test]
    fn clicking_a_swatch_selects_part_and_color() {
        let store = store();
        let mut scene = loaded_scene(&store);
        let point = center(swatch_rect(3, 6));

        let command = scene.handle_input(&InputEvent::PointerDown(point), Viewport::default());
        assert_eq!(command, SceneCommand::None);
        assert_eq!(scene.selected_part(), ColorPart::Feet);
        assert_eq!(scene.colors().feet.as_str(), "#FFA500");
        assert_eq!(load_colors(&*store.borrow()).feet.as_str(), "#FFA500");
    }

    #[test]
    fn enter_and_start_button_hard_reset_the_game_scene() {
        let store = store();
        let mut scene = loaded_scene(&store);
        assert_eq!(
            key(&mut scene, Key::Enter),
            SceneCommand::HardResetTo(SceneKey::B)
        );
        let command = scene.handle_input(
            &InputEvent::TouchStart {
                position: center(START_BUTTON_RECT),
                touch_count: 1,
            },
            Viewport::default(),
        );
        assert_eq!(command, SceneCommand::HardResetTo(SceneKey::B));
    }

    #[test]
    fn load_restores_saved_colors() {
        let store = store();
        {
            let mut first = loaded_scene(&store);
            key(&mut first, Key::ArrowRight);
        }
        let second = loaded_scene(&store);
        assert_eq!(second.colors().body.as_str(), "#8B4513");
    }

    #[test]
    fn preview_bounce_turns_past_the_limit() {
        let store = store();
        let mut scene = loaded_scene(&store);
        for _ in 0..11 {
            scene.update(Duration::from_millis(16), Viewport::default());
        }
        assert_eq!(scene.bounce_offset, 5.5);
        assert_eq!(scene.bounce_direction, -1.0);
        scene.update(Duration::from_millis(16), Viewport::default());
        assert_eq!(scene.bounce_offset, 5.0);
    }

    #[test]
    fn cursor_is_pointer_over_swatches_and_button() {
        let store = store();
        let scene = loaded_scene(&store);
        let viewport = Viewport::default();
        assert_eq!(
            scene.cursor_hint(center(swatch_rect(0, 0)), viewport),
            CursorHint::Pointer
        );
        assert_eq!(
            scene.cursor_hint(center(START_BUTTON_RECT), viewport),
            CursorHint::Pointer
        );
        assert_eq!(
            scene.cursor_hint(Vec2::new(5.0, 5.0), viewport),
            CursorHint::Default
        );
    }

    #[test]
    fn render_draws_preview_and_every_swatch() {
        let store = store();
        let scene = loaded_scene(&store);
        let mut draw_list = DrawList::default();
        scene.render(Viewport::default(), &mut draw_list);
        // clear + highlight + 2 per swatch + 10 cavia ellipses + button fill/border
        assert_eq!(draw_list.len(), 1 + 1 + 5 * 8 * 2 + 10 + 2);
    }
}
