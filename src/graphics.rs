use macroquad::prelude::*;
use neuroflap::simulation::evolution::Evolution;
use neuroflap::simulation::event_log::EventKind;
use neuroflap::simulation::params::Params;

trait ToScreen {
    type Output;
    fn to_screen(&self, params: &Params) -> Self::Output;
}

impl ToScreen for (f32, f32) {
    type Output = (f32, f32);
    fn to_screen(&self, params: &Params) -> (f32, f32) {
        let scale_x = screen_width() / params.world_width;
        let scale_y = screen_height() / params.world_height;
        (self.0 * scale_x, self.1 * scale_y)
    }
}

impl ToScreen for f32 {
    type Output = f32;
    fn to_screen(&self, params: &Params) -> f32 {
        let scale_x = screen_width() / params.world_width;
        let scale_y = screen_height() / params.world_height;
        self * scale_x.min(scale_y)
    }
}

pub fn draw_pipes(state: &Evolution) {
    let params = state.params();

    for pipe in state.pipes() {
        for rect in [pipe.top_rect(params), pipe.bottom_rect(params)] {
            let (x, y) = (rect.x, rect.y).to_screen(params);
            let (w, h) = (rect.w, rect.h).to_screen(params);
            draw_rectangle(x, y, w, h, Color::from_rgba(0, 200, 0, 255));
        }
    }
}

pub fn draw_birds(state: &Evolution) {
    let params = state.params();
    let radius = (params.bird_size / 2.0).to_screen(params);

    state
        .birds()
        .iter()
        .filter(|bird| bird.alive)
        .for_each(|bird| {
            let center = (
                params.bird_x + params.bird_size / 2.0,
                bird.y + params.bird_size / 2.0,
            );
            let (x, y) = center.to_screen(params);
            draw_circle(
                x,
                y,
                radius,
                Color::from_rgba(bird.shade, bird.shade, bird.shade, 255),
            );
        });
}

pub fn draw_hud(state: &Evolution, ticks_per_frame: u32) {
    let font_size = 28.0;
    let line = 26.0;

    let lines = [
        format!("Score: {}", state.current_score()),
        format!("Best: {}", state.best_score()),
        format!("Alive: {}", state.alive_count()),
        format!("Generation: {}", state.generation()),
        format!(
            "Avg score: {:.1} ({} resets)",
            state.history().avg_max_score(),
            state.history().reinitialized_count()
        ),
        format!("Speed: {}x", ticks_per_frame),
    ];
    for (i, text) in lines.iter().enumerate() {
        draw_text(text, 10.0, 24.0 + i as f32 * line, font_size, BLACK);
    }

    // recent events along the bottom edge
    let event_font = 18.0;
    for (i, event) in state.event_log().events().iter().take(4).enumerate() {
        let color = match event.kind {
            EventKind::NewBest => DARKGREEN,
            EventKind::Reinitialized => GRAY,
            EventKind::Success => GOLD,
        };
        draw_text(
            &format!("Gen {}: {}", event.generation, event.description),
            10.0,
            screen_height() - 10.0 - i as f32 * 18.0,
            event_font,
            color,
        );
    }
}

pub fn draw_success_screen(state: &Evolution) {
    clear_background(Color::from_rgba(255, 255, 0, 255));

    let font_size = 36.0;
    for (i, text) in [
        "SUCCESS!".to_string(),
        format!("GENERATIONS: {}", state.generation()),
    ]
    .iter()
    .enumerate()
    {
        let size = measure_text(text, None, font_size as u16, 1.0);
        draw_text(
            text,
            screen_width() / 2. - size.width / 2.,
            screen_height() / 2. - 20.0 + i as f32 * 50.0,
            font_size,
            BLACK,
        );
    }
}
