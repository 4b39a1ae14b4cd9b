use glam::{IVec2, UVec2};
use raycaster::assets::Assets;
use raycaster::config::{self, Config};
use raycaster::frame::FramePacer;
use raycaster::game::{Game, GameState, InputEvent};
use raycaster::player::Action;
use raycaster::surface::{Rgb, ScreenRect, Surface};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use sdl2::render::Canvas;
use sdl2::video::Window;

// helper trait to convert strings into std::error types
trait StringToAnyhow<T> {
    fn ah(self) -> anyhow::Result<T>;
}

impl<T> StringToAnyhow<T> for Result<T, String> {
    fn ah(self) -> anyhow::Result<T> {
        self.map_err(|err| anyhow::anyhow!("{err}"))
    }
}

/// the window's canvas as a draw target
struct Screen(Canvas<Window>);

fn color(rgb: Rgb) -> Color {
    Color::RGB(rgb.r, rgb.g, rgb.b)
}

impl Surface for Screen {
    fn clear(&mut self, rgb: Rgb) -> anyhow::Result<()> {
        self.0.set_draw_color(color(rgb));
        self.0.clear();
        Ok(())
    }

    fn fill_rect(&mut self, rect: ScreenRect, rgb: Rgb) -> anyhow::Result<()> {
        self.0.set_draw_color(color(rgb));
        self.0
            .fill_rect(Rect::new(rect.x, rect.y, rect.w, rect.h))
            .ah()
    }

    fn draw_line(&mut self, from: IVec2, to: IVec2, rgb: Rgb) -> anyhow::Result<()> {
        self.0.set_draw_color(color(rgb));
        self.0
            .draw_line(Point::new(from.x, from.y), Point::new(to.x, to.y))
            .ah()
    }
}

/// keyboard binding for the logical inputs
fn binding(key: Keycode) -> Option<Action> {
    match key {
        Keycode::W => Some(Action::Forward),
        Keycode::S => Some(Action::Back),
        Keycode::A => Some(Action::StrafeLeft),
        Keycode::D => Some(Action::StrafeRight),
        Keycode::Left => Some(Action::RotateLeft),
        Keycode::Right => Some(Action::RotateRight),
        _ => None,
    }
}

fn translate(event: Event) -> Option<InputEvent> {
    match event {
        Event::Quit { .. } => Some(InputEvent::Quit),
        Event::KeyUp {
            keycode: Some(Keycode::Escape),
            ..
        } => Some(InputEvent::Quit),
        Event::KeyDown {
            keycode: Some(Keycode::M),
            repeat: false,
            ..
        } => Some(InputEvent::ToggleMinimap),
        Event::KeyDown {
            keycode: Some(k), ..
        } => binding(k).map(InputEvent::Pressed),
        Event::KeyUp {
            keycode: Some(k), ..
        } => binding(k).map(InputEvent::Released),
        _ => None,
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_custom_env(config::ENV_LOG);
    let config = Config::from_env()?;

    log::info!("initializing game state");
    let mut assets = Assets::default();
    let mut game = Game::load(&mut assets, &config)?;

    // sdl boilerplate
    log::info!("initializing sdl2");
    let sdl_ctx = sdl2::init().ah()?;
    log::info!("initializing video");
    let video = sdl_ctx.video().ah()?;

    log::info!("initializing window");
    let UVec2 { x: width, y: height } = config.window;
    let mut window = video
        .window("RayCaster", width, height)
        .position_centered()
        .build()?;
    window.set_resizable(false);
    log::info!("creating canvas");
    let mut screen = Screen(window.into_canvas().present_vsync().build()?);
    log::info!("pumping events");
    let mut events = sdl_ctx.event_pump().ah()?;

    let mut pacer = FramePacer::new(config.target_fps);

    'main_loop: loop {
        pacer.begin();

        // handle events
        for ev in events.poll_iter() {
            if let Some(input) = translate(ev) {
                game.handle(input);
            }
            if game.game_state == GameState::Exit {
                break 'main_loop;
            }
        }

        game.update(pacer.dt());

        // draw game
        if let Err(err) = game.render(&mut screen, config.window) {
            log::error!("error while in game state {:?}: {err}", game.game_state);
            return Err(err);
        }
        screen.0.present();

        pacer.finish();
    }

    log::info!("shutting down");
    Ok(())
}
