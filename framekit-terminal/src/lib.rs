/// Terminal front-end: orbit a camera around boxes that swing through each
/// other and draw their bounding volumes as ASCII wireframes.
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::Color,
    terminal::{self},
};
use framekit_core::{
    closest_point_on_plane, viewport_matrix, Aabb, Camera, ConfigError, ConfigTree, Entity,
    EntityId, MathError, Matrix, MatrixStack, Plane, Scene, SceneError, Vector,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::AsciiCanvas;

/// Errors surfaced by the terminal app.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Math(#[from] MathError),
}

/// Tunables read from the `[camera]` and `[render]` config tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub fov_deg: f32,
    pub distance: f32,
    pub near: f32,
    pub far: f32,
    /// Radians per key press.
    pub orbit_speed: f32,
    pub fps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fov_deg: 60.0,
            distance: 9.0,
            near: 0.1,
            far: 100.0,
            orbit_speed: 0.1,
            fps: 30,
        }
    }
}

impl Settings {
    pub fn from_config(config: &ConfigTree) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let fps = config.get_i64_or("render.fps", defaults.fps as i64)?;
        let fps = if (1..=240).contains(&fps) {
            fps as u32
        } else {
            tracing::warn!(fps, "render.fps out of range, using {}", defaults.fps);
            defaults.fps
        };

        Ok(Self {
            fov_deg: config.get_f32_or("camera.fov_deg", defaults.fov_deg)?,
            distance: config.get_f32_or("camera.distance", defaults.distance)?,
            near: config.get_f32_or("camera.near", defaults.near)?,
            far: config.get_f32_or("camera.far", defaults.far)?,
            orbit_speed: config.get_f32_or("camera.orbit_speed", defaults.orbit_speed)?,
            fps,
        })
    }
}

/// A group of entities moved together by one model transform.
struct Body {
    root: EntityId,
    members: Vec<EntityId>,
    anchor: [f32; 3],
    swing: f32,
    spin: f32,
    bounds: Aabb,
}

impl Body {
    /// Model transform at time `t`: spin about the local Y axis, then slide
    /// along X around the anchor.
    fn model(&self, stack: &mut MatrixStack, t: f32) -> Result<Matrix, MathError> {
        let [x, y, z] = self.anchor;
        stack.push(&Matrix::translate(x + self.swing * t.sin(), y, z));
        stack.push(&Matrix::rotate_y(self.spin * t));
        let model = stack.composition();
        stack.pop()?;
        stack.pop()?;
        Ok(model)
    }
}

/// Build the demo scene: a plain box plus a box carrying a small child box.
fn demo_scene() -> Result<(Scene, Vec<Body>), SceneError> {
    let mut scene = Scene::new();

    let left = scene.add(Entity::cube("left", 2.0));

    let right = scene.add(Entity::cube("right", 1.5));
    let mut antenna = Entity::cube("antenna", 0.5);
    antenna.transform(&Matrix::translate(0.0, 1.25, 0.0));
    let antenna = scene.add(antenna);
    scene.attach(right, "antenna", antenna)?;

    let bodies = vec![
        Body {
            root: left,
            members: vec![left],
            anchor: [-2.0, 0.0, 0.0],
            swing: 1.5,
            spin: 0.7,
            bounds: Aabb::empty(),
        },
        Body {
            root: right,
            members: vec![right, antenna],
            anchor: [2.0, 0.0, 0.0],
            swing: -1.5,
            spin: -1.1,
            bounds: Aabb::empty(),
        },
    ];
    Ok((scene, bodies))
}

/// Main application struct for terminal rendering
pub struct TerminalApp {
    settings: Settings,
    base: Scene,
    world: Scene,
    bodies: Vec<Body>,
    stack: MatrixStack,
    ground: Plane,
    camera: Camera,
    canvas: AsciiCanvas,
    running: bool,
    paused: bool,
    time: f32,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(settings: Settings) -> Result<Self, AppError> {
        let (width, height) = terminal::size()?;
        let (base, bodies) = demo_scene()?;

        let mut camera = Camera::new(width as u32, height as u32);
        // Cells are roughly twice as tall as they are wide.
        camera.aspect = width as f32 / (2.0 * height.max(1) as f32);
        camera.fov = settings.fov_deg.to_radians();
        camera.near = settings.near;
        camera.far = settings.far;
        camera.eye = Vector::point(0.0, 0.0, -settings.distance);
        camera.orbit(0.0, 0.3);

        tracing::info!(width, height, ?settings, "starting terminal app");

        Ok(Self {
            world: base.clone(),
            base,
            bodies,
            stack: MatrixStack::with_capacity(4),
            ground: Plane::new(Vector::point(0.0, -2.0, 0.0), Vector::direction(0.0, 1.0, 0.0)),
            camera,
            canvas: AsciiCanvas::new(width as usize, height as usize),
            settings,
            running: true,
            paused: false,
            time: 0.0,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> Result<(), AppError> {
        let target_frame_time = Duration::from_millis(1000 / self.settings.fps as u64);

        while self.running {
            let frame_start = Instant::now();

            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            if !self.paused {
                self.time += target_frame_time.as_secs_f32();
            }
            self.update()?;
            self.render()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let step = self.settings.orbit_speed;
        match event::read()? {
            Event::Key(KeyEvent { code, .. }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                KeyCode::Char(' ') => self.paused = !self.paused,
                KeyCode::Char('w') | KeyCode::Up => self.camera.orbit(0.0, step),
                KeyCode::Char('s') | KeyCode::Down => self.camera.orbit(0.0, -step),
                KeyCode::Char('a') | KeyCode::Left => self.camera.orbit(-step, 0.0),
                KeyCode::Char('d') | KeyCode::Right => self.camera.orbit(step, 0.0),
                _ => {}
            },
            Event::Resize(width, height) => {
                self.canvas.resize(width as usize, height as usize);
                self.camera.aspect = width as f32 / (2.0 * height.max(1) as f32);
            }
            _ => {}
        }
        Ok(())
    }

    /// Move every body to its pose at the current time and refit its bounds.
    fn update(&mut self) -> Result<(), AppError> {
        self.world = self.base.clone();
        for body in &mut self.bodies {
            let model = body.model(&mut self.stack, self.time)?;
            for &id in &body.members {
                if let Some(entity) = self.world.get_mut(id) {
                    entity.transform(&model);
                }
            }
            body.bounds.compute_bounds(&self.world, body.root)?;
        }
        Ok(())
    }

    fn colliding(&self, index: usize) -> bool {
        self.bodies
            .iter()
            .enumerate()
            .any(|(i, other)| i != index && self.bodies[index].bounds.is_colliding(&other.bounds))
    }

    fn render(&mut self) -> Result<(), AppError> {
        let (width, height) = (self.canvas.width() as u32, self.canvas.height() as u32);
        let view = self.camera.view_projection();
        let viewport = viewport_matrix(width, height);

        self.canvas.clear();

        // Shadows first so wireframes overwrite them.
        for body in &self.bodies {
            for corner in body.bounds.corners() {
                let shadow = closest_point_on_plane(&corner, &self.ground);
                if let Some((x, y, _)) =
                    self.camera
                        .project_to_screen(&shadow, &Matrix::identity(), width, height)
                {
                    self.canvas.plot(x as i32, y as i32, '.', Color::DarkGrey);
                }
            }
        }

        for (index, body) in self.bodies.iter().enumerate() {
            let behind = body
                .bounds
                .corners()
                .iter()
                .any(|c| self.camera.view_depth(c) < self.camera.near);
            if behind {
                continue;
            }

            let color = if self.colliding(index) {
                Color::Red
            } else {
                Color::Green
            };
            self.canvas.set_pen('#', color);
            body.bounds.draw(&mut self.canvas, &view, &viewport);
        }

        for entity_id in self.bodies.iter().flat_map(|b| b.members.iter()) {
            let Some(entity) = self.world.get(*entity_id) else {
                continue;
            };
            for p in &entity.points {
                if let Some((x, y, _)) =
                    self.camera.project_to_screen(p, &Matrix::identity(), width, height)
                {
                    self.canvas.plot(x as i32, y as i32, '@', Color::Cyan);
                }
            }
        }

        let status = format!(
            "framekit | FPS: {:.1} | dist {:.1} | WASD/Arrows=Orbit Space=Pause Q=Quit{}",
            self.fps,
            self.camera.distance(),
            if self.paused { " [paused]" } else { "" }
        );
        self.canvas.put_str(0, 0, &status, Color::Yellow);
        if self.canvas.dropped_lines() > 0 {
            tracing::trace!(dropped = self.canvas.dropped_lines(), "dropped off-screen lines");
        }

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.canvas.draw(&mut stdout)?;
        stdout.flush()?;
        Ok(())
    }
}
