//! Headless host surface: window, display list, input state, frame loop
//! and UI buttons.
//!
//! The surface is an explicit context object owned by the host. Natives
//! reach it through a shared handle and never keep it borrowed while the
//! interpreter runs user code, so a callback may itself draw or poll input.

use crate::args::{callable_arg, check_arity, int_arg, number_arg, text_arg_or};
use core_types::GemResult;
use interpreter::{Interpreter, Value};
use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Surface shared between the host and the natives
pub type SharedSurface = Rc<RefCell<Surface>>;

/// Surface configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
    /// Delay between frame loop ticks
    pub frame_interval: Duration,
    /// Stop the frame loop after this many ticks; unlimited when `None`
    pub max_frames: Option<u64>,
    /// Window size used by `GemApp` when none is given
    pub default_size: (i64, i64),
    /// Window title used by `InitWindow` when none is given
    pub default_title: String,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(16),
            max_frames: None,
            default_size: (600, 400),
            default_title: "Gemstone VM".to_string(),
        }
    }
}

/// An open window
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    /// Title bar text
    pub title: String,
    /// Width in pixels
    pub width: i64,
    /// Height in pixels
    pub height: i64,
}

/// One entry of the frame's display list
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled rectangle
    Rect {
        /// Left edge
        x: f64,
        /// Top edge
        y: f64,
        /// Width
        width: f64,
        /// Height
        height: f64,
        /// Fill color name or `#rrggbb`
        color: String,
    },
    /// Text anchored at its top-left corner
    Text {
        /// Text to draw
        text: String,
        /// Left edge
        x: f64,
        /// Top edge
        y: f64,
        /// Font size in points
        size: i64,
        /// Text color
        color: String,
    },
    /// Previously loaded image
    Image {
        /// Image path as passed to `LoadImage`
        path: String,
        /// Left edge
        x: f64,
        /// Top edge
        y: f64,
    },
}

/// A clickable button registered by `UIButton`
#[derive(Debug, Clone)]
pub struct Button {
    /// Button label
    pub label: String,
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Function called on click
    pub callback: Value,
}

/// Keyboard and mouse state as last reported by the host
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    keys_down: HashSet<String>,
    mouse_x: i64,
    mouse_y: i64,
    mouse_down: bool,
}

/// Headless drawing surface.
///
/// # Examples
///
/// ```
/// use builtins::{DrawCommand, Surface, SurfaceConfig};
///
/// let mut surface = Surface::new(SurfaceConfig::default());
/// surface.open_window("demo", 320, 200);
/// surface.draw(DrawCommand::Rect { x: 0.0, y: 0.0, width: 10.0, height: 10.0, color: "red".into() });
/// assert_eq!(surface.display_list().len(), 1);
///
/// surface.press_key("Left");
/// assert!(surface.is_key_down("left"));
/// ```
#[derive(Debug)]
pub struct Surface {
    config: SurfaceConfig,
    window: Option<Window>,
    display_list: Vec<DrawCommand>,
    images: HashSet<String>,
    input: InputState,
    buttons: Vec<Button>,
    pending_clicks: VecDeque<String>,
    running: bool,
    frames: u64,
}

impl Surface {
    /// Create a surface with no window open
    pub fn new(config: SurfaceConfig) -> Self {
        Self {
            config,
            window: None,
            display_list: Vec::new(),
            images: HashSet::new(),
            input: InputState::default(),
            buttons: Vec::new(),
            pending_clicks: VecDeque::new(),
            running: false,
            frames: 0,
        }
    }

    /// Wrap into a shared handle
    pub fn shared(config: SurfaceConfig) -> SharedSurface {
        Rc::new(RefCell::new(Self::new(config)))
    }

    /// Active configuration
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Open (or reopen) the window
    pub fn open_window(&mut self, title: impl Into<String>, width: i64, height: i64) {
        let window = Window {
            title: title.into(),
            width,
            height,
        };
        info!(title = %window.title, width, height, "window opened");
        self.window = Some(window);
    }

    /// The open window, if any
    pub fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }

    /// Close the window and stop the frame loop
    pub fn close_window(&mut self) {
        if self.window.take().is_some() {
            info!("window closed");
        }
        self.running = false;
    }

    /// Commands drawn since the last frame started
    pub fn display_list(&self) -> &[DrawCommand] {
        &self.display_list
    }

    /// Append a command; ignored while no window is open
    pub fn draw(&mut self, command: DrawCommand) {
        if self.window.is_none() {
            debug!(?command, "draw without a window ignored");
            return;
        }
        self.display_list.push(command);
    }

    /// Clear the display list
    pub fn clear(&mut self) {
        self.display_list.clear();
    }

    /// Remember an image path as loaded
    pub fn load_image(&mut self, path: impl Into<String>) {
        self.images.insert(path.into());
    }

    /// Whether `path` was loaded
    pub fn is_image_loaded(&self, path: &str) -> bool {
        self.images.contains(path)
    }

    /// Report a key press; names are case-insensitive
    pub fn press_key(&mut self, name: &str) {
        self.input.keys_down.insert(name.to_lowercase());
    }

    /// Report a key release
    pub fn release_key(&mut self, name: &str) {
        self.input.keys_down.remove(&name.to_lowercase());
    }

    /// Whether a key is held
    pub fn is_key_down(&self, name: &str) -> bool {
        self.input.keys_down.contains(&name.to_lowercase())
    }

    /// Report the pointer position
    pub fn move_mouse(&mut self, x: i64, y: i64) {
        self.input.mouse_x = x;
        self.input.mouse_y = y;
    }

    /// Report the primary button state
    pub fn set_mouse_down(&mut self, down: bool) {
        self.input.mouse_down = down;
    }

    /// Pointer x
    pub fn mouse_x(&self) -> i64 {
        self.input.mouse_x
    }

    /// Pointer y
    pub fn mouse_y(&self) -> i64 {
        self.input.mouse_y
    }

    /// Whether the primary button is held
    pub fn mouse_down(&self) -> bool {
        self.input.mouse_down
    }

    /// Register a button
    pub fn add_button(&mut self, button: Button) {
        debug!(label = %button.label, "button added");
        self.buttons.push(button);
    }

    /// Registered buttons
    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Queue a click on the button labelled `label`
    pub fn queue_click(&mut self, label: impl Into<String>) {
        self.pending_clicks.push_back(label.into());
    }

    /// Callback of the next queued click on a known button.
    ///
    /// Clicks on labels with no button are dropped.
    pub fn next_click(&mut self) -> Option<Value> {
        while let Some(label) = self.pending_clicks.pop_front() {
            match self.buttons.iter().find(|b| b.label == label) {
                Some(button) => return Some(button.callback.clone()),
                None => warn!(label = %label, "click on unknown button dropped"),
            }
        }
        None
    }

    /// Mark the frame loop as running
    pub fn start(&mut self) {
        self.running = true;
        self.frames = 0;
    }

    /// Stop the frame loop after the current tick
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Whether the frame loop is running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks run by the current or last frame loop
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Begin a tick if the loop should continue: clears the display list
    fn begin_frame(&mut self) -> bool {
        let under_limit = self.config.max_frames.map_or(true, |max| self.frames < max);
        if !self.running || !under_limit {
            self.running = false;
            return false;
        }
        self.frames += 1;
        self.display_list.clear();
        true
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(SurfaceConfig::default())
    }
}

/// Register the window, drawing, input, loop and UI natives
pub fn register(interp: &mut Interpreter, surface: &SharedSurface) {
    let s = Rc::clone(surface);
    interp.register_native("InitWindow", move |_, args| {
        check_arity("InitWindow", &args, 2, 3)?;
        let width = int_arg("InitWindow", &args, 0)?;
        let height = int_arg("InitWindow", &args, 1)?;
        let mut surface = s.borrow_mut();
        let title = text_arg_or(&args, 2, &surface.config.default_title);
        surface.open_window(title, width, height);
        Ok(Value::Nothing)
    });

    let s = Rc::clone(surface);
    interp.register_native("GemApp", move |_, args| {
        check_arity("GemApp", &args, 0, 3)?;
        let mut surface = s.borrow_mut();
        let (default_width, default_height) = surface.config.default_size;
        let title = text_arg_or(&args, 0, "Gem App");
        let width = if args.len() > 1 { int_arg("GemApp", &args, 1)? } else { default_width };
        let height = if args.len() > 2 { int_arg("GemApp", &args, 2)? } else { default_height };
        surface.open_window(title, width, height);
        Ok(Value::Nothing)
    });

    let s = Rc::clone(surface);
    interp.register_native("CloseWindow", move |_, args| {
        check_arity("CloseWindow", &args, 0, 0)?;
        s.borrow_mut().close_window();
        Ok(Value::Nothing)
    });

    let s = Rc::clone(surface);
    interp.register_native("Rect", move |_, args| {
        check_arity("Rect", &args, 5, 5)?;
        let command = rect_command("Rect", &args)?;
        s.borrow_mut().draw(command);
        Ok(Value::Nothing)
    });

    let s = Rc::clone(surface);
    interp.register_native("DrawBox", move |_, args| {
        check_arity("DrawBox", &args, 4, 5)?;
        let command = rect_command("DrawBox", &args)?;
        s.borrow_mut().draw(command);
        Ok(Value::Nothing)
    });

    let s = Rc::clone(surface);
    interp.register_native("Text", move |_, args| {
        check_arity("Text", &args, 5, 5)?;
        let command = text_command("Text", &args)?;
        s.borrow_mut().draw(command);
        Ok(Value::Nothing)
    });

    let s = Rc::clone(surface);
    interp.register_native("DrawText", move |_, args| {
        check_arity("DrawText", &args, 3, 5)?;
        let command = text_command("DrawText", &args)?;
        s.borrow_mut().draw(command);
        Ok(Value::Nothing)
    });

    let s = Rc::clone(surface);
    interp.register_native("LoadImage", move |_, args| {
        check_arity("LoadImage", &args, 1, 1)?;
        let path = args[0].to_string();
        s.borrow_mut().load_image(path.as_str());
        Ok(Value::String(path))
    });

    let s = Rc::clone(surface);
    interp.register_native("DrawImage", move |_, args| {
        check_arity("DrawImage", &args, 3, 3)?;
        let path = args[0].to_string();
        let x = number_arg("DrawImage", &args, 1)?;
        let y = number_arg("DrawImage", &args, 2)?;
        let mut surface = s.borrow_mut();
        if surface.is_image_loaded(&path) {
            surface.draw(DrawCommand::Image { path, x, y });
        }
        Ok(Value::Nothing)
    });

    let s = Rc::clone(surface);
    interp.register_native("KeyDown", move |_, args| {
        check_arity("KeyDown", &args, 1, 1)?;
        let held = s.borrow().is_key_down(&args[0].to_string());
        Ok(Value::from_bool(held))
    });

    let s = Rc::clone(surface);
    interp.register_native("MouseX", move |_, args| {
        check_arity("MouseX", &args, 0, 0)?;
        Ok(Value::Int(s.borrow().mouse_x()))
    });

    let s = Rc::clone(surface);
    interp.register_native("MouseY", move |_, args| {
        check_arity("MouseY", &args, 0, 0)?;
        Ok(Value::Int(s.borrow().mouse_y()))
    });

    let s = Rc::clone(surface);
    interp.register_native("MouseDown", move |_, args| {
        check_arity("MouseDown", &args, 0, 0)?;
        Ok(Value::from_bool(s.borrow().mouse_down()))
    });

    let s = Rc::clone(surface);
    interp.register_native("GameLoop", move |interp, args| {
        check_arity("GameLoop", &args, 1, 1)?;
        let update = callable_arg("GameLoop", &args, 0)?;
        run_frame_loop(interp, &s, &update)?;
        Ok(Value::Nothing)
    });

    let s = Rc::clone(surface);
    interp.register_native("UIButton", move |_, args| {
        check_arity("UIButton", &args, 4, 4)?;
        let button = Button {
            label: args[0].to_string(),
            x: number_arg("UIButton", &args, 1)?,
            y: number_arg("UIButton", &args, 2)?,
            callback: callable_arg("UIButton", &args, 3)?,
        };
        s.borrow_mut().add_button(button);
        Ok(Value::Nothing)
    });

    let s = Rc::clone(surface);
    interp.register_native("Run", move |interp, args| {
        check_arity("Run", &args, 0, 0)?;
        dispatch_clicks(interp, &s)?;
        Ok(Value::Nothing)
    });
}

fn rect_command(name: &str, args: &[Value]) -> GemResult<DrawCommand> {
    Ok(DrawCommand::Rect {
        x: number_arg(name, args, 0)?,
        y: number_arg(name, args, 1)?,
        width: number_arg(name, args, 2)?,
        height: number_arg(name, args, 3)?,
        color: text_arg_or(args, 4, "white"),
    })
}

fn text_command(name: &str, args: &[Value]) -> GemResult<DrawCommand> {
    let size = if args.len() > 3 { int_arg(name, args, 3)? } else { 12 };
    Ok(DrawCommand::Text {
        text: args[0].to_string(),
        x: number_arg(name, args, 1)?,
        y: number_arg(name, args, 2)?,
        size,
        color: text_arg_or(args, 4, "white"),
    })
}

/// Tick `update` until the surface stops or the frame limit is reached.
///
/// An error from `update` stops the loop and is returned.
pub fn run_frame_loop(
    interp: &mut Interpreter,
    surface: &SharedSurface,
    update: &Value,
) -> GemResult<()> {
    let interval = {
        let mut s = surface.borrow_mut();
        s.start();
        s.config.frame_interval
    };
    info!(?interval, "frame loop started");

    loop {
        let ticking = surface.borrow_mut().begin_frame();
        if !ticking {
            break;
        }
        if let Err(err) = interp.call_function(update, vec![]) {
            surface.borrow_mut().stop();
            warn!(error = %err, "frame loop stopped by error");
            return Err(err);
        }
        if !interval.is_zero() {
            std::thread::sleep(interval);
        }
    }

    info!(frames = surface.borrow().frames(), "frame loop finished");
    Ok(())
}

/// Call the callback of every queued click, in order
pub fn dispatch_clicks(interp: &mut Interpreter, surface: &SharedSurface) -> GemResult<usize> {
    let mut handled = 0;
    loop {
        let next = surface.borrow_mut().next_click();
        match next {
            Some(callback) => {
                interp.call_function(&callback, vec![])?;
                handled += 1;
            }
            None => break,
        }
    }
    debug!(handled, "click queue drained");
    Ok(handled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_requires_window() {
        let mut surface = Surface::default();
        let rect = DrawCommand::Rect {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
            color: "red".into(),
        };
        surface.draw(rect.clone());
        assert!(surface.display_list().is_empty());

        surface.open_window("t", 10, 10);
        surface.draw(rect.clone());
        assert_eq!(surface.display_list(), [rect]);
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let mut surface = Surface::default();
        surface.press_key("SPACE");
        assert!(surface.is_key_down("space"));
        surface.release_key("Space");
        assert!(!surface.is_key_down("space"));
    }

    #[test]
    fn test_begin_frame_respects_limit() {
        let mut surface = Surface::new(SurfaceConfig {
            max_frames: Some(2),
            ..SurfaceConfig::default()
        });
        assert!(!surface.begin_frame());
        surface.start();
        assert!(surface.begin_frame());
        assert!(surface.begin_frame());
        assert!(!surface.begin_frame());
        assert!(!surface.is_running());
        assert_eq!(surface.frames(), 2);
    }

    #[test]
    fn test_unknown_clicks_are_dropped() {
        let mut surface = Surface::default();
        surface.add_button(Button {
            label: "ok".into(),
            x: 0.0,
            y: 0.0,
            callback: Value::Int(1),
        });
        surface.queue_click("missing");
        surface.queue_click("ok");
        assert_eq!(surface.next_click(), Some(Value::Int(1)));
        assert_eq!(surface.next_click(), None);
    }
}
