//! Contract tests for window, drawing and input natives

use super::Host;
use builtins::DrawCommand;
use core_types::ErrorKind;
use interpreter::Value;

#[test]
fn test_init_window_uses_default_title() {
    let mut host = Host::new(None);
    host.run("InitWindow(320, 200)").unwrap();

    let surface = host.surface.borrow();
    let window = surface.window().unwrap();
    assert_eq!(window.title, "Gemstone VM");
    assert_eq!((window.width, window.height), (320, 200));
}

#[test]
fn test_gem_app_defaults() {
    let mut host = Host::new(None);
    host.run("GemApp()").unwrap();
    let surface = host.surface.borrow();
    let window = surface.window().unwrap();
    assert_eq!(window.title, "Gem App");
    assert_eq!((window.width, window.height), (600, 400));
}

#[test]
fn test_gem_app_with_size() {
    let mut host = Host::new(None);
    host.run("GemApp(\"Editor\", 800, 600.0)").unwrap();
    let surface = host.surface.borrow();
    let window = surface.window().unwrap();
    assert_eq!(window.title, "Editor");
    assert_eq!((window.width, window.height), (800, 600));
}

#[test]
fn test_drawing_records_commands() {
    let mut host = Host::new(None);
    host.run(
        "InitWindow(100, 100, \"t\")
         Rect(1, 2, 3, 4, \"red\")
         DrawBox(5, 6, 7, 8)
         Text(\"score\", 0, 0, 20, \"yellow\")
         DrawText(42, 10, 10)",
    )
    .unwrap();

    let surface = host.surface.borrow();
    assert_eq!(
        surface.display_list(),
        [
            DrawCommand::Rect { x: 1.0, y: 2.0, width: 3.0, height: 4.0, color: "red".into() },
            DrawCommand::Rect { x: 5.0, y: 6.0, width: 7.0, height: 8.0, color: "white".into() },
            DrawCommand::Text { text: "score".into(), x: 0.0, y: 0.0, size: 20, color: "yellow".into() },
            DrawCommand::Text { text: "42".into(), x: 10.0, y: 10.0, size: 12, color: "white".into() },
        ]
    );
}

#[test]
fn test_drawing_without_window_is_ignored() {
    let mut host = Host::new(None);
    host.run("Rect(1, 2, 3, 4, \"red\")").unwrap();
    assert!(host.surface.borrow().display_list().is_empty());
}

#[test]
fn test_only_loaded_images_are_drawn() {
    let mut host = Host::new(None);
    let result = host
        .run("InitWindow(10, 10) mem img = LoadImage(\"hero.png\") DrawImage(img, 1, 2) DrawImage(\"other.png\", 0, 0) img")
        .unwrap();
    assert_eq!(result, Value::from("hero.png"));
    assert_eq!(
        host.surface.borrow().display_list(),
        [DrawCommand::Image { path: "hero.png".into(), x: 1.0, y: 2.0 }]
    );
}

#[test]
fn test_input_queries_reflect_host_state() {
    let mut host = Host::new(None);
    {
        let mut surface = host.surface.borrow_mut();
        surface.press_key("Left");
        surface.move_mouse(12, 34);
        surface.set_mouse_down(true);
    }
    host.run("emit KeyDown(\"left\") emit KeyDown(\"LEFT\") emit KeyDown(\"up\") emit MouseX() emit MouseY() emit MouseDown()")
        .unwrap();
    assert_eq!(host.lines(), vec!["1", "1", "0", "12", "34", "1"]);
}

#[test]
fn test_argument_errors() {
    let mut host = Host::new(None);
    assert_eq!(host.run("Rect(1, 2)").unwrap_err().kind, ErrorKind::ArityError);
    assert_eq!(
        host.run("InitWindow(\"wide\", 10)").unwrap_err().kind,
        ErrorKind::TypeError
    );
    assert_eq!(host.run("MouseX(1)").unwrap_err().kind, ErrorKind::ArityError);
}
